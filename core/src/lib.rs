//! Core types and validation for command invocation schemas.
//!
//! This crate defines the foundational types for modeling the declared
//! argument/option contract of invocable commands:
//!
//! - [`CommandSchema`] — the full declared contract for one command
//!   (arguments in declaration order, agent cross-references).
//! - [`ArgumentSpec`] — one argument/option with kind, type, requiredness,
//!   and an optional default.
//! - [`ValueType`] / [`ArgValue`] — declared types and resolved typed values.
//! - [`CommandDeclaration`] — the raw structured form produced by an external
//!   text-extraction collaborator, turned into a schema by
//!   [`parse_declaration`].
//!
//! Validation ([`validate_schema`]) catches structural errors such as bad
//! command names, duplicate arguments, empty choice sets, mistyped defaults,
//! and misordered positionals, in a fixed rule order so a given schema always
//! produces the same error.
//!
//! Coercion ([`coerce`]) converts raw string tokens to typed values and is
//! shared between declaration parsing and invocation resolution.
//!
//! # Example
//!
//! ```
//! use command_invoke_core::*;
//!
//! let schema = CommandSchema::new("build")
//!     .with_argument(
//!         ArgumentSpec::option(
//!             "platform",
//!             ValueType::Choice(vec!["ios".into(), "android".into()]),
//!         )
//!         .required()
//!         .with_description("Target platform"),
//!     )
//!     .with_agent_ref("flutter-platform-core");
//!
//! assert!(validate_schema(&schema).is_ok());
//! assert_eq!(coerce("ios", &schema.find_argument("platform").unwrap().value_type),
//!     Ok(ArgValue::String("ios".into())));
//! ```

mod declaration;
mod types;
mod validate;
mod value;

pub use declaration::{parse_declaration, ArgumentDeclaration, CommandDeclaration, DeclaredType};
pub use types::{ArgKind, ArgValue, ArgumentSpec, CommandSchema, ValueType};
pub use validate::{validate_schema, SchemaError};
pub use value::{coerce, CoerceError};
