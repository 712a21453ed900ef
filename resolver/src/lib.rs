//! Invocation resolution against a validated command schema registry.
//!
//! This crate binds a tokenized invocation — command name, ordered positional
//! tokens, and `--flag value` pairs — to its
//! [`CommandSchema`](command_invoke_core::CommandSchema), applying defaults,
//! coercing raw strings to their declared types, and rejecting unknown flags:
//!
//! - [`RawInvocation`] — the tokenizer's output, this crate's input.
//! - [`resolve`] — the binding algorithm; pure, synchronous, and
//!   all-or-nothing (an error means no context was built).
//! - [`InvocationContext`] — the typed, immutable result handed to the
//!   execution layer.
//! - [`ResolveError`] — structured invocation-time failures, presentable
//!   verbatim to an end user.
//!
//! # Quick start
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use command_invoke_core::{ArgValue, ArgumentSpec, CommandSchema, ValueType};
//! use command_invoke_registry::RegistryBuilder;
//! use command_invoke_resolver::{resolve, RawInvocation};
//!
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .register(
//!         CommandSchema::new("test").with_argument(
//!             ArgumentSpec::option("coverage", ValueType::Boolean)
//!                 .with_default(ArgValue::Boolean(false)),
//!         ),
//!     )
//!     .unwrap();
//! let registry = builder.finalize(BTreeSet::new()).unwrap();
//!
//! // No flags: the declared default applies.
//! let context = resolve(&registry, &RawInvocation::new("test")).unwrap();
//! assert_eq!(context.get_boolean("coverage"), Some(false));
//!
//! // Explicit flag: coerced case-insensitively.
//! let context = resolve(
//!     &registry,
//!     &RawInvocation::new("test").option("coverage", "True"),
//! )
//! .unwrap();
//! assert_eq!(context.get_boolean("coverage"), Some(true));
//! ```

mod context;
mod error;
mod invocation;
mod resolve;

pub use context::InvocationContext;
pub use error::{ResolveError, Result};
pub use invocation::RawInvocation;
pub use resolve::resolve;
