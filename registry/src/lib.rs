//! Validated command schema registry with agent cross-reference checking.
//!
//! This crate aggregates [`CommandSchema`](command_invoke_core::CommandSchema)s
//! built during a single-threaded load phase into an immutable [`Registry`]:
//!
//! - [`RegistryBuilder`] — accumulates schemas, rejecting duplicate command
//!   names as they arrive.
//! - [`RegistryBuilder::finalize`] — checks every agent cross-reference
//!   against a supplied known-agent set, collecting **all** dangling
//!   references before failing, and produces the registry only when the whole
//!   set resolves (fail closed).
//! - [`Registry`] — read-only lookup by command name; safe for concurrent
//!   reads without locking.
//!
//! # Quick start
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use command_invoke_core::CommandSchema;
//! use command_invoke_registry::RegistryBuilder;
//!
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .register(CommandSchema::new("add-backend").with_agent_ref("flutter-firebase-core"))
//!     .unwrap();
//! builder.register(CommandSchema::new("sync-docs")).unwrap();
//!
//! let known: BTreeSet<String> = ["flutter-firebase-core".to_string()].into();
//! let registry = builder.finalize(known).unwrap();
//!
//! assert_eq!(registry.commands(), vec!["add-backend", "sync-docs"]);
//! ```

mod error;
mod registry;

pub use error::{RegistryError, Result};
pub use registry::{Registry, RegistryBuilder};
