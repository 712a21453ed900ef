//! The resolved invocation record.

use std::collections::BTreeMap;

use command_invoke_core::ArgValue;
use serde::Serialize;

/// The typed, validated result of resolving one invocation.
///
/// Created per invocation by [`resolve`](crate::resolve) and consumed
/// immediately by the execution layer; it has no further lifecycle and is
/// never cached. An argument that was neither supplied nor defaulted simply
/// has no entry in `values` — absence is the explicit "unset" marker, so a
/// consumer can always tell "not provided" apart from "explicitly set to a
/// falsy value".
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use command_invoke_core::{ArgValue, ArgumentSpec, CommandSchema, ValueType};
/// use command_invoke_registry::RegistryBuilder;
/// use command_invoke_resolver::{resolve, RawInvocation};
///
/// let mut builder = RegistryBuilder::new();
/// builder
///     .register(CommandSchema::new("test").with_argument(
///         ArgumentSpec::option("coverage", ValueType::Boolean)
///             .with_default(ArgValue::Boolean(false)),
///     ))
///     .unwrap();
/// let registry = builder.finalize(BTreeSet::new()).unwrap();
///
/// let context = resolve(&registry, &RawInvocation::new("test")).unwrap();
/// assert_eq!(context.get_boolean("coverage"), Some(false));
/// assert!(!context.is_set("missing"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationContext {
    /// The resolved command name.
    pub command: String,
    /// Resolved typed values, keyed by argument name.
    pub values: BTreeMap<String, ArgValue>,
    /// The original option map (after last-wins folding), kept for audit and
    /// logging by downstream layers.
    pub raw_options: BTreeMap<String, String>,
}

impl InvocationContext {
    /// Returns the resolved value for an argument, if set.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Returns the resolved string value for an argument, if set and a string.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ArgValue::as_string)
    }

    /// Returns the resolved boolean value for an argument, if set and a boolean.
    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(ArgValue::as_boolean)
    }

    /// Returns the resolved integer value for an argument, if set and an integer.
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(ArgValue::as_integer)
    }

    /// Whether the argument was bound (supplied or defaulted).
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
