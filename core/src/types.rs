//! Schema type definitions for command argument contracts.
//!
//! This module defines the core data model used to represent the declared
//! argument/option contract of an invocable command. The types are designed
//! for serialization with [`serde`] and round-trip through JSON.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How an argument is supplied in an invocation.
///
/// Positional arguments are bound from the ordered token list in declaration
/// order; options are bound from the `--flag value` map by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// Bound by position from the ordered token list (the default).
    #[default]
    Positional,
    /// Bound by name from the option map.
    Option,
}

/// Declared value type for an argument.
///
/// Determines how a raw string token is coerced during resolution. The
/// `Choice` variant restricts values to a fixed set of alternatives.
///
/// # Examples
///
/// ```
/// use command_invoke_core::ValueType;
///
/// let vt = ValueType::default();
/// assert_eq!(vt, ValueType::String);
///
/// let platform = ValueType::Choice(vec!["ios".into(), "android".into()]);
/// assert!(matches!(platform, ValueType::Choice(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free-form string value (the default).
    #[default]
    String,
    /// Boolean value, written `true`/`false` (case-insensitive).
    Boolean,
    /// Base-10 signed integer.
    Integer,
    /// One of a fixed, case-sensitive set of alternatives.
    Choice(Vec<String>),
}

impl ValueType {
    /// Short lowercase name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Choice(_) => "choice",
        }
    }
}

/// A resolved, typed argument value.
///
/// Produced by coercing a raw string token against a [`ValueType`], or taken
/// from an [`ArgumentSpec`] default. `Choice` arguments resolve to
/// [`ArgValue::String`]; a variadic positional resolves to
/// [`ArgValue::List`] (one element per token, never nested).
///
/// # Examples
///
/// ```
/// use command_invoke_core::ArgValue;
///
/// let v = ArgValue::Boolean(true);
/// assert_eq!(v.as_boolean(), Some(true));
/// assert_eq!(v.as_integer(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// A boolean value.
    Boolean(bool),
    /// A signed integer value.
    Integer(i64),
    /// A string (also used for resolved `Choice` values).
    String(String),
    /// Values of a variadic positional, in token order.
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Returns the string value, if this is a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ArgValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the element slice, if this is a variadic list.
    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Checks whether this value satisfies a declared type.
    ///
    /// `Choice` is satisfied by a string that is a member of the choice set;
    /// a list satisfies a type when every element does.
    pub fn matches_type(&self, value_type: &ValueType) -> bool {
        match (self, value_type) {
            (ArgValue::String(_), ValueType::String) => true,
            (ArgValue::Boolean(_), ValueType::Boolean) => true,
            (ArgValue::Integer(_), ValueType::Integer) => true,
            (ArgValue::String(s), ValueType::Choice(choices)) => choices.iter().any(|c| c == s),
            (ArgValue::List(items), vt) => items.iter().all(|item| item.matches_type(vt)),
            _ => false,
        }
    }
}

/// One declared argument or option and its type contract.
///
/// Use the constructors [`positional`](ArgumentSpec::positional) and
/// [`option`](ArgumentSpec::option), then chain builder methods. Positionals
/// start out required, options start out optional, matching the common case.
///
/// # Examples
///
/// ```
/// use command_invoke_core::{ArgKind, ArgValue, ArgumentSpec, ValueType};
///
/// let platform = ArgumentSpec::option(
///     "platform",
///     ValueType::Choice(vec!["ios".into(), "android".into()]),
/// )
/// .required();
/// assert_eq!(platform.kind, ArgKind::Option);
/// assert!(platform.required);
///
/// let coverage = ArgumentSpec::option("coverage", ValueType::Boolean)
///     .with_default(ArgValue::Boolean(false));
/// assert!(!coverage.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Argument name, unique within its command.
    pub name: String,
    /// Whether this is bound by position or by flag name.
    pub kind: ArgKind,
    /// Declared value type.
    pub value_type: ValueType,
    /// Must a value be bound for resolution to succeed?
    pub required: bool,
    /// Does this positional absorb all remaining tokens? At most one
    /// positional per command may be variadic, and it must be last.
    pub variadic: bool,
    /// Value used when the invocation provides none.
    pub default: Option<ArgValue>,
    /// Description from the declaration source.
    pub description: Option<String>,
}

impl ArgumentSpec {
    /// Creates a required positional argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_invoke_core::{ArgKind, ArgumentSpec, ValueType};
    ///
    /// let arg = ArgumentSpec::positional("feature", ValueType::String);
    /// assert_eq!(arg.kind, ArgKind::Positional);
    /// assert!(arg.required);
    /// ```
    pub fn positional(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            kind: ArgKind::Positional,
            value_type,
            required: true,
            variadic: false,
            default: None,
            description: None,
        }
    }

    /// Creates an optional named option.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_invoke_core::{ArgKind, ArgumentSpec, ValueType};
    ///
    /// let arg = ArgumentSpec::option("verbose", ValueType::Boolean);
    /// assert_eq!(arg.kind, ArgKind::Option);
    /// assert!(!arg.required);
    /// ```
    pub fn option(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            kind: ArgKind::Option,
            value_type,
            required: false,
            variadic: false,
            default: None,
            description: None,
        }
    }

    /// Marks as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Marks as variadic (positionals only; validated at schema level).
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: ArgValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// The full declared contract for one invocable command.
///
/// Holds the argument specs in declaration order plus the names of the agents
/// the command references. Schemas are created once at load time, validated
/// (see [`validate_schema`](crate::validate_schema)), and never mutated; the
/// registry takes ownership at registration.
///
/// # Examples
///
/// ```
/// use command_invoke_core::{ArgumentSpec, CommandSchema, ValueType};
///
/// let schema = CommandSchema::new("build")
///     .with_argument(
///         ArgumentSpec::option(
///             "platform",
///             ValueType::Choice(vec!["ios".into(), "android".into()]),
///         )
///         .required(),
///     )
///     .with_agent_ref("flutter-platform-core");
///
/// assert_eq!(schema.name, "build");
/// assert!(schema.find_argument("platform").is_some());
/// assert!(schema.agent_refs.contains("flutter-platform-core"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Command name (must match `^[a-z][a-z0-9-]*$`).
    pub name: String,
    /// Argument specs in declaration order, names unique.
    pub arguments: Vec<ArgumentSpec>,
    /// Names of agents this command references. Every entry must exist in
    /// the registry's known-agent set at finalization.
    pub agent_refs: BTreeSet<String>,
}

impl CommandSchema {
    /// Creates an empty schema with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Appends an argument spec.
    pub fn with_argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds an agent cross-reference.
    pub fn with_agent_ref(mut self, agent: &str) -> Self {
        self.agent_refs.insert(agent.to_string());
        self
    }

    /// Finds an argument by name.
    pub fn find_argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Iterates positional specs in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments
            .iter()
            .filter(|a| a.kind == ArgKind::Positional)
    }

    /// Iterates option specs in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter().filter(|a| a.kind == ArgKind::Option)
    }

    /// All argument names in declaration order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|a| a.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_spec_builders() {
        let arg = ArgumentSpec::option("coverage", ValueType::Boolean)
            .with_default(ArgValue::Boolean(false))
            .with_description("Collect coverage");

        assert_eq!(arg.name, "coverage");
        assert_eq!(arg.kind, ArgKind::Option);
        assert!(!arg.required);
        assert_eq!(arg.default, Some(ArgValue::Boolean(false)));
    }

    #[test]
    fn test_positional_is_required_by_default() {
        let arg = ArgumentSpec::positional("feature", ValueType::String);
        assert!(arg.required);

        let relaxed = ArgumentSpec::positional("pattern", ValueType::String).optional();
        assert!(!relaxed.required);
    }

    #[test]
    fn test_schema_find_argument() {
        let schema = CommandSchema::new("test")
            .with_argument(ArgumentSpec::option("coverage", ValueType::Boolean))
            .with_argument(ArgumentSpec::positional("target", ValueType::String));

        assert!(schema.find_argument("coverage").is_some());
        assert!(schema.find_argument("watch").is_none());
        assert_eq!(schema.positionals().count(), 1);
        assert_eq!(schema.options().count(), 1);
    }

    #[test]
    fn test_arg_value_matches_type() {
        let choices = ValueType::Choice(vec!["ios".into(), "android".into()]);

        assert!(ArgValue::String("ios".into()).matches_type(&choices));
        assert!(!ArgValue::String("windows".into()).matches_type(&choices));
        assert!(ArgValue::Integer(3).matches_type(&ValueType::Integer));
        assert!(!ArgValue::Integer(3).matches_type(&ValueType::Boolean));
        assert!(
            ArgValue::List(vec![ArgValue::String("a".into())]).matches_type(&ValueType::String)
        );
    }
}
