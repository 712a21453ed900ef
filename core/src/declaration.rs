//! Raw command declarations and their conversion to validated schemas.
//!
//! A [`CommandDeclaration`] is the structured form produced by an external
//! text-extraction collaborator (the corpus expresses these as Markdown
//! documents with an arguments section; extracting that text is not this
//! crate's job). [`parse_declaration`] turns one into a validated
//! [`CommandSchema`] or fails with the first violated rule.
//!
//! # Examples
//!
//! ```
//! use command_invoke_core::{parse_declaration, CommandDeclaration};
//!
//! let declaration: CommandDeclaration = serde_json::from_str(
//!     r#"{
//!         "name": "build",
//!         "arguments": [
//!             {
//!                 "name": "platform",
//!                 "kind": "option",
//!                 "type": "choice",
//!                 "required": true,
//!                 "choices": ["ios", "android"]
//!             }
//!         ],
//!         "agents": ["flutter-platform-core"]
//!     }"#,
//! )
//! .unwrap();
//!
//! let schema = parse_declaration(&declaration).unwrap();
//! assert_eq!(schema.name, "build");
//! assert!(schema.agent_refs.contains("flutter-platform-core"));
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::validate::{check_name, validate_schema};
use crate::{coerce, ArgKind, ArgumentSpec, CommandSchema, SchemaError, ValueType};

/// Declared value type, as written in a declaration document.
///
/// The `choice` type takes its alternatives from the declaration's separate
/// `choices` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    /// Free-form string (the default).
    #[default]
    String,
    /// Boolean, written `true`/`false`.
    Boolean,
    /// Base-10 integer.
    Integer,
    /// One of the values in the declaration's `choices` list.
    Choice,
}

/// One raw argument declaration.
///
/// Everything except `name` is optional in the source document: arguments
/// default to non-required positional strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDeclaration {
    /// Argument name.
    pub name: String,
    /// Positional or option.
    #[serde(default)]
    pub kind: ArgKind,
    /// Declared type.
    #[serde(rename = "type", default)]
    pub value_type: DeclaredType,
    /// Must the invocation bind a value?
    #[serde(default)]
    pub required: bool,
    /// Default value, written as a raw string and coerced at parse time.
    #[serde(default)]
    pub default: Option<String>,
    /// Alternatives for the `choice` type; ignored for other types.
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    /// Absorbs all remaining positional tokens.
    #[serde(default)]
    pub variadic: bool,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

/// One raw command declaration, straight from the extraction collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDeclaration {
    /// Command name.
    pub name: String,
    /// Argument declarations in document order.
    #[serde(default)]
    pub arguments: Vec<ArgumentDeclaration>,
    /// Names of agents this command references.
    #[serde(default)]
    pub agents: Vec<String>,
}

/// Parses a raw declaration into a validated [`CommandSchema`].
///
/// Pure function of its input; applies the validation rules of
/// [`validate_schema`](crate::validate_schema) in the same order, with
/// declared defaults coerced through [`coerce`] (a default that fails
/// coercion is a [`SchemaError::DefaultTypeMismatch`]).
///
/// # Errors
///
/// The first violated rule, as a [`SchemaError`].
///
/// # Examples
///
/// ```
/// use command_invoke_core::*;
///
/// let declaration = CommandDeclaration {
///     name: "test".into(),
///     arguments: vec![ArgumentDeclaration {
///         name: "coverage".into(),
///         kind: ArgKind::Option,
///         value_type: DeclaredType::Boolean,
///         required: false,
///         default: Some("false".into()),
///         choices: None,
///         variadic: false,
///         description: None,
///     }],
///     agents: vec![],
/// };
///
/// let schema = parse_declaration(&declaration).unwrap();
/// let coverage = schema.find_argument("coverage").unwrap();
/// assert_eq!(coverage.default, Some(ArgValue::Boolean(false)));
/// ```
pub fn parse_declaration(declaration: &CommandDeclaration) -> Result<CommandSchema, SchemaError> {
    // Rules 1-3 must be checked before defaults are coerced, so that a
    // declaration violating an earlier rule reports that rule.
    check_name(&declaration.name)?;

    let mut seen: HashSet<&str> = HashSet::new();
    for argument in &declaration.arguments {
        if !seen.insert(argument.name.as_str()) {
            return Err(SchemaError::DuplicateArgument {
                command: declaration.name.clone(),
                argument: argument.name.clone(),
            });
        }
    }

    for argument in &declaration.arguments {
        if argument.value_type == DeclaredType::Choice
            && argument.choices.as_ref().is_none_or(|c| c.is_empty())
        {
            return Err(SchemaError::MissingChoices {
                command: declaration.name.clone(),
                argument: argument.name.clone(),
            });
        }
    }

    let mut arguments = Vec::with_capacity(declaration.arguments.len());
    for argument in &declaration.arguments {
        let value_type = match argument.value_type {
            DeclaredType::String => ValueType::String,
            DeclaredType::Boolean => ValueType::Boolean,
            DeclaredType::Integer => ValueType::Integer,
            DeclaredType::Choice => {
                ValueType::Choice(argument.choices.clone().unwrap_or_default())
            }
        };

        let default = match &argument.default {
            Some(raw) => {
                Some(
                    coerce(raw, &value_type).map_err(|e| SchemaError::DefaultTypeMismatch {
                        command: declaration.name.clone(),
                        argument: argument.name.clone(),
                        expected: value_type.name(),
                        reason: e.to_string(),
                    })?,
                )
            }
            None => None,
        };

        arguments.push(ArgumentSpec {
            name: argument.name.clone(),
            kind: argument.kind,
            value_type,
            required: argument.required,
            variadic: argument.variadic,
            default,
            description: argument.description.clone(),
        });
    }

    let schema = CommandSchema {
        name: declaration.name.clone(),
        arguments,
        agent_refs: declaration.agents.iter().cloned().collect::<BTreeSet<_>>(),
    };

    // Rules 5 and 6 (positional order, variadic placement).
    validate_schema(&schema)?;

    Ok(schema)
}
