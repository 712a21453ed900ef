//! Schema validation.
//!
//! Validates the structural invariants of a [`CommandSchema`]: command name
//! format, argument name uniqueness, choice sets, default typing, and
//! positional ordering. Rules are checked in a fixed order and the first
//! failure wins, so a given schema always produces the same error.
//!
//! # Examples
//!
//! ```
//! use command_invoke_core::*;
//!
//! let schema = CommandSchema::new("build").with_argument(
//!     ArgumentSpec::option(
//!         "platform",
//!         ValueType::Choice(vec!["ios".into(), "android".into()]),
//!     )
//!     .required(),
//! );
//! assert!(validate_schema(&schema).is_ok());
//!
//! // Invalid: command names must be lowercase kebab-case
//! let bad = CommandSchema::new("Build");
//! assert!(matches!(validate_schema(&bad), Err(SchemaError::BadName { .. })));
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{CommandSchema, ValueType};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("static regex must compile"));

/// Load-time schema validation errors.
///
/// Each variant names the command (and argument, where applicable) so the
/// message can be shown verbatim to whoever maintains the declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Command name does not match `^[a-z][a-z0-9-]*$`.
    #[error("invalid command name {name:?}: must be lowercase kebab-case")]
    BadName {
        /// The offending name.
        name: String,
    },
    /// Two arguments in the same command share a name.
    #[error("duplicate argument {argument:?} in command {command:?}")]
    DuplicateArgument {
        /// The command being validated.
        command: String,
        /// The repeated argument name.
        argument: String,
    },
    /// A `Choice` argument declares an empty choice set.
    #[error("choice argument {argument:?} in command {command:?} declares no choices")]
    MissingChoices {
        /// The command being validated.
        command: String,
        /// The offending argument.
        argument: String,
    },
    /// A declared default does not satisfy the argument's type.
    #[error("default for argument {argument:?} in command {command:?} does not match its declared {expected} type: {reason}")]
    DefaultTypeMismatch {
        /// The command being validated.
        command: String,
        /// The offending argument.
        argument: String,
        /// Name of the declared type.
        expected: &'static str,
        /// What went wrong with the default value.
        reason: String,
    },
    /// A required positional is declared after an optional one.
    #[error("required positional {argument:?} follows an optional positional in command {command:?}")]
    PositionalOrder {
        /// The command being validated.
        command: String,
        /// The offending argument.
        argument: String,
    },
    /// More than one variadic positional, a variadic option, or a variadic
    /// positional that is not last.
    #[error("variadic argument {argument:?} in command {command:?} must be the last positional")]
    VariadicPosition {
        /// The command being validated.
        command: String,
        /// The offending argument.
        argument: String,
    },
}

/// Validates a command schema's structural invariants.
///
/// Rules, checked in order (first failure wins):
///
/// 1. command name matches the naming pattern → [`SchemaError::BadName`]
/// 2. argument names are unique → [`SchemaError::DuplicateArgument`]
/// 3. `Choice` arguments declare a non-empty set → [`SchemaError::MissingChoices`]
/// 4. defaults satisfy their declared type → [`SchemaError::DefaultTypeMismatch`]
/// 5. required positionals precede optional ones → [`SchemaError::PositionalOrder`]
/// 6. at most one variadic positional, in last position → [`SchemaError::VariadicPosition`]
///
/// # Examples
///
/// ```
/// use command_invoke_core::*;
///
/// // Default not in the choice set → rule 4
/// let schema = CommandSchema::new("build").with_argument(
///     ArgumentSpec::option("platform", ValueType::Choice(vec!["ios".into()]))
///         .with_default(ArgValue::String("android".into())),
/// );
/// assert!(matches!(
///     validate_schema(&schema),
///     Err(SchemaError::DefaultTypeMismatch { .. }),
/// ));
/// ```
pub fn validate_schema(schema: &CommandSchema) -> Result<(), SchemaError> {
    check_name(&schema.name)?;

    let mut seen: HashSet<&str> = HashSet::new();
    for argument in &schema.arguments {
        if !seen.insert(argument.name.as_str()) {
            return Err(SchemaError::DuplicateArgument {
                command: schema.name.clone(),
                argument: argument.name.clone(),
            });
        }
    }

    for argument in &schema.arguments {
        if matches!(&argument.value_type, ValueType::Choice(choices) if choices.is_empty()) {
            return Err(SchemaError::MissingChoices {
                command: schema.name.clone(),
                argument: argument.name.clone(),
            });
        }
    }

    for argument in &schema.arguments {
        if let Some(default) = &argument.default {
            if !default.matches_type(&argument.value_type) {
                let reason = match &argument.value_type {
                    ValueType::Choice(choices) => {
                        format!("not one of: {}", choices.join(", "))
                    }
                    other => format!("value is not a {}", other.name()),
                };
                return Err(SchemaError::DefaultTypeMismatch {
                    command: schema.name.clone(),
                    argument: argument.name.clone(),
                    expected: argument.value_type.name(),
                    reason,
                });
            }
        }
    }

    let mut saw_optional = false;
    for positional in schema.positionals() {
        if positional.required && saw_optional {
            return Err(SchemaError::PositionalOrder {
                command: schema.name.clone(),
                argument: positional.name.clone(),
            });
        }
        if !positional.required {
            saw_optional = true;
        }
    }

    let positional_count = schema.positionals().count();
    let mut saw_variadic = false;
    for (index, argument) in schema.positionals().enumerate() {
        if argument.variadic {
            if saw_variadic || index + 1 != positional_count {
                return Err(SchemaError::VariadicPosition {
                    command: schema.name.clone(),
                    argument: argument.name.clone(),
                });
            }
            saw_variadic = true;
        }
    }
    if let Some(variadic_option) = schema.options().find(|a| a.variadic) {
        return Err(SchemaError::VariadicPosition {
            command: schema.name.clone(),
            argument: variadic_option.name.clone(),
        });
    }

    Ok(())
}

/// Checks a command name against the naming pattern (rule 1).
pub(crate) fn check_name(name: &str) -> Result<(), SchemaError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(SchemaError::BadName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArgValue, ArgumentSpec};

    use super::*;

    fn choice(options: &[&str]) -> ValueType {
        ValueType::Choice(options.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_accepts_valid_schema() {
        let schema = CommandSchema::new("add-backend")
            .with_argument(ArgumentSpec::positional("feature", ValueType::String))
            .with_argument(
                ArgumentSpec::option("provider", choice(&["firebase", "supabase"]))
                    .with_default(ArgValue::String("firebase".into())),
            );

        assert_eq!(validate_schema(&schema), Ok(()));
    }

    #[test]
    fn test_rejects_bad_name() {
        for name in ["Build", "3build", "build_all", "", "-build"] {
            let schema = CommandSchema::new(name);
            assert_eq!(
                validate_schema(&schema),
                Err(SchemaError::BadName { name: name.into() }),
            );
        }
    }

    #[test]
    fn test_rejects_duplicate_argument() {
        let schema = CommandSchema::new("test")
            .with_argument(ArgumentSpec::option("coverage", ValueType::Boolean))
            .with_argument(ArgumentSpec::option("coverage", ValueType::String));

        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::DuplicateArgument {
                command: "test".into(),
                argument: "coverage".into(),
            }),
        );
    }

    #[test]
    fn test_rejects_empty_choices() {
        let schema = CommandSchema::new("build")
            .with_argument(ArgumentSpec::option("platform", choice(&[])));

        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::MissingChoices {
                command: "build".into(),
                argument: "platform".into(),
            }),
        );
    }

    #[test]
    fn test_rejects_mistyped_default() {
        let schema = CommandSchema::new("test").with_argument(
            ArgumentSpec::option("retries", ValueType::Integer)
                .with_default(ArgValue::String("three".into())),
        );

        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::DefaultTypeMismatch { .. }),
        ));
    }

    #[test]
    fn test_rejects_required_positional_after_optional() {
        let schema = CommandSchema::new("copy")
            .with_argument(ArgumentSpec::positional("source", ValueType::String).optional())
            .with_argument(ArgumentSpec::positional("dest", ValueType::String));

        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::PositionalOrder {
                command: "copy".into(),
                argument: "dest".into(),
            }),
        );
    }

    #[test]
    fn test_rejects_non_trailing_variadic() {
        let schema = CommandSchema::new("lint")
            .with_argument(ArgumentSpec::positional("files", ValueType::String).variadic())
            .with_argument(ArgumentSpec::positional("profile", ValueType::String));

        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::VariadicPosition {
                command: "lint".into(),
                argument: "files".into(),
            }),
        );
    }

    #[test]
    fn test_rule_order_is_deterministic() {
        // Bad name and duplicate arguments: rule 1 wins.
        let schema = CommandSchema::new("Build")
            .with_argument(ArgumentSpec::option("x", ValueType::String))
            .with_argument(ArgumentSpec::option("x", ValueType::String));

        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::BadName { .. }),
        ));
    }
}
