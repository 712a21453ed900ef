//! Invocation binding and type coercion.

use std::collections::BTreeMap;

use command_invoke_core::{coerce, ArgKind, ArgValue, CoerceError, CommandSchema};
use command_invoke_registry::Registry;
use tracing::debug;

use crate::context::InvocationContext;
use crate::error::{ResolveError, Result};
use crate::invocation::RawInvocation;

/// Resolves a raw invocation against the registry.
///
/// Binding proceeds in a fixed order and the first failure aborts, so nothing
/// downstream ever observes a half-bound context:
///
/// 1. Look up the schema ([`ResolveError::UnknownCommand`]).
/// 2. Bind positional tokens to positional specs in declaration order; the
///    first unmet required positional is a [`ResolveError::MissingArgument`],
///    and surplus tokens with no spec (and no trailing variadic to absorb
///    them) are a [`ResolveError::UnexpectedArgument`].
/// 3. Bind each option from the flag map, falling back to its declared
///    default; a required option with neither is a
///    [`ResolveError::MissingArgument`], an optional one is simply left
///    unset. Repeated flags fold last-wins.
/// 4. Coerce every supplied raw value to its declared type
///    ([`ResolveError::TypeCoercion`] / [`ResolveError::InvalidChoice`]).
/// 5. Reject flags no option spec declares ([`ResolveError::UnknownOption`]).
///
/// Resolution is a pure function of `(registry, invocation)`: no I/O, no
/// shared mutable state, and the same input always produces a structurally
/// equal result.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use command_invoke_core::{ArgumentSpec, CommandSchema, ValueType};
/// use command_invoke_registry::RegistryBuilder;
/// use command_invoke_resolver::{resolve, RawInvocation, ResolveError};
///
/// let mut builder = RegistryBuilder::new();
/// builder
///     .register(CommandSchema::new("build").with_argument(
///         ArgumentSpec::option(
///             "platform",
///             ValueType::Choice(vec!["ios".into(), "android".into()]),
///         )
///         .required(),
///     ))
///     .unwrap();
/// let registry = builder.finalize(BTreeSet::new()).unwrap();
///
/// let context = resolve(
///     &registry,
///     &RawInvocation::new("build").option("platform", "ios"),
/// )
/// .unwrap();
/// assert_eq!(context.get_string("platform"), Some("ios"));
///
/// let err = resolve(
///     &registry,
///     &RawInvocation::new("build").option("platform", "windows"),
/// )
/// .unwrap_err();
/// assert!(matches!(err, ResolveError::InvalidChoice { .. }));
/// ```
pub fn resolve(registry: &Registry, invocation: &RawInvocation) -> Result<InvocationContext> {
    let schema = registry
        .get(&invocation.command)
        .ok_or_else(|| ResolveError::UnknownCommand(invocation.command.clone()))?;

    let mut values: BTreeMap<String, ArgValue> = BTreeMap::new();

    bind_positionals(schema, invocation, &mut values)?;

    // Duplicate flags in one invocation fold last-wins.
    let mut raw_options: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &invocation.options {
        raw_options.insert(name.clone(), value.clone());
    }

    for spec in schema.options() {
        match raw_options.get(&spec.name) {
            Some(raw) => {
                let value = coerce(raw, &spec.value_type)
                    .map_err(|e| coercion_error(&schema.name, &spec.name, raw, e))?;
                values.insert(spec.name.clone(), value);
            }
            None => {
                if let Some(default) = &spec.default {
                    values.insert(spec.name.clone(), default.clone());
                } else if spec.required {
                    return Err(ResolveError::MissingArgument {
                        command: schema.name.clone(),
                        argument: spec.name.clone(),
                    });
                }
                // Optional and undefaulted: left unset.
            }
        }
    }

    for name in raw_options.keys() {
        let known_option = schema
            .find_argument(name)
            .is_some_and(|spec| spec.kind == ArgKind::Option);
        if !known_option {
            return Err(ResolveError::UnknownOption {
                command: schema.name.clone(),
                option: name.clone(),
            });
        }
    }

    debug!(
        command = %schema.name,
        bound = values.len(),
        "Resolved invocation"
    );

    Ok(InvocationContext {
        command: schema.name.clone(),
        values,
        raw_options,
    })
}

fn bind_positionals(
    schema: &CommandSchema,
    invocation: &RawInvocation,
    values: &mut BTreeMap<String, ArgValue>,
) -> Result<()> {
    let tokens = &invocation.positionals;
    let mut index = 0;

    for spec in schema.positionals() {
        if spec.variadic {
            // A trailing variadic absorbs every remaining token.
            let rest = &tokens[index.min(tokens.len())..];
            index = tokens.len();
            if rest.is_empty() {
                if spec.required {
                    return Err(ResolveError::MissingArgument {
                        command: schema.name.clone(),
                        argument: spec.name.clone(),
                    });
                }
                if let Some(default) = &spec.default {
                    values.insert(spec.name.clone(), default.clone());
                }
                continue;
            }
            let items = rest
                .iter()
                .map(|raw| {
                    coerce(raw, &spec.value_type)
                        .map_err(|e| coercion_error(&schema.name, &spec.name, raw, e))
                })
                .collect::<Result<Vec<_>>>()?;
            values.insert(spec.name.clone(), ArgValue::List(items));
            continue;
        }

        match tokens.get(index) {
            Some(raw) => {
                index += 1;
                let value = coerce(raw, &spec.value_type)
                    .map_err(|e| coercion_error(&schema.name, &spec.name, raw, e))?;
                values.insert(spec.name.clone(), value);
            }
            None if spec.required => {
                return Err(ResolveError::MissingArgument {
                    command: schema.name.clone(),
                    argument: spec.name.clone(),
                });
            }
            None => {
                if let Some(default) = &spec.default {
                    values.insert(spec.name.clone(), default.clone());
                }
            }
        }
    }

    if let Some(surplus) = tokens.get(index) {
        return Err(ResolveError::UnexpectedArgument {
            command: schema.name.clone(),
            value: surplus.clone(),
        });
    }

    Ok(())
}

fn coercion_error(command: &str, argument: &str, raw: &str, error: CoerceError) -> ResolveError {
    match error {
        CoerceError::Choice { value, allowed } => ResolveError::InvalidChoice {
            command: command.to_string(),
            argument: argument.to_string(),
            value,
            allowed,
        },
        other => ResolveError::TypeCoercion {
            command: command.to_string(),
            argument: argument.to_string(),
            value: raw.to_string(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use command_invoke_core::{ArgumentSpec, ValueType};
    use command_invoke_registry::RegistryBuilder;

    use super::*;

    fn registry(schema: CommandSchema) -> Registry {
        let mut builder = RegistryBuilder::new();
        builder.register(schema).unwrap();
        builder.finalize(BTreeSet::new()).unwrap()
    }

    #[test]
    fn test_unknown_command() {
        let registry = registry(CommandSchema::new("build"));
        assert_eq!(
            resolve(&registry, &RawInvocation::new("deploy")),
            Err(ResolveError::UnknownCommand("deploy".into())),
        );
    }

    #[test]
    fn test_first_unmet_required_positional_is_named() {
        let registry = registry(
            CommandSchema::new("copy")
                .with_argument(ArgumentSpec::positional("source", ValueType::String))
                .with_argument(ArgumentSpec::positional("dest", ValueType::String)),
        );

        let err = resolve(&registry, &RawInvocation::new("copy").positional("a.txt"))
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingArgument {
                command: "copy".into(),
                argument: "dest".into(),
            },
        );
    }

    #[test]
    fn test_surplus_positional_is_rejected() {
        let registry = registry(
            CommandSchema::new("show")
                .with_argument(ArgumentSpec::positional("item", ValueType::String)),
        );

        let err = resolve(
            &registry,
            &RawInvocation::new("show").positional("a").positional("b"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnexpectedArgument {
                command: "show".into(),
                value: "b".into(),
            },
        );
    }

    #[test]
    fn test_variadic_absorbs_remaining_tokens() {
        let registry = registry(
            CommandSchema::new("format")
                .with_argument(ArgumentSpec::positional("profile", ValueType::String))
                .with_argument(
                    ArgumentSpec::positional("files", ValueType::String)
                        .optional()
                        .variadic(),
                ),
        );

        let context = resolve(
            &registry,
            &RawInvocation::new("format")
                .positional("strict")
                .positional("a.dart")
                .positional("b.dart"),
        )
        .unwrap();

        assert_eq!(
            context.get("files").and_then(|v| v.as_list()).map(<[_]>::len),
            Some(2),
        );

        // No files at all: variadic left unset, not an error.
        let context = resolve(&registry, &RawInvocation::new("format").positional("strict"))
            .unwrap();
        assert!(!context.is_set("files"));
    }

    #[test]
    fn test_duplicate_flag_last_wins() {
        let registry = registry(CommandSchema::new("build").with_argument(
            ArgumentSpec::option("platform", ValueType::Choice(vec!["ios".into(), "android".into()])),
        ));

        let context = resolve(
            &registry,
            &RawInvocation::new("build")
                .option("platform", "ios")
                .option("platform", "android"),
        )
        .unwrap();

        assert_eq!(context.get_string("platform"), Some("android"));
        assert_eq!(
            context.raw_options.get("platform").map(String::as_str),
            Some("android"),
        );
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let registry = registry(CommandSchema::new("test"));

        let err = resolve(
            &registry,
            &RawInvocation::new("test").option("coverge", "true"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownOption {
                command: "test".into(),
                option: "coverge".into(),
            },
        );
    }

    #[test]
    fn test_positional_name_is_not_a_flag() {
        // A positional spec must not be addressable as --name.
        let registry = registry(
            CommandSchema::new("show")
                .with_argument(ArgumentSpec::positional("item", ValueType::String).optional()),
        );

        let err = resolve(&registry, &RawInvocation::new("show").option("item", "x"))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownOption { .. }));
    }
}
