//! Raw-to-typed value coercion.
//!
//! [`coerce`] is the single coercion primitive shared by declaration parsing
//! (type-checking defaults) and invocation resolution (binding tokens), so
//! both accept exactly the same value syntax.

use thiserror::Error;

use crate::{ArgValue, ValueType};

/// A raw value failed to coerce to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Not a recognized boolean literal.
    #[error("expected \"true\" or \"false\", got {value:?}")]
    Boolean {
        /// The offending raw value.
        value: String,
    },
    /// Not a base-10 integer.
    #[error("expected a base-10 integer, got {value:?}")]
    Integer {
        /// The offending raw value.
        value: String,
    },
    /// Not a member of the declared choice set.
    #[error("{value:?} is not one of: {}", .allowed.join(", "))]
    Choice {
        /// The offending raw value.
        value: String,
        /// The declared alternatives.
        allowed: Vec<String>,
    },
}

/// Coerces a raw string to a typed [`ArgValue`].
///
/// - `String`: passthrough, no coercion.
/// - `Boolean`: case-insensitive `"true"`/`"false"` only.
/// - `Integer`: base-10 `i64` with no trailing characters.
/// - `Choice`: case-sensitive membership in the declared set; resolves to
///   [`ArgValue::String`].
///
/// # Examples
///
/// ```
/// use command_invoke_core::{coerce, ArgValue, CoerceError, ValueType};
///
/// assert_eq!(
///     coerce("TRUE", &ValueType::Boolean),
///     Ok(ArgValue::Boolean(true)),
/// );
/// assert_eq!(coerce("-42", &ValueType::Integer), Ok(ArgValue::Integer(-42)));
/// assert!(matches!(
///     coerce("yes", &ValueType::Boolean),
///     Err(CoerceError::Boolean { .. }),
/// ));
/// assert!(matches!(
///     coerce("42px", &ValueType::Integer),
///     Err(CoerceError::Integer { .. }),
/// ));
///
/// let platform = ValueType::Choice(vec!["ios".into(), "android".into()]);
/// assert_eq!(
///     coerce("ios", &platform),
///     Ok(ArgValue::String("ios".into())),
/// );
/// // Choice matching is case-sensitive.
/// assert!(matches!(coerce("IOS", &platform), Err(CoerceError::Choice { .. })));
/// ```
pub fn coerce(raw: &str, value_type: &ValueType) -> Result<ArgValue, CoerceError> {
    match value_type {
        ValueType::String => Ok(ArgValue::String(raw.to_string())),
        ValueType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(ArgValue::Boolean(true)),
            "false" => Ok(ArgValue::Boolean(false)),
            _ => Err(CoerceError::Boolean {
                value: raw.to_string(),
            }),
        },
        ValueType::Integer => raw
            .parse::<i64>()
            .map(ArgValue::Integer)
            .map_err(|_| CoerceError::Integer {
                value: raw.to_string(),
            }),
        ValueType::Choice(choices) => {
            if choices.iter().any(|c| c == raw) {
                Ok(ArgValue::String(raw.to_string()))
            } else {
                Err(CoerceError::Choice {
                    value: raw.to_string(),
                    allowed: choices.clone(),
                })
            }
        }
    }
}
