//! Invocation-time error types.
//!
//! Every failure mode of resolution is a distinct variant with enough context
//! for a host to present the message verbatim to an end user. Resolution is
//! deterministic, so none of these are worth retrying.

use thiserror::Error;

/// Errors raised while resolving a raw invocation against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No schema registered under the invoked command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument was neither supplied nor defaulted.
    #[error("missing required argument {argument:?} for command {command:?}")]
    MissingArgument {
        /// The invoked command.
        command: String,
        /// The unmet argument.
        argument: String,
    },

    /// A flag was supplied that no option spec declares. Catches typos early
    /// instead of silently ignoring them.
    #[error("unknown option --{option} for command {command:?}")]
    UnknownOption {
        /// The invoked command.
        command: String,
        /// The unrecognized flag name.
        option: String,
    },

    /// A raw value failed boolean or integer coercion.
    #[error("invalid value {value:?} for argument {argument:?} of command {command:?}: {reason}")]
    TypeCoercion {
        /// The invoked command.
        command: String,
        /// The argument being bound.
        argument: String,
        /// The offending raw value.
        value: String,
        /// What the coercion expected.
        reason: String,
    },

    /// A raw value is not a member of a choice argument's declared set.
    #[error("invalid choice {value:?} for argument {argument:?} of command {command:?} (allowed: {})", .allowed.join(", "))]
    InvalidChoice {
        /// The invoked command.
        command: String,
        /// The argument being bound.
        argument: String,
        /// The offending raw value.
        value: String,
        /// The declared alternatives.
        allowed: Vec<String>,
    },

    /// More positional tokens than the schema declares positions for.
    #[error("unexpected positional argument {value:?} for command {command:?}")]
    UnexpectedArgument {
        /// The invoked command.
        command: String,
        /// The surplus token.
        value: String,
    },
}

/// Convenience alias for results with [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
