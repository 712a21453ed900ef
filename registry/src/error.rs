//! Error types for registry construction and lookup.

use command_invoke_core::SchemaError;
use thiserror::Error;

/// Errors raised while building, finalizing, or querying a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A schema with this command name is already registered.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    /// A command references an agent absent from the known-agent set.
    #[error("command {command:?} references unknown agent {agent:?}")]
    DanglingAgentReference {
        /// The referencing command.
        command: String,
        /// The missing agent name.
        agent: String,
    },

    /// No schema registered under this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A declaration failed schema validation during registration.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
