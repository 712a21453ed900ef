//! Schema registration and the finalized, read-only registry.
//!
//! [`RegistryBuilder`] accumulates schemas during the single-threaded load
//! phase; [`RegistryBuilder::finalize`] checks every agent cross-reference
//! against the known-agent set and, only if all of them resolve, produces an
//! immutable [`Registry`]. A registry that fails finalization never exists,
//! so resolution can never run against partially validated state.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! use command_invoke_core::CommandSchema;
//! use command_invoke_registry::RegistryBuilder;
//!
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .register(CommandSchema::new("build").with_agent_ref("flutter-platform-core"))
//!     .unwrap();
//!
//! let known: BTreeSet<String> = ["flutter-platform-core".to_string()].into();
//! let registry = builder.finalize(known).unwrap();
//! assert!(registry.contains("build"));
//! ```

use std::collections::{BTreeSet, HashMap};

use command_invoke_core::{parse_declaration, CommandDeclaration, CommandSchema};
use tracing::debug;

use crate::error::{RegistryError, Result};

/// Accumulates command schemas before validation.
///
/// The builder is consumed by [`finalize`](RegistryBuilder::finalize); on
/// validation failure no [`Registry`] is produced (fail closed).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    schemas: HashMap<String, CommandSchema>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under its command name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateCommand`] if a schema with the same name is
    /// already registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_invoke_core::CommandSchema;
    /// use command_invoke_registry::{RegistryBuilder, RegistryError};
    ///
    /// let mut builder = RegistryBuilder::new();
    /// builder.register(CommandSchema::new("build")).unwrap();
    ///
    /// assert_eq!(
    ///     builder.register(CommandSchema::new("build")),
    ///     Err(RegistryError::DuplicateCommand("build".into())),
    /// );
    /// ```
    pub fn register(&mut self, schema: CommandSchema) -> Result<()> {
        if self.schemas.contains_key(&schema.name) {
            return Err(RegistryError::DuplicateCommand(schema.name));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Parses a raw declaration and registers the resulting schema.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Schema`] if the declaration is invalid, or
    /// [`RegistryError::DuplicateCommand`] on a name collision.
    pub fn register_declaration(&mut self, declaration: &CommandDeclaration) -> Result<()> {
        let schema = parse_declaration(declaration)?;
        self.register(schema)
    }

    /// Number of schemas registered so far.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Validates all agent cross-references and produces the registry.
    ///
    /// Every `agent_refs` entry of every registered schema must appear in
    /// `known_agents`. Violations are collected across **all** schemas rather
    /// than failing fast, so one validation pass reports the complete set —
    /// when an agent is renamed or removed, every command still pointing at
    /// it shows up at once. The returned errors are sorted by
    /// `(command, agent)`, making the result independent of registration
    /// order.
    ///
    /// # Errors
    ///
    /// The complete, sorted list of
    /// [`RegistryError::DanglingAgentReference`]s.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use command_invoke_core::CommandSchema;
    /// use command_invoke_registry::{RegistryBuilder, RegistryError};
    ///
    /// let mut builder = RegistryBuilder::new();
    /// builder
    ///     .register(CommandSchema::new("add-backend").with_agent_ref("flutter-firebase-core"))
    ///     .unwrap();
    ///
    /// let errors = builder.finalize(BTreeSet::new()).unwrap_err();
    /// assert_eq!(
    ///     errors,
    ///     vec![RegistryError::DanglingAgentReference {
    ///         command: "add-backend".into(),
    ///         agent: "flutter-firebase-core".into(),
    ///     }],
    /// );
    /// ```
    pub fn finalize(
        self,
        known_agents: BTreeSet<String>,
    ) -> std::result::Result<Registry, Vec<RegistryError>> {
        let mut dangling: Vec<(String, String)> = Vec::new();
        for schema in self.schemas.values() {
            for agent in &schema.agent_refs {
                if !known_agents.contains(agent) {
                    dangling.push((schema.name.clone(), agent.clone()));
                }
            }
        }

        if !dangling.is_empty() {
            dangling.sort();
            return Err(dangling
                .into_iter()
                .map(|(command, agent)| RegistryError::DanglingAgentReference { command, agent })
                .collect());
        }

        debug!(
            commands = self.schemas.len(),
            agents = known_agents.len(),
            "Registry finalized"
        );

        Ok(Registry {
            schemas: self.schemas,
            known_agents,
        })
    }
}

/// The immutable, validated collection of all command schemas.
///
/// Produced only by a successful [`RegistryBuilder::finalize`]; exposes no
/// mutation API, so once constructed it is safe to share across threads for
/// concurrent resolution without locking. Hot reload, if a host wants it, is
/// building a fresh registry and swapping the reference (e.g., behind an
/// `Arc`), never mutating a live one.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use command_invoke_core::CommandSchema;
/// use command_invoke_registry::RegistryBuilder;
///
/// let mut builder = RegistryBuilder::new();
/// builder.register(CommandSchema::new("build")).unwrap();
/// builder.register(CommandSchema::new("test")).unwrap();
///
/// let registry = builder.finalize(BTreeSet::new()).unwrap();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.commands(), vec!["build", "test"]);
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    schemas: HashMap<String, CommandSchema>,
    known_agents: BTreeSet<String>,
}

impl Registry {
    /// Looks up a schema by command name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownCommand`] if no schema is registered under
    /// `name`.
    pub fn lookup(&self, name: &str) -> Result<&CommandSchema> {
        self.schemas
            .get(name)
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))
    }

    /// Returns the schema for a command, if registered.
    pub fn get(&self, name: &str) -> Option<&CommandSchema> {
        self.schemas.get(name)
    }

    /// Whether a command is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The known-agent set this registry was validated against.
    pub fn known_agents(&self) -> &BTreeSet<String> {
        &self.known_agents
    }
}
