//! Raw invocation input.

use serde::{Deserialize, Serialize};

/// A tokenized invocation as received from the host's tokenizer.
///
/// Option names are bare (no leading dashes); stripping `--` is the
/// tokenizer's job. Options are kept as an ordered list rather than a map so
/// that a flag repeated in one invocation is visible to the resolver, which
/// folds repeats **last wins**.
///
/// # Examples
///
/// ```
/// use command_invoke_resolver::RawInvocation;
///
/// let invocation = RawInvocation::new("build")
///     .positional("my-app")
///     .option("platform", "ios");
///
/// assert_eq!(invocation.command, "build");
/// assert_eq!(invocation.positionals, vec!["my-app"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInvocation {
    /// The invoked command name.
    pub command: String,
    /// Positional tokens in the order supplied.
    #[serde(default)]
    pub positionals: Vec<String>,
    /// `(name, value)` option pairs in the order supplied.
    #[serde(default)]
    pub options: Vec<(String, String)>,
}

impl RawInvocation {
    /// Creates an invocation of the given command with no arguments.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Default::default()
        }
    }

    /// Appends a positional token.
    pub fn positional(mut self, token: impl Into<String>) -> Self {
        self.positionals.push(token.into());
        self
    }

    /// Appends an option pair. The name is bare, without leading dashes.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }
}
