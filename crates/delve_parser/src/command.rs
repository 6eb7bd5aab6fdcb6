//! The parsed command shape.

/// A command after tokenizing and alias resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Canonical command name.
    pub command: String,
    /// Arguments, alias-supplied ones first.
    pub args: Vec<String>,
    /// Arguments rejoined with single spaces.
    pub target: String,
    /// The raw input, trimmed.
    pub original: String,
}

impl ParsedCommand {
    /// Builds a command, deriving `target` from `args`.
    pub fn new(command: impl Into<String>, args: Vec<String>, original: impl Into<String>) -> Self {
        let target = args.join(" ");
        Self {
            command: command.into(),
            args,
            target,
            original: original.into(),
        }
    }

    /// Returns true if any argument text was given.
    #[must_use]
    pub fn has_target(&self) -> bool {
        !self.target.is_empty()
    }

    /// The first argument, if any.
    #[must_use]
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}
