//! Main parser pipeline.
//!
//! Tokenizes input and resolves a leading alias.

use crate::command::ParsedCommand;
use crate::stdlib;
use crate::tokenizer::{InputToken, InputTokenizer};
use crate::vocabulary::{Alias, AliasTable};

/// Turns raw input into a [`ParsedCommand`].
#[derive(Clone, Debug, Default)]
pub struct CommandParser {
    aliases: AliasTable,
}

impl CommandParser {
    /// A parser with no aliases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser with the standard direction aliases installed.
    #[must_use]
    pub fn with_directions() -> Self {
        let mut parser = Self::new();
        stdlib::install_direction_aliases(&mut parser.aliases);
        parser
    }

    /// The alias table.
    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Mutable access to the alias table.
    pub fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    /// Registers an alias.
    pub fn add_alias(&mut self, word: impl Into<String>, alias: Alias) {
        self.aliases.register(word, alias);
    }

    /// Parses one line of input. Returns `None` for blank input.
    ///
    /// Only the first token is alias-resolved, and only once: an alias that
    /// names another alias is not followed.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<ParsedCommand> {
        let original = input.trim();
        let mut tokens = InputTokenizer::tokenize(original).into_iter();
        let head = tokens.next()?.into_string();
        let rest = tokens.map(InputToken::into_string);

        let (command, args) = match self.aliases.resolve(&head) {
            Some(alias) => (
                alias.command.clone(),
                alias.args.iter().cloned().chain(rest).collect(),
            ),
            None => (head, rest.collect()),
        };
        Some(ParsedCommand::new(command, args, original))
    }
}
