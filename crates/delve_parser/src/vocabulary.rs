//! Alias table and direction vocabulary.
//!
//! An alias maps a single input word to a canonical command, optionally
//! with prefilled arguments: `l` is `look`, while `n` is `go north`.

use std::collections::BTreeMap;

/// What an alias word expands to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    /// Canonical command name.
    pub command: String,
    /// Arguments spliced in before the player's own.
    pub args: Vec<String>,
}

impl Alias {
    /// An alias for a bare command.
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// An alias that prefills arguments.
    pub fn with_args<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// A movement direction and the words that name it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    /// Canonical name, as used in area exits.
    pub name: &'static str,
    /// Short forms.
    pub synonyms: &'static [&'static str],
    /// Opposite direction.
    pub opposite: &'static str,
}

impl Direction {
    /// Returns true if `word` names this direction.
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        self.name == word || self.synonyms.contains(&word)
    }
}

/// Word to alias mapping.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    aliases: BTreeMap<String, Alias>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) an alias. Words are stored lowercase.
    pub fn register(&mut self, word: impl Into<String>, alias: Alias) {
        self.aliases.insert(word.into().to_lowercase(), alias);
    }

    /// Removes an alias.
    pub fn unregister(&mut self, word: &str) -> Option<Alias> {
        self.aliases.remove(word)
    }

    /// Looks up a word.
    #[must_use]
    pub fn resolve(&self, word: &str) -> Option<&Alias> {
        self.aliases.get(word)
    }

    /// Alias words that expand to `command` with no prefilled arguments, sorted.
    pub fn aliases_for<'a>(&'a self, command: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, alias)| alias.command == command && alias.args.is_empty())
            .map(|(word, _)| word.as_str())
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if no aliases are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
