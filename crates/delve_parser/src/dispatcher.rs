//! Command registry and dispatch.
//!
//! The dispatcher owns the registered commands and the parser's alias table.
//! [`Dispatcher::execute`] always returns a string: unknown commands, state
//! gate rejections, and handler errors are all turned into player-facing
//! text.

use std::collections::{BTreeMap, BTreeSet};

use delve_foundation::Result;
use delve_storage::PlayerState;
use tracing::{debug, error};

use crate::command::ParsedCommand;
use crate::parser::CommandParser;
use crate::vocabulary::Alias;

/// Fixed player-facing messages.
pub mod messages {
    /// Reply to any non-respawn command while dead.
    pub const DEAD: &str = "You are dead. Type 'respawn' to return to the world of the living.";
    /// Reply to a command outside the combat allow-list.
    pub const IN_COMBAT: &str = "You can't do that while fighting! Try 'flee' or use a skill.";
    /// Reply when a handler fails unexpectedly.
    pub const HANDLER_FAILED: &str = "Something went wrong while doing that.";
    /// Reply to blank input.
    pub const EMPTY: &str = "What would you like to do?";
}

/// A command handler.
pub type Handler<C> = fn(&mut C, &ParsedCommand) -> Result<String>;

/// What the dispatcher needs to know about the game to apply its gates.
pub trait CommandContext {
    /// The player's current state.
    fn player_state(&self) -> PlayerState;

    /// Returns true while an encounter is active.
    fn in_combat(&self) -> bool;
}

enum HandlerKind<C> {
    Fn(Handler<C>),
    Help,
}

/// A command to register.
pub struct CommandSpec<C> {
    name: String,
    description: String,
    aliases: Vec<String>,
    usage: Option<String>,
    hidden: bool,
    handler: HandlerKind<C>,
}

impl<C> CommandSpec<C> {
    /// A command run by `handler`.
    pub fn new(name: impl Into<String>, description: impl Into<String>, handler: Handler<C>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: description.into(),
            aliases: Vec::new(),
            usage: None,
            hidden: false,
            handler: HandlerKind::Fn(handler),
        }
    }

    /// The built-in `help` command, which renders the registry itself.
    pub fn help(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: description.into(),
            aliases: Vec::new(),
            usage: None,
            hidden: false,
            handler: HandlerKind::Help,
        }
    }

    /// Adds an alias word.
    #[must_use]
    pub fn alias(mut self, word: impl Into<String>) -> Self {
        self.aliases.push(word.into().to_lowercase());
        self
    }

    /// Sets the argument synopsis shown in help, like `<item>`.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Leaves the command out of help.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

struct CommandEntry<C> {
    description: String,
    aliases: Vec<String>,
    usage: Option<String>,
    hidden: bool,
    handler: HandlerKind<C>,
}

/// Routes parsed input to registered handlers.
pub struct Dispatcher<C> {
    parser: CommandParser,
    commands: BTreeMap<String, CommandEntry<C>>,
    combat_allowed: BTreeSet<String>,
    respawn_command: String,
}

impl<C> std::fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("combat_allowed", &self.combat_allowed)
            .field("respawn_command", &self.respawn_command)
            .finish_non_exhaustive()
    }
}

impl<C: CommandContext> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CommandContext> Dispatcher<C> {
    /// An empty dispatcher with direction aliases installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: CommandParser::with_directions(),
            commands: BTreeMap::new(),
            combat_allowed: BTreeSet::new(),
            respawn_command: "respawn".to_string(),
        }
    }

    /// Sets the only command accepted while the player is dead.
    pub fn set_respawn_command(&mut self, name: impl Into<String>) {
        self.respawn_command = name.into();
    }

    /// Registers a command and its aliases, replacing any previous one.
    pub fn register(&mut self, spec: CommandSpec<C>) {
        for word in &spec.aliases {
            self.parser.add_alias(word.clone(), Alias::command(spec.name.clone()));
        }
        self.commands.insert(
            spec.name,
            CommandEntry {
                description: spec.description,
                aliases: spec.aliases,
                usage: spec.usage,
                hidden: spec.hidden,
                handler: spec.handler,
            },
        );
    }

    /// Removes a command. Its aliases are removed with it.
    pub fn unregister(&mut self, name: &str) -> bool {
        let Some(entry) = self.commands.remove(name) else {
            return false;
        };
        for word in &entry.aliases {
            self.parser.aliases_mut().unregister(word);
        }
        self.combat_allowed.remove(name);
        true
    }

    /// Adds an alias outside any command spec.
    pub fn add_alias(&mut self, word: impl Into<String>, alias: Alias) {
        self.parser.add_alias(word, alias);
    }

    /// Permits a command while an encounter is active.
    pub fn allow_in_combat(&mut self, name: impl Into<String>) {
        self.combat_allowed.insert(name.into().to_lowercase());
    }

    /// Returns true if the command is on the combat allow-list.
    #[must_use]
    pub fn is_allowed_in_combat(&self, name: &str) -> bool {
        self.combat_allowed.contains(name)
    }

    /// Returns true if a command is registered under `name`.
    #[must_use]
    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Parses input against the alias table.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<ParsedCommand> {
        self.parser.parse(input)
    }

    /// Parses, gates, and runs one line of input.
    pub fn execute(&self, ctx: &mut C, input: &str) -> String {
        let Some(cmd) = self.parse(input) else {
            return messages::EMPTY.to_string();
        };

        if ctx.player_state() == PlayerState::Dead && cmd.command != self.respawn_command {
            return messages::DEAD.to_string();
        }
        if ctx.in_combat() && !self.combat_allowed.contains(&cmd.command) {
            return messages::IN_COMBAT.to_string();
        }

        let Some(entry) = self.commands.get(&cmd.command) else {
            return format!(
                "I don't understand '{}'. Type 'help' for a list of commands.",
                cmd.command
            );
        };

        debug!(command = %cmd.command, args = ?cmd.args, "dispatching");
        match &entry.handler {
            HandlerKind::Help => self.generate_help(),
            HandlerKind::Fn(handler) => match handler(ctx, &cmd) {
                Ok(reply) => reply,
                Err(e) => {
                    error!(command = %cmd.command, input = %cmd.original, error = %e, "command handler failed");
                    messages::HANDLER_FAILED.to_string()
                }
            },
        }
    }

    /// Renders every visible command sorted by name, with aliases and
    /// descriptions.
    #[must_use]
    pub fn generate_help(&self) -> String {
        let rows: Vec<(String, &CommandEntry<C>)> = self
            .commands
            .iter()
            .filter(|(_, entry)| !entry.hidden)
            .map(|(name, entry)| {
                let synopsis = match &entry.usage {
                    Some(usage) => format!("{name} {usage}"),
                    None => name.clone(),
                };
                (synopsis, entry)
            })
            .collect();
        let width = rows.iter().map(|(s, _)| s.len()).max().unwrap_or(0);

        let mut help = String::from("Available commands:");
        for (synopsis, entry) in rows {
            help.push_str(&format!("\n  {synopsis:<width$}  {}", entry.description));
            if !entry.aliases.is_empty() {
                help.push_str(&format!(" (aliases: {})", entry.aliases.join(", ")));
            }
        }
        help.push_str("\nDirections can be typed on their own: north, n, up, u, ...");
        help
    }
}
