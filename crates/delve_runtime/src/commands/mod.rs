//! Command handlers.
//!
//! Each handler takes the [`GameState`] and a [`ParsedCommand`] and
//! returns the reply. Anything the player did wrong is an `Ok` reply;
//! `Err` is reserved for faults, which the dispatcher logs and hides.

pub(crate) mod character;
pub(crate) mod combat;
pub(crate) mod explore;
pub(crate) mod items;
pub(crate) mod session;
pub(crate) mod trade;

use delve_foundation::GlobalId;
use delve_parser::{CommandSpec, Dispatcher, ParsedCommand};
use delve_storage::{Item, Npc, Room};

use crate::config::GameConfig;
use crate::game::GameState;

/// Registers the standard command set and the combat allow-list.
pub(crate) fn register_all(dispatcher: &mut Dispatcher<GameState>, config: &GameConfig) {
    // Exploration
    dispatcher.register(
        CommandSpec::new("look", "Look around, or at something", explore::look)
            .alias("l")
            .usage("[target]"),
    );
    dispatcher.register(
        CommandSpec::new("examine", "Inspect something closely", explore::examine)
            .alias("x")
            .usage("<target>"),
    );
    dispatcher.register(
        CommandSpec::new("go", "Walk through an exit", explore::go)
            .alias("walk")
            .alias("move")
            .usage("<direction>"),
    );
    dispatcher.register(
        CommandSpec::new("talk", "Talk to someone", explore::talk)
            .alias("speak")
            .usage("<npc>"),
    );
    dispatcher.register(CommandSpec::new("heal", "Ask a healer to tend your wounds", explore::heal));

    // Items
    dispatcher.register(
        CommandSpec::new("take", "Pick something up", items::take)
            .alias("get")
            .usage("<item|all>"),
    );
    dispatcher.register(CommandSpec::new("drop", "Put something down", items::drop).usage("<item>"));
    dispatcher.register(
        CommandSpec::new("inventory", "List what you carry", items::inventory)
            .alias("i")
            .alias("inv"),
    );
    dispatcher.register(
        CommandSpec::new("equip", "Wield a weapon or wear armor", items::equip)
            .alias("wield")
            .alias("wear")
            .usage("<item>"),
    );
    dispatcher.register(
        CommandSpec::new("unequip", "Put away a weapon or armor", items::unequip)
            .alias("remove")
            .usage("<weapon|armor>"),
    );
    dispatcher.register(
        CommandSpec::new("use", "Use an item, such as a potion", items::use_item)
            .alias("drink")
            .alias("quaff")
            .usage("<item>"),
    );

    // Trade
    dispatcher.register(CommandSpec::new("list", "See what a merchant sells", trade::list).alias("shop"));
    dispatcher.register(CommandSpec::new("buy", "Buy from a merchant", trade::buy).usage("<item>"));
    dispatcher.register(CommandSpec::new("sell", "Sell to a merchant", trade::sell).usage("<item>"));

    // Combat
    dispatcher.register(
        CommandSpec::new("attack", "Start a fight", combat::attack)
            .alias("kill")
            .alias("fight")
            .alias("k")
            .usage("<npc>"),
    );
    dispatcher.register(CommandSpec::new("flee", "Run from a fight", combat::flee).alias("run"));
    dispatcher.register(
        CommandSpec::new("skill", "Use a combat skill this round", combat::skill).usage("<name>"),
    );

    // Character
    dispatcher.register(
        CommandSpec::new("stats", "Show your character", character::stats)
            .alias("score")
            .alias("status"),
    );
    dispatcher.register(CommandSpec::new("skills", "List skills and cooldowns", character::skills));

    // Session
    dispatcher.register(CommandSpec::new("respawn", "Return to life after dying", session::respawn));
    dispatcher.register(CommandSpec::new("save", "Save the game", session::save));
    dispatcher.register(CommandSpec::new("load", "Load the saved game", session::load));
    dispatcher.register(CommandSpec::new("new", "Start over with a new character", session::new_game).usage("[name]"));
    dispatcher.register(CommandSpec::help("help", "Show this list").alias("commands"));

    if config.debug_commands {
        dispatcher.register(
            CommandSpec::new("levelup", "Gain levels instantly", character::levelup)
                .usage("[n]")
                .hidden(),
        );
    }

    for command in &config.combat_commands {
        dispatcher.allow_in_combat(command.as_str());
    }
}

/// Strips a leading preposition, so `look at wolf` and `talk to guard` work.
pub(crate) fn object_of<'a>(target: &'a str, prepositions: &[&str]) -> &'a str {
    for preposition in prepositions {
        if let Some(rest) = target.strip_prefix(preposition).and_then(|r| r.strip_prefix(' ')) {
            return rest.trim();
        }
    }
    target
}

/// The room the player stands in.
pub(crate) fn current_room(state: &GameState) -> Option<&Room> {
    state.realm.world.room(state.realm.player_room())
}

/// An NPC in the player's room matching `query`.
pub(crate) fn npc_here<'s>(state: &'s GameState, query: &str) -> Option<&'s Npc> {
    current_room(state)?.find_npc(query, &state.realm.world)
}

/// An item lying in the player's room matching `query`.
pub(crate) fn item_here<'s>(state: &'s GameState, query: &str) -> Option<&'s Item> {
    current_room(state)?.find_item(query, &state.realm.world)
}

/// The player's room id, cloned for use across mutations.
pub(crate) fn here(state: &GameState) -> GlobalId {
    state.realm.player.current_room.clone()
}

/// Reply used when an argument is required but missing.
pub(crate) fn missing(cmd: &ParsedCommand, what: &str) -> String {
    let mut verb = cmd.command.clone();
    if let Some(first) = verb.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("{verb} {what}?")
}
