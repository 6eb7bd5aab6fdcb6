//! Dispatcher gates against a lamp-and-switch context.

use delve_foundation::{Error, Result};
use delve_parser::{CommandContext, CommandSpec, Dispatcher, ParsedCommand, messages};
use delve_storage::PlayerState;

#[derive(Default)]
struct Lamp {
    lit: bool,
    state: PlayerState,
    fighting: bool,
}

impl CommandContext for Lamp {
    fn player_state(&self) -> PlayerState {
        self.state
    }

    fn in_combat(&self) -> bool {
        self.fighting
    }
}

fn light(ctx: &mut Lamp, _cmd: &ParsedCommand) -> Result<String> {
    ctx.lit = true;
    Ok("The lamp flickers on.".into())
}

fn look(ctx: &mut Lamp, _cmd: &ParsedCommand) -> Result<String> {
    let text = if ctx.lit { "A cosy room." } else { "It is dark." };
    Ok(text.to_string())
}

fn go(_ctx: &mut Lamp, cmd: &ParsedCommand) -> Result<String> {
    Ok(format!("You walk {}.", cmd.target))
}

fn smash(_ctx: &mut Lamp, _cmd: &ParsedCommand) -> Result<String> {
    Err(Error::internal("glass everywhere"))
}

fn respawn(ctx: &mut Lamp, _cmd: &ParsedCommand) -> Result<String> {
    ctx.state = PlayerState::Idle;
    Ok("You live again.".into())
}

fn dispatcher() -> Dispatcher<Lamp> {
    let mut d = Dispatcher::new();
    d.register(CommandSpec::new("light", "Light the lamp", light).alias("ignite").usage("[lamp]"));
    d.register(CommandSpec::new("look", "Look around", look).alias("l"));
    d.register(CommandSpec::new("go", "Walk somewhere", go).usage("<direction>"));
    d.register(CommandSpec::new("smash", "Break things", smash).hidden());
    d.register(CommandSpec::new("respawn", "Return to life", respawn));
    d.register(CommandSpec::help("help", "Show this list"));
    d.allow_in_combat("look");
    d
}

#[test]
fn commands_and_aliases_reach_their_handlers() {
    let d = dispatcher();
    let mut lamp = Lamp::default();
    assert_eq!(d.execute(&mut lamp, "l"), "It is dark.");
    assert_eq!(d.execute(&mut lamp, "Ignite lamp!"), "The lamp flickers on.");
    assert_eq!(d.execute(&mut lamp, "LOOK"), "A cosy room.");
    assert_eq!(d.execute(&mut lamp, "sw"), "You walk southwest.");
}

#[test]
fn gates_apply_in_order() {
    let d = dispatcher();
    let mut lamp = Lamp {
        state: PlayerState::Dead,
        fighting: true,
        ..Lamp::default()
    };
    assert_eq!(d.execute(&mut lamp, ""), messages::EMPTY);
    assert_eq!(d.execute(&mut lamp, "look"), messages::DEAD);
    assert_eq!(d.execute(&mut lamp, "dance"), messages::DEAD);

    lamp.state = PlayerState::Fighting;
    assert_eq!(d.execute(&mut lamp, "light"), messages::IN_COMBAT);
    assert_eq!(d.execute(&mut lamp, "dance"), messages::IN_COMBAT);
    assert_eq!(d.execute(&mut lamp, "look"), "It is dark.");
    assert!(!lamp.lit);

    lamp.fighting = false;
    assert_eq!(
        d.execute(&mut lamp, "dance"),
        "I don't understand 'dance'. Type 'help' for a list of commands."
    );
}

#[test]
fn respawn_is_the_way_back() {
    let d = dispatcher();
    let mut lamp = Lamp {
        state: PlayerState::Dead,
        ..Lamp::default()
    };
    assert_eq!(d.execute(&mut lamp, "respawn"), "You live again.");
    assert_eq!(d.execute(&mut lamp, "l"), "It is dark.");
}

#[test]
fn handler_errors_become_a_generic_reply() {
    let d = dispatcher();
    let mut lamp = Lamp::default();
    assert_eq!(d.execute(&mut lamp, "smash"), messages::HANDLER_FAILED);
}

#[test]
fn help_lists_visible_commands() {
    let d = dispatcher();
    let help = d.execute(&mut Lamp::default(), "help");
    assert!(help.starts_with("Available commands:"));
    assert!(help.contains("light [lamp]"));
    assert!(help.contains("(aliases: ignite)"));
    assert!(help.contains("go <direction>"));
    assert!(!help.contains("smash"));
}

#[test]
fn unregister_drops_aliases_too() {
    let mut d = dispatcher();
    assert!(d.unregister("look"));
    assert!(!d.unregister("look"));
    assert!(!d.has_command("look"));
    assert!(!d.is_allowed_in_combat("look"));
    let mut lamp = Lamp::default();
    assert!(d.execute(&mut lamp, "l").starts_with("I don't understand 'l'"));
}
