//! Character sheet, skills, and the debug level-up command.

use delve_foundation::{Result, Style};
use delve_parser::ParsedCommand;
use delve_storage::Attribute;

use crate::game::GameState;

const MAX_DEBUG_LEVELS: u32 = 50;

pub(crate) fn stats(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    let realm = &state.realm;
    let player = &realm.player;
    let mut out = vec![
        realm.paint(&format!("{} - Level {}", player.name, player.level), Style::Heading),
        format!("Experience: {}/{}", player.experience, player.experience_to_next),
        format!("Health: {}/{}", player.hit_points(), player.max_hit_points()),
        format!("Stamina: {}/{}", player.stamina, player.max_stamina),
    ];
    let attributes: Vec<String> = Attribute::ALL
        .iter()
        .map(|a| format!("{a} {}", player.attributes.get(*a)))
        .collect();
    out.push(attributes.join("  "));
    out.push(format!("Gold: {}", player.gold));
    let slot = |item: Option<&delve_storage::Item>| item.map_or("nothing", |i| i.name.as_str()).to_string();
    out.push(format!("Weapon: {}", slot(player.equipped_weapon.as_ref())));
    out.push(format!("Armor: {}", slot(player.equipped_armor.as_ref())));
    Ok(out.join("\n"))
}

pub(crate) fn skills(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    let realm = &state.realm;
    if realm.skills.is_empty() {
        return Ok("There are no skills to learn.".to_string());
    }
    let mut out = vec![realm.paint("Skills:", Style::Heading)];
    for skill in realm.skills.iter() {
        let status = if !realm.player.has_skill(&skill.id) {
            realm.paint(&format!("unlocks at level {}", skill.level), Style::Dim)
        } else {
            match realm.player.cooldown(&skill.id) {
                0 => realm.paint("ready", Style::Success),
                ticks => format!("{ticks} ticks"),
            }
        };
        out.push(format!(
            "  {} ({}) - {} [cost {}, cooldown {}] {status}",
            skill.name, skill.id, skill.description, skill.cost, skill.cooldown
        ));
    }
    Ok(out.join("\n"))
}

pub(crate) fn levelup(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    let levels = cmd
        .first_arg()
        .and_then(|n| n.parse::<u32>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_DEBUG_LEVELS);
    let realm = &mut state.realm;
    let mut out = Vec::new();
    for _ in 0..levels {
        let up = realm.player.level_up(&mut realm.rng);
        out.push(format!("Level {}! Your {} increases.", up.level, up.attribute));
    }
    for skill in realm.player.learn_unlocked_skills(&realm.skills) {
        out.push(format!("You learned a new skill: {skill}!"));
    }
    Ok(out.join("\n"))
}
