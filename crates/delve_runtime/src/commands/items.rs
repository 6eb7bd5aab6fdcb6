//! Picking up, carrying, and using items.

use delve_foundation::{Result, Style};
use delve_parser::ParsedCommand;
use delve_storage::{Item, ItemKind};

use super::{current_room, here, item_here, missing};
use crate::game::GameState;

pub(crate) fn take(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    if cmd.target == "all" {
        return Ok(take_all(state));
    }
    let Some(item) = item_here(state, &cmd.target).cloned() else {
        return Ok(format!("There is no {} here.", cmd.target));
    };
    if !item.can_take {
        return Ok(format!("You can't take the {}.", item.name));
    }
    let room = here(state);
    let id = item.id.clone();
    let name = item.name.clone();
    if let Err(e) = state.realm.player.add_item(item) {
        return Ok(e.to_string());
    }
    state.realm.world.remove_room_item(&room, &id);
    Ok(format!("You take the {}.", state.realm.paint(&name, Style::Item)))
}

fn take_all(state: &mut GameState) -> String {
    let room = here(state);
    let items: Vec<Item> = current_room(state)
        .map(|r| {
            r.items
                .iter()
                .filter_map(|id| state.realm.world.item(id))
                .filter(|item| item.can_take)
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    if items.is_empty() {
        return "There is nothing here to take.".to_string();
    }

    let mut taken = Vec::new();
    let mut left = Vec::new();
    for item in items {
        let id = item.id.clone();
        let name = item.name.clone();
        if state.realm.player.add_item(item).is_ok() {
            state.realm.world.remove_room_item(&room, &id);
            taken.push(state.realm.paint(&name, Style::Item));
        } else {
            left.push(name);
        }
    }

    let mut lines = Vec::new();
    if !taken.is_empty() {
        lines.push(format!("You take: {}.", taken.join(", ")));
    }
    if !left.is_empty() {
        lines.push(format!("Too heavy to carry: {}.", left.join(", ")));
    }
    lines.join("\n")
}

pub(crate) fn drop(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    let Some(index) = state.realm.player.find_item(&cmd.target) else {
        return Ok(format!("You don't have {}.", cmd.target));
    };
    let room = here(state);
    let id = state.realm.player.inventory[index].id.clone();
    state.realm.world.add_room_item(&room, id)?;
    let item = state.realm.player.remove_item(index);
    Ok(format!("You drop the {}.", state.realm.paint(&item.name, Style::Item)))
}

pub(crate) fn inventory(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    let realm = &state.realm;
    let player = &realm.player;
    let mut out = Vec::new();

    if player.inventory.is_empty() {
        out.push("You are carrying nothing.".to_string());
    } else {
        out.push("You are carrying:".to_string());
        for item in &player.inventory {
            out.push(format!("  {} ({} lb)", realm.paint(&item.name, Style::Item), item.weight));
        }
    }

    let slot = |item: Option<&Item>| {
        item.map_or_else(
            || realm.paint("nothing", Style::Dim),
            |i| realm.paint(&i.name, Style::Item),
        )
    };
    out.push(format!("Weapon: {}", slot(player.equipped_weapon.as_ref())));
    out.push(format!("Armor: {}", slot(player.equipped_armor.as_ref())));
    out.push(format!("Gold: {}", player.gold));
    out.push(format!(
        "Weight: {}/{} lb",
        player.carried_weight(),
        player.carry_capacity()
    ));
    Ok(out.join("\n"))
}

pub(crate) fn equip(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    let Some(index) = state.realm.player.find_item(&cmd.target) else {
        return Ok(format!("You don't have {}.", cmd.target));
    };
    let name = state.realm.player.inventory[index].name.clone();
    let reply = match state.realm.player.equip(index) {
        Ok(Some(previous)) => format!("You equip the {name} and put away the {previous}."),
        Ok(None) => format!("You equip the {name}."),
        Err(e) => e.to_string(),
    };
    Ok(reply)
}

pub(crate) fn unequip(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    let query = cmd.target.as_str();
    let player = &mut state.realm.player;
    let weapon = query == "weapon" || player.equipped_weapon.as_ref().is_some_and(|w| w.matches(query));
    let armor = query == "armor" || player.equipped_armor.as_ref().is_some_and(|a| a.matches(query));

    let result = if weapon {
        player.unequip_weapon()
    } else if armor {
        player.unequip_armor()
    } else {
        return Ok(format!("You don't have {query} equipped."));
    };
    Ok(match result {
        Ok(name) => format!("You put away the {name}."),
        Err(e) => e.to_string(),
    })
}

pub(crate) fn use_item(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    let player = &mut state.realm.player;
    let Some(index) = player.find_item(&cmd.target) else {
        return Ok(format!("You don't have {}.", cmd.target));
    };
    let item = &player.inventory[index];
    let heal = match (item.kind, item.heal_amount) {
        (ItemKind::Potion, Some(amount)) => amount,
        _ => return Ok(format!("You can't use the {}.", item.name)),
    };
    if player.hit_points() == player.max_hit_points() {
        return Ok("You are already at full health.".to_string());
    }
    let item = player.remove_item(index);
    let healed = player.heal(heal);
    let status = format!("({}/{} HP)", player.hit_points(), player.max_hit_points());
    let amount = state.realm.paint(&healed.to_string(), Style::Heal);
    Ok(format!("You drink the {} and recover {amount} hit points. {status}", item.name))
}
