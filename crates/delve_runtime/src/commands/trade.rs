//! Buying from and selling to merchants.
//!
//! Merchants buy at half an item's value and sell at full value.

use delve_foundation::{Result, Style};
use delve_parser::ParsedCommand;
use delve_storage::{Item, Npc};

use super::{current_room, missing};
use crate::game::GameState;

fn merchant(state: &GameState) -> Option<&Npc> {
    current_room(state)?
        .npcs
        .iter()
        .filter_map(|id| state.realm.world.npc(id))
        .find(|npc| npc.is_alive() && !npc.shop.is_empty())
}

const NO_MERCHANT: &str = "There is no one here to trade with.";

pub(crate) fn list(state: &mut GameState, _cmd: &ParsedCommand) -> Result<String> {
    let Some(merchant) = merchant(state) else {
        return Ok(NO_MERCHANT.to_string());
    };
    let wares: Vec<&Item> = merchant
        .shop
        .iter()
        .filter_map(|id| state.realm.world.item(id))
        .collect();
    let width = wares.iter().map(|item| item.name.len()).max().unwrap_or(0);
    let mut out = vec![format!("{} offers:", state.realm.paint(&merchant.name, Style::Npc))];
    for item in wares {
        let padded = format!("{:<width$}", item.name);
        out.push(format!("  {}  {} gold", state.realm.paint(&padded, Style::Item), item.value));
    }
    Ok(out.join("\n"))
}

pub(crate) fn buy(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    let Some(merchant) = merchant(state) else {
        return Ok(NO_MERCHANT.to_string());
    };
    let ware = merchant
        .shop
        .iter()
        .filter_map(|id| state.realm.world.item(id))
        .find(|item| item.matches(&cmd.target))
        .cloned();
    let Some(item) = ware else {
        return Ok(format!("{} doesn't sell {}.", merchant.name, cmd.target));
    };

    let player = &mut state.realm.player;
    let price = item.value;
    if player.gold < price {
        return Ok(format!("You can't afford the {} ({price} gold).", item.name));
    }
    let name = item.name.clone();
    if let Err(e) = player.add_item(item) {
        return Ok(e.to_string());
    }
    player.gold -= price;
    Ok(format!("You buy the {name} for {price} gold."))
}

pub(crate) fn sell(state: &mut GameState, cmd: &ParsedCommand) -> Result<String> {
    if !cmd.has_target() {
        return Ok(missing(cmd, "what"));
    }
    let Some(merchant) = merchant(state) else {
        return Ok(NO_MERCHANT.to_string());
    };
    let merchant = merchant.name.clone();

    let player = &mut state.realm.player;
    let Some(index) = player.find_item(&cmd.target) else {
        return Ok(format!("You don't have {}.", cmd.target));
    };
    let price = player.inventory[index].value / 2;
    if price == 0 {
        return Ok(format!("{merchant} isn't interested in the {}.", player.inventory[index].name));
    }
    let item = player.remove_item(index);
    player.gold += price;
    Ok(format!("You sell the {} for {price} gold.", item.name))
}
