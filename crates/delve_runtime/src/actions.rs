//! Actions an external picker UI can offer the player.
//!
//! The groups mirror what the command set would accept right now: a dead
//! player is offered only `respawn`, a fighting player only what the
//! combat allow-list permits.

use delve_storage::{Item, ItemKind, Npc, PlayerState};
use serde::Serialize;

use crate::game::GameState;

/// One clickable action and the command it runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Text shown to the player.
    pub label: String,
    /// Command sent to [`Game::process_command`](crate::Game::process_command).
    pub command: String,
}

impl Action {
    fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
        }
    }
}

/// Actions about one item or NPC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TargetActions {
    /// Display name of the item or NPC.
    pub name: String,
    /// What can be done with it.
    pub actions: Vec<Action>,
}

/// Everything on offer, grouped for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ActionGroups {
    /// Actions not tied to a target.
    pub general: Vec<Action>,
    /// Per-item actions, room items first, then carried items.
    pub items: Vec<TargetActions>,
    /// Per-NPC actions for the player's room.
    pub npcs: Vec<TargetActions>,
}

impl ActionGroups {
    /// Every command on offer, in display order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.general
            .iter()
            .chain(self.items.iter().flat_map(|t| t.actions.iter()))
            .chain(self.npcs.iter().flat_map(|t| t.actions.iter()))
            .map(|a| a.command.as_str())
    }
}

/// Builds the action groups for the current state.
#[must_use]
pub fn available_actions(state: &GameState) -> ActionGroups {
    match state.realm.player.state {
        PlayerState::Dead => ActionGroups {
            general: vec![Action::new("Respawn", "respawn")],
            ..ActionGroups::default()
        },
        PlayerState::Fighting => fighting(state),
        PlayerState::Idle => idle(state),
    }
}

fn key(name: &str) -> String {
    name.to_lowercase()
}

fn fighting(state: &GameState) -> ActionGroups {
    let player = &state.realm.player;
    let mut general = vec![Action::new("Flee", "flee")];
    for skill in state.realm.skills.iter() {
        let usable = player.has_skill(&skill.id)
            && player.cooldown(&skill.id) == 0
            && player.stamina >= skill.cost;
        if usable {
            general.push(Action::new(skill.name.as_str(), format!("skill {}", skill.id)));
        }
    }
    general.push(Action::new("Look", "look"));
    general.push(Action::new("Stats", "stats"));

    let items = player
        .inventory
        .iter()
        .filter(|item| item.kind == ItemKind::Potion && item.heal_amount.is_some())
        .map(|item| TargetActions {
            name: item.name.clone(),
            actions: vec![Action::new("Drink", format!("use {}", key(&item.name)))],
        })
        .collect();
    ActionGroups {
        general,
        items,
        npcs: Vec::new(),
    }
}

fn idle(state: &GameState) -> ActionGroups {
    let realm = &state.realm;
    let room = realm.world.room(realm.player_room());
    let npcs: Vec<&Npc> = room
        .map(|r| r.npcs.iter().filter_map(|id| realm.world.npc(id)).collect())
        .unwrap_or_default();
    let merchant = npcs.iter().any(|npc| npc.is_alive() && !npc.shop.is_empty());

    let mut general = vec![Action::new("Look", "look")];
    if let Some(room) = room {
        for direction in room.exits.keys() {
            general.push(Action::new(format!("Go {direction}"), format!("go {direction}")));
        }
    }
    general.push(Action::new("Inventory", "inventory"));
    general.push(Action::new("Stats", "stats"));
    general.push(Action::new("Skills", "skills"));
    if merchant {
        general.push(Action::new("Browse wares", "list"));
    }
    if npcs.iter().any(|npc| npc.can_heal && npc.is_alive()) {
        general.push(Action::new("Ask for healing", "heal"));
    }
    general.push(Action::new("Save", "save"));
    general.push(Action::new("Load", "load"));

    let mut items: Vec<TargetActions> = room
        .map(|r| r.items.iter().filter_map(|id| realm.world.item(id)).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let mut actions = vec![Action::new("Examine", format!("examine {}", key(&item.name)))];
            if item.can_take {
                actions.push(Action::new("Take", format!("take {}", key(&item.name))));
            }
            TargetActions {
                name: item.name.clone(),
                actions,
            }
        })
        .collect();
    items.extend(realm.player.inventory.iter().map(|item| carried(item, merchant)));
    for (slot, item) in [
        ("weapon", realm.player.equipped_weapon.as_ref()),
        ("armor", realm.player.equipped_armor.as_ref()),
    ] {
        if let Some(item) = item {
            items.push(TargetActions {
                name: item.name.clone(),
                actions: vec![Action::new("Unequip", format!("unequip {slot}"))],
            });
        }
    }

    let npcs = npcs
        .into_iter()
        .map(|npc| {
            let name = key(&npc.name);
            let mut actions = vec![Action::new("Examine", format!("examine {name}"))];
            if npc.is_alive() {
                if !npc.is_hostile() && !npc.dialogue.is_empty() {
                    actions.push(Action::new("Talk", format!("talk {name}")));
                }
                if npc.is_hostile() {
                    actions.push(Action::new("Attack", format!("attack {name}")));
                }
            }
            TargetActions {
                name: npc.name.clone(),
                actions,
            }
        })
        .collect();

    ActionGroups { general, items, npcs }
}

fn carried(item: &Item, merchant: bool) -> TargetActions {
    let name = key(&item.name);
    let mut actions = Vec::new();
    if item.is_equippable() {
        actions.push(Action::new("Equip", format!("equip {name}")));
    }
    if item.kind == ItemKind::Potion && item.heal_amount.is_some() {
        actions.push(Action::new("Drink", format!("use {name}")));
    }
    actions.push(Action::new("Drop", format!("drop {name}")));
    if merchant && item.value >= 2 {
        actions.push(Action::new("Sell", format!("sell {name}")));
    }
    TargetActions {
        name: item.name.clone(),
        actions,
    }
}
