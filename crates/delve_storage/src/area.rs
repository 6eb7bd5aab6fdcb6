//! The area document schema.
//!
//! One JSON document per zone. Ids inside a document are local to it; the
//! world store turns them into [`GlobalId`](delve_foundation::GlobalId)s when
//! the area is loaded.

use std::collections::BTreeMap;

use delve_foundation::Dice;
use serde::Deserialize;

use crate::item::ItemKind;
use crate::npc::{NpcKind, SpecialAbility};
use crate::room::Exit;

/// A whole area document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaDocument {
    /// Area id. Must match the id it was requested under.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Rooms keyed by local id.
    #[serde(default)]
    pub rooms: BTreeMap<String, RoomData>,
    /// Items keyed by local id.
    #[serde(default)]
    pub items: BTreeMap<String, ItemData>,
    /// NPCs keyed by local id.
    #[serde(default)]
    pub npcs: BTreeMap<String, NpcData>,
}

/// A room as written in the area document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomData {
    /// Display name.
    pub name: String,
    /// Room text, wrapped at display time.
    #[serde(default)]
    pub description: String,
    /// Direction token to destination.
    #[serde(default)]
    pub exits: BTreeMap<String, Exit>,
    /// Local item ids lying in the room.
    #[serde(default)]
    pub items: Vec<String>,
    /// Local NPC ids that start in the room.
    #[serde(default)]
    pub npcs: Vec<String>,
}

/// An item as written in the area document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    /// Display name.
    pub name: String,
    /// Examine text.
    #[serde(default)]
    pub description: String,
    /// Item category.
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    /// Weapon damage.
    #[serde(default)]
    pub damage: Option<Dice>,
    /// Armor value.
    #[serde(default)]
    pub armor: Option<u32>,
    /// Potion healing.
    #[serde(default)]
    pub heal_amount: Option<u32>,
    /// Carry weight.
    #[serde(default)]
    pub weight: u32,
    /// Shop value in gold.
    #[serde(default)]
    pub value: u32,
    /// Whether the player may pick it up.
    #[serde(default = "default_can_take")]
    pub can_take: bool,
}

fn default_can_take() -> bool {
    true
}

/// An NPC as written in the area document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcData {
    /// Display name.
    pub name: String,
    /// Examine text.
    #[serde(default)]
    pub description: String,
    /// Disposition.
    #[serde(rename = "type", default)]
    pub kind: NpcKind,
    /// Starting hit points.
    pub hit_points: u32,
    /// Maximum hit points.
    pub max_hit_points: u32,
    /// Attack roll.
    pub damage: Dice,
    /// Experience granted on death.
    #[serde(default)]
    pub experience: u32,
    /// Local item ids always dropped on death.
    #[serde(default)]
    pub drops: Vec<String>,
    /// Dialogue lines, spoken in rotation.
    #[serde(default)]
    pub dialogue: Vec<String>,
    /// Whether the NPC offers healing.
    #[serde(default)]
    pub can_heal: bool,
    /// Local item ids the NPC sells.
    #[serde(default)]
    pub shop: Vec<String>,
    /// Whether the NPC roams between ticks.
    #[serde(default)]
    pub can_wander: bool,
    /// Health percentage at or below which the NPC flees. Zero disables.
    #[serde(default)]
    pub flees_at_percent: u32,
    /// Scripted abilities evaluated each NPC turn.
    #[serde(default)]
    pub special_abilities: Vec<SpecialAbility>,
}
