//! Items.

use delve_foundation::{Dice, GlobalId};
use serde::{Deserialize, Serialize};

use crate::area::ItemData;

/// Item category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Equippable in the weapon slot.
    Weapon,
    /// Equippable in the armor slot.
    Armor,
    /// Consumed by `use` for healing.
    Potion,
    /// Opens something. Carried only.
    Key,
    /// Anything else, including unknown categories in area data.
    #[default]
    #[serde(other)]
    Misc,
}

/// An item definition in the world, or a snapshot of one carried by the player.
///
/// The player never holds references into the world store: taking an item
/// copies it, tagged with its [`GlobalId`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Global id.
    pub id: GlobalId,
    /// Display name.
    pub name: String,
    /// Examine text.
    pub description: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Weapon damage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Dice>,
    /// Armor value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<u32>,
    /// Potion healing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal_amount: Option<u32>,
    /// Carry weight.
    #[serde(default)]
    pub weight: u32,
    /// Shop value in gold.
    #[serde(default)]
    pub value: u32,
    /// Whether the player may pick it up.
    pub can_take: bool,
}

impl Item {
    /// Instantiates an item from area data.
    #[must_use]
    pub fn from_data(id: GlobalId, data: ItemData) -> Self {
        Self {
            id,
            name: data.name,
            description: data.description,
            kind: data.kind,
            damage: data.damage,
            armor: data.armor,
            heal_amount: data.heal_amount,
            weight: data.weight,
            value: data.value,
            can_take: data.can_take,
        }
    }

    /// The area this item was defined in.
    #[must_use]
    pub fn area(&self) -> &str {
        self.id.area()
    }

    /// Case-insensitive substring match against the name or local id.
    ///
    /// `query` is expected to already be lowercase.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        !query.is_empty()
            && (self.name.to_lowercase().contains(query)
                || self.id.local().to_lowercase().contains(query))
    }

    /// Returns true for items that go into an equipment slot.
    #[must_use]
    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon | ItemKind::Armor)
    }
}
