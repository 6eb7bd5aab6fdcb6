//! Player state and progression.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use delve_foundation::GlobalId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::{Item, ItemKind};
use crate::skills::SkillBook;

/// Hit points gained per level.
pub const HIT_POINTS_PER_LEVEL: u32 = 5;
/// Stamina gained per level.
pub const STAMINA_PER_LEVEL: u32 = 10;
/// Carry capacity per point of strength.
pub const CARRY_PER_STRENGTH: u32 = 10;

/// What the player is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Free to act.
    #[default]
    Idle,
    /// In an encounter.
    Fighting,
    /// Waiting to respawn.
    Dead,
}

/// One of the six attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Melee damage and carry capacity.
    Strength,
    /// Agility.
    Dexterity,
    /// Toughness.
    Constitution,
    /// Reasoning.
    Intelligence,
    /// Insight.
    Wisdom,
    /// Presence.
    Charisma,
}

impl Attribute {
    /// Every attribute, in display order.
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        };
        f.write_str(name)
    }
}

/// The six attribute scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    /// Strength.
    pub strength: u32,
    /// Dexterity.
    pub dexterity: u32,
    /// Constitution.
    pub constitution: u32,
    /// Intelligence.
    pub intelligence: u32,
    /// Wisdom.
    pub wisdom: u32,
    /// Charisma.
    pub charisma: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl Attributes {
    /// Score of one attribute.
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    fn slot(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Raises one attribute by one point.
    pub fn increment(&mut self, attribute: Attribute) {
        *self.slot(attribute) += 1;
    }
}

/// Summary of a single level gained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    /// The new level.
    pub level: u32,
    /// Attribute that received the bonus point.
    pub attribute: Attribute,
    /// New maximum hit points.
    pub max_hit_points: u32,
    /// New maximum stamina.
    pub max_stamina: u32,
}

/// Inventory and equipment failures. `Display` is the player-facing sentence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Carrying the item would exceed capacity.
    #[error("You can't carry {0}; it's too heavy.")]
    TooHeavy(String),
    /// The item cannot go into that slot.
    #[error("You can't equip {0}.")]
    NotEquippable(String),
    /// The slot is already empty.
    #[error("You don't have anything equipped there.")]
    SlotEmpty,
    /// The swapped-out item does not fit back in the pack.
    #[error("You can't swap out {0}; your pack is too full to hold it.")]
    NoRoomForSwap(String),
}

/// The player character.
///
/// Hit points are kept in `[0, max_hit_points]`; reaching zero moves the
/// player to [`PlayerState::Dead`] and records the room of death. Saved
/// snapshots are brought back inside those bounds as they are read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PlayerRecord")]
pub struct Player {
    /// Character name.
    pub name: String,
    /// Current level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Experience needed for the next level.
    pub experience_to_next: u32,
    hit_points: u32,
    max_hit_points: u32,
    /// Current stamina.
    pub stamina: u32,
    /// Maximum stamina.
    pub max_stamina: u32,
    /// Attribute scores.
    pub attributes: Attributes,
    /// Carried item snapshots.
    pub inventory: Vec<Item>,
    /// Weapon slot.
    pub equipped_weapon: Option<Item>,
    /// Armor slot.
    pub equipped_armor: Option<Item>,
    /// Learned skill ids.
    pub skills: BTreeSet<String>,
    /// Remaining cooldown ticks per skill. Entries are removed at zero.
    pub cooldowns: BTreeMap<String, u32>,
    /// Gold.
    pub gold: u32,
    /// Where the player stands.
    pub current_room: GlobalId,
    /// Activity state.
    pub state: PlayerState,
    /// Room the player last died in.
    pub death_room: Option<GlobalId>,
}

/// A player as written in a save, before its pools are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRecord {
    name: String,
    level: u32,
    experience: u32,
    experience_to_next: u32,
    hit_points: u32,
    max_hit_points: u32,
    stamina: u32,
    max_stamina: u32,
    attributes: Attributes,
    inventory: Vec<Item>,
    equipped_weapon: Option<Item>,
    equipped_armor: Option<Item>,
    skills: BTreeSet<String>,
    cooldowns: BTreeMap<String, u32>,
    gold: u32,
    current_room: GlobalId,
    state: PlayerState,
    death_room: Option<GlobalId>,
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        let mut player = Self {
            name: record.name,
            level: record.level,
            experience: record.experience,
            experience_to_next: record.experience_to_next,
            hit_points: record.hit_points.min(record.max_hit_points),
            max_hit_points: record.max_hit_points,
            stamina: record.stamina.min(record.max_stamina),
            max_stamina: record.max_stamina,
            attributes: record.attributes,
            inventory: record.inventory,
            equipped_weapon: record.equipped_weapon,
            equipped_armor: record.equipped_armor,
            skills: record.skills,
            cooldowns: record.cooldowns,
            gold: record.gold,
            current_room: record.current_room,
            state: record.state,
            death_room: record.death_room,
        };
        player.cooldowns.retain(|_, ticks| *ticks > 0);
        if player.hit_points == 0 {
            player.state = PlayerState::Dead;
            if player.death_room.is_none() {
                player.death_room = Some(player.current_room.clone());
            }
        } else if player.state == PlayerState::Dead {
            player.state = PlayerState::Idle;
        }
        player
    }
}

impl Player {
    /// Starting hit points.
    pub const STARTING_HIT_POINTS: u32 = 20;
    /// Starting stamina.
    pub const STARTING_STAMINA: u32 = 20;

    /// A fresh level-one character.
    #[must_use]
    pub fn new(name: impl Into<String>, start_room: GlobalId) -> Self {
        Self {
            name: name.into(),
            level: 1,
            experience: 0,
            experience_to_next: 100,
            hit_points: Self::STARTING_HIT_POINTS,
            max_hit_points: Self::STARTING_HIT_POINTS,
            stamina: Self::STARTING_STAMINA,
            max_stamina: Self::STARTING_STAMINA,
            attributes: Attributes::default(),
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            skills: BTreeSet::new(),
            cooldowns: BTreeMap::new(),
            gold: 0,
            current_room: start_room,
            state: PlayerState::Idle,
            death_room: None,
        }
    }

    // -------------------------------------------------------------------------
    // Health
    // -------------------------------------------------------------------------

    /// Current hit points.
    #[must_use]
    pub const fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    /// Alive while hit points are above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Applies damage and returns whether the player survived.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hit_points = self.hit_points.saturating_sub(amount);
        if self.hit_points == 0 {
            self.state = PlayerState::Dead;
            self.death_room = Some(self.current_room.clone());
        }
        self.is_alive()
    }

    /// Heals up to the maximum and returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hit_points;
        self.hit_points = self.hit_points.saturating_add(amount).min(self.max_hit_points);
        self.hit_points - before
    }

    /// Refills hit points and stamina.
    pub fn restore(&mut self) {
        self.hit_points = self.max_hit_points;
        self.stamina = self.max_stamina;
    }

    /// Brings a dead player back at `room` with full pools.
    pub fn resurrect(&mut self, room: GlobalId) {
        self.restore();
        self.state = PlayerState::Idle;
        self.current_room = room;
    }

    /// Spends stamina if enough is available.
    pub fn spend_stamina(&mut self, cost: u32) -> bool {
        if self.stamina < cost {
            return false;
        }
        self.stamina -= cost;
        true
    }

    // -------------------------------------------------------------------------
    // Progression
    // -------------------------------------------------------------------------

    /// Adds experience, applying as many level-ups as it pays for.
    ///
    /// Returns the last level-up, if any occurred.
    pub fn add_experience(&mut self, amount: u32, rng: &mut impl Rng) -> Option<LevelUp> {
        self.experience = self.experience.saturating_add(amount);
        let mut last = None;
        while self.experience >= self.experience_to_next {
            last = Some(self.level_up(rng));
        }
        last
    }

    /// Gains one level.
    ///
    /// The threshold is subtracted from experience, clamped at zero, so a
    /// forced level-up never leaves a negative remainder.
    pub fn level_up(&mut self, rng: &mut impl Rng) -> LevelUp {
        self.experience = self.experience.saturating_sub(self.experience_to_next);
        self.level += 1;
        self.experience_to_next = self.level * 100;
        self.max_hit_points += HIT_POINTS_PER_LEVEL;
        self.max_stamina += STAMINA_PER_LEVEL;
        self.restore();

        let attribute = Attribute::ALL[rng.gen_range(0..Attribute::ALL.len())];
        self.attributes.increment(attribute);

        LevelUp {
            level: self.level,
            attribute,
            max_hit_points: self.max_hit_points,
            max_stamina: self.max_stamina,
        }
    }

    /// `floor((strength - 10) / 2)`.
    #[must_use]
    pub fn strength_modifier(&self) -> i32 {
        let strength = i32::try_from(self.attributes.strength).unwrap_or(i32::MAX);
        (strength - 10).div_euclid(2)
    }

    // -------------------------------------------------------------------------
    // Skills
    // -------------------------------------------------------------------------

    /// Returns true if the skill has been learned.
    #[must_use]
    pub fn has_skill(&self, id: &str) -> bool {
        self.skills.contains(id)
    }

    /// Learns every skill unlocked at the current level. Returns the new ones.
    pub fn learn_unlocked_skills(&mut self, book: &SkillBook) -> Vec<String> {
        let mut learned = Vec::new();
        for skill in book.unlocked_at(self.level) {
            if self.skills.insert(skill.id.clone()) {
                learned.push(skill.name.clone());
            }
        }
        learned
    }

    /// Remaining cooldown for a skill.
    #[must_use]
    pub fn cooldown(&self, id: &str) -> u32 {
        self.cooldowns.get(id).copied().unwrap_or(0)
    }

    /// Starts a cooldown. A zero cooldown leaves no entry.
    pub fn start_cooldown(&mut self, id: &str, ticks: u32) {
        if ticks == 0 {
            self.cooldowns.remove(id);
        } else {
            self.cooldowns.insert(id.to_string(), ticks);
        }
    }

    /// Decrements every active cooldown by one tick and returns the skills
    /// that became ready.
    pub fn tick_cooldowns(&mut self) -> Vec<String> {
        let mut ready = Vec::new();
        self.cooldowns.retain(|id, remaining| {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                ready.push(id.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------

    /// Total weight of carried items. Equipped items do not count.
    #[must_use]
    pub fn carried_weight(&self) -> u32 {
        self.inventory.iter().map(|item| item.weight).sum()
    }

    /// Maximum carried weight.
    #[must_use]
    pub fn carry_capacity(&self) -> u32 {
        self.attributes.strength * CARRY_PER_STRENGTH
    }

    /// Returns true if `item` fits in the pack.
    #[must_use]
    pub fn can_carry(&self, item: &Item) -> bool {
        self.carried_weight() + item.weight <= self.carry_capacity()
    }

    /// Puts an item in the pack.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::TooHeavy`] when capacity would be exceeded.
    /// The item is dropped in that case; check [`Player::can_carry`] first to
    /// keep it.
    pub fn add_item(&mut self, item: Item) -> Result<(), InventoryError> {
        if !self.can_carry(&item) {
            return Err(InventoryError::TooHeavy(item.name));
        }
        self.inventory.push(item);
        Ok(())
    }

    /// Index of the first carried item matching `query`.
    #[must_use]
    pub fn find_item(&self, query: &str) -> Option<usize> {
        let query = query.to_lowercase();
        self.inventory.iter().position(|item| item.matches(&query))
    }

    /// Removes and returns the carried item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_item(&mut self, index: usize) -> Item {
        self.inventory.remove(index)
    }

    /// Equipped armor rating.
    #[must_use]
    pub fn armor_value(&self) -> u32 {
        self.equipped_armor
            .as_ref()
            .and_then(|item| item.armor)
            .unwrap_or(0)
    }

    /// Moves the weapon at inventory `index` into the weapon slot.
    ///
    /// Returns the name of the weapon that went back into the pack, if any.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the item is not a weapon or the
    /// previously equipped weapon no longer fits in the pack.
    pub fn equip_weapon(&mut self, index: usize) -> Result<Option<String>, InventoryError> {
        self.equip_into(index, ItemKind::Weapon)
    }

    /// Moves the armor at inventory `index` into the armor slot.
    ///
    /// # Errors
    ///
    /// See [`Player::equip_weapon`].
    pub fn equip_armor(&mut self, index: usize) -> Result<Option<String>, InventoryError> {
        self.equip_into(index, ItemKind::Armor)
    }

    /// Equips the item at `index` into whichever slot its kind uses.
    ///
    /// # Errors
    ///
    /// See [`Player::equip_weapon`].
    pub fn equip(&mut self, index: usize) -> Result<Option<String>, InventoryError> {
        match self.inventory[index].kind {
            ItemKind::Weapon => self.equip_weapon(index),
            ItemKind::Armor => self.equip_armor(index),
            _ => Err(InventoryError::NotEquippable(self.inventory[index].name.clone())),
        }
    }

    fn equip_into(&mut self, index: usize, kind: ItemKind) -> Result<Option<String>, InventoryError> {
        if self.inventory[index].kind != kind {
            return Err(InventoryError::NotEquippable(self.inventory[index].name.clone()));
        }
        let incoming = self.inventory.remove(index);
        let slot = match kind {
            ItemKind::Armor => &self.equipped_armor,
            _ => &self.equipped_weapon,
        };
        if let Some(previous) = slot {
            if !self.can_carry(previous) {
                let name = previous.name.clone();
                self.inventory.insert(index, incoming);
                return Err(InventoryError::NoRoomForSwap(name));
            }
        }
        let slot = match kind {
            ItemKind::Armor => &mut self.equipped_armor,
            _ => &mut self.equipped_weapon,
        };
        let previous = slot.replace(incoming);
        Ok(previous.map(|item| {
            let name = item.name.clone();
            self.inventory.push(item);
            name
        }))
    }

    /// Returns the equipped weapon to the pack.
    ///
    /// # Errors
    ///
    /// Fails if nothing is equipped or the pack cannot hold it.
    pub fn unequip_weapon(&mut self) -> Result<String, InventoryError> {
        let item = self.equipped_weapon.take().ok_or(InventoryError::SlotEmpty)?;
        self.stow_unequipped(item, |p, item| p.equipped_weapon = Some(item))
    }

    /// Returns the equipped armor to the pack.
    ///
    /// # Errors
    ///
    /// Fails if nothing is equipped or the pack cannot hold it.
    pub fn unequip_armor(&mut self) -> Result<String, InventoryError> {
        let item = self.equipped_armor.take().ok_or(InventoryError::SlotEmpty)?;
        self.stow_unequipped(item, |p, item| p.equipped_armor = Some(item))
    }

    fn stow_unequipped(
        &mut self,
        item: Item,
        put_back: impl FnOnce(&mut Self, Item),
    ) -> Result<String, InventoryError> {
        if !self.can_carry(&item) {
            let name = item.name.clone();
            put_back(self, item);
            return Err(InventoryError::TooHeavy(name));
        }
        let name = item.name.clone();
        self.inventory.push(item);
        Ok(name)
    }
}
