//! Non-player characters.

use delve_foundation::{Dice, GlobalId};
use rand::Rng;
use serde::Deserialize;

use crate::area::NpcData;

/// NPC disposition toward the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcKind {
    /// Will not fight back and never respawns if killed.
    Friendly,
    /// Indifferent.
    #[default]
    Neutral,
    /// Attackable enemy; respawns after death.
    Hostile,
}

/// What a special ability does when it triggers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbilityEffect {
    /// Message plus an ordinary attack roll.
    #[default]
    Flavor,
    /// Attack roll scaled by `multiplier`.
    Strike {
        /// Damage multiplier.
        multiplier: f64,
    },
    /// The NPC recovers hit points.
    Heal {
        /// Hit points restored.
        amount: u32,
    },
    /// The player is thrown out of the room, ending the fight.
    Knockback,
}

/// A scripted ability with a per-turn trigger chance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpecialAbility {
    /// Ability name.
    pub name: String,
    /// Trigger probability, as a fraction or a percentage.
    pub chance: f64,
    /// Text shown when it triggers.
    #[serde(default)]
    pub message: String,
    /// Scripted effect.
    #[serde(default)]
    pub effect: AbilityEffect,
}

impl SpecialAbility {
    /// Trigger probability in `[0, 1]`. Values above 1 are read as percentages.
    #[must_use]
    pub fn probability(&self) -> f64 {
        let p = if self.chance > 1.0 {
            self.chance / 100.0
        } else {
            self.chance
        };
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }
}

/// A live NPC instance.
///
/// Hit points are kept in `[0, max_hit_points]`; an NPC is alive exactly when
/// its hit points are above zero.
#[derive(Clone, Debug)]
pub struct Npc {
    /// Global id.
    pub id: GlobalId,
    /// Display name.
    pub name: String,
    /// Examine text.
    pub description: String,
    /// Disposition.
    pub kind: NpcKind,
    hit_points: u32,
    max_hit_points: u32,
    /// Attack roll.
    pub damage: Dice,
    /// Experience granted on death.
    pub experience: u32,
    /// Items always dropped on death.
    pub drops: Vec<GlobalId>,
    /// Dialogue rotation.
    pub dialogue: Vec<String>,
    dialogue_index: usize,
    /// Offers healing.
    pub can_heal: bool,
    /// Items for sale.
    pub shop: Vec<GlobalId>,
    /// Roams between ticks.
    pub can_wander: bool,
    /// Flee threshold in percent; zero disables.
    pub flees_at_percent: u32,
    /// Scripted abilities.
    pub special_abilities: Vec<SpecialAbility>,
    /// Room listing this NPC in its area document.
    pub home_room: Option<GlobalId>,
}

impl Npc {
    /// Instantiates an NPC from area data. Item ids are resolved by the caller.
    #[must_use]
    pub fn from_data(
        id: GlobalId,
        data: NpcData,
        drops: Vec<GlobalId>,
        shop: Vec<GlobalId>,
        home_room: Option<GlobalId>,
    ) -> Self {
        let max_hit_points = data.max_hit_points.max(1);
        Self {
            id,
            name: data.name,
            description: data.description,
            kind: data.kind,
            hit_points: data.hit_points.min(max_hit_points),
            max_hit_points,
            damage: data.damage,
            experience: data.experience,
            drops,
            dialogue: data.dialogue,
            dialogue_index: 0,
            can_heal: data.can_heal,
            shop,
            can_wander: data.can_wander,
            flees_at_percent: data.flees_at_percent,
            special_abilities: data.special_abilities,
            home_room,
        }
    }

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

    /// Returns true for hostile NPCs.
    #[must_use]
    pub fn is_hostile(&self) -> bool {
        self.kind == NpcKind::Hostile
    }

    /// Overwrites hit points, clamped to the valid range.
    pub fn set_hit_points(&mut self, hit_points: u32) {
        self.hit_points = hit_points.min(self.max_hit_points);
    }

    /// Applies damage and returns whether the NPC is still alive.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hit_points = self.hit_points.saturating_sub(amount);
        self.is_alive()
    }

    /// Restores hit points up to the maximum and returns the amount healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hit_points;
        self.hit_points = self.hit_points.saturating_add(amount).min(self.max_hit_points);
        self.hit_points - before
    }

    /// Rolls this NPC's attack damage.
    pub fn roll_damage(&self, rng: &mut impl Rng) -> u32 {
        self.damage.roll(rng)
    }

    /// Remaining health as a whole percentage of the maximum.
    #[must_use]
    pub fn health_percent(&self) -> u32 {
        u32::try_from(u64::from(self.hit_points) * 100 / u64::from(self.max_hit_points))
            .unwrap_or(100)
    }

    /// Returns true once health has dropped to the flee threshold.
    #[must_use]
    pub fn wants_to_flee(&self) -> bool {
        self.flees_at_percent > 0 && self.is_alive() && self.health_percent() <= self.flees_at_percent
    }

    /// Returns the next dialogue line, cycling back to the first.
    pub fn speak(&mut self) -> String {
        if self.dialogue.is_empty() {
            return format!("{} stays silent.", self.name);
        }
        let line = self.dialogue[self.dialogue_index % self.dialogue.len()].clone();
        self.dialogue_index = (self.dialogue_index + 1) % self.dialogue.len();
        line
    }

    /// Restores full health and rewinds the dialogue.
    pub fn respawn(&mut self) {
        self.hit_points = self.max_hit_points;
        self.dialogue_index = 0;
    }

    /// Case-insensitive substring match against the name or local id.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        !query.is_empty()
            && (self.name.to_lowercase().contains(query)
                || self.id.local().to_lowercase().contains(query))
    }
}
