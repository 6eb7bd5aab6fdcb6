//! Configuration for a game session.

use std::time::Duration;

use delve_engine::CombatRules;
use delve_foundation::{Dice, GlobalId};

/// Encoding used for saved games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveFormat {
    /// Human-readable JSON.
    #[default]
    Json,
    /// Compact `MessagePack` with named fields.
    MessagePack,
}

/// Configuration for a game session.
///
/// Controls where the player starts, how fast the world moves, and how
/// games are saved.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Area a new game starts in.
    pub start_area: String,

    /// Room inside `start_area` a new game starts in.
    pub start_room: String,

    /// Area of the resurrection room.
    pub respawn_area: String,

    /// Resurrection room inside `respawn_area`.
    pub respawn_room: String,

    /// Name given to a new character when none is supplied.
    pub player_name: String,

    /// RNG seed. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Column at which descriptions wrap.
    pub wrap_width: usize,

    /// Time between combat rounds.
    pub round_interval: Duration,

    /// Time between world ticks.
    pub tick_interval: Duration,

    /// Ticks between a hostile NPC's death and its return.
    pub respawn_delay_ticks: u64,

    /// Per-tick probability that a wandering NPC moves.
    pub wander_chance: f64,

    /// Damage roll when no weapon is equipped.
    pub unarmed_damage: Dice,

    /// Commands accepted during combat. Skill verbs are added on top.
    pub combat_commands: Vec<String>,

    /// Registers developer commands such as `levelup`.
    pub debug_commands: bool,

    /// Key the save is stored under.
    pub save_key: String,

    /// Encoding for new saves.
    pub save_format: SaveFormat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_area: "town".to_string(),
            start_room: "square".to_string(),
            respawn_area: "town".to_string(),
            respawn_room: "square".to_string(),
            player_name: "Adventurer".to_string(),
            seed: None,
            wrap_width: 78,
            round_interval: Duration::from_secs(2),
            tick_interval: Duration::from_secs(2),
            respawn_delay_ticks: 30,
            wander_chance: 0.05,
            unarmed_damage: Dice::new(1, 3, 0),
            combat_commands: ["flee", "look", "inventory", "stats", "use", "skills", "skill", "help"]
                .into_iter()
                .map(String::from)
                .collect(),
            debug_commands: false,
            save_key: "savegame".to_string(),
            save_format: SaveFormat::Json,
        }
    }
}

impl GameConfig {
    /// Creates a configuration for tests and tooling: fixed seed and debug
    /// commands on.
    #[must_use]
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            debug_commands: true,
            ..Self::default()
        }
    }

    /// Builder method to set the starting room. The resurrection room
    /// follows it.
    #[must_use]
    pub fn with_start(mut self, area: impl Into<String>, room: impl Into<String>) -> Self {
        self.start_area = area.into();
        self.start_room = room.into();
        self.respawn_area.clone_from(&self.start_area);
        self.respawn_room.clone_from(&self.start_room);
        self
    }

    /// Builder method to set the resurrection room.
    #[must_use]
    pub fn with_respawn(mut self, area: impl Into<String>, room: impl Into<String>) -> Self {
        self.respawn_area = area.into();
        self.respawn_room = room.into();
        self
    }

    /// Builder method to set the default character name.
    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Builder method to set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the wrap column.
    #[must_use]
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Builder method to set the combat round cadence.
    #[must_use]
    pub fn with_round_interval(mut self, interval: Duration) -> Self {
        self.round_interval = interval;
        self
    }

    /// Builder method to set the world tick cadence.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Builder method to set the respawn delay.
    #[must_use]
    pub fn with_respawn_delay_ticks(mut self, ticks: u64) -> Self {
        self.respawn_delay_ticks = ticks;
        self
    }

    /// Builder method to set the wander probability.
    #[must_use]
    pub fn with_wander_chance(mut self, chance: f64) -> Self {
        self.wander_chance = chance;
        self
    }

    /// Builder method to set the unarmed damage roll.
    #[must_use]
    pub fn with_unarmed_damage(mut self, dice: Dice) -> Self {
        self.unarmed_damage = dice;
        self
    }

    /// Builder method to enable/disable developer commands.
    #[must_use]
    pub fn with_debug_commands(mut self, enabled: bool) -> Self {
        self.debug_commands = enabled;
        self
    }

    /// Builder method to set the save key.
    #[must_use]
    pub fn with_save_key(mut self, key: impl Into<String>) -> Self {
        self.save_key = key.into();
        self
    }

    /// Builder method to set the save encoding.
    #[must_use]
    pub fn with_save_format(mut self, format: SaveFormat) -> Self {
        self.save_format = format;
        self
    }

    /// The starting room as a global id.
    #[must_use]
    pub fn start_room_id(&self) -> GlobalId {
        GlobalId::new(self.start_area.as_str(), self.start_room.as_str())
    }

    /// The resurrection room as a global id.
    #[must_use]
    pub fn respawn_room_id(&self) -> GlobalId {
        GlobalId::new(self.respawn_area.as_str(), self.respawn_room.as_str())
    }

    /// Combat tunables derived from this configuration.
    #[must_use]
    pub fn combat_rules(&self) -> CombatRules {
        CombatRules {
            unarmed_damage: self.unarmed_damage,
            respawn_delay_ticks: self.respawn_delay_ticks,
        }
    }
}
