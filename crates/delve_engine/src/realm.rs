//! The mutable game world.

use delve_foundation::{GlobalId, PlainStylist, Style, Stylist};
use delve_storage::{Player, SkillBook, WorldStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// World store, player, skill table, and the single random source.
pub struct Realm {
    /// Rooms, items, NPCs, and their locations.
    pub world: WorldStore,
    /// The player character.
    pub player: Player,
    /// Skill definitions.
    pub skills: SkillBook,
    /// Every random decision draws from here.
    pub rng: ChaCha8Rng,
    /// Formatting hook. Never affects state.
    pub stylist: Box<dyn Stylist>,
}

impl std::fmt::Debug for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realm")
            .field("world", &self.world)
            .field("player", &self.player.name)
            .field("skills", &self.skills.len())
            .finish_non_exhaustive()
    }
}

impl Realm {
    /// Creates a realm. `seed` makes every random decision reproducible.
    #[must_use]
    pub fn new(world: WorldStore, player: Player, skills: SkillBook, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            world,
            player,
            skills,
            rng,
            stylist: Box::new(PlainStylist),
        }
    }

    /// Replaces the formatting hook.
    #[must_use]
    pub fn with_stylist(mut self, stylist: Box<dyn Stylist>) -> Self {
        self.stylist = stylist;
        self
    }

    /// Shorthand for the stylist.
    #[must_use]
    pub fn paint(&self, text: &str, style: Style) -> String {
        self.stylist.colorize(text, style)
    }

    /// The room the player stands in.
    #[must_use]
    pub fn player_room(&self) -> &GlobalId {
        &self.player.current_room
    }

    /// Display name of an NPC, or its id if unknown.
    #[must_use]
    pub fn npc_name(&self, npc: &GlobalId) -> String {
        self.world
            .npc(npc)
            .map_or_else(|| npc.to_string(), |n| n.name.clone())
    }
}
