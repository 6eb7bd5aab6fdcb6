//! World ticks.
//!
//! A tick is one step of simulation time independent of player input and
//! of combat. Each tick runs three sweeps in order:
//! 1. Respawn: due entries of the respawn queue are reinstated
//! 2. Cooldown: every active skill cooldown drops by one
//! 3. Wander: eligible NPCs may step through a same-zone exit
//!
//! Only changes the player could notice produce messages.

use delve_foundation::{GlobalId, Style};
use delve_storage::WorldStore;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::bus::{GameMessage, MessageKind};
use crate::realm::Realm;

/// A queued respawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RespawnEntry {
    /// The NPC to bring back.
    pub npc: GlobalId,
    /// Where it reappears.
    pub room: GlobalId,
    /// First tick at which it may reappear.
    pub due_tick: u64,
}

/// Drives the world between player commands.
#[derive(Clone, Debug)]
pub struct TickScheduler {
    tick_number: u64,
    respawn_queue: Vec<RespawnEntry>,
    wander_chance: f64,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl TickScheduler {
    /// Creates a scheduler. `wander_chance` is the per-tick probability that
    /// an eligible NPC moves.
    #[must_use]
    pub fn new(wander_chance: f64) -> Self {
        Self {
            tick_number: 0,
            respawn_queue: Vec::new(),
            wander_chance: sanitize(wander_chance),
        }
    }

    /// Number of ticks run since creation or the last reset.
    #[must_use]
    pub fn tick_number(&self) -> u64 {
        self.tick_number
    }

    /// Per-tick wander probability.
    #[must_use]
    pub fn wander_chance(&self) -> f64 {
        self.wander_chance
    }

    /// Changes the wander probability.
    pub fn set_wander_chance(&mut self, chance: f64) {
        self.wander_chance = sanitize(chance);
    }

    /// Queued respawns, in scheduling order.
    pub fn pending_respawns(&self) -> impl Iterator<Item = &RespawnEntry> {
        self.respawn_queue.iter()
    }

    /// Queues `npc` to reappear in `room` after `delay_ticks`.
    ///
    /// Only hostile NPCs are admitted. Scheduling an NPC that is already
    /// queued replaces its entry. Returns whether the entry was queued.
    pub fn schedule_npc_respawn(
        &mut self,
        world: &WorldStore,
        npc: &GlobalId,
        room: &GlobalId,
        delay_ticks: u64,
    ) -> bool {
        if !world.npc(npc).is_some_and(delve_storage::Npc::is_hostile) {
            return false;
        }
        self.respawn_queue.retain(|entry| &entry.npc != npc);
        let due_tick = self.tick_number + delay_ticks;
        debug!(%npc, %room, due_tick, "respawn scheduled");
        self.respawn_queue.push(RespawnEntry {
            npc: npc.clone(),
            room: room.clone(),
            due_tick,
        });
        true
    }

    /// Drops a queued respawn.
    pub fn cancel_respawn(&mut self, npc: &GlobalId) -> bool {
        let before = self.respawn_queue.len();
        self.respawn_queue.retain(|entry| &entry.npc != npc);
        self.respawn_queue.len() != before
    }

    /// Clears the respawn queue and the tick counter.
    pub fn reset(&mut self) {
        self.respawn_queue.clear();
        self.tick_number = 0;
    }

    /// Runs one tick. `combat_target` is never moved by the wander sweep.
    pub fn advance_tick(&mut self, realm: &mut Realm, combat_target: Option<&GlobalId>) -> Vec<GameMessage> {
        self.tick_number += 1;
        let mut messages = Vec::new();
        self.respawn_sweep(realm, &mut messages);
        Self::cooldown_sweep(realm, &mut messages);
        self.wander_sweep(realm, combat_target, &mut messages);
        messages
    }

    fn respawn_sweep(&mut self, realm: &mut Realm, out: &mut Vec<GameMessage>) {
        let now = self.tick_number;
        let (due, waiting): (Vec<_>, Vec<_>) = self
            .respawn_queue
            .drain(..)
            .partition(|entry| entry.due_tick <= now);
        self.respawn_queue = waiting;

        for entry in due {
            let already_back = realm.world.npc_location(&entry.npc).is_some()
                && realm.world.npc(&entry.npc).is_some_and(delve_storage::Npc::is_alive);
            if already_back {
                debug!(npc = %entry.npc, "respawn skipped, npc already present");
                continue;
            }
            let Some(npc) = realm.world.npc_mut(&entry.npc) else {
                continue;
            };
            npc.respawn();
            if let Err(e) = realm.world.place_npc(&entry.npc, &entry.room) {
                warn!(npc = %entry.npc, room = %entry.room, error = %e, "respawn failed");
                continue;
            }
            debug!(npc = %entry.npc, room = %entry.room, "npc respawned");
            if realm.player.is_alive() && realm.player.current_room == entry.room {
                let name = realm.paint(&realm.npc_name(&entry.npc), Style::Hostile);
                out.push(GameMessage::new(MessageKind::Respawn, format!("{name} appears.")));
            }
        }
    }

    fn cooldown_sweep(realm: &mut Realm, out: &mut Vec<GameMessage>) {
        let ready = realm.player.tick_cooldowns();
        if !realm.player.is_alive() {
            return;
        }
        for id in ready {
            let name = realm.skills.get(&id).map_or(id.as_str(), |s| s.name.as_str());
            let name = realm.paint(name, Style::Success);
            out.push(GameMessage::new(MessageKind::Cooldown, format!("{name} is ready.")));
        }
    }

    fn wander_sweep(&self, realm: &mut Realm, combat_target: Option<&GlobalId>, out: &mut Vec<GameMessage>) {
        if self.wander_chance <= 0.0 {
            return;
        }
        let candidates: Vec<(GlobalId, GlobalId)> = realm
            .world
            .npcs()
            .filter(|npc| npc.can_wander && npc.is_alive() && Some(&npc.id) != combat_target)
            .filter_map(|npc| {
                realm
                    .world
                    .npc_location(&npc.id)
                    .map(|room| (npc.id.clone(), room.clone()))
            })
            .collect();

        for (npc, from) in candidates {
            if !realm.rng.gen_bool(self.wander_chance) {
                continue;
            }
            let exits = realm.world.same_zone_exits(&from);
            let Some((direction, to)) = exits.choose(&mut realm.rng).cloned() else {
                continue;
            };
            if let Err(e) = realm.world.place_npc(&npc, &to) {
                warn!(%npc, error = %e, "wander failed");
                continue;
            }
            debug!(%npc, %from, %to, "npc wandered");

            if !realm.player.is_alive() {
                continue;
            }
            let here = &realm.player.current_room;
            let name = realm.npc_name(&npc);
            if *here == from {
                let name = realm.paint(&name, Style::Npc);
                out.push(GameMessage::new(MessageKind::Wander, format!("{name} wanders {direction}.")));
            } else if *here == to {
                let name = realm.paint(&name, Style::Npc);
                out.push(GameMessage::new(MessageKind::Wander, format!("{name} wanders in.")));
            }
        }
    }
}

fn sanitize(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}
