//! Turn-based combat.
//!
//! At most one encounter is active. [`CombatEngine::start`] hands back a
//! [`RoundTicket`]; the caller redeems it with
//! [`CombatEngine::advance_round`] when the round interval elapses. Every
//! stop bumps the engine's generation, so a ticket issued before the stop
//! can never resolve a round afterwards.
//!
//! A round resolves in a fixed order:
//! 1. The player attacks (weapon or unarmed roll, strength modifier, queued
//!    skill multiplier, minimum 1).
//! 2. A killed NPC grants experience and drops, leaves the map, and is
//!    queued for respawn if hostile. Outcome: victory.
//! 3. Otherwise the NPC acts: flee at its health threshold, else any
//!    special abilities that trigger, else a standard attack. A killed
//!    player ends the encounter in defeat.

use std::fmt;

use delve_foundation::{Dice, GlobalId, Style};
use delve_storage::{AbilityEffect, PlayerState};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, warn};

use crate::realm::Realm;
use crate::tick::TickScheduler;

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombatOutcome {
    /// The NPC died.
    Victory,
    /// The player died.
    Defeat,
    /// The player left, by choice or by force.
    Fled,
    /// The NPC ran away.
    NpcFled,
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::Fled => "fled",
            Self::NpcFled => "npc-fled",
        };
        f.write_str(s)
    }
}

/// Combat rejections. `Display` is the player-facing sentence.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CombatError {
    /// An encounter is already running.
    #[error("You are already fighting {0}!")]
    AlreadyFighting(String),
    /// No encounter is running.
    #[error("You aren't fighting anyone.")]
    NotFighting,
    /// The target is not in the world.
    #[error("There is no {0} here.")]
    NoTarget(String),
    /// The target is already dead.
    #[error("{0} is already dead.")]
    TargetDead(String),
    /// The player is dead.
    #[error("You are in no condition to fight.")]
    PlayerDead,
    /// The skill is not in the skill table.
    #[error("You don't know a skill called '{0}'.")]
    UnknownSkill(String),
    /// The skill has not been learned yet.
    #[error("You haven't learned {0} yet.")]
    NotLearned(String),
    /// The skill is cooling down.
    #[error("{skill} is not ready yet ({ticks} more ticks).")]
    OnCooldown {
        /// Skill name.
        skill: String,
        /// Remaining ticks.
        ticks: u32,
    },
    /// Not enough stamina.
    #[error("You need {cost} stamina to use {skill}.")]
    NotEnoughStamina {
        /// Skill name.
        skill: String,
        /// Stamina cost.
        cost: u32,
    },
    /// A skill was already used this round.
    #[error("You have already used a skill this round.")]
    SkillAlreadyUsed,
}

/// Tunables for combat resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatRules {
    /// Roll used when no weapon is equipped.
    pub unarmed_damage: Dice,
    /// Ticks between a hostile NPC's death and its respawn.
    pub respawn_delay_ticks: u64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            unarmed_damage: Dice::new(1, 3, 0),
            respawn_delay_ticks: 30,
        }
    }
}

/// Redeemable once for the next round of the encounter that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoundTicket {
    generation: u64,
}

/// What a round produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Player-facing lines, in order.
    pub messages: Vec<String>,
    /// Set when the encounter ended this round.
    pub outcome: Option<CombatOutcome>,
    /// Ticket for the next round while the encounter continues.
    pub next: Option<RoundTicket>,
}

/// What a flee produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleeReport {
    /// Player-facing text.
    pub message: String,
    /// The room the player ran to, if any exit was usable.
    pub destination: Option<GlobalId>,
}

#[derive(Clone, Debug)]
struct Encounter {
    npc: GlobalId,
    round: u32,
    skill_used: bool,
    queued_skill: Option<String>,
}

/// Runs at most one encounter between the player and an NPC.
#[derive(Clone, Debug, Default)]
pub struct CombatEngine {
    rules: CombatRules,
    encounter: Option<Encounter>,
    generation: u64,
}

impl CombatEngine {
    /// Creates an idle engine.
    #[must_use]
    pub fn new(rules: CombatRules) -> Self {
        Self {
            rules,
            encounter: None,
            generation: 0,
        }
    }

    /// The rules in effect.
    #[must_use]
    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Returns true while an encounter is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.encounter.is_some()
    }

    /// The NPC being fought.
    #[must_use]
    pub fn target(&self) -> Option<&GlobalId> {
        self.encounter.as_ref().map(|e| &e.npc)
    }

    /// Ticket for the upcoming round, if an encounter is running.
    #[must_use]
    pub fn pending_round(&self) -> Option<RoundTicket> {
        self.encounter.as_ref().map(|_| RoundTicket {
            generation: self.generation,
        })
    }

    /// Number of rounds resolved in the current encounter.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.encounter.as_ref().map_or(0, |e| e.round)
    }

    /// Begins an encounter with `npc`.
    ///
    /// # Errors
    ///
    /// Rejected without side effects when an encounter is already running,
    /// the player is dead, or the NPC is missing or dead.
    pub fn start(&mut self, realm: &mut Realm, npc: &GlobalId) -> Result<(String, RoundTicket), CombatError> {
        if let Some(current) = &self.encounter {
            return Err(CombatError::AlreadyFighting(realm.npc_name(&current.npc)));
        }
        if !realm.player.is_alive() {
            return Err(CombatError::PlayerDead);
        }
        let target = realm
            .world
            .npc(npc)
            .ok_or_else(|| CombatError::NoTarget(npc.local().to_string()))?;
        if !target.is_alive() {
            return Err(CombatError::TargetDead(target.name.clone()));
        }
        let name = realm.paint(&target.name, Style::Hostile);

        self.generation += 1;
        self.encounter = Some(Encounter {
            npc: npc.clone(),
            round: 0,
            skill_used: false,
            queued_skill: None,
        });
        realm.player.state = PlayerState::Fighting;
        debug!(%npc, "combat started");

        let ticket = RoundTicket {
            generation: self.generation,
        };
        Ok((format!("You attack {name}!"), ticket))
    }

    /// Ends the encounter. Idempotent.
    ///
    /// Invalidates outstanding tickets, returns the player to idle unless
    /// dead, and forgets the target and any queued skill. Returns the NPC
    /// that was being fought.
    pub fn stop(&mut self, realm: &mut Realm, player_fled: bool) -> Option<GlobalId> {
        let encounter = self.encounter.take()?;
        self.generation += 1;
        if realm.player.state != PlayerState::Dead {
            realm.player.state = PlayerState::Idle;
        }
        debug!(npc = %encounter.npc, player_fled, rounds = encounter.round, "combat stopped");
        Some(encounter.npc)
    }

    /// Forgets the encounter without touching the player. Used when the
    /// whole game state is being replaced.
    pub fn clear(&mut self) {
        self.encounter = None;
        self.generation += 1;
    }

    /// Queues a skill for the next player attack.
    ///
    /// # Errors
    ///
    /// Fails when not fighting, a skill was already used this round, or the
    /// skill is unknown, unlearned, cooling down, or unaffordable. Nothing
    /// is spent on failure.
    pub fn queue_skill(&mut self, realm: &mut Realm, query: &str) -> Result<String, CombatError> {
        let Some(encounter) = self.encounter.as_mut() else {
            return Err(CombatError::NotFighting);
        };
        if encounter.skill_used {
            return Err(CombatError::SkillAlreadyUsed);
        }
        let skill = realm
            .skills
            .find(query)
            .ok_or_else(|| CombatError::UnknownSkill(query.to_string()))?;
        if !realm.player.has_skill(&skill.id) {
            return Err(CombatError::NotLearned(skill.name.clone()));
        }
        let remaining = realm.player.cooldown(&skill.id);
        if remaining > 0 {
            return Err(CombatError::OnCooldown {
                skill: skill.name.clone(),
                ticks: remaining,
            });
        }
        if !realm.player.spend_stamina(skill.cost) {
            return Err(CombatError::NotEnoughStamina {
                skill: skill.name.clone(),
                cost: skill.cost,
            });
        }
        realm.player.start_cooldown(&skill.id, skill.cooldown);
        encounter.skill_used = true;
        encounter.queued_skill = Some(skill.id.clone());
        let name = realm.paint(&skill.name, Style::Success);
        Ok(format!("You ready {name}!"))
    }

    /// Player-initiated escape.
    ///
    /// Always succeeds. The encounter ends and the player runs through a
    /// random exit of the current room, loading the destination area if
    /// needed. With no usable exit the player stays put.
    ///
    /// # Errors
    ///
    /// Fails only when no encounter is running.
    pub fn flee(&mut self, realm: &mut Realm) -> Result<FleeReport, CombatError> {
        let Some(npc) = self.stop(realm, true) else {
            return Err(CombatError::NotFighting);
        };
        let name = realm.npc_name(&npc);

        let here = realm.player.current_room.clone();
        let mut directions: Vec<String> = realm
            .world
            .room(&here)
            .map(|room| room.exits.keys().cloned().collect())
            .unwrap_or_default();
        directions.shuffle(&mut realm.rng);

        for direction in directions {
            match realm.world.resolve_exit(&here, &direction) {
                Ok(Some(target)) => {
                    realm.player.current_room = target.clone();
                    return Ok(FleeReport {
                        message: format!("You flee from {name}, running {direction}!"),
                        destination: Some(target),
                    });
                }
                Ok(None) => {}
                Err(e) => warn!(%here, %direction, error = %e, "flee exit unusable"),
            }
        }
        Ok(FleeReport {
            message: format!("You break away from {name}, but there is nowhere to run."),
            destination: None,
        })
    }

    /// Resolves one round.
    ///
    /// A ticket from an earlier encounter, or one already redeemed, is
    /// ignored and yields an empty report.
    pub fn advance_round(
        &mut self,
        ticket: RoundTicket,
        realm: &mut Realm,
        scheduler: &mut TickScheduler,
    ) -> RoundReport {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale combat round"
            );
            return RoundReport::default();
        }
        let Some(encounter) = self.encounter.as_mut() else {
            return RoundReport::default();
        };
        encounter.round += 1;
        let queued = encounter.queued_skill.take();
        encounter.skill_used = false;
        let npc_id = encounter.npc.clone();

        let mut report = RoundReport::default();
        let outcome = self.resolve(realm, scheduler, &npc_id, queued.as_deref(), &mut report.messages);
        match outcome {
            Some(outcome) => {
                self.stop(realm, outcome == CombatOutcome::Fled);
                report.outcome = Some(outcome);
            }
            None => {
                // Redeeming a ticket consumes it; the next round needs a fresh one.
                self.generation += 1;
                report.next = self.pending_round();
            }
        }
        debug!(npc = %npc_id, outcome = ?report.outcome, "round resolved");
        report
    }

    fn resolve(
        &self,
        realm: &mut Realm,
        scheduler: &mut TickScheduler,
        npc_id: &GlobalId,
        skill: Option<&str>,
        out: &mut Vec<String>,
    ) -> Option<CombatOutcome> {
        let here = realm.player.current_room.clone();
        let present = realm.world.npc_location(npc_id) == Some(&here);
        let alive = realm.world.npc(npc_id).is_some_and(delve_storage::Npc::is_alive);
        if !present || !alive {
            out.push(format!("{} is no longer here.", realm.npc_name(npc_id)));
            return Some(CombatOutcome::NpcFled);
        }

        let damage = self.player_damage(realm, skill);
        let npc_name = realm.paint(&realm.npc_name(npc_id), Style::Hostile);
        let amount = realm.paint(&damage.to_string(), Style::Damage);
        let survived = realm
            .world
            .npc_mut(npc_id)
            .is_some_and(|npc| npc.take_damage(damage));
        match skill.and_then(|id| realm.skills.get(id)) {
            Some(skill) => out.push(format!("You use {} on {npc_name} for {amount} damage!", skill.name)),
            None => out.push(format!("You hit {npc_name} for {amount} damage.")),
        }

        if !survived {
            self.victory(realm, scheduler, npc_id, &here, out);
            return Some(CombatOutcome::Victory);
        }

        Self::npc_turn(realm, npc_id, &here, out)
    }

    fn player_damage(&self, realm: &mut Realm, skill: Option<&str>) -> u32 {
        let roll = match realm.player.equipped_weapon.as_ref().and_then(|w| w.damage.as_ref()) {
            Some(dice) => dice.roll(&mut realm.rng),
            None => self.rules.unarmed_damage.roll(&mut realm.rng),
        };
        let base = i64::from(roll) + i64::from(realm.player.strength_modifier());
        let multiplier = skill
            .and_then(|id| realm.skills.get(id))
            .map_or(1.0, delve_storage::Skill::multiplier);
        scale(base, multiplier).max(1)
    }

    fn victory(
        &self,
        realm: &mut Realm,
        scheduler: &mut TickScheduler,
        npc_id: &GlobalId,
        room: &GlobalId,
        out: &mut Vec<String>,
    ) {
        let Some(npc) = realm.world.npc(npc_id) else {
            return;
        };
        let name = npc.name.clone();
        let experience = npc.experience;
        let drops = npc.drops.clone();
        let home = npc.home_room.clone().unwrap_or_else(|| room.clone());

        out.push(realm.paint(&format!("You have slain {name}!"), Style::Success));

        if experience > 0 {
            out.push(format!("You gain {experience} experience."));
            let level = realm.player.level;
            if let Some(up) = realm.player.add_experience(experience, &mut realm.rng) {
                out.push(realm.paint(
                    &format!(
                        "You reached level {}! Your {} increases.",
                        up.level, up.attribute
                    ),
                    Style::Success,
                ));
                debug!(from = level, to = up.level, "player levelled up");
                for skill in realm.player.learn_unlocked_skills(&realm.skills) {
                    out.push(format!("You learned a new skill: {skill}!"));
                }
            }
        }

        let mut dropped = Vec::new();
        for item in drops {
            if let Some(def) = realm.world.item(&item) {
                dropped.push(realm.paint(&def.name, Style::Item));
                if let Err(e) = realm.world.add_room_item(room, item) {
                    warn!(error = %e, "could not drop loot");
                }
            }
        }
        if !dropped.is_empty() {
            out.push(format!("{name} dropped: {}.", dropped.join(", ")));
        }

        realm.world.remove_npc(npc_id);
        scheduler.schedule_npc_respawn(&realm.world, npc_id, &home, self.rules.respawn_delay_ticks);
    }

    fn npc_turn(realm: &mut Realm, npc_id: &GlobalId, here: &GlobalId, out: &mut Vec<String>) -> Option<CombatOutcome> {
        let Some(npc) = realm.world.npc(npc_id) else {
            return Some(CombatOutcome::NpcFled);
        };
        let name = realm.paint(&npc.name, Style::Hostile);
        let wants_to_flee = npc.wants_to_flee();
        let abilities = npc.special_abilities.clone();

        if wants_to_flee {
            let exits = realm.world.same_zone_exits(here);
            if let Some((direction, target)) = exits.choose(&mut realm.rng).cloned() {
                if realm.world.place_npc(npc_id, &target).is_ok() {
                    out.push(format!("{name} flees {direction}!"));
                    return Some(CombatOutcome::NpcFled);
                }
            }
        }

        let mut triggered = false;
        for ability in &abilities {
            if !realm.rng.gen_bool(ability.probability()) {
                continue;
            }
            triggered = true;
            if !ability.message.is_empty() {
                out.push(format!("{name} uses {}: {}", ability.name, ability.message));
            } else {
                out.push(format!("{name} uses {}!", ability.name));
            }
            let outcome = match ability.effect {
                AbilityEffect::Flavor => Self::npc_hit(realm, npc_id, 1.0, out),
                AbilityEffect::Strike { multiplier } => Self::npc_hit(realm, npc_id, multiplier, out),
                AbilityEffect::Heal { amount } => {
                    let healed = realm.world.npc_mut(npc_id).map_or(0, |n| n.heal(amount));
                    let amount = realm.paint(&healed.to_string(), Style::Heal);
                    out.push(format!("{name} recovers {amount} hit points."));
                    None
                }
                AbilityEffect::Knockback => Self::knockback(realm, here, out),
            };
            if outcome.is_some() {
                return outcome;
            }
        }
        if triggered {
            return None;
        }
        Self::npc_hit(realm, npc_id, 1.0, out)
    }

    fn npc_hit(realm: &mut Realm, npc_id: &GlobalId, multiplier: f64, out: &mut Vec<String>) -> Option<CombatOutcome> {
        let npc = realm.world.npc(npc_id)?;
        let name = realm.paint(&npc.name, Style::Hostile);
        let roll = npc.roll_damage(&mut realm.rng);
        let raw = scale(i64::from(roll), multiplier);
        let damage = if raw == 0 {
            0
        } else {
            raw.saturating_sub(realm.player.armor_value()).max(1)
        };

        let alive = realm.player.take_damage(damage);
        let amount = realm.paint(&damage.to_string(), Style::Damage);
        out.push(format!(
            "{name} hits you for {amount} damage. ({}/{} HP)",
            realm.player.hit_points(),
            realm.player.max_hit_points()
        ));
        if alive {
            return None;
        }
        out.push(realm.paint(
            &format!("You have been slain by {}! Type 'respawn' to continue.", realm.npc_name(npc_id)),
            Style::Error,
        ));
        Some(CombatOutcome::Defeat)
    }

    fn knockback(realm: &mut Realm, here: &GlobalId, out: &mut Vec<String>) -> Option<CombatOutcome> {
        let exits = realm.world.same_zone_exits(here);
        let (direction, target) = exits.choose(&mut realm.rng).cloned()?;
        realm.player.current_room = target;
        out.push(format!("You are thrown {direction} and the fight is broken off!"));
        Some(CombatOutcome::Fled)
    }
}

/// `floor(base * multiplier)`, clamped into `u32`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scale(base: i64, multiplier: f64) -> u32 {
    let scaled = (base as f64 * multiplier).floor();
    if scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}
