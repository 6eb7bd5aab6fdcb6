//! Combat rounds, world ticks, and the message bus for Delve.
//!
//! Everything here is a pure state transition over a [`Realm`]: the caller
//! decides when a round or tick happens, so tests can drive the engine
//! without real timers.
//!
//! # Modules
//!
//! - [`realm`] - The mutable game world handed to every transition
//! - [`combat`] - One encounter at a time, resolved round by round
//! - [`tick`] - Respawn, cooldown, and wander sweeps
//! - [`bus`] - Ordered delivery of messages not tied to a command

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bus;
pub mod combat;
pub mod realm;
pub mod tick;

pub use bus::{GameMessage, MessageBus, MessageKind, SubscriptionId};
pub use combat::{
    CombatEngine, CombatError, CombatOutcome, CombatRules, FleeReport, RoundReport, RoundTicket,
};
pub use realm::Realm;
pub use tick::{RespawnEntry, TickScheduler};
