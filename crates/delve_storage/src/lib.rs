//! Areas, rooms, items, NPCs, the player, and the world store for Delve.
//!
//! This crate provides:
//! - [`area`] - The JSON schema of an area document
//! - [`Item`], [`Npc`], [`Room`] - Entities instantiated from area data
//! - [`Player`] - Player state and progression
//! - [`SkillBook`] - Skill definitions gated by level
//! - [`AreaSource`] - Where area documents come from
//! - [`WorldStore`] - Canonical maps keyed by [`GlobalId`](delve_foundation::GlobalId)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod area;
pub mod item;
pub mod npc;
pub mod player;
pub mod room;
pub mod skills;
pub mod source;
pub mod world;

pub use area::{AreaDocument, ItemData, NpcData, RoomData};
pub use item::{Item, ItemKind};
pub use npc::{AbilityEffect, Npc, NpcKind, SpecialAbility};
pub use player::{Attribute, Attributes, InventoryError, LevelUp, Player, PlayerState};
pub use room::{Exit, Room};
pub use skills::{Skill, SkillBook};
pub use source::{AreaSource, DirectorySource, MemorySource};
pub use world::{Area, WorldStore};
