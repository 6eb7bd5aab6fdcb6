//! Integration tests for the storage layer.
//!
//! Ids and dice, lazy area loading, the shipped data files, and the
//! player's inventory rules.

#[path = "../common/fixtures.rs"]
mod fixtures;

mod data;
mod ids;
mod player;
mod world;
