//! End-to-end tests through the game facade.
//!
//! Each test drives a [`delve_runtime::Game`] with player commands and
//! checks the world afterwards.

#[path = "../common/fixtures.rs"]
mod fixtures;

mod persistence;
mod scenarios;
