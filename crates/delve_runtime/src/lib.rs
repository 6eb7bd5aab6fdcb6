//! Game facade, command handlers, persistence, REPL, and CLI for Delve.
//!
//! This crate provides:
//! - [`Game`] - The dispatcher plus the state its handlers mutate
//! - [`GameConfig`] - Start room, pacing, and save settings
//! - [`RealtimeDriver`] - Wall-clock pacing of ticks and combat rounds
//! - [`Repl`] and [`run_batch`] - Interactive and scripted front ends
//! - [`KeyValueStore`] - Where saved games go
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use delve_runtime::{Game, GameConfig, MemoryStore};
//! use delve_storage::MemorySource;
//!
//! let source = MemorySource::new()
//!     .with_area("town", r#"{"id":"town","name":"Town","rooms":{"square":{"name":"Square"}}}"#)
//!     .with_area("skills", "{}");
//! let mut game = Game::new(GameConfig::deterministic(1), Arc::new(source), Box::new(MemoryStore::new())).unwrap();
//! assert!(game.process_command("look").starts_with("Square"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actions;
mod commands;
pub mod config;
pub mod driver;
pub mod editor;
pub mod game;
pub mod repl;
pub mod save;

pub use actions::{Action, ActionGroups, TargetActions};
pub use config::{GameConfig, SaveFormat};
pub use driver::RealtimeDriver;
pub use editor::{LineEditor, ReadResult, RustylineEditor, ScriptedEditor};
pub use game::{Game, GameState};
pub use repl::{Repl, run_batch};
pub use save::{FileStore, KeyValueStore, MemoryStore, SaveGame};
