//! Delve - room-based text adventure engine
//!
//! This crate re-exports all layers of the Delve system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: delve_runtime     - Game facade, commands, save/load, driver, REPL
//! Layer 2: delve_engine      - Combat rounds, world tick, message bus
//!          delve_parser      - Tokenizer, aliases, command dispatcher
//! Layer 1: delve_storage     - Areas, rooms, items, NPCs, player, world store
//! Layer 0: delve_foundation  - Core types (GlobalId, Dice, Error, Stylist)
//! ```

pub use delve_engine as engine;
pub use delve_foundation as foundation;
pub use delve_parser as parser;
pub use delve_runtime as runtime;
pub use delve_storage as storage;
