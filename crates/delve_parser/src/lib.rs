//! Command parsing and dispatch for Delve.
//!
//! This crate turns raw player input like `n` or `take rusty sword` into a
//! [`ParsedCommand`] and routes it to a registered handler.
//!
//! # Architecture
//!
//! ```text
//! "N"
//!  │
//!  ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["n"]
//! └─────────────────┘
//!  │
//!  ▼
//! ┌─────────────────┐
//! │ ALIAS           │  → command "go", args ["north"]
//! │ RESOLUTION      │
//! └─────────────────┘
//!  │
//!  ▼
//! ┌─────────────────┐
//! │ STATE GATES     │  → dead? fighting? allowed?
//! └─────────────────┘
//!  │
//!  ▼
//! ┌─────────────────┐
//! │ HANDLER         │  → "You go north.\n..."
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`] - Convert raw input to a token stream
//! - [`vocabulary`] - Alias table and direction words
//! - [`command`] - The parsed command shape
//! - [`parser`] - Tokenize and resolve the leading alias
//! - [`dispatcher`] - Command registry, state gates, help, and error containment
//! - [`stdlib`] - Standard directions and aliases

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod dispatcher;
pub mod parser;
pub mod stdlib;
pub mod tokenizer;
pub mod vocabulary;

pub use command::ParsedCommand;
pub use dispatcher::{CommandContext, CommandSpec, Dispatcher, Handler, messages};
pub use parser::CommandParser;
pub use tokenizer::{InputToken, InputTokenizer};
pub use vocabulary::{Alias, AliasTable, Direction};
