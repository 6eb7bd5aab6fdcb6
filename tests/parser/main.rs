//! Integration tests for the command layer.
//!
//! Tokenizing, alias expansion, and the dispatcher's gates, exercised
//! against a small stand-in context instead of a full game.

mod dispatch;
mod parsing;
