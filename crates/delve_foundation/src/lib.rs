//! Core types for Delve.
//!
//! This crate provides:
//! - [`GlobalId`] - `area:local` identifiers unique across the loaded world
//! - [`Dice`] - Parsed `NdM+K` dice notation
//! - [`Error`] - Rich error types with context
//! - [`Stylist`] - The colorize hook used by text formatting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dice;
pub mod error;
pub mod id;
pub mod style;

pub use dice::Dice;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{GlobalId, SEPARATOR};
pub use style::{AnsiStylist, PlainStylist, Style, Stylist, wrap};
