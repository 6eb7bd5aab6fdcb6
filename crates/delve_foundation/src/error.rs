//! Error types for the Delve system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Convenience alias used across every Delve crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Delve operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an area-not-found error.
    #[must_use]
    pub fn area_not_found(area: impl Into<String>) -> Self {
        Self::new(ErrorKind::AreaNotFound(area.into()))
    }

    /// Creates an invalid-area error.
    #[must_use]
    pub fn invalid_area(area: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArea {
            area: area.into(),
            reason: reason.into(),
        })
    }

    /// Creates a room-not-found error.
    #[must_use]
    pub fn room_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::RoomNotFound(id.to_string()))
    }

    /// Creates an NPC-not-found error.
    #[must_use]
    pub fn npc_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NpcNotFound(id.to_string()))
    }

    /// Creates an item-not-found error.
    #[must_use]
    pub fn item_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ItemNotFound(id.to_string()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The area source has no document for this area.
    #[error("area not found: {0}")]
    AreaNotFound(String),

    /// The area document is not valid JSON for the area schema.
    #[error("failed to parse area {area}: {message}")]
    AreaParse {
        /// The area being parsed.
        area: String,
        /// Parser message.
        message: String,
    },

    /// The area document parsed but is internally inconsistent.
    #[error("invalid area {area}: {reason}")]
    InvalidArea {
        /// The offending area.
        area: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A string could not be split into `area:local`.
    #[error("invalid global id: {0:?}")]
    InvalidGlobalId(String),

    /// A dice expression could not be parsed.
    #[error("invalid dice notation: {0:?}")]
    InvalidDice(String),

    /// Room lookup failed.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// NPC lookup failed.
    #[error("npc not found: {0}")]
    NpcNotFound(String),

    /// Item lookup failed.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    IoError(String),

    /// The key-value store rejected an operation.
    #[error("storage error: {0}")]
    StorageError(String),

    /// There is nothing saved under the requested key.
    #[error("no saved game under key {0:?}")]
    NoSavedGame(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Area, save key, or file being processed.
    pub source: Option<String>,
    /// Chain of operations that led to the error, outermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
