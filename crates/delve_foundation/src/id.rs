//! Global identifiers of the form `area:local`.
//!
//! Local ids are only unique inside the area document that defines them.
//! A [`GlobalId`] pairs the two so rooms, items, and NPCs can be addressed
//! across the whole loaded world.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// Separator between the area and the local part.
pub const SEPARATOR: char = ':';

/// Identifier of a room, item, or NPC that is unique across all loaded areas.
///
/// Parsing splits on the *first* separator only, so local ids may themselves
/// contain `:`. Area ids may not.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobalId {
    area: String,
    local: String,
}

impl GlobalId {
    /// Composes a global id from its parts.
    #[must_use]
    pub fn new(area: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            local: local.into(),
        }
    }

    /// Splits `area:local` on the first separator.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidGlobalId`] when there is no separator or
    /// the area part is empty.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        match raw.split_once(SEPARATOR) {
            Some((area, local)) if !area.is_empty() => Ok(Self::new(area, local)),
            _ => Err(Error::new(ErrorKind::InvalidGlobalId(raw.to_string()))),
        }
    }

    /// The owning area id.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// The id local to the owning area.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Returns true if this id belongs to `area`.
    #[must_use]
    pub fn in_area(&self, area: &str) -> bool {
        self.area == area
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.area, self.local)
    }
}

impl fmt::Debug for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalId({self})")
    }
}

impl FromStr for GlobalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GlobalId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GlobalId> for String {
    fn from(id: GlobalId) -> Self {
        id.to_string()
    }
}
