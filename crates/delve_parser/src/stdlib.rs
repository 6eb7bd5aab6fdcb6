//! Standard vocabulary for the game.
//!
//! Directions and the movement aliases derived from them.

use crate::vocabulary::{Alias, AliasTable, Direction};

/// The movement command that direction aliases expand to.
pub const GO: &str = "go";

/// Standard directions.
pub const DIRECTIONS: &[Direction] = &[
    // Cardinal directions
    Direction { name: "north", synonyms: &["n"], opposite: "south" },
    Direction { name: "south", synonyms: &["s"], opposite: "north" },
    Direction { name: "east", synonyms: &["e"], opposite: "west" },
    Direction { name: "west", synonyms: &["w"], opposite: "east" },
    // Vertical directions
    Direction { name: "up", synonyms: &["u"], opposite: "down" },
    Direction { name: "down", synonyms: &["d"], opposite: "up" },
    // Diagonal directions
    Direction { name: "northeast", synonyms: &["ne"], opposite: "southwest" },
    Direction { name: "northwest", synonyms: &["nw"], opposite: "southeast" },
    Direction { name: "southeast", synonyms: &["se"], opposite: "northwest" },
    Direction { name: "southwest", synonyms: &["sw"], opposite: "northeast" },
];

/// Looks up a direction by full name or short form.
#[must_use]
pub fn direction(word: &str) -> Option<&'static Direction> {
    DIRECTIONS.iter().find(|d| d.matches(word))
}

/// Expands a short direction (`n`) to its full name; other words pass through.
#[must_use]
pub fn canonical_direction(word: &str) -> &str {
    direction(word).map_or(word, |d| d.name)
}

/// Registers `north` and `n` style aliases that expand to `go <direction>`.
pub fn install_direction_aliases(table: &mut AliasTable) {
    for dir in DIRECTIONS {
        table.register(dir.name, Alias::with_args(GO, [dir.name]));
        for synonym in dir.synonyms {
            table.register(*synonym, Alias::with_args(GO, [dir.name]));
        }
    }
}
