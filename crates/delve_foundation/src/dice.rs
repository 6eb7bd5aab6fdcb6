//! Dice notation.
//!
//! Damage values in area data are strings like `2d6+1`. They are parsed once,
//! at load time, into a [`Dice`] value that can be rolled or averaged.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// A parsed `NdM[+-K]` expression.
///
/// Accepted forms: `NdM`, `dM` (one die), `NdM+K`, `NdM-K`, and a bare
/// constant `K`. Parsing rejects more than [`Dice::MAX_COUNT`] dice or more
/// than [`Dice::MAX_SIDES`] faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dice {
    /// Number of dice rolled.
    pub count: u32,
    /// Faces per die.
    pub sides: u32,
    /// Flat modifier added to the sum.
    pub modifier: i32,
}

impl Dice {
    /// Most dice a parsed expression may roll.
    pub const MAX_COUNT: u32 = 100;
    /// Most faces a parsed die may have.
    pub const MAX_SIDES: u32 = 1000;

    /// Creates a dice value directly.
    ///
    /// Values built this way are not range checked; rolls use at most
    /// [`Dice::MAX_COUNT`] dice.
    #[must_use]
    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// A constant that always rolls `value`.
    #[must_use]
    pub const fn constant(value: i32) -> Self {
        Self::new(0, 0, value)
    }

    /// Rolls the dice. The result never goes below zero.
    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        let mut total = i64::from(self.modifier);
        for _ in 0..self.rolled_dice() {
            total += i64::from(rng.gen_range(1..=self.sides));
        }
        u32::try_from(total.max(0)).unwrap_or(u32::MAX)
    }

    fn rolled_dice(&self) -> u32 {
        if self.sides == 0 { 0 } else { self.count.min(Self::MAX_COUNT) }
    }

    /// Expected value of a roll, ignoring the zero floor.
    #[must_use]
    pub fn average(&self) -> f64 {
        let per_die = if self.sides == 0 {
            0.0
        } else {
            (f64::from(self.sides) + 1.0) / 2.0
        };
        f64::from(self.rolled_dice()) * per_die + f64::from(self.modifier)
    }

    /// Smallest possible roll.
    #[must_use]
    pub fn min(&self) -> u32 {
        u32::try_from((i64::from(self.rolled_dice()) + i64::from(self.modifier)).max(0)).unwrap_or(0)
    }

    /// Largest possible roll.
    #[must_use]
    pub fn max(&self) -> u32 {
        let total = i64::from(self.rolled_dice()) * i64::from(self.sides) + i64::from(self.modifier);
        u32::try_from(total.max(0)).unwrap_or(u32::MAX)
    }
}

fn invalid(raw: &str) -> Error {
    Error::new(ErrorKind::InvalidDice(raw.to_string()))
}

impl FromStr for Dice {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let text: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if text.is_empty() {
            return Err(invalid(raw));
        }

        let Some((count, rest)) = text.split_once('d') else {
            let value = text.parse::<i32>().map_err(|_| invalid(raw))?;
            return Ok(Self::constant(value));
        };

        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid(raw))?
        };

        let (sides, modifier) = match rest.find(['+', '-']) {
            Some(pos) => {
                let (sides, modifier) = rest.split_at(pos);
                let modifier = modifier.parse::<i32>().map_err(|_| invalid(raw))?;
                (sides, modifier)
            }
            None => (rest, 0),
        };
        let sides = sides.parse::<u32>().map_err(|_| invalid(raw))?;
        if (sides == 0 && count > 0) || count > Self::MAX_COUNT || sides > Self::MAX_SIDES {
            return Err(invalid(raw));
        }

        Ok(Self::new(count, sides, modifier))
    }
}

impl TryFrom<String> for Dice {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dice> for String {
    fn from(dice: Dice) -> Self {
        dice.to_string()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sides == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}
