//! Skill definitions.
//!
//! Skills are read from a JSON map of `skillId -> definition` and are learned
//! automatically once the player reaches each skill's level.

use std::collections::BTreeMap;

use delve_foundation::{Error, ErrorKind, Result};
use serde::Deserialize;

/// One skill definition.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Skill id, filled in from the map key.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Help text.
    #[serde(default)]
    pub description: String,
    /// Level at which the skill is learned.
    pub level: u32,
    /// Stamina spent per use.
    #[serde(default)]
    pub cost: u32,
    /// Ticks before the skill can be used again.
    #[serde(default)]
    pub cooldown: u32,
    /// Multiplier applied to the next attack.
    #[serde(default)]
    pub damage_multiplier: Option<f64>,
}

impl Skill {
    /// Multiplier applied to the attack the skill is queued for.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.damage_multiplier.unwrap_or(1.0)
    }
}

/// All known skills, ordered by id.
#[derive(Clone, Debug, Default)]
pub struct SkillBook {
    skills: BTreeMap<String, Skill>,
}

impl SkillBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the skill schema.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON does not match the schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Skill> = serde_json::from_str(json)
            .map_err(|e| Error::new(ErrorKind::SerializationError(format!("skills: {e}"))))?;
        Ok(raw.into_iter().map(|(id, skill)| Skill { id, ..skill }).collect())
    }

    /// Adds or replaces a skill.
    pub fn insert(&mut self, skill: Skill) {
        self.skills.insert(skill.id.clone(), skill);
    }

    /// Looks up a skill by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Looks up a skill by id or case-insensitive name.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<&Skill> {
        let query = query.to_lowercase();
        self.skills.get(&query).or_else(|| {
            self.skills
                .values()
                .find(|skill| skill.name.to_lowercase() == query)
        })
    }

    /// Skills available at `level`, ordered by id.
    pub fn unlocked_at(&self, level: u32) -> impl Iterator<Item = &Skill> {
        self.skills.values().filter(move |skill| skill.level <= level)
    }

    /// All skills, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Number of skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Returns true if there are no skills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<Skill> for SkillBook {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        let mut book = Self::new();
        for skill in iter {
            book.insert(skill);
        }
        book
    }
}
