//! Where area documents come from.
//!
//! The world store never touches the filesystem directly; it asks an
//! [`AreaSource`] for the raw JSON text of an area and parses it itself.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use delve_foundation::{Error, ErrorContext, ErrorKind, Result};

/// Supplies raw area documents by id.
pub trait AreaSource: Send + Sync {
    /// Returns the JSON text of the area.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AreaNotFound`] when the source has no such area,
    /// or [`ErrorKind::IoError`] when it exists but cannot be read.
    fn fetch(&self, area_id: &str) -> Result<String>;
}

/// Reads `<root>/<area>.json`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory being read.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, area_id: &str) -> PathBuf {
        self.root.join(format!("{area_id}.json"))
    }
}

impl AreaSource for DirectorySource {
    fn fetch(&self, area_id: &str) -> Result<String> {
        // Area ids come from data files and saves; never let one escape the root.
        if area_id.is_empty() || area_id.contains(['/', '\\']) || area_id.starts_with('.') {
            return Err(Error::area_not_found(area_id));
        }
        let path = self.path_for(area_id);
        std::fs::read_to_string(&path).map_err(|e| {
            let err = if e.kind() == io::ErrorKind::NotFound {
                Error::area_not_found(area_id)
            } else {
                Error::new(ErrorKind::IoError(e.to_string()))
            };
            err.with_context(ErrorContext::new().with_source(path.display().to_string()))
        })
    }
}

/// Area documents held in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    areas: RwLock<HashMap<String, String>>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_area(self, area_id: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(area_id, json);
        self
    }

    /// Adds or replaces an area document.
    pub fn insert(&self, area_id: impl Into<String>, json: impl Into<String>) {
        if let Ok(mut areas) = self.areas.write() {
            areas.insert(area_id.into(), json.into());
        }
    }

    /// Removes an area document.
    pub fn remove(&self, area_id: &str) {
        if let Ok(mut areas) = self.areas.write() {
            areas.remove(area_id);
        }
    }
}

impl AreaSource for MemorySource {
    fn fetch(&self, area_id: &str) -> Result<String> {
        let areas = self
            .areas
            .read()
            .map_err(|_| Error::internal("area source lock poisoned"))?;
        areas
            .get(area_id)
            .cloned()
            .ok_or_else(|| Error::area_not_found(area_id))
    }
}
