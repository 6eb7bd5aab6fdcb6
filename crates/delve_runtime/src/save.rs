//! Saved games.
//!
//! A save is a [`SaveGame`] snapshot encoded as JSON or `MessagePack` and
//! stored under a key in a [`KeyValueStore`]. Only what the area documents
//! cannot reproduce is recorded: the player, which areas were loaded, NPC
//! hit points, room item lists, and where every NPC stands.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use delve_foundation::{Error, ErrorContext, ErrorKind, GlobalId, Result};
use delve_storage::{Player, WorldStore};
use serde::{Deserialize, Serialize};

use crate::config::SaveFormat;

/// Byte storage for saved games.
pub trait KeyValueStore {
    /// Reads the blob under `key`, or `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes `key`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn delete(&self, key: &str) -> Result<bool>;
}

/// Blobs held in memory. Clones share the same contents.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a blob is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.blobs.read().is_ok_and(|blobs| blobs.contains_key(key))
    }
}

fn poisoned() -> Error {
    Error::new(ErrorKind::StorageError("save store lock poisoned".to_string()))
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut blobs = self.blobs.write().map_err(|_| poisoned())?;
        Ok(blobs.remove(key).is_some())
    }
}

/// One file per key inside a directory, named `<key>.save`.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the save files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(Error::new(ErrorKind::StorageError(format!(
                "invalid save key {key:?}"
            ))));
        }
        Ok(self.root.join(format!("{key}.save")))
    }
}

fn io_error(path: &Path, action: &str, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!("failed to {action} '{}': {e}", path.display())))
        .with_context(ErrorContext::new().with_source(path.display().to_string()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, "read", &e)),
        }
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(&self.root, "create", &e))?;

        let file = File::create(&path).map_err(|e| io_error(&path, "create", &e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(value)
            .map_err(|e| io_error(&path, "write to", &e))?;
        writer.flush().map_err(|e| io_error(&path, "flush", &e))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(&path, "remove", &e)),
        }
    }
}

/// Saved hit points of one NPC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcSnapshot {
    /// Hit points at save time.
    pub hit_points: u32,
}

/// Saved contents of one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Items lying in the room.
    pub items: Vec<GlobalId>,
}

/// Mutable world state at save time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    /// NPC hit points by id.
    pub npcs: BTreeMap<GlobalId, NpcSnapshot>,
    /// Room item lists by id.
    pub rooms: BTreeMap<GlobalId, RoomSnapshot>,
    /// `(npc, room)` pairs of the location index.
    pub npc_locations: Vec<(GlobalId, GlobalId)>,
}

impl WorldSnapshot {
    /// Captures the mutable parts of `world`.
    #[must_use]
    pub fn capture(world: &WorldStore) -> Self {
        Self {
            npcs: world
                .npcs()
                .map(|npc| {
                    (
                        npc.id.clone(),
                        NpcSnapshot {
                            hit_points: npc.hit_points(),
                        },
                    )
                })
                .collect(),
            rooms: world
                .rooms()
                .map(|room| {
                    (
                        room.id.clone(),
                        RoomSnapshot {
                            items: room.items.clone(),
                        },
                    )
                })
                .collect(),
            npc_locations: world
                .npc_locations()
                .map(|(npc, room)| (npc.clone(), room.clone()))
                .collect(),
        }
    }
}

/// A complete saved game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGame {
    /// The player, inventory and skills included.
    pub player: Player,
    /// Areas to reload, in load order.
    pub loaded_area_ids: Vec<String>,
    /// Mutable world state.
    pub world_state: WorldSnapshot,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl SaveGame {
    /// Captures `player` and `world` as of now.
    #[must_use]
    pub fn capture(player: &Player, world: &WorldStore) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self {
            player: player.clone(),
            loaded_area_ids: world.loaded_area_ids().map(String::from).collect(),
            world_state: WorldSnapshot::capture(world),
            timestamp,
        }
    }
}

/// Serializes a save in the given format.
///
/// `MessagePack` uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(save: &SaveGame, format: SaveFormat) -> Result<Vec<u8>> {
    match format {
        SaveFormat::Json => serde_json::to_vec_pretty(save)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string()))),
        SaveFormat::MessagePack => rmp_serde::to_vec_named(save)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string()))),
    }
}

/// Deserializes a save in either format.
///
/// A JSON save always starts with `{`; anything else is read as
/// `MessagePack`.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<SaveGame> {
    let starts_like_json = bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{');
    if starts_like_json {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
    } else {
        rmp_serde::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
    }
}
