//! The world store.
//!
//! Canonical maps of areas, rooms, items, and NPCs keyed by [`GlobalId`],
//! plus the NPC location index. Areas are loaded on demand from an
//! [`AreaSource`]; loading is idempotent and all-or-nothing.
//!
//! The location index is authoritative. A [`Room`]'s `npcs` list is derived
//! from it and only rewritten by [`WorldStore::sync_room`] and
//! [`WorldStore::sync_rooms_from_npc_map`].
//!
//! Maps are persistent (`im`), so cloning a store is O(1). Save loading
//! relies on this to restore the previous world when a load fails halfway.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use delve_foundation::{Error, ErrorContext, ErrorKind, GlobalId, Result};
use im::{OrdMap, Vector};
use tracing::{debug, warn};

use crate::area::AreaDocument;
use crate::item::Item;
use crate::npc::Npc;
use crate::room::{Exit, Room};
use crate::skills::SkillBook;
use crate::source::AreaSource;

/// Source key reserved for the skill table.
pub const SKILLS_KEY: &str = "skills";

/// Metadata of a loaded area and the entities it contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Area {
    /// Area id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Rooms defined by this area.
    pub rooms: Vec<GlobalId>,
    /// Items defined by this area.
    pub items: Vec<GlobalId>,
    /// NPCs defined by this area.
    pub npcs: Vec<GlobalId>,
}

/// Everything instantiated from one area document, built before commit.
struct LoadedArea {
    area: Area,
    rooms: Vec<Room>,
    items: Vec<Item>,
    npcs: Vec<Npc>,
    placements: Vec<(GlobalId, GlobalId)>,
}

/// Owns every loaded room, item, and NPC.
#[derive(Clone)]
pub struct WorldStore {
    source: Arc<dyn AreaSource>,
    areas: OrdMap<String, Area>,
    load_order: Vector<String>,
    rooms: OrdMap<GlobalId, Room>,
    items: OrdMap<GlobalId, Item>,
    npcs: OrdMap<GlobalId, Npc>,
    npc_locations: OrdMap<GlobalId, GlobalId>,
}

impl fmt::Debug for WorldStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldStore")
            .field("areas", &self.load_order)
            .field("rooms", &self.rooms.len())
            .field("items", &self.items.len())
            .field("npcs", &self.npcs.len())
            .field("npc_locations", &self.npc_locations.len())
            .finish_non_exhaustive()
    }
}

impl WorldStore {
    /// Creates an empty store reading from `source`.
    pub fn new(source: Arc<dyn AreaSource>) -> Self {
        Self {
            source,
            areas: OrdMap::new(),
            load_order: Vector::new(),
            rooms: OrdMap::new(),
            items: OrdMap::new(),
            npcs: OrdMap::new(),
            npc_locations: OrdMap::new(),
        }
    }

    /// The area source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn AreaSource> {
        &self.source
    }

    /// Clears every loaded area and entity. The source is kept.
    pub fn reset(&mut self) {
        self.areas.clear();
        self.load_order.clear();
        self.rooms.clear();
        self.items.clear();
        self.npcs.clear();
        self.npc_locations.clear();
    }

    // =========================================================================
    // Area loading
    // =========================================================================

    /// Loads an area if it is not loaded yet.
    ///
    /// The document is fetched, parsed, and validated completely before
    /// anything is registered, so a failed load leaves the store unchanged
    /// and may be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::AreaNotFound`], [`ErrorKind::AreaParse`], or
    /// [`ErrorKind::InvalidArea`] depending on where loading failed.
    pub fn load_area(&mut self, area_id: &str) -> Result<()> {
        if self.areas.contains_key(area_id) {
            return Ok(());
        }
        let loaded = self.read_area(area_id).inspect_err(|e| {
            warn!(area = area_id, error = %e, "area load rejected");
        })?;
        self.commit(loaded);
        debug!(area = area_id, "area loaded");
        Ok(())
    }

    /// Returns true if the area is loaded.
    #[must_use]
    pub fn is_loaded(&self, area_id: &str) -> bool {
        self.areas.contains_key(area_id)
    }

    /// Loaded area ids in load order.
    pub fn loaded_area_ids(&self) -> impl Iterator<Item = &str> {
        self.load_order.iter().map(String::as_str)
    }

    /// Area metadata.
    #[must_use]
    pub fn area(&self, area_id: &str) -> Option<&Area> {
        self.areas.get(area_id)
    }

    /// Display name of an area, falling back to its id when not loaded.
    #[must_use]
    pub fn area_name<'a>(&'a self, area_id: &'a str) -> &'a str {
        self.areas.get(area_id).map_or(area_id, |area| area.name.as_str())
    }

    /// Loads the skill table stored under [`SKILLS_KEY`].
    ///
    /// A source without a skill table yields an empty book.
    ///
    /// # Errors
    ///
    /// Fails when the table exists but cannot be read or parsed.
    pub fn load_skills(&self) -> Result<SkillBook> {
        match self.source.fetch(SKILLS_KEY) {
            Ok(json) => SkillBook::from_json(&json),
            Err(e) if matches!(e.kind, ErrorKind::AreaNotFound(_)) => Ok(SkillBook::new()),
            Err(e) => Err(e),
        }
    }

    fn read_area(&self, area_id: &str) -> Result<LoadedArea> {
        let text = self.source.fetch(area_id)?;
        let doc: AreaDocument = serde_json::from_str(&text).map_err(|e| {
            Error::new(ErrorKind::AreaParse {
                area: area_id.to_string(),
                message: e.to_string(),
            })
            .with_context(ErrorContext::new().with_source(area_id))
        })?;
        instantiate(area_id, doc)
    }

    fn commit(&mut self, loaded: LoadedArea) {
        let LoadedArea {
            area,
            rooms,
            items,
            npcs,
            placements,
        } = loaded;
        for item in items {
            self.items.insert(item.id.clone(), item);
        }
        for npc in npcs {
            self.npcs.insert(npc.id.clone(), npc);
        }
        for room in rooms {
            self.rooms.insert(room.id.clone(), room);
        }
        for (npc, room) in placements {
            self.npc_locations.insert(npc, room);
        }
        for room in &area.rooms {
            self.sync_room(room);
        }
        self.load_order.push_back(area.id.clone());
        self.areas.insert(area.id.clone(), area);
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Room by global id.
    #[must_use]
    pub fn room(&self, id: &GlobalId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Mutable room by global id.
    pub fn room_mut(&mut self, id: &GlobalId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    /// Item definition by global id.
    #[must_use]
    pub fn item(&self, id: &GlobalId) -> Option<&Item> {
        self.items.get(id)
    }

    /// NPC by global id.
    #[must_use]
    pub fn npc(&self, id: &GlobalId) -> Option<&Npc> {
        self.npcs.get(id)
    }

    /// Mutable NPC by global id.
    pub fn npc_mut(&mut self, id: &GlobalId) -> Option<&mut Npc> {
        self.npcs.get_mut(id)
    }

    /// Room by local id within an area.
    #[must_use]
    pub fn get_room(&self, local: &str, area: &str) -> Option<&Room> {
        self.rooms.get(&GlobalId::new(area, local))
    }

    /// Item by local id within an area.
    #[must_use]
    pub fn get_item(&self, local: &str, area: &str) -> Option<&Item> {
        self.items.get(&GlobalId::new(area, local))
    }

    /// NPC by local id within an area.
    #[must_use]
    pub fn get_npc(&self, local: &str, area: &str) -> Option<&Npc> {
        self.npcs.get(&GlobalId::new(area, local))
    }

    /// Every NPC id in id order.
    pub fn npc_ids(&self) -> impl Iterator<Item = &GlobalId> {
        self.npcs.keys()
    }

    /// Every NPC in id order.
    pub fn npcs(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.values()
    }

    /// Every room in id order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    // =========================================================================
    // NPC locations
    // =========================================================================

    /// Room the NPC currently occupies, if placed.
    #[must_use]
    pub fn npc_location(&self, npc: &GlobalId) -> Option<&GlobalId> {
        self.npc_locations.get(npc)
    }

    /// The whole location index in NPC id order.
    pub fn npc_locations(&self) -> impl Iterator<Item = (&GlobalId, &GlobalId)> {
        self.npc_locations.iter()
    }

    /// Places (or moves) an NPC and re-syncs the affected rooms.
    ///
    /// # Errors
    ///
    /// Fails if either the NPC or the room is unknown.
    pub fn place_npc(&mut self, npc: &GlobalId, room: &GlobalId) -> Result<()> {
        if !self.npcs.contains_key(npc) {
            return Err(Error::npc_not_found(npc));
        }
        if !self.rooms.contains_key(room) {
            return Err(Error::room_not_found(room));
        }
        let previous = self.npc_locations.insert(npc.clone(), room.clone());
        if let Some(previous) = previous.filter(|p| p != room) {
            self.sync_room(&previous);
        }
        self.sync_room(room);
        Ok(())
    }

    /// Removes an NPC from the world map. Returns the room it was in.
    pub fn remove_npc(&mut self, npc: &GlobalId) -> Option<GlobalId> {
        let previous = self.npc_locations.remove(npc)?;
        self.sync_room(&previous);
        Some(previous)
    }

    /// Replaces the location index wholesale without touching rooms.
    ///
    /// Entries naming unknown NPCs or rooms are dropped. Call
    /// [`WorldStore::sync_rooms_from_npc_map`] afterwards.
    pub fn set_npc_locations(&mut self, locations: impl IntoIterator<Item = (GlobalId, GlobalId)>) {
        self.npc_locations = locations
            .into_iter()
            .filter(|(npc, room)| {
                let known = self.npcs.contains_key(npc) && self.rooms.contains_key(room);
                if !known {
                    warn!(%npc, %room, "dropping location entry for unknown npc or room");
                }
                known
            })
            .collect();
    }

    /// Rebuilds one room's NPC list from the location index.
    ///
    /// NPCs already listed keep their order; arrivals are appended in id
    /// order.
    pub fn sync_room(&mut self, room_id: &GlobalId) {
        let present: BTreeSet<&GlobalId> = self
            .npc_locations
            .iter()
            .filter(|(_, room)| *room == room_id)
            .map(|(npc, _)| npc)
            .collect();
        let Some(room) = self.rooms.get(room_id) else {
            return;
        };
        let mut npcs: Vec<GlobalId> = Vec::with_capacity(present.len());
        for npc in &room.npcs {
            if present.contains(npc) && !npcs.contains(npc) {
                npcs.push(npc.clone());
            }
        }
        for npc in present {
            if !npcs.contains(npc) {
                npcs.push(npc.clone());
            }
        }
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.npcs = npcs;
        }
    }

    /// Rebuilds every room's NPC list purely from the location index.
    pub fn sync_rooms_from_npc_map(&mut self) {
        let mut by_room: BTreeMap<GlobalId, Vec<GlobalId>> = BTreeMap::new();
        for (npc, room) in self.npc_locations.iter() {
            by_room.entry(room.clone()).or_default().push(npc.clone());
        }
        let ids: Vec<GlobalId> = self.rooms.keys().cloned().collect();
        for id in ids {
            if let Some(room) = self.rooms.get_mut(&id) {
                room.npcs = by_room.remove(&id).unwrap_or_default();
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Destination of `direction` from `room`, loading the target area when
    /// the exit crosses into one that is not loaded.
    ///
    /// Returns `Ok(None)` when the room has no such exit.
    ///
    /// # Errors
    ///
    /// Fails if the room is unknown, the target area cannot be loaded, or
    /// the target room does not exist.
    pub fn resolve_exit(&mut self, room: &GlobalId, direction: &str) -> Result<Option<GlobalId>> {
        let target = self
            .rooms
            .get(room)
            .ok_or_else(|| Error::room_not_found(room))?
            .exit(direction);
        let Some(target) = target else {
            return Ok(None);
        };
        self.load_area(target.area())?;
        if !self.rooms.contains_key(&target) {
            return Err(Error::room_not_found(&target));
        }
        Ok(Some(target))
    }

    /// Exits of `room` that lead to existing rooms of the same area.
    #[must_use]
    pub fn same_zone_exits(&self, room: &GlobalId) -> Vec<(String, GlobalId)> {
        let Some(room) = self.rooms.get(room) else {
            return Vec::new();
        };
        room.exits
            .iter()
            .map(|(direction, exit)| (direction, exit.target(room.area())))
            .filter(|(_, target)| target.in_area(room.area()) && self.rooms.contains_key(target))
            .map(|(direction, target)| (direction.clone(), target))
            .collect()
    }

    // =========================================================================
    // Room items
    // =========================================================================

    /// Appends an item to a room.
    ///
    /// # Errors
    ///
    /// Fails if the room is unknown.
    pub fn add_room_item(&mut self, room: &GlobalId, item: GlobalId) -> Result<()> {
        let room = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| Error::room_not_found(room))?;
        room.items.push(item);
        Ok(())
    }

    /// Removes the first occurrence of an item from a room.
    pub fn remove_room_item(&mut self, room: &GlobalId, item: &GlobalId) -> bool {
        let Some(room) = self.rooms.get_mut(room) else {
            return false;
        };
        match room.items.iter().position(|i| i == item) {
            Some(index) => {
                room.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces a room's item list, dropping ids of unknown items.
    ///
    /// # Errors
    ///
    /// Fails if the room is unknown.
    pub fn set_room_items(&mut self, room: &GlobalId, items: Vec<GlobalId>) -> Result<()> {
        let known: Vec<GlobalId> = items
            .into_iter()
            .filter(|item| self.items.contains_key(item))
            .collect();
        let room = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| Error::room_not_found(room))?;
        room.items = known;
        Ok(())
    }
}

/// Validates a parsed document and instantiates its entities.
fn instantiate(area_id: &str, doc: AreaDocument) -> Result<LoadedArea> {
    let invalid = |reason: String| Error::invalid_area(area_id, reason);

    if doc.id != area_id {
        return Err(invalid(format!("document id {:?} does not match", doc.id)));
    }

    let item_ref = |local: &str, owner: &str| {
        if doc.items.contains_key(local) {
            Ok(GlobalId::new(area_id, local))
        } else {
            Err(invalid(format!("{owner} references unknown item {local}")))
        }
    };

    let mut homes: BTreeMap<&str, &str> = BTreeMap::new();
    for (room_id, room) in &doc.rooms {
        for (direction, exit) in &room.exits {
            let target = exit.target(area_id);
            if target.in_area(area_id) && !doc.rooms.contains_key(target.local()) {
                return Err(invalid(format!(
                    "exit {direction} of room {room_id} leads to unknown room {}",
                    target.local()
                )));
            }
            if let Exit::Remote { area, .. } = exit {
                if area.is_empty() {
                    return Err(invalid(format!("exit {direction} of room {room_id} has no area")));
                }
            }
        }
        for item in &room.items {
            item_ref(item, &format!("room {room_id}"))?;
        }
        for npc in &room.npcs {
            if !doc.npcs.contains_key(npc.as_str()) {
                return Err(invalid(format!("room {room_id} references unknown npc {npc}")));
            }
            if let Some(other) = homes.insert(npc.as_str(), room_id.as_str()) {
                return Err(invalid(format!("npc {npc} is placed in both {other} and {room_id}")));
            }
        }
    }

    let mut npcs = Vec::with_capacity(doc.npcs.len());
    for (local, data) in &doc.npcs {
        let owner = format!("npc {local}");
        let drops = data
            .drops
            .iter()
            .map(|item| item_ref(item, &owner))
            .collect::<Result<Vec<_>>>()?;
        let shop = data
            .shop
            .iter()
            .map(|item| item_ref(item, &owner))
            .collect::<Result<Vec<_>>>()?;
        let home = homes.get(local.as_str()).map(|room| GlobalId::new(area_id, *room));
        npcs.push(Npc::from_data(
            GlobalId::new(area_id, local.as_str()),
            data.clone(),
            drops,
            shop,
            home,
        ));
    }

    let items: Vec<Item> = doc
        .items
        .iter()
        .map(|(local, data)| Item::from_data(GlobalId::new(area_id, local.as_str()), data.clone()))
        .collect();

    let mut placements = Vec::new();
    let rooms: Vec<Room> = doc
        .rooms
        .iter()
        .map(|(local, data)| {
            let id = GlobalId::new(area_id, local.as_str());
            let npcs: Vec<GlobalId> = data
                .npcs
                .iter()
                .map(|npc| GlobalId::new(area_id, npc.as_str()))
                .collect();
            placements.extend(npcs.iter().map(|npc| (npc.clone(), id.clone())));
            Room {
                id,
                name: data.name.clone(),
                description: data.description.clone(),
                exits: data.exits.clone(),
                items: data
                    .items
                    .iter()
                    .map(|item| GlobalId::new(area_id, item.as_str()))
                    .collect(),
                npcs,
            }
        })
        .collect();

    let area = Area {
        id: doc.id.clone(),
        name: doc.name.clone(),
        description: doc.description.clone(),
        rooms: rooms.iter().map(|room| room.id.clone()).collect(),
        items: items.iter().map(|item| item.id.clone()).collect(),
        npcs: npcs.iter().map(|npc| npc.id.clone()).collect(),
    };

    Ok(LoadedArea {
        area,
        rooms,
        items,
        npcs,
        placements,
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::{id, source, store};
    use super::*;
    use crate::source::MemorySource;
    use delve_foundation::PlainStylist;

    #[test]
    fn load_area_registers_entities() {
        let mut store = store();
        store.load_area("town").unwrap();
        assert!(store.is_loaded("town"));
        assert!(!store.is_loaded("forest"));
        assert_eq!(store.area_name("town"), "Millbrook");
        assert!(store.get_room("square", "town").is_some());
        assert_eq!(store.get_item("torch", "town").unwrap().name, "Torch");
        assert_eq!(store.get_npc("guard", "town").unwrap().name, "Town Guard");
        assert!(store.get_npc("guard", "forest").is_none());
        assert_eq!(store.npc_location(&id("town:priest")), Some(&id("town:temple")));
    }

    #[test]
    fn room_npcs_keep_document_order() {
        let mut store = store();
        store.load_area("town").unwrap();
        let square = store.room(&id("town:square")).unwrap();
        assert_eq!(square.npcs, vec![id("town:guard"), id("town:cat")]);
    }

    #[test]
    fn npcs_remember_home_room() {
        let mut store = store();
        store.load_area("town").unwrap();
        assert_eq!(
            store.npc(&id("town:guard")).unwrap().home_room,
            Some(id("town:square"))
        );
        assert!(store.get_item("fang", "town").is_some());
    }

    #[test]
    fn load_area_is_idempotent() {
        let mut store = store();
        store.load_area("town").unwrap();
        store.place_npc(&id("town:cat"), &id("town:temple")).unwrap();
        store.load_area("town").unwrap();
        assert_eq!(store.npc_location(&id("town:cat")), Some(&id("town:temple")));
        assert_eq!(store.loaded_area_ids().collect::<Vec<_>>(), vec!["town"]);
    }

    #[test]
    fn missing_area_fails_and_leaves_store_untouched() {
        let mut store = store();
        store.load_area("town").unwrap();
        let err = store.load_area("swamp").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::AreaNotFound(_)));
        assert!(!store.is_loaded("swamp"));
        assert_eq!(store.loaded_area_ids().count(), 1);
    }

    #[test]
    fn malformed_area_is_a_parse_error() {
        let source = Arc::new(MemorySource::new().with_area("bad", "{ not json"));
        let mut store = WorldStore::new(source);
        let err = store.load_area("bad").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::AreaParse { .. }));
    }

    #[test]
    fn invalid_area_is_rejected_whole() {
        let source = Arc::new(MemorySource::new().with_area(
            "broken",
            r#"{ "id": "broken", "name": "Broken",
                 "rooms": { "a": { "name": "A", "exits": { "north": "nowhere" } } } }"#,
        ));
        let mut store = WorldStore::new(source);
        let err = store.load_area("broken").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArea { .. }));
        assert!(store.get_room("a", "broken").is_none());
    }

    #[test]
    fn mismatched_document_id_is_rejected() {
        let source = Arc::new(MemorySource::new().with_area("town", r#"{ "id": "city", "name": "City" }"#));
        let mut store = WorldStore::new(source);
        assert!(store.load_area("town").is_err());
    }

    #[test]
    fn failed_load_can_be_retried() {
        let source = Arc::new(MemorySource::new());
        let mut store = WorldStore::new(source.clone());
        assert!(store.load_area("town").is_err());
        source.insert("town", super::fixtures::TOWN);
        store.load_area("town").unwrap();
        assert!(store.is_loaded("town"));
    }

    #[test]
    fn cross_zone_exit_loads_lazily() {
        let mut store = store();
        store.load_area("town").unwrap();
        let target = store.resolve_exit(&id("town:square"), "east").unwrap();
        assert_eq!(target, Some(id("forest:edge")));
        assert!(store.is_loaded("forest"));
        assert_eq!(store.resolve_exit(&id("town:square"), "up").unwrap(), None);
    }

    #[test]
    fn same_zone_exits_skip_cross_zone() {
        let mut store = store();
        store.load_area("town").unwrap();
        let exits = store.same_zone_exits(&id("town:square"));
        assert_eq!(exits, vec![("north".to_string(), id("town:temple"))]);
    }

    #[test]
    fn placing_npc_resyncs_both_rooms() {
        let mut store = store();
        store.load_area("town").unwrap();
        store.place_npc(&id("town:guard"), &id("town:temple")).unwrap();
        assert_eq!(store.room(&id("town:square")).unwrap().npcs, vec![id("town:cat")]);
        assert_eq!(
            store.room(&id("town:temple")).unwrap().npcs,
            vec![id("town:priest"), id("town:guard")]
        );
        assert!(store.place_npc(&id("town:nobody"), &id("town:temple")).is_err());
    }

    #[test]
    fn removing_npc_clears_room() {
        let mut store = store();
        store.load_area("town").unwrap();
        assert_eq!(store.remove_npc(&id("town:cat")), Some(id("town:square")));
        assert_eq!(store.room(&id("town:square")).unwrap().npcs, vec![id("town:guard")]);
        assert_eq!(store.remove_npc(&id("town:cat")), None);
    }

    #[test]
    fn sync_from_npc_map_ignores_stale_room_lists() {
        let mut store = store();
        store.load_area("town").unwrap();
        store.set_npc_locations(vec![
            (id("town:guard"), id("town:temple")),
            (id("town:ghost"), id("town:temple")),
        ]);
        store.sync_rooms_from_npc_map();
        assert!(store.room(&id("town:square")).unwrap().npcs.is_empty());
        assert_eq!(store.room(&id("town:temple")).unwrap().npcs, vec![id("town:guard")]);
        assert_eq!(store.npc_location(&id("town:priest")), None);
    }

    #[test]
    fn room_items_move_without_duplication() {
        let mut store = store();
        store.load_area("town").unwrap();
        let square = id("town:square");
        assert!(store.remove_room_item(&square, &id("town:torch")));
        assert!(!store.remove_room_item(&square, &id("town:torch")));
        store.add_room_item(&id("town:temple"), id("town:torch")).unwrap();
        assert_eq!(store.room(&id("town:temple")).unwrap().items, vec![id("town:torch")]);
        store
            .set_room_items(&square, vec![id("town:fang"), id("town:missing")])
            .unwrap();
        assert_eq!(store.room(&square).unwrap().items, vec![id("town:fang")]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = store();
        store.load_area("town").unwrap();
        store.reset();
        assert!(!store.is_loaded("town"));
        assert_eq!(store.npcs().count(), 0);
        store.load_area("town").unwrap();
        assert!(store.is_loaded("town"));
    }

    #[test]
    fn clone_is_an_independent_snapshot() {
        let mut store = store();
        store.load_area("town").unwrap();
        let backup = store.clone();
        store.remove_npc(&id("town:guard"));
        store.npc_mut(&id("town:cat")).unwrap().take_damage(2);
        assert!(backup.npc_location(&id("town:guard")).is_some());
        assert_eq!(backup.npc(&id("town:cat")).unwrap().hit_points(), 3);
    }

    #[test]
    fn missing_skill_table_is_empty() {
        let store = WorldStore::new(source());
        assert!(store.load_skills().unwrap().is_empty());
    }

    #[test]
    fn room_find_is_first_match_in_list_order() {
        let mut store = store();
        store.load_area("town").unwrap();
        let square = store.room(&id("town:square")).unwrap();
        assert_eq!(square.find_npc("GUARD", &store).unwrap().name, "Town Guard");
        assert_eq!(square.find_npc("t", &store).unwrap().name, "Town Guard");
        assert_eq!(square.find_item("tor", &store).unwrap().name, "Torch");
        assert!(square.find_item("sword", &store).is_none());
    }

    #[test]
    fn full_description_lists_everything() {
        let mut store = store();
        store.load_area("town").unwrap();
        store.npc_mut(&id("town:cat")).unwrap().take_damage(10);
        let square = store.room(&id("town:square")).unwrap();
        let text = square.full_description(&store, &PlainStylist, 78);
        assert!(text.starts_with("Town Square\nCobbles and a dry fountain."));
        assert!(text.contains("Exits: east (to forest), north"));
        assert!(text.contains("You see: Torch"));
        assert!(text.contains("Also here: Town Guard, Stray Cat (dead)"));

        store.load_area("forest").unwrap();
        let square = store.room(&id("town:square")).unwrap();
        let text = square.full_description(&store, &PlainStylist, 78);
        assert!(text.contains("east (to Darkwood)"));
    }
}
