//! Rooms and exits.

use std::collections::BTreeMap;

use delve_foundation::{GlobalId, Style, Stylist, wrap};
use serde::Deserialize;

use crate::item::Item;
use crate::npc::Npc;
use crate::world::WorldStore;

/// Where an exit leads.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Exit {
    /// A room in the same area, by local id.
    Local(String),
    /// A room in another area. Traversal loads that area on demand.
    Remote {
        /// Local room id inside `area`.
        room: String,
        /// Destination area id.
        area: String,
    },
}

impl Exit {
    /// Resolves the destination relative to the area the exit belongs to.
    #[must_use]
    pub fn target(&self, from_area: &str) -> GlobalId {
        match self {
            Self::Local(room) => GlobalId::new(from_area, room.as_str()),
            Self::Remote { room, area } => GlobalId::new(area.as_str(), room.as_str()),
        }
    }

    /// Returns true when the destination lies in a different area.
    #[must_use]
    pub fn is_cross_zone(&self, from_area: &str) -> bool {
        matches!(self, Self::Remote { area, .. } if area != from_area)
    }
}

/// A location in the world.
///
/// `npcs` is derived from the world store's NPC location index and is only
/// ever rewritten by the store's sync operations.
#[derive(Clone, Debug)]
pub struct Room {
    /// Global id.
    pub id: GlobalId,
    /// Title.
    pub name: String,
    /// Body text.
    pub description: String,
    /// Direction token to destination, sorted by direction.
    pub exits: BTreeMap<String, Exit>,
    /// Items lying here, in order.
    pub items: Vec<GlobalId>,
    /// NPCs present, in order.
    pub npcs: Vec<GlobalId>,
}

impl Room {
    /// The area this room belongs to.
    #[must_use]
    pub fn area(&self) -> &str {
        self.id.area()
    }

    /// Destination of the exit in `direction`, if any.
    #[must_use]
    pub fn exit(&self, direction: &str) -> Option<GlobalId> {
        self.exits.get(direction).map(|exit| exit.target(self.area()))
    }

    /// First item in list order whose name or id contains `query`.
    #[must_use]
    pub fn find_item<'w>(&self, query: &str, store: &'w WorldStore) -> Option<&'w Item> {
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter_map(|id| store.item(id))
            .find(|item| item.matches(&query))
    }

    /// First NPC in list order whose name or id contains `query`.
    #[must_use]
    pub fn find_npc<'w>(&self, query: &str, store: &'w WorldStore) -> Option<&'w Npc> {
        let query = query.to_lowercase();
        self.npcs
            .iter()
            .filter_map(|id| store.npc(id))
            .find(|npc| npc.matches(&query))
    }

    /// Name, wrapped description, exits, items, and NPCs.
    #[must_use]
    pub fn full_description(&self, store: &WorldStore, stylist: &dyn Stylist, width: usize) -> String {
        let mut out = stylist.colorize(&self.name, Style::RoomName);
        out.push('\n');
        out.push_str(&wrap(&self.description, width));

        out.push_str("\n\n");
        if self.exits.is_empty() {
            out.push_str(&stylist.colorize("There are no obvious exits.", Style::Dim));
        } else {
            let exits: Vec<String> = self
                .exits
                .iter()
                .map(|(direction, exit)| {
                    let label = stylist.colorize(direction, Style::Exit);
                    if exit.is_cross_zone(self.area()) {
                        let area = exit.target(self.area());
                        let name = store.area_name(area.area());
                        format!("{label} (to {name})")
                    } else {
                        label
                    }
                })
                .collect();
            out.push_str("Exits: ");
            out.push_str(&exits.join(", "));
        }

        let items: Vec<String> = self
            .items
            .iter()
            .filter_map(|id| store.item(id))
            .map(|item| stylist.colorize(&item.name, Style::Item))
            .collect();
        if !items.is_empty() {
            out.push_str("\nYou see: ");
            out.push_str(&items.join(", "));
        }

        let npcs: Vec<String> = self
            .npcs
            .iter()
            .filter_map(|id| store.npc(id))
            .map(|npc| {
                let style = if npc.is_hostile() { Style::Hostile } else { Style::Npc };
                let name = stylist.colorize(&npc.name, style);
                if npc.is_alive() {
                    name
                } else {
                    format!("{name} {}", stylist.colorize("(dead)", Style::Dim))
                }
            })
            .collect();
        if !npcs.is_empty() {
            out.push_str("\nAlso here: ");
            out.push_str(&npcs.join(", "));
        }

        out
    }
}
