use std::fmt;

use crate::entity::{CharacterId, Describable, DoorId, ItemId, Named, RoomId, selectable_by_name};

/// A place in the world. Its exits are exactly the doors it is an endpoint of.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    name: String,
    description: String,
    exits: Vec<DoorId>,
    npcs: Vec<CharacterId>,
    items: Vec<ItemId>,
}

impl Room {
    /// Create an empty room.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(),
            name: name.into(),
            description: description.into(),
            exits: Vec::new(),
            npcs: Vec::new(),
            items: Vec::new(),
        }
    }

    /// The room's identifier.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Doors leading out of this room, in the order they were built.
    pub fn exits(&self) -> &[DoorId] {
        &self.exits
    }

    /// NPCs standing in this room.
    pub fn npcs(&self) -> &[CharacterId] {
        &self.npcs
    }

    /// Items lying in this room.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub(crate) fn add_exit(&mut self, door: DoorId) {
        if !self.exits.contains(&door) {
            self.exits.push(door);
        }
    }

    pub(crate) fn add_npc(&mut self, npc: CharacterId) {
        if !self.npcs.contains(&npc) {
            self.npcs.push(npc);
        }
    }

    pub(crate) fn remove_npc(&mut self, npc: CharacterId) {
        self.npcs.retain(|id| *id != npc);
    }

    pub(crate) fn add_item(&mut self, item: ItemId) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    pub(crate) fn remove_item(&mut self, item: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| *id != item);
        self.items.len() != before
    }
}

impl Named for Room {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Describable for Room {
    fn description(&self) -> &str {
        &self.description
    }
}

selectable_by_name!(Room);

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
