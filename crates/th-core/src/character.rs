use std::fmt;

use crate::entity::{
    CharacterId, Describable, ItemId, Named, RoomId, SituationId, selectable_by_name,
};

/// What drives a character: the player at the keyboard, or a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The character controlled by the person playing.
    Player,
    /// A non-player character the player can talk to.
    Npc {
        /// Root situation of the NPC's dialogue tree.
        conversation: SituationId,
    },
}

/// A person in the world. Owns its inventory and its location.
#[derive(Debug, Clone)]
pub struct Character {
    id: CharacterId,
    name: String,
    description: String,
    location: RoomId,
    inventory: Vec<ItemId>,
    role: Role,
}

impl Character {
    /// Create the player character standing in `location`.
    pub fn player(
        name: impl Into<String>,
        description: impl Into<String>,
        location: RoomId,
    ) -> Self {
        Self::with_role(name, description, location, Role::Player)
    }

    /// Create an NPC standing in `location` who talks through `conversation`.
    pub fn npc(
        name: impl Into<String>,
        description: impl Into<String>,
        location: RoomId,
        conversation: SituationId,
    ) -> Self {
        Self::with_role(name, description, location, Role::Npc { conversation })
    }

    fn with_role(
        name: impl Into<String>,
        description: impl Into<String>,
        location: RoomId,
        role: Role,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            description: description.into(),
            location,
            inventory: Vec::new(),
            role,
        }
    }

    /// The character's identifier.
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// The room the character is in.
    pub fn location(&self) -> RoomId {
        self.location
    }

    /// Carried items, oldest first.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Whether `item` is in the inventory.
    pub fn carries(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }

    /// The character's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The root of this character's dialogue tree, if it is an NPC.
    pub fn conversation(&self) -> Option<SituationId> {
        match self.role {
            Role::Npc { conversation } => Some(conversation),
            Role::Player => None,
        }
    }

    pub(crate) fn set_location(&mut self, room: RoomId) {
        self.location = room;
    }

    pub(crate) fn add_item(&mut self, item: ItemId) {
        if !self.inventory.contains(&item) {
            self.inventory.push(item);
        }
    }

    pub(crate) fn remove_item(&mut self, item: ItemId) -> bool {
        match self.inventory.iter().position(|id| *id == item) {
            Some(pos) => {
                self.inventory.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl Named for Character {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Describable for Character {
    fn description(&self) -> &str {
        &self.description
    }
}

selectable_by_name!(Character);

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
