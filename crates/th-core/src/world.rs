use std::collections::HashMap;

use tracing::debug;

use crate::character::{Character, Role};
use crate::door::Door;
use crate::entity::{CharacterId, DoorId, ItemId, Named, RoomId, SituationId, is_valid_name};
use crate::error::{WorldError, WorldResult};
use crate::item::Item;
use crate::room::Room;
use crate::situation::{ConversationState, Situation};

/// The whole world: topology, characters, items and dialogue trees.
///
/// Built once before play starts. During play only door lock state,
/// character locations, item placement and conversation progress change.
#[derive(Debug, Clone)]
pub struct World {
    /// Display name of the world.
    pub name: String,
    rooms: HashMap<RoomId, Room>,
    doors: HashMap<DoorId, Door>,
    items: HashMap<ItemId, Item>,
    characters: HashMap<CharacterId, Character>,
    situations: HashMap<SituationId, Situation>,
    conversations: HashMap<SituationId, ConversationState>,
    players: Vec<CharacterId>,
}

impl World {
    /// Create an empty world.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rooms: HashMap::new(),
            doors: HashMap::new(),
            items: HashMap::new(),
            characters: HashMap::new(),
            situations: HashMap::new(),
            conversations: HashMap::new(),
            players: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a room. Returns its ID.
    pub fn add_room(&mut self, room: Room) -> WorldResult<RoomId> {
        if !is_valid_name(room.name()) {
            return Err(WorldError::BlankName("room"));
        }
        let id = room.id();
        self.rooms.insert(id, room);
        Ok(id)
    }

    /// Build a door between two rooms and register it as an exit of both.
    ///
    /// `name` overrides the generated "door between A and B" name.
    pub fn connect(
        &mut self,
        locked: bool,
        room1: RoomId,
        room2: RoomId,
        name: Option<&str>,
    ) -> WorldResult<DoorId> {
        let mut door = Door::new(locked, self.room(room1)?, self.room(room2)?)?;
        if let Some(name) = name {
            if !is_valid_name(name) {
                return Err(WorldError::BlankName("door"));
            }
            door = door.with_name(name);
        }

        let duplicate = self
            .room(room1)?
            .exits()
            .iter()
            .filter_map(|id| self.doors.get(id))
            .any(|existing| *existing == door);
        if duplicate {
            return Err(WorldError::DuplicateDoor {
                room1: self.room(room1)?.name().to_string(),
                room2: self.room(room2)?.name().to_string(),
            });
        }

        let id = door.id();
        debug!(door = %id, name = door.name(), locked, "door built");
        self.doors.insert(id, door);
        self.room_mut(room1)?.add_exit(id);
        self.room_mut(room2)?.add_exit(id);
        Ok(id)
    }

    /// Put a new item on the floor of `room`.
    pub fn add_item_to_room(&mut self, room: RoomId, item: Item) -> WorldResult<ItemId> {
        self.room(room)?;
        let id = self.register_item(item)?;
        self.room_mut(room)?.add_item(id);
        Ok(id)
    }

    /// Put a new item in a character's inventory.
    pub fn give_item(&mut self, character: CharacterId, item: Item) -> WorldResult<ItemId> {
        self.character(character)?;
        let id = self.register_item(item)?;
        self.character_mut(character)?.add_item(id);
        Ok(id)
    }

    fn register_item(&mut self, item: Item) -> WorldResult<ItemId> {
        if !is_valid_name(item.name()) {
            return Err(WorldError::BlankName("item"));
        }
        let id = item.id();
        if self.items.contains_key(&id) {
            return Err(WorldError::DuplicateItem(id));
        }
        self.items.insert(id, item);
        Ok(id)
    }

    /// Add a dialogue situation. Every option must lead to a situation that
    /// was already added, so trees are built leaves first.
    pub fn add_situation(&mut self, situation: Situation) -> WorldResult<SituationId> {
        if !is_valid_name(situation.name()) {
            return Err(WorldError::BlankName("situation"));
        }
        if let Some(missing) = situation
            .options()
            .iter()
            .find(|option| !self.situations.contains_key(&option.next))
        {
            return Err(WorldError::SituationNotFound(missing.next));
        }
        let id = situation.id();
        self.situations.insert(id, situation);
        Ok(id)
    }

    /// Add a character. NPCs are listed in the room they stand in.
    pub fn add_character(&mut self, character: Character) -> WorldResult<CharacterId> {
        if !is_valid_name(character.name()) {
            return Err(WorldError::BlankName("character"));
        }
        self.room(character.location())?;
        if let Some(root) = character.conversation() {
            self.situation(root)?;
        }

        let id = character.id();
        match character.role() {
            Role::Player => self.players.push(id),
            Role::Npc { .. } => self.room_mut(character.location())?.add_npc(id),
        }
        self.characters.insert(id, character);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a room.
    pub fn room(&self, id: RoomId) -> WorldResult<&Room> {
        self.rooms.get(&id).ok_or(WorldError::RoomNotFound(id))
    }

    fn room_mut(&mut self, id: RoomId) -> WorldResult<&mut Room> {
        self.rooms.get_mut(&id).ok_or(WorldError::RoomNotFound(id))
    }

    /// Get a door.
    pub fn door(&self, id: DoorId) -> WorldResult<&Door> {
        self.doors.get(&id).ok_or(WorldError::DoorNotFound(id))
    }

    /// Get an item.
    pub fn item(&self, id: ItemId) -> WorldResult<&Item> {
        self.items.get(&id).ok_or(WorldError::ItemNotFound(id))
    }

    /// Get a character.
    pub fn character(&self, id: CharacterId) -> WorldResult<&Character> {
        self.characters
            .get(&id)
            .ok_or(WorldError::CharacterNotFound(id))
    }

    fn character_mut(&mut self, id: CharacterId) -> WorldResult<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(WorldError::CharacterNotFound(id))
    }

    /// Get a dialogue situation.
    pub fn situation(&self, id: SituationId) -> WorldResult<&Situation> {
        self.situations
            .get(&id)
            .ok_or(WorldError::SituationNotFound(id))
    }

    /// Player characters, in the order they were added.
    pub fn players(&self) -> &[CharacterId] {
        &self.players
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Find a room by name (case-insensitive). When several rooms share the
    /// name, which one is returned is unspecified.
    pub fn find_room(&self, name: &str) -> Option<&Room> {
        let wanted = name.to_lowercase();
        self.rooms.values().find(|r| r.name().to_lowercase() == wanted)
    }

    /// Progress of the conversation rooted at `root`, if it was ever touched.
    pub fn conversation(&self, root: SituationId) -> Option<&ConversationState> {
        self.conversations.get(&root)
    }

    /// Progress of the conversation rooted at `root`, created on first use.
    pub fn conversation_mut(&mut self, root: SituationId) -> &mut ConversationState {
        self.conversations.entry(root).or_default()
    }

    // -----------------------------------------------------------------------
    // Play
    // -----------------------------------------------------------------------

    /// The room on the far side of `door`, coming from `from`.
    pub fn pass_through(&self, door: DoorId, from: RoomId) -> WorldResult<RoomId> {
        Ok(self.door(door)?.other_room(from)?)
    }

    /// Move a character to `room`, keeping NPC listings in sync.
    pub fn move_character(&mut self, character: CharacterId, room: RoomId) -> WorldResult<()> {
        self.room(room)?;
        let (from, role) = {
            let c = self.character(character)?;
            (c.location(), c.role())
        };
        if let Role::Npc { .. } = role {
            self.room_mut(from)?.remove_npc(character);
            self.room_mut(room)?.add_npc(character);
        }
        self.character_mut(character)?.set_location(room);
        if from != room {
            debug!(character = %character, from = %from, to = %room, "character moved");
        }
        Ok(())
    }

    /// Pick an item up from the character's current room.
    pub fn take_item(&mut self, character: CharacterId, item: ItemId) -> WorldResult<()> {
        self.item(item)?;
        let here = self.character(character)?.location();
        if !self.room_mut(here)?.remove_item(item) {
            return Err(WorldError::ItemNotHere(item));
        }
        self.character_mut(character)?.add_item(item);
        debug!(character = %character, item = %item, "item taken");
        Ok(())
    }

    /// Put an item from the inventory down in the character's current room.
    pub fn drop_item(&mut self, character: CharacterId, item: ItemId) -> WorldResult<()> {
        self.item(item)?;
        if !self.character_mut(character)?.remove_item(item) {
            return Err(WorldError::ItemNotCarried(item));
        }
        let here = self.character(character)?.location();
        self.room_mut(here)?.add_item(item);
        debug!(character = %character, item = %item, "item dropped");
        Ok(())
    }

    /// Apply `key` to `door`. Returns `Ok(false)` if the key does not fit.
    pub fn set_door_locked(&mut self, door: DoorId, locked: bool, key: ItemId) -> WorldResult<bool> {
        let key = self.items.get(&key).ok_or(WorldError::ItemNotFound(key))?;
        let door = self
            .doors
            .get_mut(&door)
            .ok_or(WorldError::DoorNotFound(door))?;
        Ok(door.set_locked(locked, key))
    }

    /// Keys in the character's inventory that fit `door`.
    pub fn keys_fitting(&self, character: CharacterId, door: DoorId) -> WorldResult<Vec<ItemId>> {
        let door = self.door(door)?;
        let character = self.character(character)?;
        let mut keys = Vec::new();
        for id in character.inventory() {
            if door.fits(self.item(*id)?) {
                keys.push(*id);
            }
        }
        Ok(keys)
    }

    /// Keys of any kind in the character's inventory.
    pub fn keys_carried(&self, character: CharacterId) -> WorldResult<Vec<ItemId>> {
        let character = self.character(character)?;
        let mut keys = Vec::new();
        for id in character.inventory() {
            if self.item(*id)?.is_key() {
                keys.push(*id);
            }
        }
        Ok(keys)
    }
}
