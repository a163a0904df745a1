//! Doors connect two rooms and can be locked with a matching key.
//!
//! Each door owns a random lock token that never leaves this module. Keys
//! carry a fingerprint derived from that token, so a key can be copied freely
//! without revealing enough to cut a key for a different door. The fingerprint
//! is a plain integer fold, not a cryptographic commitment: two doors sharing
//! a fingerprint is astronomically unlikely but not impossible, and nothing
//! stops a determined author from guessing one. Fine for a game, not for
//! anything trust-sensitive.

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::entity::{Describable, DoorId, Named, RoomId, selectable_by_name};
use crate::item::Item;
use crate::room::Room;

/// Errors from asking a door for the room on its far side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoorError {
    /// The door is locked.
    #[error("door is locked")]
    Locked,

    /// The given room is not one of the door's endpoints.
    #[error("room {0} is not connected to this door")]
    NotAnEndpoint(RoomId),

    /// Both endpoints are the same room.
    #[error("a door cannot lead from room {0} back into itself")]
    SameRoom(RoomId),
}

/// A door between two rooms.
///
/// Equality and hashing only look at the unordered pair of rooms: a door
/// from A to B equals a door from B to A regardless of either lock state.
#[derive(Debug, Clone)]
pub struct Door {
    id: DoorId,
    name: String,
    /// Display form, kept in step with `locked`.
    description: String,
    lock: u128,
    locked: bool,
    room1: (RoomId, String),
    room2: (RoomId, String),
}

impl Door {
    /// Create a door between two distinct rooms with a fresh random lock.
    pub fn new(locked: bool, room1: &Room, room2: &Room) -> Result<Self, DoorError> {
        if room1.id() == room2.id() {
            return Err(DoorError::SameRoom(room1.id()));
        }

        let mut door = Self {
            id: DoorId::new(),
            name: format!("door between {} and {}", room1.name(), room2.name()),
            description: String::new(),
            lock: rand::random(),
            locked,
            room1: (room1.id(), room1.name().to_string()),
            room2: (room2.id(), room2.name().to_string()),
        };
        door.refresh_description();
        Ok(door)
    }

    fn refresh_description(&mut self) {
        self.description = format!("Door between {} and {}", self.room1.1, self.room2.1);
        if self.locked {
            self.description.push_str(" (locked)");
        }
        self.description.push('.');
    }

    /// Give the door an authored name such as "oak door".
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The door's identifier.
    pub fn id(&self) -> DoorId {
        self.id
    }

    /// The room on one side.
    pub fn room1(&self) -> RoomId {
        self.room1.0
    }

    /// The room on the other side.
    pub fn room2(&self) -> RoomId {
        self.room2.0
    }

    /// Whether `room` is one of the two endpoints.
    pub fn connects(&self, room: RoomId) -> bool {
        self.room1.0 == room || self.room2.0 == room
    }

    /// Whether the door is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The room on the far side of the door, coming from `from`.
    ///
    /// Fails with [`DoorError::Locked`] while the door is locked, and with
    /// [`DoorError::NotAnEndpoint`] if `from` is not one of its rooms.
    pub fn other_room(&self, from: RoomId) -> Result<RoomId, DoorError> {
        if self.locked {
            return Err(DoorError::Locked);
        }
        if from == self.room1.0 {
            Ok(self.room2.0)
        } else if from == self.room2.0 {
            Ok(self.room1.0)
        } else {
            Err(DoorError::NotAnEndpoint(from))
        }
    }

    /// Try to lock the door. Returns `false` if the key does not fit.
    pub fn lock(&mut self, key: &Item) -> bool {
        self.set_locked(true, key)
    }

    /// Try to unlock the door. Returns `false` if the key does not fit.
    pub fn unlock(&mut self, key: &Item) -> bool {
        self.set_locked(false, key)
    }

    /// Set the lock state with `key`.
    ///
    /// A key that does not fit leaves the door untouched and returns `false`.
    pub fn set_locked(&mut self, locked: bool, key: &Item) -> bool {
        if !self.fits(key) {
            debug!(door = %self.id, key = %key.id(), "key does not fit");
            return false;
        }
        self.locked = locked;
        self.refresh_description();
        debug!(door = %self.id, locked, "lock state changed");
        true
    }

    /// Whether `key` was cut for this door. Non-key items never fit.
    pub fn fits(&self, key: &Item) -> bool {
        key.fingerprint() == Some(self.fingerprint())
    }

    /// Cut a new key for this door.
    pub fn make_key(&self, name: impl Into<String>, description: impl Into<String>) -> Item {
        Item::key(name, description, self.fingerprint())
    }

    fn fingerprint(&self) -> u64 {
        (self.lock as u64) ^ ((self.lock >> 64) as u64)
    }

    fn endpoints(&self) -> (RoomId, RoomId) {
        if self.room1.0 <= self.room2.0 {
            (self.room1.0, self.room2.0)
        } else {
            (self.room2.0, self.room1.0)
        }
    }
}

impl Named for Door {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Describable for Door {
    fn description(&self) -> &str {
        &self.description
    }
}

selectable_by_name!(Door);

impl PartialEq for Door {
    fn eq(&self, other: &Self) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl Eq for Door {}

impl Hash for Door {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.endpoints().hash(state);
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
