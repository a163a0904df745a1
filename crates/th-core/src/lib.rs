//! World model for Threshold: rooms, doors and keys, items, characters and
//! dialogue situations.
//!
//! Worlds are built up front, either programmatically through [`World`] or
//! from a JSON [`blueprint::Blueprint`], and then handed to the interaction
//! engine. Everything is addressed by typed identifiers; two rooms with the
//! same name are still two rooms.

/// JSON world descriptions.
pub mod blueprint;
/// Player and non-player characters.
pub mod character;
/// Doors, locks and keys.
pub mod door;
/// Identifiers and capability traits shared by every entity.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Items, including keys.
pub mod item;
/// Rooms.
pub mod room;
/// Dialogue situations and conversation progress.
pub mod situation;
/// The world arena that owns everything.
pub mod world;

pub use blueprint::Blueprint;
pub use character::{Character, Role};
pub use door::{Door, DoorError};
pub use entity::{
    CharacterId, Describable, DoorId, ItemId, Named, RoomId, Selectable, SituationId,
};
pub use error::{WorldError, WorldResult};
pub use item::{Item, ItemKind};
pub use room::Room;
pub use situation::{ConversationState, Situation, SituationOption};
pub use world::World;
