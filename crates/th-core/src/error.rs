use crate::door::DoorError;
use crate::entity::{CharacterId, DoorId, ItemId, RoomId, SituationId};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors raised while building or querying a world.
///
/// Every variant except [`WorldError::Parse`] indicates an inconsistent world
/// graph: the engine treats them as fatal.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// An entity was given an empty or whitespace-only name.
    #[error("{0} name must not be blank")]
    BlankName(&'static str),

    /// The requested room does not exist in the world.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The requested door does not exist in the world.
    #[error("door not found: {0}")]
    DoorNotFound(DoorId),

    /// The requested item does not exist in the world.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The requested character does not exist in the world.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// The requested dialogue situation does not exist in the world.
    #[error("situation not found: {0}")]
    SituationNotFound(SituationId),

    /// A door between the same two rooms already exists.
    #[error("a door between \"{room1}\" and \"{room2}\" already exists")]
    DuplicateDoor {
        /// Name of the first room.
        room1: String,
        /// Name of the second room.
        room2: String,
    },

    /// The item is already placed somewhere in the world.
    #[error("item {0} is already in the world")]
    DuplicateItem(ItemId),

    /// The item is not lying in the character's current room.
    #[error("item {0} is not in this room")]
    ItemNotHere(ItemId),

    /// The item is not in the character's inventory.
    #[error("item {0} is not carried")]
    ItemNotCarried(ItemId),

    /// The operation needs a non-player character.
    #[error("character {0} is not an NPC")]
    NotAnNpc(CharacterId),

    /// A door operation failed.
    #[error(transparent)]
    Door(#[from] DoorError),

    /// A blueprint refers to a name that was never declared.
    #[error("unknown {kind} \"{name}\"")]
    UnknownReference {
        /// What kind of entity was expected.
        kind: &'static str,
        /// The unresolved name.
        name: String,
    },

    /// A blueprint declares the same room name twice.
    #[error("duplicate {kind} name \"{name}\"")]
    DuplicateName {
        /// What kind of entity was declared twice.
        kind: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A blueprint document could not be parsed.
    #[error("invalid blueprint: {0}")]
    Parse(#[from] serde_json::Error),
}
