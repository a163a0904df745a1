//! What a resolved action asks for, and how frames unwind.

use th_core::{DoorId, ItemId, SituationId};

use crate::context::Context;

/// The outcome of resolving an [`crate::Action`].
///
/// Resolvers only describe what should happen; the engine carries it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move into another context.
    Enter(Context),
    /// Change or report on the world, then stay in the current context.
    Perform(Effect),
    /// Pick a dialogue option.
    Choose {
        /// Situation the option belongs to.
        situation: SituationId,
        /// Index of the option in that situation.
        option: usize,
    },
    /// Return to the context that opened the current one.
    Back,
    /// Leave the game.
    Exit,
}

/// A side effect applied by the engine after an action is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Print a description of a context.
    Describe(Context),
    /// Print a carried item's description.
    Examine(ItemId),
    /// Pick an item up from the current room.
    Take(ItemId),
    /// Put a carried item down in the current room.
    Drop(ItemId),
    /// Try a key on a door.
    SetLocked {
        /// The door.
        door: DoorId,
        /// The key being tried.
        key: ItemId,
        /// Lock when `true`, unlock when `false`.
        locked: bool,
    },
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The player chose to leave.
    Exited,
    /// Input ran out.
    InputClosed,
}

impl Status {
    /// Process exit code for this status. Every normal ending is 0.
    pub fn code(self) -> i32 {
        match self {
            Self::Exited | Self::InputClosed => 0,
        }
    }
}

/// Control signal returned by an interaction frame to its caller.
///
/// Frames are numbered by depth: the starting room is 0, each nested
/// context one deeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// Unwind until the frame at `depth` is active again.
    UnwindTo {
        /// Depth of the frame that resumes.
        depth: usize,
    },
    /// Unwind every frame and end the session.
    Terminate(Status),
}

impl ExitSignal {
    /// Whether the frame at `depth` should catch this signal and resume.
    pub fn resumes(self, depth: usize) -> bool {
        match self {
            Self::UnwindTo { depth: target } => target >= depth,
            Self::Terminate(_) => false,
        }
    }
}
