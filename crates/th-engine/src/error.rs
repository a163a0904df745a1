//! Error types for the interaction engine.

use std::io;

use th_core::{SituationId, WorldError};

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Fatal errors that end a session.
///
/// Bad player input is never an error; it is reported and re-prompted.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The world rejected an operation.
    #[error(transparent)]
    World(#[from] WorldError),

    /// Reading input or writing output failed.
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),

    /// Contexts were nested deeper than the configured limit.
    #[error("contexts nested deeper than the limit of {max}")]
    DepthExceeded {
        /// The configured limit.
        max: usize,
    },

    /// A dialogue option was chosen with no conversation in progress.
    #[error("dialogue option chosen outside a conversation")]
    NotInConversation,

    /// A transition named an option that does not exist.
    #[error("situation {situation} has no option {option}")]
    OptionNotFound {
        /// The situation.
        situation: SituationId,
        /// The missing option index.
        option: usize,
    },
}
