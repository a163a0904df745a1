//! Interaction engine for Threshold.
//!
//! The engine offers the player an ordered list of [`Action`]s for whatever
//! [`Context`] they are in, reads a choice from the console and follows the
//! resulting [`Transition`]. Contexts nest: walking through a door, talking
//! to someone or opening the inventory runs a new frame on top of the current
//! one, and "Back" unwinds to it again through an [`ExitSignal`].

/// Actions and action lists.
pub mod action;
/// Engine configuration.
pub mod config;
/// Console printing and line input.
pub mod console;
/// Interaction contexts and what they offer.
pub mod context;
/// Actions offered inside conversations.
pub mod dialogue;
/// The recursive interaction loop.
pub mod engine;
/// Engine error types.
pub mod error;
/// The user-facing string catalog.
pub mod messages;
/// Room and item descriptions.
pub mod narration;
/// Transitions, effects and exit signals.
pub mod transition;

pub use action::{Action, ActionList, SelectionError};
pub use config::EngineConfig;
pub use console::{Console, Printer};
pub use context::{Context, Scope};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use messages::Messages;
pub use transition::{Effect, ExitSignal, Status, Transition};
