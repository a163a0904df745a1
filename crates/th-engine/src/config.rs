//! Configuration for an interaction session.

use crate::messages::Messages;

/// Configuration for an [`crate::Engine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Style labels and headings with ANSI colors.
    pub color: bool,
    /// Show action descriptions next to their labels.
    pub show_descriptions: bool,
    /// Ask for confirmation before leaving the game.
    pub confirm_exit: bool,
    /// Maximum number of nested contexts.
    pub max_depth: usize,
    /// Strings shown to the player.
    pub messages: Messages,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            color: false,
            show_descriptions: true,
            confirm_exit: false,
            max_depth: 64,
            messages: Messages::default(),
        }
    }
}

impl EngineConfig {
    /// Enable or disable colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Show or hide action descriptions.
    pub fn with_descriptions(mut self, show: bool) -> Self {
        self.show_descriptions = show;
        self
    }

    /// Ask before leaving the game.
    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    /// Set the nesting limit (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Replace the string catalog.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }
}
