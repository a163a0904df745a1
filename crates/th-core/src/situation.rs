//! Dialogue trees: situations, the options that link them, and per-conversation
//! progress.

use std::collections::HashSet;
use std::fmt;

use crate::entity::{Describable, Named, SituationId, selectable_by_name};

/// A node in an NPC's dialogue tree.
#[derive(Debug, Clone)]
pub struct Situation {
    id: SituationId,
    name: String,
    line: String,
    options: Vec<SituationOption>,
    reset_on_entry: bool,
}

impl Situation {
    /// Create a situation with the given name and the line the NPC says on
    /// reaching it.
    pub fn new(name: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            id: SituationId::new(),
            name: name.into(),
            line: line.into(),
            options: Vec::new(),
            reset_on_entry: false,
        }
    }

    /// Add an option.
    pub fn with_option(mut self, option: SituationOption) -> Self {
        self.options.push(option);
        self
    }

    /// Forget the conversation's progress each time it is entered through
    /// this situation.
    pub fn resetting(mut self) -> Self {
        self.reset_on_entry = true;
        self
    }

    /// The situation's identifier.
    pub fn id(&self) -> SituationId {
        self.id
    }

    /// What the NPC says here.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// All authored options, including ones already used up.
    pub fn options(&self) -> &[SituationOption] {
        &self.options
    }

    /// The option at `index`.
    pub fn option(&self, index: usize) -> Option<&SituationOption> {
        self.options.get(index)
    }

    /// Whether this situation has no options at all.
    pub fn is_leaf(&self) -> bool {
        self.options.is_empty()
    }

    /// Whether entering here clears the conversation's progress.
    pub fn resets_on_entry(&self) -> bool {
        self.reset_on_entry
    }

    /// Options still available given the conversation's progress, paired with
    /// their index.
    pub fn visible_options<'a>(
        &'a self,
        state: Option<&'a ConversationState>,
    ) -> impl Iterator<Item = (usize, &'a SituationOption)> + 'a {
        self.options.iter().enumerate().filter(move |(index, option)| {
            !(option.once && state.is_some_and(|s| s.has_chosen(self.id, *index)))
        })
    }
}

impl Named for Situation {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Describable for Situation {
    fn description(&self) -> &str {
        &self.line
    }
}

selectable_by_name!(Situation);

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One thing the player can say in a situation.
#[derive(Debug, Clone)]
pub struct SituationOption {
    /// Text the player picks.
    pub label: String,
    /// Optional hint shown next to the label.
    pub description: String,
    /// Situation the option leads to.
    pub next: SituationId,
    /// Hide the option once it has been chosen.
    pub once: bool,
    /// Leave the conversation after the next situation's line is spoken.
    pub ends_conversation: bool,
}

impl SituationOption {
    /// Create an option leading to `next`.
    pub fn new(label: impl Into<String>, next: SituationId) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            next,
            once: false,
            ends_conversation: false,
        }
    }

    /// Set the hint text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Hide the option after it is chosen.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// End the conversation after this option.
    pub fn ending(mut self) -> Self {
        self.ends_conversation = true;
        self
    }
}

/// Tracks what the player has seen and chosen in one conversation.
///
/// Kept by the world per conversation root and never cleared between visits
/// unless the root is authored with [`Situation::resetting`].
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    seen: HashSet<SituationId>,
    chosen: HashSet<(SituationId, usize)>,
}

impl ConversationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a situation as reached.
    pub fn mark_seen(&mut self, situation: SituationId) {
        self.seen.insert(situation);
    }

    /// Whether a situation has been reached.
    pub fn has_seen(&self, situation: SituationId) -> bool {
        self.seen.contains(&situation)
    }

    /// Mark an option as chosen.
    pub fn mark_chosen(&mut self, situation: SituationId, option: usize) {
        self.chosen.insert((situation, option));
    }

    /// Whether an option has been chosen.
    pub fn has_chosen(&self, situation: SituationId, option: usize) -> bool {
        self.chosen.contains(&(situation, option))
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.chosen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn situation_builder() {
        let leaf = Situation::new("rumor", "Strange lights in the hills.");
        let root = Situation::new("greeting", "Welcome!")
            .with_option(
                SituationOption::new("Any rumors?", leaf.id())
                    .with_description("Lean in.")
                    .once(),
            )
            .with_option(SituationOption::new("Goodbye.", leaf.id()).ending())
            .resetting();

        assert_eq!(root.options().len(), 2);
        assert!(root.resets_on_entry());
        assert!(!root.is_leaf());
        assert!(leaf.is_leaf());
        assert!(root.option(0).is_some_and(|o| o.once && !o.ends_conversation));
        assert!(root.option(1).is_some_and(|o| o.ends_conversation));
        assert!(root.option(2).is_none());
    }

    #[test]
    fn once_options_hide_after_choice() {
        let leaf = Situation::new("leaf", "...");
        let root = Situation::new("root", "Hm?")
            .with_option(SituationOption::new("Once", leaf.id()).once())
            .with_option(SituationOption::new("Always", leaf.id()));

        let mut state = ConversationState::new();
        assert_eq!(root.visible_options(Some(&state)).count(), 2);

        state.mark_chosen(root.id(), 1);
        assert_eq!(root.visible_options(Some(&state)).count(), 2);

        state.mark_chosen(root.id(), 0);
        let visible: Vec<_> = root.visible_options(Some(&state)).map(|(i, _)| i).collect();
        assert_eq!(visible, vec![1]);

        assert_eq!(root.visible_options(None).count(), 2);
    }

    #[test]
    fn track_and_reset_state() {
        let id = SituationId::new();
        let mut state = ConversationState::new();
        assert!(!state.has_seen(id));

        state.mark_seen(id);
        state.mark_chosen(id, 0);
        assert!(state.has_seen(id));
        assert!(state.has_chosen(id, 0));
        assert!(!state.has_chosen(id, 1));

        state.reset();
        assert!(!state.has_seen(id));
        assert!(!state.has_chosen(id, 0));
    }
}
