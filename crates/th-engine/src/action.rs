//! Actions and the ordered lists they are offered in.

use std::fmt;
use std::rc::Rc;

use strsim::jaro_winkler;
use th_core::{CharacterId, Selectable, World, WorldResult};

use crate::transition::Transition;

/// Minimum similarity for suggesting a label after a typo (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.8;

type Resolver = dyn Fn(&World, CharacterId) -> WorldResult<Transition>;

/// A labelled choice offered to the player.
///
/// The resolver maps the acting character to a [`Transition`] and must not
/// change the world; the engine applies whatever the transition asks for.
/// Cloning an action yields the same instance.
#[derive(Clone)]
pub struct Action {
    label: String,
    description: String,
    resolver: Rc<Resolver>,
}

impl Action {
    /// Create an action.
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        resolver: impl Fn(&World, CharacterId) -> WorldResult<Transition> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            resolver: Rc::new(resolver),
        }
    }

    /// Create an action that always resolves to the same transition.
    pub fn to(
        label: impl Into<String>,
        description: impl Into<String>,
        transition: Transition,
    ) -> Self {
        Self::new(label, description, move |_, _| Ok(transition))
    }

    /// The label shown to the player.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The description shown next to the label.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Work out where this action leads for `actor`.
    pub fn resolve(&self, world: &World, actor: CharacterId) -> WorldResult<Transition> {
        (self.resolver)(world, actor)
    }

    fn same_instance(&self, other: &Action) -> bool {
        Rc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Selectable for Action {
    fn label(&self) -> &str {
        &self.label
    }

    fn detail(&self) -> &str {
        &self.description
    }
}

/// Why a line of input did not pick an action.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// Nothing was typed.
    #[error("no selection")]
    Empty,

    /// A number outside `1..=len`.
    #[error("no option {number} (there are {len})")]
    OutOfRange {
        /// The number typed.
        number: usize,
        /// Number of options offered.
        len: usize,
    },

    /// Text that matches no label exactly.
    #[error("unknown option \"{input}\"")]
    UnknownLabel {
        /// The text typed.
        input: String,
        /// The closest label, if one is close enough.
        suggestion: Option<String>,
    },
}

/// The actions offered in one context, in display order.
#[derive(Debug, Clone, Default)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action. Returns `false`, leaving the list unchanged, if this
    /// very action is already listed.
    pub fn add(&mut self, action: Action) -> bool {
        if self.actions.iter().any(|a| a.same_instance(&action)) {
            return false;
        }
        self.actions.push(action);
        true
    }

    /// The action at zero-based `index`.
    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// The actions as a slice, for rendering.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// The first action whose label is exactly `label`.
    pub fn find(&self, label: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.label == label)
    }

    /// Interpret one line of input: a 1-based number or an exact label.
    pub fn select(&self, input: &str) -> Result<&Action, SelectionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectionError::Empty);
        }

        if let Ok(number) = input.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| self.actions.get(index))
                .ok_or(SelectionError::OutOfRange {
                    number,
                    len: self.actions.len(),
                });
        }

        self.find(input)
            .ok_or_else(|| SelectionError::UnknownLabel {
                input: input.to_string(),
                suggestion: self.suggest(input),
            })
    }

    /// The label most similar to `input`, if any is similar enough.
    fn suggest(&self, input: &str) -> Option<String> {
        let input = input.to_lowercase();
        self.actions
            .iter()
            .map(|a| (a, jaro_winkler(&input, &a.label.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(a, _)| a.label.clone())
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
