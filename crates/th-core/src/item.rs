use std::fmt;

use serde::Serialize;

use crate::entity::{Describable, ItemId, Named, selectable_by_name};

/// What an item is, beyond its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// An ordinary object.
    Plain,
    /// A key cut for exactly one door.
    Key {
        /// Fingerprint derived from the door's lock token.
        fingerprint: u64,
    },
}

/// A portable object. Lives in exactly one room or inventory at a time.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    kind: ItemKind,
}

impl Item {
    /// Create a plain item.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description: description.into(),
            kind: ItemKind::Plain,
        }
    }

    /// Create a key. Only doors hand these out, see [`crate::Door::make_key`].
    pub(crate) fn key(
        name: impl Into<String>,
        description: impl Into<String>,
        fingerprint: u64,
    ) -> Self {
        Self {
            kind: ItemKind::Key { fingerprint },
            ..Self::new(name, description)
        }
    }

    /// The item's identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The item's kind.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Whether this item is a key.
    pub fn is_key(&self) -> bool {
        matches!(self.kind, ItemKind::Key { .. })
    }

    /// The key fingerprint, if this item is a key.
    pub fn fingerprint(&self) -> Option<u64> {
        match self.kind {
            ItemKind::Key { fingerprint } => Some(fingerprint),
            ItemKind::Plain => None,
        }
    }
}

impl Named for Item {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Describable for Item {
    fn description(&self) -> &str {
        &self.description
    }
}

selectable_by_name!(Item);

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
