use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", &self.0.to_string()[..8])
            }
        }
    };
}

define_id!(
    /// Unique identifier of a room.
    RoomId
);
define_id!(
    /// Unique identifier of a door.
    DoorId
);
define_id!(
    /// Unique identifier of an item.
    ItemId
);
define_id!(
    /// Unique identifier of a character, player or NPC.
    CharacterId
);
define_id!(
    /// Unique identifier of a dialogue situation.
    SituationId
);

/// Anything with a display name.
pub trait Named {
    /// The entity's name. Never blank once the entity is part of a world.
    fn name(&self) -> &str;
}

/// Anything with a free-text description.
pub trait Describable {
    /// The entity's description, possibly empty.
    fn description(&self) -> &str;
}

/// Anything that can be offered to the player as one entry of a list.
pub trait Selectable {
    /// Text shown for the entry.
    fn label(&self) -> &str;
    /// Secondary text shown next to the label, possibly empty.
    fn detail(&self) -> &str;
}

/// Implements [`Selectable`] for an entity by listing it under its name and
/// description.
macro_rules! selectable_by_name {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::entity::Selectable for $ty {
                fn label(&self) -> &str {
                    $crate::entity::Named::name(self)
                }

                fn detail(&self) -> &str {
                    $crate::entity::Describable::description(self)
                }
            }
        )+
    };
}

pub(crate) use selectable_by_name;

/// Returns true if `name` has at least one non-whitespace character.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(RoomId::new(), RoomId::new());
        assert_ne!(ItemId::default(), ItemId::default());
    }

    #[test]
    fn id_display_is_short() {
        let id = DoorId::new();
        assert_eq!(id.to_string().len(), 8);
    }

    #[test]
    fn blank_names_are_invalid() {
        assert!(is_valid_name("Hall"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
    }
}
