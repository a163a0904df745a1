//! JSON world descriptions.
//!
//! A [`Blueprint`] names everything by string and is compiled into a
//! [`World`] in one pass. It only describes how a world starts out; nothing
//! that happens during play is ever written back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::entity::{CharacterId, DoorId, RoomId, SituationId};
use crate::error::{WorldError, WorldResult};
use crate::item::Item;
use crate::room::Room;
use crate::situation::{Situation, SituationOption};
use crate::world::World;

/// A complete world description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    /// World name.
    pub name: String,
    /// Rooms. Names must be unique.
    pub rooms: Vec<RoomBlueprint>,
    /// Doors between rooms.
    #[serde(default)]
    pub doors: Vec<DoorBlueprint>,
    /// Items lying in rooms.
    #[serde(default)]
    pub items: Vec<ItemBlueprint>,
    /// The player character.
    pub player: PlayerBlueprint,
    /// Non-player characters.
    #[serde(default)]
    pub npcs: Vec<NpcBlueprint>,
}

/// A room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomBlueprint {
    /// Room name.
    pub name: String,
    /// Room description.
    #[serde(default)]
    pub description: String,
}

/// A door and, optionally, the key cut for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorBlueprint {
    /// The two rooms the door connects.
    pub between: [String; 2],
    /// Authored door name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the door starts locked.
    #[serde(default)]
    pub locked: bool,
    /// Key for this door.
    #[serde(default)]
    pub key: Option<KeyBlueprint>,
}

/// A key and where it starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBlueprint {
    /// Key name.
    pub name: String,
    /// Key description.
    #[serde(default)]
    pub description: String,
    /// Where the key starts.
    pub placement: Placement,
}

/// Where an item starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// On the floor of the named room.
    Room(String),
    /// In the player's inventory.
    Player,
}

/// An item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemBlueprint {
    /// Item name.
    pub name: String,
    /// Item description.
    #[serde(default)]
    pub description: String,
    /// Room the item lies in. Ignored for inventory items.
    #[serde(default)]
    pub room: Option<String>,
}

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBlueprint {
    /// Player name.
    pub name: String,
    /// Player description.
    #[serde(default)]
    pub description: String,
    /// Starting room.
    pub location: String,
    /// Starting inventory.
    #[serde(default)]
    pub inventory: Vec<ItemBlueprint>,
}

/// A non-player character and its dialogue tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcBlueprint {
    /// NPC name.
    pub name: String,
    /// NPC description.
    #[serde(default)]
    pub description: String,
    /// Room the NPC stands in.
    pub location: String,
    /// Dialogue tree. Defaults to a root with nothing to say.
    #[serde(default)]
    pub conversation: Option<SituationBlueprint>,
}

/// A dialogue situation with its sub-tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationBlueprint {
    /// Situation name.
    pub name: String,
    /// What the NPC says here.
    pub line: String,
    /// Clear the conversation's progress each time it is entered here.
    #[serde(default)]
    pub reset_on_entry: bool,
    /// Options leading further down the tree.
    #[serde(default)]
    pub options: Vec<OptionBlueprint>,
}

/// An option and the situation it leads to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionBlueprint {
    /// Text the player picks.
    pub label: String,
    /// Hint shown next to the label.
    #[serde(default)]
    pub description: String,
    /// Hide after being chosen.
    #[serde(default)]
    pub once: bool,
    /// Leave the conversation after the next line.
    #[serde(default)]
    pub ends_conversation: bool,
    /// Where the option leads.
    pub then: SituationBlueprint,
}

impl Blueprint {
    /// Parse a blueprint from JSON.
    pub fn from_json(source: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Compile into a world. Returns the world and the player's ID.
    pub fn build(&self) -> WorldResult<(World, CharacterId)> {
        let mut world = World::new(self.name.clone());
        let mut rooms: HashMap<&str, RoomId> = HashMap::new();

        for room in &self.rooms {
            if rooms.contains_key(room.name.as_str()) {
                return Err(WorldError::DuplicateName {
                    kind: "room",
                    name: room.name.clone(),
                });
            }
            let id = world.add_room(Room::new(&room.name, &room.description))?;
            rooms.insert(room.name.as_str(), id);
        }

        let room_id = |name: &str| -> WorldResult<RoomId> {
            rooms
                .get(name)
                .copied()
                .ok_or_else(|| WorldError::UnknownReference {
                    kind: "room",
                    name: name.to_string(),
                })
        };

        let player = world.add_character(Character::player(
            &self.player.name,
            &self.player.description,
            room_id(&self.player.location)?,
        ))?;
        for item in &self.player.inventory {
            world.give_item(player, Item::new(&item.name, &item.description))?;
        }

        for door in &self.doors {
            let id = world.connect(
                door.locked,
                room_id(&door.between[0])?,
                room_id(&door.between[1])?,
                door.name.as_deref(),
            )?;
            if let Some(key) = &door.key {
                place_key(&mut world, id, key, player, &room_id)?;
            }
        }

        for item in &self.items {
            let room = item.room.as_deref().ok_or_else(|| WorldError::UnknownReference {
                kind: "room for item",
                name: item.name.clone(),
            })?;
            world.add_item_to_room(room_id(room)?, Item::new(&item.name, &item.description))?;
        }

        for npc in &self.npcs {
            let root = match &npc.conversation {
                Some(tree) => add_tree(&mut world, tree)?,
                None => world.add_situation(Situation::new(
                    format!("{} (silent)", npc.name),
                    "...",
                ))?,
            };
            world.add_character(Character::npc(
                &npc.name,
                &npc.description,
                room_id(&npc.location)?,
                root,
            ))?;
        }

        Ok((world, player))
    }
}

fn place_key(
    world: &mut World,
    door: DoorId,
    key: &KeyBlueprint,
    player: CharacterId,
    room_id: &impl Fn(&str) -> WorldResult<RoomId>,
) -> WorldResult<()> {
    let item = world.door(door)?.make_key(&key.name, &key.description);
    match &key.placement {
        Placement::Room(room) => world.add_item_to_room(room_id(room)?, item)?,
        Placement::Player => world.give_item(player, item)?,
    };
    Ok(())
}

/// Add a dialogue tree bottom-up, returning the root's ID.
fn add_tree(world: &mut World, node: &SituationBlueprint) -> WorldResult<SituationId> {
    let mut situation = Situation::new(&node.name, &node.line);
    for option in &node.options {
        let next = add_tree(world, &option.then)?;
        let mut authored =
            SituationOption::new(&option.label, next).with_description(&option.description);
        if option.once {
            authored = authored.once();
        }
        if option.ends_conversation {
            authored = authored.ending();
        }
        situation = situation.with_option(authored);
    }
    if node.reset_on_entry {
        situation = situation.resetting();
    }
    world.add_situation(situation)
}
