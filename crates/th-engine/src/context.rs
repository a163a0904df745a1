//! Interaction contexts and the actions each one offers.

use th_core::{
    CharacterId, Describable, DoorId, Named, RoomId, SituationId, World, WorldResult,
};

use crate::action::{Action, ActionList};
use crate::dialogue;
use crate::messages::{Messages, format};
use crate::transition::{Effect, Transition};

/// Whatever is currently driving the player's choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Standing in a room.
    Room(RoomId),
    /// Walking through a door. Passes straight through to the far room.
    Door(DoorId),
    /// Approaching an NPC. Passes straight through to its conversation.
    Npc(CharacterId),
    /// A node of a conversation.
    Situation(SituationId),
    /// Looking through a character's inventory.
    Inventory(CharacterId),
}

/// Where in the frame stack a context is being offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// Depth of the frame, 0 for the starting room.
    pub depth: usize,
    /// Root of the conversation in progress, if any.
    pub conversation: Option<SituationId>,
}

impl Scope {
    /// Whether this is the outermost frame.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

impl Context {
    /// Whether entering this context pushes an interaction frame. Doors and
    /// NPCs only forward to another context.
    pub fn is_frame(self) -> bool {
        !matches!(self, Self::Door(_) | Self::Npc(_))
    }

    /// The actions `actor` can take here, in display order.
    pub fn actions(
        self,
        world: &World,
        actor: CharacterId,
        messages: &Messages,
        scope: Scope,
    ) -> WorldResult<ActionList> {
        let mut actions = match self {
            Self::Room(room) => room_actions(world, actor, room, messages)?,
            Self::Inventory(owner) => inventory_actions(world, owner, messages)?,
            Self::Situation(situation) => {
                let state = scope.conversation.and_then(|root| world.conversation(root));
                dialogue::situation_actions(world, situation, state)?
            }
            Self::Door(_) | Self::Npc(_) => ActionList::new(),
        };

        if !scope.is_root() {
            actions.add(Action::to(&messages.back, "", Transition::Back));
        }
        if scope.is_root() || matches!(self, Self::Room(_)) {
            actions.add(Action::to(&messages.exit_game, "", Transition::Exit));
        }
        Ok(actions)
    }
}

fn room_actions(
    world: &World,
    actor: CharacterId,
    room: RoomId,
    messages: &Messages,
) -> WorldResult<ActionList> {
    let room = world.room(room)?;
    let mut actions = ActionList::new();

    for &door_id in room.exits() {
        let door = world.door(door_id)?;
        actions.add(Action::to(
            format(&messages.open_door, &[door.name()]),
            door.description(),
            Transition::Enter(Context::Door(door_id)),
        ));
    }

    let keys = world.keys_carried(actor)?;
    for &door_id in room.exits() {
        let door = world.door(door_id)?;
        let (template, locked) = if door.is_locked() {
            (&messages.unlock_with, false)
        } else {
            (&messages.lock_with, true)
        };
        for &key in &keys {
            actions.add(Action::to(
                format(template, &[door.name(), world.item(key)?.name()]),
                "",
                Transition::Perform(Effect::SetLocked {
                    door: door_id,
                    key,
                    locked,
                }),
            ));
        }
    }

    for &npc in room.npcs() {
        let character = world.character(npc)?;
        actions.add(Action::to(
            format(&messages.talk_to, &[character.name()]),
            character.description(),
            Transition::Enter(Context::Npc(npc)),
        ));
    }

    for &item in room.items() {
        let name = world.item(item)?.name();
        actions.add(Action::to(
            format(&messages.take, &[name]),
            "",
            Transition::Perform(Effect::Take(item)),
        ));
    }

    actions.add(Action::new(
        &messages.look_around,
        &messages.look_around_description,
        |world, actor| {
            let here = world.character(actor)?.location();
            Ok(Transition::Perform(Effect::Describe(Context::Room(here))))
        },
    ));
    actions.add(Action::new(&messages.open_inventory, "", |_, actor| {
        Ok(Transition::Enter(Context::Inventory(actor)))
    }));

    Ok(actions)
}

fn inventory_actions(
    world: &World,
    owner: CharacterId,
    messages: &Messages,
) -> WorldResult<ActionList> {
    let mut actions = ActionList::new();
    for &item in world.character(owner)?.inventory() {
        let name = world.item(item)?.name();
        actions.add(Action::to(
            format(&messages.examine, &[name]),
            "",
            Transition::Perform(Effect::Examine(item)),
        ));
        actions.add(Action::to(
            format(&messages.drop, &[name]),
            "",
            Transition::Perform(Effect::Drop(item)),
        ));
    }
    Ok(actions)
}
