//! Prose descriptions of rooms and items.

use th_core::{Describable, ItemId, Named, RoomId, World, WorldResult};

use crate::messages::{Messages, format};

/// Describe a room: its description followed by exits, people and items.
/// Empty listings are left out.
pub fn describe_room(world: &World, room: RoomId, messages: &Messages) -> WorldResult<String> {
    let room = world.room(room)?;
    let mut lines = Vec::new();
    if !room.description().is_empty() {
        lines.push(room.description().to_string());
    }

    let mut exits = Vec::new();
    for &id in room.exits() {
        let door = world.door(id)?;
        let far = if door.room1() == room.id() {
            door.room2()
        } else {
            door.room1()
        };
        let far = world.room(far)?;
        let mut exit = format!("{} to {}", door.name(), far.name());
        if door.is_locked() {
            exit.push_str(" (locked)");
        }
        exits.push(exit);
    }
    push_listing(&mut lines, &messages.exits_heading, &exits);

    let mut people = Vec::new();
    for &id in room.npcs() {
        people.push(world.character(id)?.name().to_string());
    }
    push_listing(&mut lines, &messages.people_heading, &people);

    let mut items = Vec::new();
    for &id in room.items() {
        items.push(world.item(id)?.name().to_string());
    }
    push_listing(&mut lines, &messages.items_heading, &items);

    Ok(lines.join("\n"))
}

/// Describe a carried item.
pub fn describe_item(world: &World, item: ItemId) -> WorldResult<String> {
    let item = world.item(item)?;
    if item.description().is_empty() {
        Ok(format!("{}.", item.name()))
    } else {
        Ok(format!("{}: {}", item.name(), item.description()))
    }
}

/// The line an NPC says.
pub fn speech(messages: &Messages, speaker: &str, line: &str) -> String {
    format(&messages.says, &[speaker, line])
}

fn push_listing(lines: &mut Vec<String>, heading: &str, entries: &[String]) {
    if !entries.is_empty() {
        lines.push(format!("{heading} {}", entries.join(", ")));
    }
}
