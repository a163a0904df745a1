//! User-facing strings.
//!
//! Every line the engine prints comes from a [`Messages`] catalog so a front
//! end can swap in a translation. Templates use `{}` placeholders filled in
//! order by [`format`].

/// The string catalog. [`Messages::default`] is English.
#[derive(Debug, Clone)]
pub struct Messages {
    /// Label of the action that describes the current room.
    pub look_around: String,
    /// Description of the look-around action.
    pub look_around_description: String,
    /// Label of the action that opens the inventory.
    pub open_inventory: String,
    /// Label of the implicit action that returns to the previous context.
    pub back: String,
    /// Label of the action that ends the session.
    pub exit_game: String,
    /// Label template for walking through a door: door name.
    pub open_door: String,
    /// Label template for starting a conversation: NPC name.
    pub talk_to: String,
    /// Label template for picking an item up: item name.
    pub take: String,
    /// Label template for putting an item down: item name.
    pub drop: String,
    /// Label template for looking at a carried item: item name.
    pub examine: String,
    /// Label template for locking: door name, key name.
    pub lock_with: String,
    /// Label template for unlocking: door name, key name.
    pub unlock_with: String,
    /// Shown before every selection.
    pub choose_prompt: String,
    /// Blank input.
    pub empty_input: String,
    /// Template for a number outside the list: the number.
    pub out_of_range: String,
    /// Template for an unrecognized label: the input.
    pub unknown_label: String,
    /// Template for a suggestion: the closest label.
    pub did_you_mean: String,
    /// Template for arriving in a room: room name.
    pub arrive: String,
    /// Template for returning to a room: room name.
    pub return_to: String,
    /// Header of the exits listing.
    pub exits_heading: String,
    /// Header of the people listing.
    pub people_heading: String,
    /// Header of the items listing.
    pub items_heading: String,
    /// Template for a locked door: door name.
    pub door_locked: String,
    /// Template for unlocking on the way through: door name, key name.
    pub unlocked_with: String,
    /// Template for locking: door name, key name.
    pub locked_with: String,
    /// Template for a key that does not fit: key name, door name.
    pub wrong_key: String,
    /// Template for taking an item: item name.
    pub took: String,
    /// Template for dropping an item: item name.
    pub dropped: String,
    /// Header of the inventory listing.
    pub inventory_heading: String,
    /// Shown when the inventory is empty.
    pub inventory_empty: String,
    /// Template for an NPC speaking: speaker, line.
    pub says: String,
    /// Template for a conversation starting: NPC name.
    pub conversation_start: String,
    /// Asked before leaving when exit confirmation is on.
    pub exit_confirm: String,
    /// Yes/no hint without a default.
    pub boolean_options: String,
    /// Yes/no hint defaulting to no.
    pub boolean_options_no_default: String,
    /// Yes/no hint defaulting to yes.
    pub boolean_options_yes_default: String,
    /// Shown when a yes/no answer is not understood.
    pub boolean_invalid: String,
    /// Shown when the session ends.
    pub goodbye: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            look_around: "Look around".into(),
            look_around_description: "Take in your surroundings".into(),
            open_inventory: "Open inventory".into(),
            back: "Back".into(),
            exit_game: "Exit game".into(),
            open_door: "Open {}".into(),
            talk_to: "Talk to {}".into(),
            take: "Take {}".into(),
            drop: "Drop {}".into(),
            examine: "Examine {}".into(),
            lock_with: "Lock {} with {}".into(),
            unlock_with: "Unlock {} with {}".into(),
            choose_prompt: "What do you do?".into(),
            empty_input: "Please choose an option.".into(),
            out_of_range: "There is no option {}.".into(),
            unknown_label: "\"{}\" is not an option.".into(),
            did_you_mean: "Did you mean \"{}\"?".into(),
            arrive: "You enter {}.".into(),
            return_to: "You return to {}.".into(),
            exits_heading: "Exits:".into(),
            people_heading: "People here:".into(),
            items_heading: "You see:".into(),
            door_locked: "The {} is locked.".into(),
            unlocked_with: "You unlock the {} with the {}.".into(),
            locked_with: "You lock the {} with the {}.".into(),
            wrong_key: "The {} does not fit the {}.".into(),
            took: "You take the {}.".into(),
            dropped: "You drop the {}.".into(),
            inventory_heading: "You are carrying:".into(),
            inventory_empty: "You are carrying nothing.".into(),
            says: "{}: \"{}\"".into(),
            conversation_start: "You approach {}.".into(),
            exit_confirm: "Really leave the game?".into(),
            boolean_options: "[y/n]".into(),
            boolean_options_no_default: "[y/N]".into(),
            boolean_options_yes_default: "[Y/n]".into(),
            boolean_invalid: "Please answer yes or no.".into(),
            goodbye: "Goodbye!".into(),
        }
    }
}

/// Fill the `{}` placeholders of `template` with `args`, in order.
///
/// Extra placeholders are left as-is; extra arguments are ignored.
pub fn format(template: &str, args: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        output.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => output.push_str(arg),
            None => output.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    output.push_str(rest);
    output
}
