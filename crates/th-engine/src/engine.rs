//! The recursive interaction loop.
//!
//! Every frame-pushing [`Context`] runs its own loop: offer actions, read a
//! choice, resolve it, and either apply an effect or descend into the next
//! context. A nested call returns an [`ExitSignal`] that tells each frame on
//! the way up whether to resume or keep unwinding.

use std::io::{BufRead, Write};

use th_core::{CharacterId, DoorId, Item, Named, RoomId, SituationId, World, WorldError};
use tracing::{debug, info, warn};

use crate::action::{Action, ActionList, SelectionError};
use crate::config::EngineConfig;
use crate::console::{Console, Printer};
use crate::context::{Context, Scope};
use crate::error::{EngineError, EngineResult};
use crate::messages::format;
use crate::narration;
use crate::transition::{Effect, ExitSignal, Status, Transition};

/// A conversation in progress.
#[derive(Debug, Clone, Copy)]
struct Conversation {
    npc: CharacterId,
    root: SituationId,
    /// Depth of the room frame the conversation was started from.
    host: usize,
}

/// Drives a player through a [`World`] over a console.
#[derive(Debug)]
pub struct Engine<R, W> {
    world: World,
    console: Console<R, W>,
    config: EngineConfig,
    stack: Vec<Context>,
    conversations: Vec<Conversation>,
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Create an engine reading choices from `input` and writing to `output`.
    pub fn new(world: World, input: R, output: W, config: EngineConfig) -> Self {
        let printer = Printer::new(output)
            .with_color(config.color)
            .with_descriptions(config.show_descriptions);
        Self {
            world,
            console: Console::new(input, printer),
            config,
            stack: Vec::new(),
            conversations: Vec::new(),
        }
    }

    /// The world as it currently stands.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of active frames.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume the engine, returning the world and the output writer.
    pub fn into_parts(self) -> (World, W) {
        (self.world, self.console.into_output())
    }

    /// Play a whole session: place `actor` in `start` and interact until the
    /// player leaves or input runs out.
    pub fn run(&mut self, actor: CharacterId, start: RoomId) -> EngineResult<Status> {
        info!(actor = %actor, room = %start, world = %self.world.name, "session started");
        self.world.move_character(actor, start)?;

        let status = match self.interact(actor, Context::Room(start))? {
            ExitSignal::Terminate(status) => status,
            ExitSignal::UnwindTo { .. } => Status::Exited,
        };
        if status == Status::Exited {
            self.console
                .printer()
                .print_message(&self.config.messages.goodbye)?;
        }

        info!(?status, "session ended");
        Ok(status)
    }

    /// Enter `context` on behalf of `actor` and run it until it hands control
    /// back.
    ///
    /// Doors and NPCs forward to another context without a frame of their
    /// own. Entering a context that is already on the stack unwinds to it.
    pub fn interact(&mut self, actor: CharacterId, context: Context) -> EngineResult<ExitSignal> {
        match context {
            Context::Door(door) => return self.open_door(actor, door),
            Context::Npc(npc) => return self.talk_to(actor, npc),
            _ => {}
        }

        if let Some(depth) = self.stack.iter().position(|active| *active == context) {
            debug!(?context, depth, "context already active, unwinding to it");
            return Ok(ExitSignal::UnwindTo { depth });
        }
        if self.stack.len() >= self.config.max_depth {
            return Err(EngineError::DepthExceeded {
                max: self.config.max_depth,
            });
        }

        self.stack.push(context);
        let result = self.run_frame(actor, context);
        self.stack.pop();
        result
    }

    fn run_frame(&mut self, actor: CharacterId, context: Context) -> EngineResult<ExitSignal> {
        let depth = self.stack.len() - 1;
        debug!(?context, depth, "frame entered");
        self.announce(actor, context)?;

        loop {
            let actions = self.actions(actor, context, depth)?;
            self.console.printer().print_ordered(actions.as_slice())?;
            let Some(action) = self.prompt(&actions)? else {
                debug!("input closed");
                return Ok(ExitSignal::Terminate(Status::InputClosed));
            };

            let transition = action.resolve(&self.world, actor)?;
            debug!(label = action.label(), ?transition, "action resolved");

            let signal = match transition {
                Transition::Perform(effect) => {
                    self.apply(actor, effect)?;
                    continue;
                }
                Transition::Enter(next) => self.interact(actor, next)?,
                Transition::Choose { situation, option } => {
                    self.choose(actor, situation, option, depth)?
                }
                Transition::Back => {
                    return Ok(ExitSignal::UnwindTo {
                        depth: depth.saturating_sub(1),
                    });
                }
                Transition::Exit => match self.confirm_exit()? {
                    Some(true) => return Ok(ExitSignal::Terminate(Status::Exited)),
                    Some(false) => continue,
                    None => return Ok(ExitSignal::Terminate(Status::InputClosed)),
                },
            };

            if !signal.resumes(depth) {
                return Ok(signal);
            }
            self.resume(actor, context)?;
        }
    }

    fn actions(
        &self,
        actor: CharacterId,
        context: Context,
        depth: usize,
    ) -> EngineResult<ActionList> {
        let scope = Scope {
            depth,
            conversation: self.conversations.last().map(|c| c.root),
        };
        Ok(context.actions(&self.world, actor, &self.config.messages, scope)?)
    }

    /// Read choices until one matches an action. `None` at end of input.
    fn prompt<'a>(&mut self, actions: &'a ActionList) -> EngineResult<Option<&'a Action>> {
        loop {
            self.console
                .printer()
                .print_prompt(&self.config.messages.choose_prompt)?;
            let Some(line) = self.console.read_line()? else {
                return Ok(None);
            };
            match actions.select(&line) {
                Ok(action) => return Ok(Some(action)),
                Err(err) => {
                    debug!(%err, "selection rejected");
                    let message = self.rejection(&err);
                    self.console.printer().print_warning(&message)?;
                }
            }
        }
    }

    fn rejection(&self, err: &SelectionError) -> String {
        let messages = &self.config.messages;
        match err {
            SelectionError::Empty => messages.empty_input.clone(),
            SelectionError::OutOfRange { number, .. } => {
                format(&messages.out_of_range, &[&number.to_string()])
            }
            SelectionError::UnknownLabel { input, suggestion } => {
                let mut message = format(&messages.unknown_label, &[input]);
                if let Some(suggestion) = suggestion {
                    message.push(' ');
                    message.push_str(&format(&messages.did_you_mean, &[suggestion]));
                }
                message
            }
        }
    }

    fn confirm_exit(&mut self) -> EngineResult<Option<bool>> {
        if !self.config.confirm_exit {
            return Ok(Some(true));
        }
        let messages = &self.config.messages;
        Ok(self
            .console
            .ask_yes_no(messages, &messages.exit_confirm, Some(false))?)
    }

    /// Print whatever greets the player on entering a frame.
    fn announce(&mut self, actor: CharacterId, context: Context) -> EngineResult<()> {
        match context {
            Context::Room(room) => {
                if self.world.character(actor)?.location() != room {
                    self.world.move_character(actor, room)?;
                    let name = self.world.room(room)?.name().to_string();
                    self.console
                        .printer()
                        .print_message(&format(&self.config.messages.arrive, &[&name]))?;
                }
                self.describe_room(room)
            }
            Context::Situation(situation) => self.speak(situation),
            Context::Inventory(owner) => self.list_inventory(owner),
            Context::Door(_) | Context::Npc(_) => Ok(()),
        }
    }

    /// Pick a frame back up after a nested context returned to it.
    fn resume(&mut self, actor: CharacterId, context: Context) -> EngineResult<()> {
        let Context::Room(room) = context else {
            return Ok(());
        };
        if self.world.character(actor)?.location() != room {
            self.world.move_character(actor, room)?;
            let name = self.world.room(room)?.name().to_string();
            self.console
                .printer()
                .print_message(&format(&self.config.messages.return_to, &[&name]))?;
            self.describe_room(room)?;
        }
        Ok(())
    }

    fn describe_room(&mut self, room: RoomId) -> EngineResult<()> {
        let name = self.world.room(room)?.name().to_string();
        let text = narration::describe_room(&self.world, room, &self.config.messages)?;
        let printer = self.console.printer();
        printer.print_heading(&name)?;
        if !text.is_empty() {
            printer.print_message(&text)?;
        }
        Ok(())
    }

    fn list_inventory(&mut self, owner: CharacterId) -> EngineResult<()> {
        let items = self
            .world
            .character(owner)?
            .inventory()
            .iter()
            .map(|id| self.world.item(*id).cloned())
            .collect::<Result<Vec<Item>, WorldError>>()?;
        let messages = &self.config.messages;
        let printer = self.console.printer();
        if items.is_empty() {
            printer.print_message(&messages.inventory_empty)?;
        } else {
            printer.print_message(&messages.inventory_heading)?;
            printer.print_unordered(&items)?;
        }
        Ok(())
    }

    /// Have the NPC of the current conversation say `situation`'s line.
    fn speak(&mut self, situation: SituationId) -> EngineResult<()> {
        let conversation = *self
            .conversations
            .last()
            .ok_or(EngineError::NotInConversation)?;
        let speaker = self.world.character(conversation.npc)?.name().to_string();
        let line = self.world.situation(situation)?.line().to_string();
        self.world
            .conversation_mut(conversation.root)
            .mark_seen(situation);
        let text = narration::speech(&self.config.messages, &speaker, &line);
        self.console.printer().print_message(&text)?;
        Ok(())
    }

    fn open_door(&mut self, actor: CharacterId, door: DoorId) -> EngineResult<ExitSignal> {
        let caller = self.stack.len().saturating_sub(1);
        let here = self.world.character(actor)?.location();

        if self.world.door(door)?.is_locked() {
            let door_name = self.world.door(door)?.name().to_string();
            let Some(&key) = self.world.keys_fitting(actor, door)?.first() else {
                debug!(door = %door, "locked and no key fits");
                let message = format(&self.config.messages.door_locked, &[&door_name]);
                self.console.printer().print_warning(&message)?;
                return Ok(ExitSignal::UnwindTo { depth: caller });
            };
            self.world.set_door_locked(door, false, key)?;
            let key_name = self.world.item(key)?.name().to_string();
            debug!(door = %door, key = %key, "unlocked on the way through");
            let message = format(
                &self.config.messages.unlocked_with,
                &[&door_name, &key_name],
            );
            self.console.printer().print_message(&message)?;
        }

        let there = self.world.pass_through(door, here)?;
        self.interact(actor, Context::Room(there))
    }

    fn talk_to(&mut self, actor: CharacterId, npc: CharacterId) -> EngineResult<ExitSignal> {
        let character = self.world.character(npc)?;
        let root = character.conversation().ok_or(WorldError::NotAnNpc(npc))?;
        let name = character.name().to_string();

        if self.world.situation(root)?.resets_on_entry() {
            debug!(npc = %npc, "conversation reset");
            self.world.conversation_mut(root).reset();
        }
        let message = format(&self.config.messages.conversation_start, &[&name]);
        self.console.printer().print_message(&message)?;

        self.conversations.push(Conversation {
            npc,
            root,
            host: self.stack.len().saturating_sub(1),
        });
        let result = self.interact(actor, Context::Situation(root));
        self.conversations.pop();
        result
    }

    fn choose(
        &mut self,
        actor: CharacterId,
        situation: SituationId,
        option: usize,
        depth: usize,
    ) -> EngineResult<ExitSignal> {
        let conversation = *self
            .conversations
            .last()
            .ok_or(EngineError::NotInConversation)?;
        let chosen = self
            .world
            .situation(situation)?
            .option(option)
            .cloned()
            .ok_or(EngineError::OptionNotFound { situation, option })?;
        self.world
            .conversation_mut(conversation.root)
            .mark_chosen(situation, option);
        debug!(situation = %situation, option, next = %chosen.next, "option chosen");

        if chosen.ends_conversation {
            self.speak(chosen.next)?;
            return Ok(ExitSignal::UnwindTo {
                depth: conversation.host,
            });
        }
        if self.world.situation(chosen.next)?.is_leaf() {
            self.speak(chosen.next)?;
            return Ok(ExitSignal::UnwindTo { depth });
        }
        self.interact(actor, Context::Situation(chosen.next))
    }

    fn apply(&mut self, actor: CharacterId, effect: Effect) -> EngineResult<()> {
        debug!(?effect, "applying effect");
        let messages = &self.config.messages;
        match effect {
            Effect::Describe(Context::Room(room)) => self.describe_room(room)?,
            Effect::Describe(Context::Inventory(owner)) => self.list_inventory(owner)?,
            Effect::Describe(Context::Situation(situation)) => self.speak(situation)?,
            Effect::Describe(Context::Door(door)) => {
                let door = self.world.door(door)?;
                self.console.printer().print(door)?;
            }
            Effect::Describe(Context::Npc(npc)) => {
                let npc = self.world.character(npc)?;
                let text = th_core::Describable::description(npc).to_string();
                self.console.printer().print_message(&text)?;
            }
            Effect::Examine(item) => {
                let text = narration::describe_item(&self.world, item)?;
                self.console.printer().print_message(&text)?;
            }
            Effect::Take(item) => {
                self.world.take_item(actor, item)?;
                let name = self.world.item(item)?.name();
                let message = format(&messages.took, &[name]);
                self.console.printer().print_message(&message)?;
            }
            Effect::Drop(item) => {
                self.world.drop_item(actor, item)?;
                let name = self.world.item(item)?.name();
                let message = format(&messages.dropped, &[name]);
                self.console.printer().print_message(&message)?;
            }
            Effect::SetLocked { door, key, locked } => {
                let changed = self.world.set_door_locked(door, locked, key)?;
                let door_name = self.world.door(door)?.name();
                let key_name = self.world.item(key)?.name();
                if changed {
                    let template = if locked {
                        &messages.locked_with
                    } else {
                        &messages.unlocked_with
                    };
                    let message = format(template, &[door_name, key_name]);
                    self.console.printer().print_message(&message)?;
                } else {
                    warn!(door = %door, key = %key, "key does not fit");
                    let message = format(&messages.wrong_key, &[key_name, door_name]);
                    self.console.printer().print_warning(&message)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use th_core::{Character, Room, Situation, SituationOption};

    use super::*;

    struct Session {
        status: Status,
        world: World,
        output: String,
    }

    fn play(world: World, player: CharacterId, start: RoomId, script: &str) -> Session {
        play_with(world, player, start, script, EngineConfig::default())
    }

    fn play_with(
        world: World,
        player: CharacterId,
        start: RoomId,
        script: &str,
        config: EngineConfig,
    ) -> Session {
        let mut engine = Engine::new(world, script.as_bytes(), Vec::new(), config);
        let status = engine.run(player, start).unwrap();
        let (world, output) = engine.into_parts();
        Session {
            status,
            world,
            output: String::from_utf8(output).unwrap(),
        }
    }

    fn location(world: &World, player: CharacterId) -> RoomId {
        world.character(player).unwrap().location()
    }

    struct TwoRooms {
        world: World,
        a: RoomId,
        b: RoomId,
        door: DoorId,
        player: CharacterId,
    }

    fn two_rooms(locked: bool) -> TwoRooms {
        let mut world = World::new("test");
        let a = world.add_room(Room::new("Room A", "The first room.")).unwrap();
        let b = world.add_room(Room::new("Room B", "The second room.")).unwrap();
        let door = world.connect(locked, a, b, Some("door")).unwrap();
        let player = world
            .add_character(Character::player("Player", "", a))
            .unwrap();
        TwoRooms {
            world,
            a,
            b,
            door,
            player,
        }
    }

    #[test]
    fn open_door_then_back() {
        let t = two_rooms(false);
        let s = play(t.world, t.player, t.a, "Open door\nBack\nExit game\n");
        assert_eq!(s.status, Status::Exited);
        assert_eq!(location(&s.world, t.player), t.a);
        assert!(s.output.contains("You enter Room B."));
        assert!(s.output.contains("You return to Room A."));
        assert!(s.output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn door_can_be_chosen_by_number() {
        let t = two_rooms(false);
        let s = play(t.world, t.player, t.a, "1\n");
        assert_eq!(s.status, Status::InputClosed);
        assert_eq!(location(&s.world, t.player), t.b);
    }

    #[test]
    fn locked_door_needs_its_key() {
        let mut t = two_rooms(true);
        let key = t.world.door(t.door).unwrap().make_key("brass key", "");
        t.world.add_item_to_room(t.a, key).unwrap();

        let s = play(
            t.world,
            t.player,
            t.a,
            "Open door\nTake brass key\nOpen door\n",
        );
        assert!(s.output.contains("The door is locked."));
        assert!(s.output.contains("You take the brass key."));
        assert!(s.output.contains("You unlock the door with the brass key."));
        assert_eq!(location(&s.world, t.player), t.b);
        assert!(!s.world.door(t.door).unwrap().is_locked());
    }

    #[test]
    fn failed_door_keeps_the_room() {
        let t = two_rooms(true);
        let s = play(t.world, t.player, t.a, "Open door\n");
        assert_eq!(location(&s.world, t.player), t.a);
        assert_eq!(s.status, Status::InputClosed);
        // The room's actions are offered again after the warning.
        assert_eq!(s.output.matches("1. Open door").count(), 2);
    }

    #[test]
    fn wrong_key_is_reported() {
        let mut t = two_rooms(true);
        let c = t.world.add_room(Room::new("Room C", "")).unwrap();
        let other = t.world.connect(false, t.b, c, None).unwrap();
        let key = t.world.door(other).unwrap().make_key("bent key", "");
        t.world.give_item(t.player, key).unwrap();

        let s = play(t.world, t.player, t.a, "Unlock door with bent key\n");
        assert!(s.output.contains("The bent key does not fit the door."));
        assert!(s.world.door(t.door).unwrap().is_locked());
    }

    #[test]
    fn key_locks_and_unlocks() {
        let mut t = two_rooms(false);
        let key = t.world.door(t.door).unwrap().make_key("brass key", "");
        t.world.give_item(t.player, key).unwrap();

        let s = play(
            t.world,
            t.player,
            t.a,
            "Lock door with brass key\nUnlock door with brass key\nLock door with brass key\n",
        );
        assert!(s.output.contains("You lock the door with the brass key."));
        assert!(s.output.contains("You unlock the door with the brass key."));
        assert!(s.world.door(t.door).unwrap().is_locked());
    }

    #[test]
    fn revisiting_a_room_unwinds_instead_of_nesting() {
        let t = two_rooms(false);
        let mut world = t.world;
        let c = world.add_room(Room::new("Room C", "")).unwrap();
        world.connect(false, t.b, c, Some("hatch")).unwrap();
        let config = EngineConfig::default().with_max_depth(3);

        let script = "Open door\nOpen door\nOpen door\nOpen hatch\nOpen hatch\nOpen door\n";
        let s = play_with(world, t.player, t.a, script, config);
        assert_eq!(location(&s.world, t.player), t.a);
        assert_eq!(s.status, Status::InputClosed);
    }

    #[test]
    fn nesting_too_deep_is_fatal() {
        let t = two_rooms(false);
        let config = EngineConfig::default().with_max_depth(1);
        let mut engine = Engine::new(t.world, "Open door\n".as_bytes(), Vec::new(), config);
        let err = engine.run(t.player, t.a).unwrap_err();
        assert!(matches!(err, EngineError::DepthExceeded { max: 1 }));
    }

    #[test]
    fn take_and_drop_through_the_inventory() {
        let mut t = two_rooms(false);
        t.world
            .add_item_to_room(t.a, th_core::Item::new("lamp", "Brass, dented."))
            .unwrap();

        let s = play(
            t.world,
            t.player,
            t.a,
            "Take lamp\nOpen inventory\nExamine lamp\nDrop lamp\nBack\n",
        );
        assert!(s.output.contains("You are carrying:\n- lamp: Brass, dented.\n"));
        assert!(s.output.contains("> lamp: Brass, dented.\n"));
        assert!(s.output.contains("> You drop the lamp.\n"));
        assert!(s.world.character(t.player).unwrap().inventory().is_empty());
        assert_eq!(s.world.room(t.a).unwrap().items().len(), 1);
    }

    #[test]
    fn empty_inventory_says_so() {
        let t = two_rooms(false);
        let s = play(t.world, t.player, t.a, "Open inventory\n");
        assert!(s.output.contains("You are carrying nothing."));
    }

    #[test]
    fn bad_input_is_reprompted() {
        let t = two_rooms(false);
        let s = play(t.world, t.player, t.a, "\n42\nExit gmae\nExit game\n");
        assert_eq!(s.status, Status::Exited);
        assert!(s.output.contains("Please choose an option."));
        assert!(s.output.contains("There is no option 42."));
        assert!(s.output.contains("\"Exit gmae\" is not an option. Did you mean \"Exit game\"?"));
    }

    #[test]
    fn exit_can_be_confirmed_or_refused() {
        let t = two_rooms(false);
        let config = EngineConfig::default().with_confirm_exit(true);
        let s = play_with(t.world, t.player, t.a, "Exit game\nn\nExit game\ny\n", config);
        assert_eq!(s.status, Status::Exited);
        assert_eq!(s.output.matches("Really leave the game? [y/N]").count(), 2);
    }

    #[test]
    fn end_of_input_closes_the_session() {
        let t = two_rooms(false);
        let s = play(t.world, t.player, t.a, "");
        assert_eq!(s.status, Status::InputClosed);
        assert_eq!(s.status.code(), 0);
        assert!(!s.output.contains("Goodbye!"));
    }

    struct Tavern {
        world: World,
        hall: RoomId,
        player: CharacterId,
        root: SituationId,
    }

    /// An innkeeper with root -> rumours -> (dragon leaf), a once-only
    /// drink, and a goodbye that ends the conversation.
    fn tavern() -> Tavern {
        let mut world = World::new("tavern");
        let hall = world.add_room(Room::new("Hall", "Smoky.")).unwrap();
        let player = world
            .add_character(Character::player("Player", "", hall))
            .unwrap();

        let dragon = world
            .add_situation(Situation::new("dragon", "A dragon, up north."))
            .unwrap();
        let rumours = world
            .add_situation(
                Situation::new("rumours", "Rumours? Plenty.")
                    .with_option(SituationOption::new("Tell me about the north", dragon)),
            )
            .unwrap();
        let drink = world
            .add_situation(Situation::new("drink", "Here you go."))
            .unwrap();
        let bye = world
            .add_situation(Situation::new("bye", "Safe travels."))
            .unwrap();
        let root = world
            .add_situation(
                Situation::new("greeting", "Welcome, stranger.")
                    .with_option(SituationOption::new("Heard any rumours?", rumours))
                    .with_option(SituationOption::new("A drink, please", drink).once())
                    .with_option(SituationOption::new("Farewell", bye).ending()),
            )
            .unwrap();
        world
            .add_character(Character::npc("Innkeeper", "Wiping a mug.", hall, root))
            .unwrap();
        Tavern {
            world,
            hall,
            player,
            root,
        }
    }

    #[test]
    fn two_level_dialogue_and_back_twice() {
        let t = tavern();
        let script = "Talk to Innkeeper\nHeard any rumours?\nTell me about the north\nBack\nBack\n";
        let mut engine = Engine::new(t.world, script.as_bytes(), Vec::new(), EngineConfig::default());
        let status = engine.run(t.player, t.hall).unwrap();
        assert_eq!(status, Status::InputClosed);
        assert_eq!(engine.depth(), 0);

        let (world, output) = engine.into_parts();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("You approach Innkeeper."));
        assert!(output.contains("Innkeeper: \"Welcome, stranger.\""));
        assert!(output.contains("Innkeeper: \"Rumours? Plenty.\""));
        assert!(output.contains("Innkeeper: \"A dragon, up north.\""));
        assert_eq!(location(&world, t.player), t.hall);
        // Back twice lands in the hall, whose first action is talking.
        let tail = output.rsplit("A dragon, up north.").next().unwrap();
        assert_eq!(tail.matches("1. Talk to Innkeeper").count(), 1);
        assert!(world.conversation(t.root).unwrap().has_seen(t.root));
    }

    #[test]
    fn once_options_disappear() {
        let t = tavern();
        let s = play(
            t.world,
            t.player,
            t.hall,
            "Talk to Innkeeper\nA drink, please\nA drink, please\n",
        );
        assert_eq!(s.output.matches("Here you go.").count(), 1);
        assert!(s.output.contains("\"A drink, please\" is not an option."));
    }

    #[test]
    fn once_options_stay_gone_between_visits() {
        let t = tavern();
        let s = play(
            t.world,
            t.player,
            t.hall,
            "Talk to Innkeeper\nA drink, please\nBack\nTalk to Innkeeper\n",
        );
        let second_visit = s.output.rsplit("You approach Innkeeper.").next().unwrap();
        assert!(!second_visit.contains("A drink, please"));
        assert!(s.world.conversation(t.root).unwrap().has_chosen(t.root, 1));
    }

    #[test]
    fn reset_on_entry_restores_options() {
        let mut world = World::new("w");
        let hall = world.add_room(Room::new("Hall", "")).unwrap();
        let player = world
            .add_character(Character::player("Player", "", hall))
            .unwrap();
        let coin = world.add_situation(Situation::new("coin", "Heads.")).unwrap();
        let root = world
            .add_situation(
                Situation::new("root", "Flip?")
                    .with_option(SituationOption::new("Flip", coin).once())
                    .resetting(),
            )
            .unwrap();
        world
            .add_character(Character::npc("Gambler", "", hall, root))
            .unwrap();

        let s = play(
            world,
            player,
            hall,
            "Talk to Gambler\nFlip\nBack\nTalk to Gambler\nFlip\n",
        );
        assert_eq!(s.output.matches("Heads.").count(), 2);
    }

    #[test]
    fn ending_option_returns_to_the_room() {
        let t = tavern();
        let s = play(
            t.world,
            t.player,
            t.hall,
            "Talk to Innkeeper\nHeard any rumours?\nBack\nFarewell\nExit game\n",
        );
        assert_eq!(s.status, Status::Exited);
        assert!(s.output.contains("Innkeeper: \"Safe travels.\""));
    }

    #[test]
    fn ending_option_unwinds_every_conversation_frame() {
        let mut world = World::new("w");
        let hall = world.add_room(Room::new("Hall", "")).unwrap();
        let player = world
            .add_character(Character::player("Player", "", hall))
            .unwrap();
        let bye = world
            .add_situation(Situation::new("bye", "Off with you, then."))
            .unwrap();
        let dragon = world
            .add_situation(Situation::new("dragon", "A dragon, up north."))
            .unwrap();
        let rumours = world
            .add_situation(
                Situation::new("rumours", "Rumours? Plenty.")
                    .with_option(SituationOption::new("Tell me about the north", dragon))
                    .with_option(SituationOption::new("Never mind", bye).ending()),
            )
            .unwrap();
        let root = world
            .add_situation(
                Situation::new("greeting", "Welcome, stranger.")
                    .with_option(SituationOption::new("Heard any rumours?", rumours)),
            )
            .unwrap();
        world
            .add_character(Character::npc("Innkeeper", "", hall, root))
            .unwrap();

        let script = "Talk to Innkeeper\nHeard any rumours?\nNever mind\nExit game\n";
        let mut engine = Engine::new(world, script.as_bytes(), Vec::new(), EngineConfig::default());
        let status = engine.run(player, hall).unwrap();
        assert_eq!(status, Status::Exited);
        assert_eq!(engine.depth(), 0);

        let (world, output) = engine.into_parts();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(location(&world, player), hall);
        let tail = output.rsplit("Off with you, then.").next().unwrap();
        assert!(tail.starts_with("\"\n1. Talk to Innkeeper\n"));
    }

    #[test]
    fn invalid_utf8_input_is_reprompted() {
        let t = two_rooms(false);
        let input: &[u8] = b"\xff\xfe\nExit game\n";
        let mut engine = Engine::new(t.world, input, Vec::new(), EngineConfig::default());
        assert_eq!(engine.run(t.player, t.a).unwrap(), Status::Exited);
        let (_, output) = engine.into_parts();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("is not an option."));
    }

    #[test]
    fn dead_end_offers_only_back() {
        let mut world = World::new("w");
        let hall = world.add_room(Room::new("Hall", "")).unwrap();
        let player = world
            .add_character(Character::player("Player", "", hall))
            .unwrap();
        let root = world.add_situation(Situation::new("root", "...")).unwrap();
        world
            .add_character(Character::npc("Statue", "", hall, root))
            .unwrap();

        let s = play(world, player, hall, "Talk to Statue\n");
        let after = s.output.rsplit("Statue: \"...\"").next().unwrap();
        assert!(after.starts_with("\n1. Back\nWhat do you do? > "));
    }
}
