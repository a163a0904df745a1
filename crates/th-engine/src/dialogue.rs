//! Actions offered inside a conversation.

use th_core::{ConversationState, SituationId, World, WorldResult};

use crate::action::{Action, ActionList};
use crate::transition::Transition;

/// One action per option of `situation` still visible under `state`.
///
/// An empty list means the conversation has nowhere left to go from here;
/// the caller adds the way back.
pub fn situation_actions(
    world: &World,
    situation: SituationId,
    state: Option<&ConversationState>,
) -> WorldResult<ActionList> {
    let mut actions = ActionList::new();
    for (index, option) in world.situation(situation)?.visible_options(state) {
        actions.add(Action::to(
            &option.label,
            &option.description,
            Transition::Choose {
                situation,
                option: index,
            },
        ));
    }
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use th_core::{Situation, SituationOption};

    use super::*;

    fn tree() -> (World, SituationId) {
        let mut world = World::new("w");
        let bye = world.add_situation(Situation::new("bye", "Bye.")).unwrap();
        let gossip = world
            .add_situation(Situation::new("gossip", "They say..."))
            .unwrap();
        let root = world
            .add_situation(
                Situation::new("root", "Hello.")
                    .with_option(
                        SituationOption::new("Any news?", gossip)
                            .with_description("Ask about town")
                            .once(),
                    )
                    .with_option(SituationOption::new("Goodbye", bye).ending()),
            )
            .unwrap();
        (world, root)
    }

    #[test]
    fn options_keep_their_index() {
        let (world, root) = tree();
        let actions = situation_actions(&world, root, None).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions.get(0).unwrap().description(), "Ask about town");
        assert_eq!(
            actions.get(1).unwrap().resolve(&world, th_core::CharacterId::new()).unwrap(),
            Transition::Choose {
                situation: root,
                option: 1
            }
        );
    }

    #[test]
    fn chosen_once_options_are_hidden() {
        let (world, root) = tree();
        let mut state = ConversationState::new();
        state.mark_chosen(root, 0);
        let actions = situation_actions(&world, root, Some(&state)).unwrap();
        let labels: Vec<_> = actions.iter().map(Action::label).collect();
        assert_eq!(labels, vec!["Goodbye"]);
    }

    #[test]
    fn leaf_offers_nothing() {
        let (world, root) = tree();
        let bye = world.situation(root).unwrap().options()[1].next;
        assert!(situation_actions(&world, bye, None).unwrap().is_empty());
    }
}
