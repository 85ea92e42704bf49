//! Drag-and-drop sessions for cards.
//!
//! A drag gesture moves through `Idle -> Dragging -> ProvisionalMove* ->
//! Dropped | Cancelled`. [`DragSession::start`] enters `Dragging`; every
//! [`DragSession::hover`] is a provisional move applied to a working copy
//! only; [`DragSession::drop`] commits the working copy and
//! [`DragSession::cancel`] hands back the exact pre-drag snapshot. The
//! session never persists anything: the caller stores the dropped state,
//! once per gesture.

use kanban_core::KanbanResult;

use crate::commands::MoveCard;
use crate::{BoardState, CardId, ListId};

/// Which side of a card the pointer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Where a dragged card is being dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A list header or the empty area of a list: the card goes last.
    List(ListId),
    /// Next to another card.
    Card { card_id: CardId, placement: Placement },
}

impl DropTarget {
    pub fn before(card_id: impl Into<CardId>) -> Self {
        Self::Card {
            card_id: card_id.into(),
            placement: Placement::Before,
        }
    }

    pub fn after(card_id: impl Into<CardId>) -> Self {
        Self::Card {
            card_id: card_id.into(),
            placement: Placement::After,
        }
    }

    /// Resolve this target to a `(list, index)` pair for moving `dragged`,
    /// with the index counted in the target list after `dragged` has been
    /// taken out of it.
    pub fn resolve(&self, state: &BoardState, dragged: &str) -> KanbanResult<(ListId, usize)> {
        match self {
            DropTarget::List(list_id) => {
                let list = state.list(list_id)?;
                let remaining = list.card_ids.iter().filter(|id| *id != dragged).count();
                Ok((list_id.clone(), remaining))
            }
            DropTarget::Card { card_id, placement } => {
                state.card(card_id)?;
                let list_id = state
                    .list_of_card(card_id)
                    .cloned()
                    .ok_or_else(|| {
                        kanban_core::KanbanError::not_found("List holding card", card_id)
                    })?;
                let list = state.list(&list_id)?;

                if card_id == dragged {
                    let index = list.position_of(dragged).unwrap_or(list.len());
                    return Ok((list_id, index));
                }

                let index = list
                    .card_ids
                    .iter()
                    .filter(|id| *id != dragged)
                    .position(|id| id == card_id)
                    .unwrap_or(0);
                let index = match placement {
                    Placement::Before => index,
                    Placement::After => index + 1,
                };
                Ok((list_id, index))
            }
        }
    }
}

/// Result of a completed drop.
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub state: BoardState,
    /// False when the card ended where it started; callers may skip saving.
    pub changed: bool,
}

/// An in-progress drag of a single card.
#[derive(Debug, Clone)]
pub struct DragSession {
    card_id: CardId,
    original: BoardState,
    working: BoardState,
    moves: usize,
}

impl DragSession {
    /// Begin dragging `card_id`. Fails with `NotFound` for an unknown card.
    pub fn start(state: &BoardState, card_id: impl Into<CardId>) -> KanbanResult<Self> {
        let card_id = card_id.into();
        state.card(&card_id)?;
        tracing::debug!(card = %card_id, "Drag started");
        Ok(Self {
            card_id,
            original: state.clone(),
            working: state.clone(),
            moves: 0,
        })
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    /// The state to render while dragging.
    pub fn preview(&self) -> &BoardState {
        &self.working
    }

    /// Number of provisional moves applied so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Provisionally move the card over `target`. On error the preview is
    /// left as it was.
    pub fn hover(&mut self, target: &DropTarget) -> KanbanResult<()> {
        let (target_list_id, target_index) = target.resolve(&self.working, &self.card_id)?;
        self.working = self.working.apply(&MoveCard {
            card_id: self.card_id.clone(),
            target_list_id,
            target_index,
        })?;
        self.moves += 1;
        Ok(())
    }

    /// Finish the gesture, committing the last provisional position.
    pub fn drop(self) -> DropOutcome {
        let changed = self.working != self.original;
        tracing::debug!(card = %self.card_id, moves = self.moves, changed, "Drag dropped");
        DropOutcome {
            state: self.working,
            changed,
        }
    }

    /// Hover over `target` and drop there in one step.
    pub fn drop_on(mut self, target: &DropTarget) -> KanbanResult<DropOutcome> {
        self.hover(target)?;
        Ok(self.drop())
    }

    /// Abandon the gesture and return the pre-drag snapshot untouched.
    pub fn cancel(self) -> BoardState {
        tracing::debug!(card = %self.card_id, moves = self.moves, "Drag cancelled");
        self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CreateCard, CreateList};
    use crate::CardFields;
    use kanban_core::SequentialIdGenerator;

    /// L1 = [c1, c2, c3], L2 = [c4]
    fn board() -> (BoardState, Vec<ListId>, Vec<CardId>) {
        let ids = SequentialIdGenerator::new();
        let l1 = CreateList::new(&ids, "To Do");
        let l2 = CreateList::new(&ids, "Done");
        let mut state = BoardState::new().apply(&l1).unwrap().apply(&l2).unwrap();
        let mut cards = Vec::new();
        for (list, title) in [(&l1, "c1"), (&l1, "c2"), (&l1, "c3"), (&l2, "c4")] {
            let cmd = CreateCard::new(&ids, list.list_id.clone(), CardFields::titled(title));
            cards.push(cmd.card_id.clone());
            state = state.apply(&cmd).unwrap();
        }
        (state, vec![l1.list_id, l2.list_id], cards)
    }

    fn order(state: &BoardState, list_id: &str) -> Vec<String> {
        state
            .cards_for_list(list_id)
            .unwrap()
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    #[test]
    fn test_drop_on_list_header_appends() {
        let (state, lists, cards) = board();
        let outcome = DragSession::start(&state, cards[0].clone())
            .unwrap()
            .drop_on(&DropTarget::List(lists[1].clone()))
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(order(&outcome.state, &lists[0]), vec!["c2", "c3"]);
        assert_eq!(order(&outcome.state, &lists[1]), vec!["c4", "c1"]);
    }

    #[test]
    fn test_drop_on_own_list_header_moves_to_end() {
        let (state, lists, cards) = board();
        let outcome = DragSession::start(&state, cards[0].clone())
            .unwrap()
            .drop_on(&DropTarget::List(lists[0].clone()))
            .unwrap();
        assert_eq!(order(&outcome.state, &lists[0]), vec!["c2", "c3", "c1"]);
    }

    #[test]
    fn test_drop_above_first_and_below_last() {
        let (state, lists, cards) = board();
        let above = DragSession::start(&state, cards[2].clone())
            .unwrap()
            .drop_on(&DropTarget::before(cards[0].clone()))
            .unwrap();
        assert_eq!(order(&above.state, &lists[0]), vec!["c3", "c1", "c2"]);

        let below = DragSession::start(&state, cards[0].clone())
            .unwrap()
            .drop_on(&DropTarget::after(cards[2].clone()))
            .unwrap();
        assert_eq!(order(&below.state, &lists[0]), vec!["c2", "c3", "c1"]);
    }

    #[test]
    fn test_drop_between_cards_of_other_list() {
        let (state, lists, cards) = board();
        let outcome = DragSession::start(&state, cards[3].clone())
            .unwrap()
            .drop_on(&DropTarget::after(cards[0].clone()))
            .unwrap();
        assert_eq!(order(&outcome.state, &lists[0]), vec!["c1", "c4", "c2", "c3"]);
        assert!(outcome.state.lists[&lists[1]].card_ids.is_empty());
    }

    #[test]
    fn test_drop_on_itself_is_unchanged() {
        let (state, _, cards) = board();
        let outcome = DragSession::start(&state, cards[1].clone())
            .unwrap()
            .drop_on(&DropTarget::before(cards[1].clone()))
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn test_cancel_restores_pre_drag_snapshot() {
        let (state, lists, cards) = board();
        let mut session = DragSession::start(&state, cards[0].clone()).unwrap();
        session.hover(&DropTarget::List(lists[1].clone())).unwrap();
        session.hover(&DropTarget::before(cards[3].clone())).unwrap();
        session.hover(&DropTarget::after(cards[2].clone())).unwrap();
        assert_eq!(session.moves(), 3);
        assert_ne!(session.preview(), &state);

        assert_eq!(session.cancel(), state);
    }

    #[test]
    fn test_hover_error_keeps_preview() {
        let (state, lists, cards) = board();
        let mut session = DragSession::start(&state, cards[0].clone()).unwrap();
        session.hover(&DropTarget::List(lists[1].clone())).unwrap();
        let preview = session.preview().clone();

        let err = session
            .hover(&DropTarget::List("ghost".to_string()))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session.preview(), &preview);
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn test_start_unknown_card() {
        let (state, _, _) = board();
        assert!(DragSession::start(&state, "ghost").unwrap_err().is_not_found());
    }

    #[test]
    fn test_every_hover_keeps_invariant() {
        let (state, lists, cards) = board();
        let mut session = DragSession::start(&state, cards[1].clone()).unwrap();
        let targets = [
            DropTarget::List(lists[1].clone()),
            DropTarget::before(cards[3].clone()),
            DropTarget::after(cards[0].clone()),
            DropTarget::List(lists[0].clone()),
            DropTarget::after(cards[3].clone()),
        ];
        for target in &targets {
            session.hover(target).unwrap();
            session.preview().validate().unwrap();
            assert_eq!(session.preview().cards.len(), 4);
        }
        assert_eq!(session.drop().state.list_of_card(&cards[1]), Some(&lists[1]));
    }
}
