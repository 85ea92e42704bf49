//! The board engine as plain functions: each takes the current state and
//! returns a new one, leaving its input untouched.

use crate::commands::{
    AddAttachment, CreateCard, CreateList, DeleteCard, DeleteList, MoveCard, MoveList,
    RemoveAttachment, RenameList, SortListCards, UpdateCard,
};
use crate::sort::SortKey;
use crate::{Attachment, BoardState, Card, CardFields};
use kanban_core::{IdGenerator, KanbanResult};

pub fn create_list(
    state: &BoardState,
    ids: &dyn IdGenerator,
    title: &str,
) -> KanbanResult<BoardState> {
    state.apply(&CreateList::new(ids, title))
}

pub fn rename_list(state: &BoardState, list_id: &str, new_title: &str) -> KanbanResult<BoardState> {
    state.apply(&RenameList {
        list_id: list_id.to_string(),
        title: new_title.to_string(),
    })
}

pub fn delete_list(state: &BoardState, list_id: &str) -> KanbanResult<BoardState> {
    state.apply(&DeleteList {
        list_id: list_id.to_string(),
    })
}

pub fn move_list(
    state: &BoardState,
    list_id: &str,
    target_index: usize,
) -> KanbanResult<BoardState> {
    state.apply(&MoveList {
        list_id: list_id.to_string(),
        target_index,
    })
}

/// Sort a list's cards. `sort_key` is one of `title`, `dueDate`, `assignee`.
pub fn sort_list_cards(
    state: &BoardState,
    list_id: &str,
    sort_key: &str,
) -> KanbanResult<BoardState> {
    state.list(list_id)?;
    let sort_key: SortKey = sort_key.parse()?;
    state.apply(&SortListCards {
        list_id: list_id.to_string(),
        sort_key,
    })
}

pub fn create_card(
    state: &BoardState,
    ids: &dyn IdGenerator,
    list_id: &str,
    fields: CardFields,
) -> KanbanResult<BoardState> {
    state.apply(&CreateCard::new(ids, list_id, fields))
}

pub fn update_card(state: &BoardState, updated_card: Card) -> KanbanResult<BoardState> {
    state.apply(&UpdateCard { card: updated_card })
}

pub fn delete_card(state: &BoardState, card_id: &str) -> KanbanResult<BoardState> {
    state.apply(&DeleteCard {
        card_id: card_id.to_string(),
    })
}

pub fn move_card(
    state: &BoardState,
    card_id: &str,
    target_list_id: &str,
    target_index: usize,
) -> KanbanResult<BoardState> {
    state.apply(&MoveCard {
        card_id: card_id.to_string(),
        target_list_id: target_list_id.to_string(),
        target_index,
    })
}

pub fn add_attachment(
    state: &BoardState,
    card_id: &str,
    attachment: Attachment,
    max_bytes: u64,
) -> KanbanResult<BoardState> {
    state.apply(&AddAttachment {
        card_id: card_id.to_string(),
        attachment,
        max_bytes,
    })
}

pub fn remove_attachment(
    state: &BoardState,
    card_id: &str,
    attachment_id: &str,
) -> KanbanResult<BoardState> {
    state.apply(&RemoveAttachment {
        card_id: card_id.to_string(),
        attachment_id: attachment_id.to_string(),
    })
}

pub fn get_cards_for_list<'a>(state: &'a BoardState, list_id: &str) -> KanbanResult<Vec<&'a Card>> {
    state.cards_for_list(list_id)
}

pub fn get_card<'a>(state: &'a BoardState, card_id: &str) -> Option<&'a Card> {
    state.cards.get(card_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_core::SequentialIdGenerator;

    #[test]
    fn test_operations_leave_input_untouched() {
        let ids = SequentialIdGenerator::new();
        let empty = BoardState::new();
        let with_list = create_list(&empty, &ids, "To Do").unwrap();
        assert!(empty.is_empty());

        let list_id = with_list.list_order[0].clone();
        let with_card =
            create_card(&with_list, &ids, &list_id, CardFields::titled("Task")).unwrap();
        assert!(with_list.cards.is_empty());
        assert_eq!(get_cards_for_list(&with_card, &list_id).unwrap().len(), 1);
    }

    #[test]
    fn test_sort_checks_list_before_key() {
        let ids = SequentialIdGenerator::new();
        let state = create_list(&BoardState::new(), &ids, "To Do").unwrap();
        let list_id = state.list_order[0].clone();

        assert!(sort_list_cards(&state, "ghost", "bogus").unwrap_err().is_not_found());
        assert!(sort_list_cards(&state, &list_id, "bogus").unwrap_err().is_validation());
        assert_eq!(sort_list_cards(&state, &list_id, "title").unwrap(), state);
    }

    #[test]
    fn test_get_card() {
        let ids = SequentialIdGenerator::new();
        let state = create_list(&BoardState::new(), &ids, "To Do").unwrap();
        let list_id = state.list_order[0].clone();
        let state = create_card(&state, &ids, &list_id, CardFields::titled("Task")).unwrap();
        let card_id = state.lists[&list_id].card_ids[0].clone();

        assert_eq!(get_card(&state, &card_id).map(|c| c.title.as_str()), Some("Task"));
        assert!(get_card(&state, "ghost").is_none());
    }
}
