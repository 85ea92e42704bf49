use super::{insert_clamped, require_title, Command};
use crate::sort::SortKey;
use crate::{BoardState, List, ListId};
use kanban_core::{IdGenerator, IdKind, KanbanError, KanbanResult};

/// Append a new, empty list to the right of the board
pub struct CreateList {
    pub list_id: ListId,
    pub title: String,
}

impl CreateList {
    pub fn new(ids: &dyn IdGenerator, title: impl Into<String>) -> Self {
        Self {
            list_id: ids.next_id(IdKind::List),
            title: title.into(),
        }
    }
}

impl Command for CreateList {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let title = require_title(&self.title, "List")?;
        if state.lists.contains_key(&self.list_id) {
            return Err(KanbanError::Validation(format!(
                "List id '{}' is already in use",
                self.list_id
            )));
        }
        state
            .lists
            .insert(self.list_id.clone(), List::new(self.list_id.clone(), title));
        state.list_order.push(self.list_id.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create list: '{}'", self.title)
    }
}

/// Rename a list. Renaming to the current (trimmed) title changes nothing.
pub struct RenameList {
    pub list_id: ListId,
    pub title: String,
}

impl Command for RenameList {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let list = state.list_mut(&self.list_id)?;
        let title = require_title(&self.title, "List")?;
        list.title = title;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename list {} to '{}'", self.list_id, self.title)
    }
}

/// Delete a list together with every card in it
pub struct DeleteList {
    pub list_id: ListId,
}

impl Command for DeleteList {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let list = state
            .lists
            .remove(&self.list_id)
            .ok_or_else(|| KanbanError::not_found("List", &self.list_id))?;
        for card_id in &list.card_ids {
            state.cards.remove(card_id);
        }
        state.list_order.retain(|id| id != &self.list_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete list {}", self.list_id)
    }
}

/// Move a list to `target_index` in the left-to-right order
pub struct MoveList {
    pub list_id: ListId,
    pub target_index: usize,
}

impl Command for MoveList {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        state.list(&self.list_id)?;
        state.list_order.retain(|id| id != &self.list_id);
        insert_clamped(&mut state.list_order, self.target_index, self.list_id.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move list {} to position {}", self.list_id, self.target_index)
    }
}

/// Reorder a list's cards by a sort key
pub struct SortListCards {
    pub list_id: ListId,
    pub sort_key: SortKey,
}

impl Command for SortListCards {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let mut cards = state.cards_for_list(&self.list_id)?;
        self.sort_key.sort_cards(&mut cards);
        let sorted: Vec<_> = cards.into_iter().map(|card| card.id.clone()).collect();

        let list = state.list_mut(&self.list_id)?;
        if sorted.len() != list.card_ids.len() {
            return Err(KanbanError::Internal(format!(
                "List {} references cards that do not exist",
                self.list_id
            )));
        }
        list.card_ids = sorted;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Sort list {} by {}", self.list_id, self.sort_key)
    }
}
