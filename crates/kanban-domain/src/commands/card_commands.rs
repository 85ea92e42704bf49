use super::{insert_clamped, Command};
use crate::{BoardState, Card, CardFields, CardId, ListId};
use kanban_core::{IdGenerator, IdKind, KanbanError, KanbanResult};

/// Create a card at the end of a list
pub struct CreateCard {
    pub card_id: CardId,
    pub list_id: ListId,
    pub fields: CardFields,
}

impl CreateCard {
    pub fn new(ids: &dyn IdGenerator, list_id: impl Into<ListId>, fields: CardFields) -> Self {
        Self {
            card_id: ids.next_id(IdKind::Card),
            list_id: list_id.into(),
            fields,
        }
    }
}

impl Command for CreateCard {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let card = Card::from_fields(self.card_id.clone(), self.fields.clone())?;
        if state.cards.contains_key(&self.card_id) {
            return Err(KanbanError::Validation(format!(
                "Card id '{}' is already in use",
                self.card_id
            )));
        }
        state.list_mut(&self.list_id)?.card_ids.push(self.card_id.clone());
        state.cards.insert(self.card_id.clone(), card);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create card: '{}'", self.fields.title)
    }
}

/// Replace a card's content wholesale. List membership is untouched.
///
/// The replacement may drop attachments but not introduce new ones; those
/// go through [`AddAttachment`](super::AddAttachment) and its size limit.
pub struct UpdateCard {
    pub card: Card,
}

impl Command for UpdateCard {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let card = self.card.clone().normalized()?;
        let slot = state.card_mut(&card.id)?;
        if let Some(added) = card
            .attachments
            .iter()
            .find(|a| !slot.attachments.contains(a))
        {
            return Err(KanbanError::Validation(format!(
                "Attachment '{}' is not on card {}; add it as an attachment instead",
                added.name, card.id
            )));
        }
        *slot = card;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update card {}", self.card.id)
    }
}

/// Delete a card and drop its reference from the list holding it
pub struct DeleteCard {
    pub card_id: CardId,
}

impl Command for DeleteCard {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        state
            .cards
            .remove(&self.card_id)
            .ok_or_else(|| KanbanError::not_found("Card", &self.card_id))?;
        for list in state.lists.values_mut() {
            list.card_ids.retain(|id| id != &self.card_id);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete card {}", self.card_id)
    }
}

/// Move a card to `target_index` of a list.
///
/// The card is first taken out of whichever list holds it; `target_index`
/// then addresses the target list as it looks *after* that removal and is
/// clamped to its length. Moving within one list is the same operation with
/// source and target equal, and repeating a move is a no-op.
pub struct MoveCard {
    pub card_id: CardId,
    pub target_list_id: ListId,
    pub target_index: usize,
}

impl Command for MoveCard {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        state.card(&self.card_id)?;
        state.list(&self.target_list_id)?;

        for list in state.lists.values_mut() {
            list.card_ids.retain(|id| id != &self.card_id);
        }
        let target = state.list_mut(&self.target_list_id)?;
        insert_clamped(&mut target.card_ids, self.target_index, self.card_id.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Move card {} to list {} at {}",
            self.card_id, self.target_list_id, self.target_index
        )
    }
}
