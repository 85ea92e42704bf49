use super::Command;
use crate::{Attachment, AttachmentId, BoardState, CardId};
use kanban_core::{KanbanError, KanbanResult};

/// Attach file metadata to a card
pub struct AddAttachment {
    pub card_id: CardId,
    pub attachment: Attachment,
    /// Largest accepted `attachment.size`, in bytes.
    pub max_bytes: u64,
}

impl Command for AddAttachment {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let card = state.card_mut(&self.card_id)?;
        if self.attachment.name.trim().is_empty() {
            return Err(KanbanError::Validation(
                "Attachment name cannot be empty".to_string(),
            ));
        }
        if self.attachment.size > self.max_bytes {
            return Err(KanbanError::Validation(format!(
                "Attachment '{}' is {} bytes; the limit is {} bytes",
                self.attachment.name, self.attachment.size, self.max_bytes
            )));
        }
        if card.attachment(&self.attachment.id).is_some() {
            return Err(KanbanError::Validation(format!(
                "Attachment id '{}' is already in use",
                self.attachment.id
            )));
        }
        card.attachments.push(self.attachment.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Attach '{}' to card {}", self.attachment.name, self.card_id)
    }
}

pub struct RemoveAttachment {
    pub card_id: CardId,
    pub attachment_id: AttachmentId,
}

impl Command for RemoveAttachment {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()> {
        let card = state.card_mut(&self.card_id)?;
        let position = card
            .attachments
            .iter()
            .position(|a| a.id == self.attachment_id)
            .ok_or_else(|| KanbanError::not_found("Attachment", &self.attachment_id))?;
        card.attachments.remove(position);
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Remove attachment {} from card {}",
            self.attachment_id, self.card_id
        )
    }
}
