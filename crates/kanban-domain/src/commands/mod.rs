use crate::BoardState;
use kanban_core::KanbanResult;

pub mod attachment_commands;
pub mod card_commands;
pub mod list_commands;

pub use attachment_commands::*;
pub use card_commands::*;
pub use list_commands::*;

/// A single state transition of the board engine.
///
/// Commands carry everything they need, including ids for the entities they
/// create, so executing the same command twice on equal states gives equal
/// results. Run them through [`BoardState::apply`], which executes against a
/// copy; `execute` itself may leave its argument half-modified on error.
pub trait Command: Send + Sync {
    fn execute(&self, state: &mut BoardState) -> KanbanResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Insert `item` at `index`, clamped to `[0, items.len()]`. Returns the
/// position it landed at.
pub(crate) fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let index = index.min(items.len());
    items.insert(index, item);
    index
}

pub(crate) fn require_title(title: &str, what: &str) -> KanbanResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(kanban_core::KanbanError::Validation(format!(
            "{} title cannot be empty",
            what
        )));
    }
    Ok(title.to_string())
}
