pub mod board;
pub mod card;
pub mod commands;
pub mod defaults;
pub mod drag;
pub mod field_update;
pub mod list;
pub mod operations;
pub mod sort;
pub mod state;

pub use board::{Board, BoardColor, BoardFields, BoardId, BoardUpdate};
pub use card::{format_file_size, Attachment, AttachmentId, Card, CardFields, CardId, CardUpdate};
pub use drag::{DragSession, DropOutcome, DropTarget, Placement};
pub use field_update::FieldUpdate;
pub use list::{List, ListId};
pub use sort::SortKey;
pub use state::BoardState;
