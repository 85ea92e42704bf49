pub mod config;
pub mod error;
pub mod id;

pub use config::AppConfig;
pub use error::{KanbanError, KanbanResult};
pub use id::{IdGenerator, IdKind, SequentialIdGenerator, UuidIdGenerator};
