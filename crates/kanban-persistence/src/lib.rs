pub mod adapter;
pub mod repository;
pub mod store;
pub mod traits;

pub use adapter::{board_state_key, boards_key, load_board_state, store_board_state};
pub use repository::{BoardRepository, RepositoryOptions};
pub use store::*;
pub use traits::*;
