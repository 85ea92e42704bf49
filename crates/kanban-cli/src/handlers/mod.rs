pub mod attachment;
pub mod board;
pub mod card;
pub mod list;
