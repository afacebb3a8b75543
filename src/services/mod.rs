pub mod board_data;

pub use board_data::{BoardDataService, BoardSnapshot};
