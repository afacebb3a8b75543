pub mod board_api;
