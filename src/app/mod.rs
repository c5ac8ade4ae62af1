pub mod actions;
pub mod board;
pub mod board_loop;
pub mod controller;
pub mod ticker;
