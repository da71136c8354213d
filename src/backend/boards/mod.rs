//! Boards
//!
//! Boards are owned by one user and hold the lists. Deleting a board
//! removes its lists and their tasks.

pub mod handlers;
pub mod service;
