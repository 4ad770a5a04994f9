//! Core Connect Four game logic: board with apply/undo, incremental line
//! tracking, player types, and Zobrist hashing.

mod board;
pub mod lines;
mod player;
mod zobrist;

pub use board::{Board, GameOutcome, LegalActions, COLS, ROWS, WIN_LENGTH};
pub use lines::{Coord, Direction, Line, LineId, LineRegistry};
pub use player::{Cell, Player};
