use serde::{Deserialize, Serialize};

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Yellow,
    Red,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Yellow => Some(Player::Yellow),
            Cell::Red => Some(Player::Red),
        }
    }
}

/// One of the two sides. Yellow always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Yellow,
    Red,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Yellow => Player::Red,
            Player::Red => Player::Yellow,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Yellow => Cell::Yellow,
            Player::Red => Cell::Red,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Yellow => "Yellow",
            Player::Red => "Red",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::Yellow => 0,
            Player::Red => 1,
        }
    }
}
