use std::fmt;

use super::lines::{Coord, Direction, Line, LineRegistry};
use super::player::{Cell, Player};
use super::zobrist;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const WIN_LENGTH: usize = 4;

/// Neighbor offsets worth inspecting after a drop. Straight up is skipped
/// since the cell above a freshly dropped piece is always empty.
const NEIGHBOR_OFFSETS: [(isize, isize); 7] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Columns that can still be played, in ascending order.
pub type LegalActions = Vec<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    /// `line` is the first `WIN_LENGTH` cells of the winning run, sorted.
    Winner {
        player: Player,
        line: [Coord; WIN_LENGTH],
    },
    Draw,
}

/// Game board with move history and incremental line tracking.
///
/// Cells are indexed `(col, row)` with row 0 at the top; pieces fall towards
/// row `ROWS - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; ROWS]; COLS],
    /// Row the next piece dropped in each column lands on; negative once full.
    next_free_row: [i8; COLS],
    current_player: Player,
    history: Vec<usize>,
    outcome: Option<GameOutcome>,
    lines: LineRegistry,
    hash: u64,
}

impl Board {
    /// Create a new empty board with Yellow to move
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; ROWS]; COLS],
            next_free_row: [(ROWS - 1) as i8; COLS],
            current_player: Player::Yellow,
            history: Vec::with_capacity(COLS * ROWS),
            outcome: None,
            lines: LineRegistry::new(),
            hash: 0,
        }
    }

    /// Build a board by playing `moves` from the empty position.
    pub fn from_moves(moves: &[usize]) -> Result<Self, MoveError> {
        let mut board = Board::new();
        for &col in moves {
            board.apply(col)?;
        }
        Ok(board)
    }

    /// Get the cell at a specific position
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[col][row]
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Winner and winning window, if the game was won.
    pub fn winner(&self) -> Option<(Player, [Coord; WIN_LENGTH])> {
        match self.outcome {
            Some(GameOutcome::Winner { player, line }) => Some((player, line)),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns played so far, oldest first.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Coordinate of the most recently dropped piece.
    pub fn last_move(&self) -> Option<Coord> {
        self.history
            .last()
            .map(|&col| (col, (self.next_free_row[col] + 1) as usize))
    }

    /// Row the next piece in `col` would land on, or `None` if full.
    pub fn next_free_row(&self, col: usize) -> Option<usize> {
        let row = self.next_free_row[col];
        (row >= 0).then_some(row as usize)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || self.next_free_row[col] < 0
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.next_free_row.iter().all(|&row| row < 0)
    }

    pub fn empty_cells(&self) -> usize {
        self.next_free_row
            .iter()
            .map(|&row| (row + 1) as usize)
            .sum()
    }

    pub fn lines(&self) -> &LineRegistry {
        &self.lines
    }

    /// Zobrist hash of the cell contents.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Columns that are not yet full.
    pub fn successors(&self) -> LegalActions {
        (0..COLS).filter(|&col| self.next_free_row[col] >= 0).collect()
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Finished games accept no further moves; `undo` reopens them.
    pub fn apply(&mut self, column: usize) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn { column });
        }
        if self.next_free_row[column] < 0 {
            return Err(MoveError::ColumnFull { column });
        }

        let row = self.next_free_row[column] as usize;
        let player = self.current_player;
        let placed = (column, row);
        self.cells[column][row] = player.to_cell();
        self.next_free_row[column] -= 1;
        self.history.push(column);
        self.hash ^= zobrist::keys().cell(player, column, row);

        for (dcol, drow) in NEIGHBOR_OFFSETS {
            let Some(neighbor) = offset(placed, dcol, drow) else {
                continue;
            };
            if self.cells[neighbor.0][neighbor.1] == player.to_cell() {
                self.lines
                    .link(placed, neighbor, Direction::from_offset(dcol, drow), player);
            }
        }

        if let Some(line) = self.lines.lines_at(placed).find(|l| l.len() >= WIN_LENGTH) {
            self.outcome = Some(GameOutcome::Winner {
                player,
                line: winning_window(line),
            });
        } else if self.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = player.other();
        Ok(())
    }

    /// Take back the last move, returning the column it was played in.
    pub fn undo(&mut self) -> Result<usize, MoveError> {
        let column = self.history.pop().ok_or(MoveError::EmptyHistory)?;
        let row = (self.next_free_row[column] + 1) as usize;
        let player = self.current_player.other();

        self.cells[column][row] = Cell::Empty;
        self.next_free_row[column] += 1;
        self.hash ^= zobrist::keys().cell(player, column, row);
        self.lines.split((column, row));
        self.outcome = None;
        self.current_player = player;
        Ok(column)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "|")?;
            for col in 0..COLS {
                let symbol = match self.cells[col][row] {
                    Cell::Empty => '.',
                    Cell::Yellow => 'Y',
                    Cell::Red => 'R',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, "{col}")?;
        }
        Ok(())
    }
}

fn offset((col, row): Coord, dcol: isize, drow: isize) -> Option<Coord> {
    let col = col.checked_add_signed(dcol)?;
    let row = row.checked_add_signed(drow)?;
    (col < COLS && row < ROWS).then_some((col, row))
}

fn winning_window(line: &Line) -> [Coord; WIN_LENGTH] {
    let mut window = [(0, 0); WIN_LENGTH];
    window.copy_from_slice(&line.members()[..WIN_LENGTH]);
    window
}
