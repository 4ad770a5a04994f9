//! Zobrist keys for hashing board contents.
//!
//! The key table is generated once from a fixed seed so hashes are stable
//! across runs. Only cell contents are hashed; side to move follows from the
//! piece count.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::{COLS, ROWS};
use super::player::Player;

const SEED: u64 = 0x0C0F_FEE4_2024_0407;

pub struct ZobristKeys {
    /// Indexed by `[player][col][row]`.
    cells: [[[u64; ROWS]; COLS]; 2],
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(SEED);
        let mut cells = [[[0u64; ROWS]; COLS]; 2];
        for player in cells.iter_mut() {
            for col in player.iter_mut() {
                for key in col.iter_mut() {
                    *key = rng.random();
                }
            }
        }
        ZobristKeys { cells }
    }

    pub fn cell(&self, player: Player, col: usize, row: usize) -> u64 {
        self.cells[player.index()][col][row]
    }
}

/// Shared key table.
pub fn keys() -> &'static ZobristKeys {
    static KEYS: OnceLock<ZobristKeys> = OnceLock::new();
    KEYS.get_or_init(ZobristKeys::generate)
}
