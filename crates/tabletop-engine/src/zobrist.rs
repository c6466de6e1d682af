//! Zobrist hashing for board identification.
//!
//! Each (color, cell) pair gets a fixed random key; a board's hash is the
//! XOR of the keys of every occupied cell. Hashes are only meaningful
//! between boards of the same size, since cell indices depend on it.

use tabletop_core::Color;

use crate::board::MAX_SIZE;

/// Number of cells on the largest supported board.
const MAX_CELLS: usize = MAX_SIZE as usize * MAX_SIZE as usize;

/// Zobrist hash keys.
///
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for stones: [color][cell index]
    pub stones: [[u64; MAX_CELLS]; 2],
}

impl ZobristKeys {
    /// Initializes Zobrist keys using a simple PRNG.
    ///
    /// Uses a fixed seed for reproducibility across runs.
    pub const fn new() -> Self {
        // Simple xorshift64 PRNG for const initialization
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E3779B97F4A7C15u64; // Golden ratio seed
        let mut stones = [[0u64; MAX_CELLS]; 2];

        let mut color = 0;
        while color < 2 {
            let mut cell = 0;
            while cell < MAX_CELLS {
                state = next_random(state);
                stones[color][cell] = state;
                cell += 1;
            }
            color += 1;
        }

        ZobristKeys { stones }
    }

    /// Returns the key for a stone on a cell index.
    #[inline]
    pub const fn stone_key(&self, color: Color, cell: usize) -> u64 {
        self.stones[color.index()][cell]
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();
