//! N-tuple value network: four 6-tuple lookup tables summed over the
//! eight symmetries of the board.
//!
//! Evaluating every orientation under one shared set of tables ties the
//! weights across the dihedral group of the square, so the learned value
//! function is symmetry-invariant by construction.

use crate::board::Board;
use crate::weights::{self, WeightError};
use std::path::Path;

/// Entries per table: 16⁶ (six cells, 16 values each).
pub const TABLE_SIZE: usize = 16 * 16 * 16 * 16 * 16 * 16;

/// Cell-index tuples, each read on all eight board orientations.
pub const TUPLES: [[usize; 6]; 4] = [
    [0, 1, 2, 3, 4, 5],
    [4, 5, 6, 7, 8, 9],
    [0, 1, 2, 4, 5, 6],
    [4, 5, 6, 8, 9, 10],
];

/// Pack the six cell values at `tuple` into a base-16 index:
/// `v₀·16⁵ + v₁·16⁴ + … + v₅`. Cell values stay below 16, so the result
/// always lies in `[0, 16⁶)`.
pub fn extract_feature6(b: &Board, tuple: &[usize; 6]) -> u32 {
    tuple
        .iter()
        .fold(0u32, |acc, &pos| (acc << 4) | b.get(pos) as u32)
}

#[derive(Debug)]
pub struct NTupleNetwork {
    tables: Vec<Vec<f32>>,
}

impl NTupleNetwork {
    /// Fresh network with all weights at zero.
    pub fn zeroed() -> Self {
        Self {
            tables: (0..TUPLES.len()).map(|_| vec![0.0; TABLE_SIZE]).collect(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WeightError> {
        let tables = weights::read_tables_from_path(path)?;
        Ok(Self { tables })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WeightError> {
        weights::write_tables_to_path(path, &self.tables)
    }

    /// Sum the four tuple lookups over all eight orientations of `after`
    /// (4 rotations, then the same 4 on the horizontal mirror): 32 table
    /// reads per call.
    pub fn estimate(&self, after: &Board) -> f32 {
        let mut sum = 0.0f32;
        let mut b = *after;
        for _ in 0..2 {
            for _ in 0..4 {
                for (table, tuple) in self.tables.iter().zip(TUPLES.iter()) {
                    sum += table[extract_feature6(&b, tuple) as usize];
                }
                b.rotate_right();
            }
            b.reflect_horizontal();
        }
        sum
    }

    /// Spread `target` evenly over the 32 entries backing `after` and
    /// return the updated estimate. Single-threaded by construction: the
    /// caller holds the network mutably.
    pub fn adjust(&mut self, after: &Board, target: f32) -> f32 {
        let split = target / 32.0;
        let mut sum = 0.0f32;
        let mut b = *after;
        for _ in 0..2 {
            for _ in 0..4 {
                for (table, tuple) in self.tables.iter_mut().zip(TUPLES.iter()) {
                    let idx = extract_feature6(&b, tuple) as usize;
                    table[idx] += split;
                    sum += table[idx];
                }
                b.rotate_right();
            }
            b.reflect_horizontal();
        }
        sum
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, v: f32) {
        for table in &mut self.tables {
            table.fill(v);
        }
    }
}
