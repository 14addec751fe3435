//! gs-2048: 2048 game engine, n-tuple value network, and expectimax player.
//!
//! Boards store cells in log₂ representation (cell value `k` is the tile
//! `2^k`, 0 is empty). The value network is a sum of four 6-tuple table
//! lookups evaluated over all eight symmetries of the board, and the
//! player runs a depth-2 expectimax over it: one max ply over legal
//! slides, one chance ply over random tile drops.

pub mod board;
pub mod ntuple;
pub mod player;
pub mod weights;

pub use board::{Board, Slide};
pub use ntuple::{extract_feature6, NTupleNetwork, TABLE_SIZE, TUPLES};
pub use player::{EpisodeStep, ExpectimaxPlayer, PlayerError, RandomEnv, RandomPlayer, SlideDecision};
pub use weights::WeightError;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}

#[cfg(test)]
mod player_tests;
