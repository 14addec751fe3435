//! gs-mcts: Monte-Carlo tree search player for NoGo.
//!
//! The design uses:
//! - Arena-backed node storage (`Vec<Node>` + `u32` ids); a tree lives
//!   exactly as long as one search.
//! - UCT selection with a RAVE blend (`Q* = (1−β)·Q + β·Q̃`).
//! - Root parallelization: one independent tree per worker thread,
//!   combined by majority vote over the root-level best moves.

pub mod mcts;
pub mod node;
pub mod player;

pub use mcts::{majority_vote, Mcts, MctsConfig, WinnerPov};
pub use node::{Node, NodeArena, NodeId, RaveTable};
pub use player::{MctsPlayer, PlayerError, VoteOutcome};

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
