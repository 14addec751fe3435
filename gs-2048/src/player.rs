//! Agents for the 2048 episode loop: the expectimax player, the random
//! tile environment, and a random fallback player.

use crate::board::{Board, Slide};
use crate::ntuple::NTupleNetwork;
use crate::weights::WeightError;
use gs_agent::{seed_or_time, Properties};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Weights(#[from] WeightError),
    #[error(transparent)]
    Property(#[from] gs_agent::PropertyError),
    #[error("player has no weight source: pass `init` or `load=<path>`")]
    NoWeightSource,
}

/// The slide chosen at a max node, with the statistics the training
/// pipeline consumes.
#[derive(Debug, Clone, Copy)]
pub struct SlideDecision {
    pub slide: Slide,
    /// `reward + expectation(after)` for the chosen slide.
    pub value: f32,
    pub reward: u32,
}

/// One player move of an episode, recorded for the TD pass.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeStep {
    pub after: Board,
    pub reward: u32,
    pub value: f32,
}

/// Depth-2 expectimax over the n-tuple network.
///
/// Recognized properties: `name`, `role`, `alpha` (learning rate for the
/// close-episode TD pass; 0 keeps the tables read-only), `init`
/// (start from zeroed tables), `load` (weight file to read at startup;
/// wins over `init` when both are given), `save` (weight file to write
/// at shutdown). One of `init`/`load` is required.
#[derive(Debug)]
pub struct ExpectimaxPlayer {
    props: Properties,
    net: NTupleNetwork,
    alpha: f32,
}

impl ExpectimaxPlayer {
    pub fn from_args(args: &str) -> Result<Self, PlayerError> {
        let props = Properties::parse("name=expectimax role=player", args);
        let net = match props.get("load") {
            Some(path) => NTupleNetwork::load(path)?,
            None if props.contains("init") => NTupleNetwork::zeroed(),
            None => return Err(PlayerError::NoWeightSource),
        };
        let alpha = props.get_parsed::<f32>("alpha").unwrap_or(0.0);
        Ok(Self { props, net, alpha })
    }

    pub fn name(&self) -> &str {
        self.props.name()
    }

    /// Max node: try each direction in index order, keep the first one
    /// maximizing `reward + expectation(after)`. `None` when no slide is
    /// legal.
    pub fn take_action(&self, before: &Board) -> Option<SlideDecision> {
        let mut best: Option<SlideDecision> = None;
        for slide in Slide::ALL {
            let mut after = *before;
            let Some(reward) = after.slide(slide) else {
                continue;
            };
            let value = reward as f32 + self.expectation(&after);
            if best.map_or(true, |b| value > b.value) {
                best = Some(SlideDecision {
                    slide,
                    value,
                    reward,
                });
            }
        }
        best
    }

    /// Chance node: expected value of dropping a random tile on `after`
    /// and then playing the best legal reply. A 2-tile appears with
    /// probability 0.9, a 4-tile with 0.1, uniformly over empty cells.
    pub fn expectation(&self, after: &Board) -> f32 {
        let empty = after.empty_count();
        if empty == 0 {
            return 0.0;
        }
        let mut total = 0.0f32;
        for pos in 0..crate::board::CELLS {
            if after.get(pos) != 0 {
                continue;
            }
            let v2 = self.best_reply_value(after, pos, 1);
            let v4 = self.best_reply_value(after, pos, 2);
            total += (0.9 * v2 + 0.1 * v4) / empty as f32;
        }
        total
    }

    /// `max` over legal replies of `reward + estimate`; negative
    /// infinity when the drop leaves no legal slide.
    fn best_reply_value(&self, after: &Board, pos: usize, cell: u8) -> f32 {
        let mut placed = *after;
        placed.place(pos, cell);
        let mut best = f32::NEG_INFINITY;
        for slide in Slide::ALL {
            let mut b = placed;
            if let Some(reward) = b.slide(slide) {
                best = best.max(reward as f32 + self.net.estimate(&b));
            }
        }
        best
    }

    pub fn estimate(&self, after: &Board) -> f32 {
        self.net.estimate(after)
    }

    /// Backward TD(0) pass over the finished episode. Active only when
    /// `alpha > 0`; the default player never mutates its tables.
    pub fn close_episode(&mut self, path: &[EpisodeStep]) {
        if self.alpha <= 0.0 {
            return;
        }
        let mut next = 0.0f32;
        for step in path.iter().rev() {
            let td_error = next - (step.value - step.reward as f32);
            next = step.reward as f32 + self.net.adjust(&step.after, self.alpha * td_error);
        }
    }

    /// Honor the `save` property, if present.
    pub fn save_if_configured(&self) -> Result<(), WeightError> {
        match self.props.get("save") {
            Some(path) if !path.is_empty() => self.net.save(path),
            _ => Ok(()),
        }
    }
}

/// Random tile environment: drops a 2-tile with probability 0.9 or a
/// 4-tile with probability 0.1 on a uniformly random empty cell.
pub struct RandomEnv {
    rng: ChaCha8Rng,
    space: [usize; crate::board::CELLS],
}

impl RandomEnv {
    pub fn from_args(args: &str) -> Self {
        let props = Properties::parse("name=random role=environment", args);
        let seed = seed_or_time(props.get_parsed("seed"));
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            space: std::array::from_fn(|i| i),
        }
    }

    /// `(position, cell)` for the drop, or `None` on a full board.
    pub fn take_action(&mut self, after: &Board) -> Option<(usize, u8)> {
        self.space.shuffle(&mut self.rng);
        for &pos in &self.space {
            if after.get(pos) != 0 {
                continue;
            }
            let cell = if self.rng.gen_range(0..10) < 9 { 1 } else { 2 };
            return Some((pos, cell));
        }
        None
    }
}

/// Plays a uniformly random legal slide.
pub struct RandomPlayer {
    rng: ChaCha8Rng,
    dirs: [Slide; 4],
}

impl RandomPlayer {
    pub fn from_args(args: &str) -> Self {
        let props = Properties::parse("name=random role=player", args);
        let seed = seed_or_time(props.get_parsed("seed"));
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            dirs: Slide::ALL,
        }
    }

    pub fn take_action(&mut self, before: &Board) -> Option<SlideDecision> {
        self.dirs.shuffle(&mut self.rng);
        for &slide in &self.dirs {
            let mut b = *before;
            if let Some(reward) = b.slide(slide) {
                return Some(SlideDecision {
                    slide,
                    value: reward as f32,
                    reward,
                });
            }
        }
        None
    }
}
