//! The NoGo player agent: root-parallel MCTS with a random fallback.

use crate::mcts::{majority_vote, Mcts, MctsConfig, WinnerPov};
use gs_agent::{seed_or_time, worker_rng, Properties, PropertyError};
use gs_nogo::{Board, Piece, PlaceOutcome, CELLS};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// One root-parallel search outcome, kept around for logging.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub choice: Option<u8>,
    /// `(position, votes)` for every position that received a vote.
    pub votes: Vec<(u8, u32)>,
    pub workers: usize,
    /// Arena sizes of the per-worker trees.
    pub tree_nodes: Vec<usize>,
}

/// MCTS player for one side.
///
/// Recognized properties: `name`, `role` (`black` or `white`,
/// mandatory), `seed`, `N` (iterations per tree; 0 plays a uniformly
/// random legal move instead of searching), `workers` (tree count,
/// default one per hardware thread), `pov` (`root` or `node` winner
/// perspective during backup).
#[derive(Debug)]
pub struct MctsPlayer {
    props: Properties,
    who: Piece,
    cfg: MctsConfig,
    workers: usize,
    rng: ChaCha8Rng,
}

impl MctsPlayer {
    pub fn from_args(args: &str) -> Result<Self, PlayerError> {
        let props = Properties::parse("name=mcts role=unknown N=0", args);
        props.validate_name()?;
        let who = match props.role() {
            "black" => Piece::Black,
            "white" => Piece::White,
            other => {
                return Err(PropertyError::InvalidRole {
                    role: other.to_string(),
                }
                .into())
            }
        };

        let cfg = MctsConfig {
            simulations: props.get_parsed("N").unwrap_or(0),
            pov: match props.get("pov") {
                Some("node") => WinnerPov::Node,
                _ => WinnerPov::Root,
            },
            ..MctsConfig::default()
        };
        let workers = props
            .get_parsed("workers")
            .unwrap_or_else(default_workers)
            .max(1);
        let rng = ChaCha8Rng::seed_from_u64(seed_or_time(props.get_parsed("seed")));

        Ok(Self {
            props,
            who,
            cfg,
            workers,
            rng,
        })
    }

    pub fn name(&self) -> &str {
        self.props.name()
    }

    pub fn who(&self) -> Piece {
        self.who
    }

    pub fn simulations(&self) -> u32 {
        self.cfg.simulations
    }

    pub fn take_action(&mut self, board: &Board) -> Option<u8> {
        if self.cfg.simulations == 0 {
            return self.random_move(board);
        }
        self.search(board).choice
    }

    /// Root parallelization: every worker builds its own tree (own RAVE
    /// table, own generator) from the same root position, then the
    /// per-tree best moves are tallied by majority vote.
    pub fn search(&mut self, board: &Board) -> VoteOutcome {
        let call_seed = self.rng.next_u64();
        let cfg = self.cfg;
        let workers = self.workers;

        let mut per_worker: Vec<(Option<u8>, usize)> = Vec::with_capacity(workers);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|w| {
                    s.spawn(move || {
                        let mut rng = worker_rng(call_seed, w as u64);
                        let mut tree = Mcts::new(*board, cfg);
                        let choice = tree.run(&mut rng);
                        (choice, tree.node_count())
                    })
                })
                .collect();
            for h in handles {
                // A worker that died contributes no vote.
                per_worker.push(h.join().unwrap_or((None, 0)));
            }
        });

        let results: Vec<Option<u8>> = per_worker.iter().map(|&(c, _)| c).collect();
        let choice = majority_vote(&results);

        let mut tally = [0u32; CELLS];
        for pos in results.iter().flatten() {
            tally[*pos as usize] += 1;
        }
        VoteOutcome {
            choice,
            votes: tally
                .iter()
                .enumerate()
                .filter(|&(_, &v)| v > 0)
                .map(|(p, &v)| (p as u8, v))
                .collect(),
            workers,
            tree_nodes: per_worker.iter().map(|&(_, n)| n).collect(),
        }
    }

    /// `N=0` fallback: shuffle all positions and play the first legal one.
    fn random_move(&mut self, board: &Board) -> Option<u8> {
        let mut space: Vec<u8> = (0..CELLS as u8).collect();
        space.shuffle(&mut self.rng);
        for pos in space {
            let mut probe = *board;
            if probe.place(pos as usize) == PlaceOutcome::Legal {
                return Some(pos);
            }
        }
        None
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
