//! Single-tree UCT + RAVE search.
//!
//! One `Mcts` value is one tree: it is built by `run`, queried for the
//! best root move, and dropped. Each iteration walks selection →
//! expansion → simulation → backup in that order.

use crate::node::{Node, NodeArena, NodeId, RaveTable};
use gs_nogo::{Board, Piece, PlaceOutcome, CELLS};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Which side a simulated win is credited to during backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinnerPov {
    /// Compare the winner against the side to move at the root for every
    /// node on the path. This matches the long-observed behavior of the
    /// search and is the default.
    #[default]
    Root,
    /// Credit each node from the perspective of the side that moved into
    /// it.
    Node,
}

#[derive(Debug, Clone, Copy)]
pub struct MctsConfig {
    /// Iterations per tree (`N`).
    pub simulations: u32,
    /// UCT exploration constant.
    pub exploration: f32,
    /// RAVE blend weight β; 0 disables RAVE entirely.
    pub rave_beta: f32,
    pub pov: WinnerPov,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 0,
            exploration: 1.5,
            rave_beta: 0.5,
            pov: WinnerPov::Root,
        }
    }
}

pub struct Mcts {
    cfg: MctsConfig,
    arena: NodeArena,
    root_player: Piece,
    rave: RaveTable,
}

impl Mcts {
    pub fn new(board: Board, cfg: MctsConfig) -> Self {
        let root_player = board.to_move();
        Self {
            cfg,
            arena: NodeArena::with_root(board),
            root_player,
            rave: RaveTable::new(),
        }
    }

    /// Run the configured number of iterations and return the best root
    /// move, or `None` when the root has no legal move.
    pub fn run(&mut self, rng: &mut ChaCha8Rng) -> Option<u8> {
        for _ in 0..self.cfg.simulations {
            let mut path = self.select();
            let leaf = *path.last().expect("path always holds the root");
            if let Some(child) = self.expand(leaf, rng) {
                path.push(child);
            }
            let winner = self.simulate(*path.last().expect("non-empty path"), rng);
            self.backup(&path, winner);
        }
        self.best_move()
    }

    /// Walk from the root toward the frontier, picking the UCB-best
    /// child at every fully expanded node.
    fn select(&self) -> Vec<NodeId> {
        let mut path = vec![NodeArena::ROOT];
        let mut curr = NodeArena::ROOT;
        while self.arena[curr].is_fully_expanded() {
            let node = &self.arena[curr];
            // Score for whichever side is to move at this node; under
            // node perspective the child's own stats already carry the
            // right sign.
            let maximize = match self.cfg.pov {
                WinnerPov::Root => node.board.to_move() == self.root_player,
                WinnerPov::Node => true,
            };
            let mut best_score = f32::NEG_INFINITY;
            let mut pick = node.children[0];
            for &cid in &node.children {
                let score = self.ucb(cid, node.total_cnt, maximize);
                if score > best_score {
                    best_score = score;
                    pick = cid;
                }
            }
            path.push(pick);
            curr = pick;
        }
        path
    }

    /// `Q* = (1−β)·Q + β·Q̃` with the division-by-zero guards on both
    /// rates.
    fn blended_rate(&self, id: NodeId) -> f32 {
        let n = &self.arena[id];
        let q = n.win_rate();
        let beta = self.cfg.rave_beta;
        if beta == 0.0 {
            return q;
        }
        let q_rave = n
            .place_pos
            .map_or(0.0, |p| self.rave.rate(p as usize));
        (1.0 - beta) * q + beta * q_rave
    }

    fn ucb(&self, id: NodeId, parent_total: u32, maximize: bool) -> f32 {
        let rate = self.blended_rate(id);
        let rate = if maximize { rate } else { 1.0 - rate };
        let total = self.arena[id].total_cnt;
        if parent_total == 0 || total == 0 {
            // Fresh child: no exploration term to compute yet.
            return rate;
        }
        rate + self.cfg.exploration * ((parent_total as f32).ln() / total as f32).sqrt()
    }

    /// Attach one untried legal child of `leaf`, chosen in random order.
    /// `None` when `leaf` is terminal.
    fn expand(&mut self, leaf: NodeId, rng: &mut ChaCha8Rng) -> Option<NodeId> {
        let node = &self.arena[leaf];
        let mut tried = [false; CELLS];
        for &cid in &node.children {
            if let Some(p) = self.arena[cid].place_pos {
                tried[p as usize] = true;
            }
        }
        let mut order = node.legal.clone();
        order.shuffle(rng);
        for pos in order {
            if tried[pos as usize] {
                continue;
            }
            let mut board = self.arena[leaf].board;
            let outcome = board.place(pos as usize);
            debug_assert_eq!(outcome, PlaceOutcome::Legal);
            return Some(self.arena.alloc_child(leaf, board, pos));
        }
        None
    }

    /// Uniform-random completion from `from`. Positions cycle through a
    /// queue; a full pass without progress means the side to move has no
    /// legal placement and loses.
    fn simulate(&self, from: NodeId, rng: &mut ChaCha8Rng) -> Piece {
        let mut board = self.arena[from].board;
        let mut order: Vec<u8> = (0..CELLS as u8).collect();
        order.shuffle(rng);
        let mut queue: VecDeque<u8> = order.into();
        let mut stalled = 0usize;
        while stalled != queue.len() {
            let pos = queue.pop_front().expect("queue non-empty while stalled < len");
            if board.place(pos as usize) == PlaceOutcome::Legal {
                stalled = 0;
            } else {
                queue.push_back(pos);
                stalled += 1;
            }
        }
        board.to_move().opponent()
    }

    fn backup(&mut self, path: &[NodeId], winner: Piece) {
        for &id in path {
            let node = &self.arena[id];
            let pov_side = match self.cfg.pov {
                WinnerPov::Root => self.root_player,
                // The side that moved into this node; at the root, the
                // root player itself.
                WinnerPov::Node => match node.place_pos {
                    Some(_) => node.board.to_move().opponent(),
                    None => self.root_player,
                },
            };
            let won = winner == pov_side;
            let place_pos = node.place_pos;

            let node = &mut self.arena[id];
            node.total_cnt += 1;
            if won {
                node.win_cnt += 1;
            }
            if let Some(p) = place_pos {
                self.rave.record(p as usize, won);
            }
        }
    }

    /// Best root child by blended rate (not UCB); first maximum wins.
    fn best_move(&self) -> Option<u8> {
        let root = &self.arena[NodeArena::ROOT];
        let mut best_score = f32::NEG_INFINITY;
        let mut best: Option<u8> = None;
        for &cid in &root.children {
            let score = self.blended_rate(cid);
            if score > best_score {
                best_score = score;
                best = self.arena[cid].place_pos;
            }
        }
        best
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.arena.iter()
    }

    pub fn root(&self) -> &Node {
        &self.arena[NodeArena::ROOT]
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn rave(&self) -> &RaveTable {
        &self.rave
    }
}

/// Combine per-worker root choices: most votes wins, ties broken by the
/// lowest position index. `None` when no worker produced a move.
pub fn majority_vote(results: &[Option<u8>]) -> Option<u8> {
    let mut votes = [0u32; CELLS];
    for pos in results.iter().flatten() {
        votes[*pos as usize] += 1;
    }
    let mut best_pos = 0usize;
    let mut best_votes = 0u32;
    for (pos, &v) in votes.iter().enumerate() {
        if v > best_votes {
            best_votes = v;
            best_pos = pos;
        }
    }
    (best_votes > 0).then_some(best_pos as u8)
}
