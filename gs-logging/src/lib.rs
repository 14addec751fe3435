//! gs-logging: append-only NDJSON logs for run post-mortems.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summary of one finished 2048 episode.
#[derive(Debug, Clone, Serialize)]
pub struct SlideEpisodeEventV1 {
    pub event: &'static str,
    pub player: String,
    pub episode: u32,
    pub score: u64,
    pub moves: u32,
    /// Largest tile face value on the final board.
    pub max_tile: u32,
}

/// Summary of one finished NoGo game.
#[derive(Debug, Clone, Serialize)]
pub struct NogoEpisodeEventV1 {
    pub event: &'static str,
    pub black: String,
    pub white: String,
    pub episode: u32,
    pub winner: &'static str,
    pub moves: u32,
}

/// One root-parallel MCTS decision.
#[derive(Debug, Clone, Serialize)]
pub struct MctsRootEventV1 {
    pub event: &'static str,
    pub player: String,
    pub episode: u32,
    pub ply: u32,
    pub chosen_pos: Option<u8>,
    pub workers: usize,
    /// `(position, votes)` pairs for every voted position.
    pub votes: Vec<(u8, u32)>,
    /// Arena sizes of the per-worker trees.
    pub tree_nodes: Vec<usize>,
}

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append-only NDJSON event log: one JSON object per line.
///
/// Events are buffered; with a flush interval of `Some(n)` the buffer is
/// written through after every `n` appended events, otherwise only on
/// [`flush`](Self::flush) or drop.
pub struct EventLog {
    out: BufWriter<std::fs::File>,
    flush_every: Option<u64>,
    pending: u64,
}

impl EventLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>, flush_every: Option<u64>) -> Result<Self, EventLogError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
            flush_every,
            pending: 0,
        })
    }

    /// Append one event as a single JSON line.
    pub fn append<T: Serialize>(&mut self, event: &T) -> Result<(), EventLogError> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.pending += 1;
        if matches!(self.flush_every, Some(n) if self.pending >= n) {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), EventLogError> {
        self.out.flush()?;
        self.pending = 0;
        Ok(())
    }
}
