//! Episode driving: agents alternate on a shared board until no move
//! remains.

use gs_2048::{Board as SlideBoard, EpisodeStep, ExpectimaxPlayer, RandomEnv};
use gs_logging::{EventLog, EventLogError, MctsRootEventV1};
use gs_mcts::MctsPlayer;
use gs_nogo::{Board as NogoBoard, Piece};

pub struct SlideEpisodeReport {
    pub score: u64,
    pub moves: u32,
    /// Face value of the largest tile on the final board.
    pub max_tile: u32,
    pub steps: Vec<EpisodeStep>,
}

/// One 2048 episode: the environment drops two opening tiles, then the
/// player and the environment alternate until no slide is legal.
pub fn run_2048_episode(player: &ExpectimaxPlayer, env: &mut RandomEnv) -> SlideEpisodeReport {
    let mut board = SlideBoard::EMPTY;
    for _ in 0..2 {
        if let Some((pos, cell)) = env.take_action(&board) {
            board.place(pos, cell);
        }
    }

    let mut steps = Vec::new();
    let mut score = 0u64;
    while let Some(decision) = player.take_action(&board) {
        let Some(reward) = board.slide(decision.slide) else {
            break;
        };
        score += reward as u64;
        steps.push(EpisodeStep {
            after: board,
            reward,
            value: decision.value,
        });
        if let Some((pos, cell)) = env.take_action(&board) {
            board.place(pos, cell);
        }
    }

    let max_cell = board.max_cell();
    SlideEpisodeReport {
        score,
        moves: steps.len() as u32,
        max_tile: if max_cell == 0 { 0 } else { 1 << max_cell },
        steps,
    }
}

pub struct NogoEpisodeReport {
    pub winner: Piece,
    pub moves: u32,
}

/// One NoGo game. The side that cannot move loses. Root search events
/// are logged per move when a writer is supplied.
pub fn run_nogo_episode(
    black: &mut MctsPlayer,
    white: &mut MctsPlayer,
    episode: u32,
    log: &mut Option<EventLog>,
) -> Result<NogoEpisodeReport, EventLogError> {
    let mut board = NogoBoard::new();
    let mut moves = 0u32;
    loop {
        let current = if board.to_move() == Piece::Black {
            &mut *black
        } else {
            &mut *white
        };
        debug_assert_eq!(current.who(), board.to_move());

        let choice = if current.simulations() > 0 {
            let outcome = current.search(&board);
            if let Some(w) = log.as_mut() {
                w.append(&MctsRootEventV1 {
                    event: "mcts_root",
                    player: current.name().to_string(),
                    episode,
                    ply: moves,
                    chosen_pos: outcome.choice,
                    workers: outcome.workers,
                    votes: outcome.votes.clone(),
                    tree_nodes: outcome.tree_nodes.clone(),
                })?;
            }
            outcome.choice
        } else {
            current.take_action(&board)
        };

        match choice {
            Some(pos) => {
                board.place(pos as usize);
                moves += 1;
            }
            None => {
                return Ok(NogoEpisodeReport {
                    winner: board.to_move().opponent(),
                    moves,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_2048_episode_terminates_and_scores() {
        let player = ExpectimaxPlayer::from_args("init").expect("player");
        let mut env = RandomEnv::from_args("seed=5");
        let report = run_2048_episode(&player, &mut env);
        assert!(report.moves > 0);
        assert!(report.max_tile >= 4);
        assert_eq!(report.steps.len() as u32, report.moves);
        // Reward accounting: per-step rewards sum to the episode score.
        let total: u64 = report.steps.iter().map(|s| s.reward as u64).sum();
        assert_eq!(total, report.score);
    }

    #[test]
    fn nogo_episode_between_random_players_finishes() {
        let mut black = MctsPlayer::from_args("role=black seed=1 N=0").expect("black");
        let mut white = MctsPlayer::from_args("role=white seed=2 N=0").expect("white");
        let mut log = None;
        let report = run_nogo_episode(&mut black, &mut white, 0, &mut log).expect("episode");
        assert!(matches!(report.winner, Piece::Black | Piece::White));
        // A 9x9 NoGo game ends long before the board fills.
        assert!(report.moves > 10 && report.moves < 81);
    }

    #[test]
    fn nogo_episode_with_search_logs_root_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut black = MctsPlayer::from_args("role=black seed=1 N=8 workers=2").expect("black");
        let mut white = MctsPlayer::from_args("role=white seed=2 N=0").expect("white");
        let mut log = Some(EventLog::open(&path, None).unwrap());
        let report = run_nogo_episode(&mut black, &mut white, 3, &mut log).expect("episode");
        log.as_mut().unwrap().flush().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        // One root event per black turn, including a final abstention
        // when black is the side left without a move.
        let expected = match report.winner {
            Piece::Black => (report.moves + 1) / 2,
            _ => report.moves / 2 + 1,
        };
        assert_eq!(lines.len() as u32, expected);
        assert!(lines[0].contains("\"mcts_root\""));
    }
}
