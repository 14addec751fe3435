use crate::board::{Board, Slide};
use crate::player::{ExpectimaxPlayer, PlayerError, RandomEnv, RandomPlayer};

#[test]
fn player_without_init_or_load_is_rejected() {
    let err = ExpectimaxPlayer::from_args("").unwrap_err();
    assert!(matches!(err, PlayerError::NoWeightSource));

    let err = ExpectimaxPlayer::from_args("alpha=0.1 save=w.bin").unwrap_err();
    assert!(matches!(err, PlayerError::NoWeightSource));
}

#[test]
fn no_legal_slide_yields_no_action() {
    let player = ExpectimaxPlayer::from_args("init").unwrap();
    let dead = Board::from_cells([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 1]);
    assert!(player.take_action(&dead).is_none());
}

#[test]
fn picks_the_highest_valued_direction() {
    let player = ExpectimaxPlayer::from_args("init").unwrap();
    // Row of four 4-tiles: left/right merge twice for reward 16, up/down
    // move tiles without merging.
    let b = Board::from_cells([0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0]);
    let d = player.take_action(&b).unwrap();
    assert_eq!(d.reward, 16);
    assert!(matches!(d.slide, Slide::Left | Slide::Right));
}

#[test]
fn tie_break_takes_lowest_direction_index() {
    let player = ExpectimaxPlayer::from_args("init").unwrap();
    // Lone tile in the center: every direction is legal with reward 0,
    // and zeroed weights value them all alike.
    let mut b = Board::EMPTY;
    b.place(5, 1);
    let d = player.take_action(&b).unwrap();
    assert_eq!(d.slide, Slide::Up);
    assert_eq!(d.reward, 0);
}

#[test]
fn expectation_on_full_board_is_zero() {
    let player = ExpectimaxPlayer::from_args("init").unwrap();
    let full = Board::from_cells([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 1]);
    assert_eq!(player.expectation(&full), 0.0);
}

#[test]
fn expectation_weights_tile_drops_nine_to_one() {
    let player = ExpectimaxPlayer::from_args("init").unwrap();
    // One empty cell at 0; the bottom row pair merges regardless of the
    // dropped tile, but the drop itself can merge with the 2-tile at 1.
    //
    //   .  1  6  7      drop 1 at pos 0: left slide merges 1+1 -> reward 4
    //   8  9 10 11      drop 2 at pos 0: no new pair, best reward stays 4
    //   5  3 12 13        (the 2,2 pair on the bottom row)
    //   2  2 14 15
    let b = Board::from_cells([0, 1, 6, 7, 8, 9, 10, 11, 5, 3, 12, 13, 2, 2, 14, 15]);
    assert_eq!(b.empty_count(), 1);

    // Zeroed weights make the expectation pure reward arithmetic:
    // E = 0.9·V₂ + 0.1·V₄ over the single empty cell.
    let expect = player.expectation(&b);
    let v_drop2 = best_reply_reward(&b, 0, 1);
    let v_drop4 = best_reply_reward(&b, 0, 2);
    assert_eq!(expect, 0.9 * v_drop2 + 0.1 * v_drop4);
    assert!(v_drop2 > v_drop4);
    assert!((expect - 11.6).abs() < 1e-4);
}

fn best_reply_reward(b: &Board, pos: usize, cell: u8) -> f32 {
    let mut placed = *b;
    placed.place(pos, cell);
    let mut best = f32::NEG_INFINITY;
    for s in Slide::ALL {
        let mut c = placed;
        if let Some(r) = c.slide(s) {
            best = best.max(r as f32);
        }
    }
    best
}

#[test]
fn random_env_drops_only_on_empty_cells() {
    let mut env = RandomEnv::from_args("seed=7");
    let mut b = Board::EMPTY;
    b.place(0, 1);
    for _ in 0..50 {
        let (pos, cell) = env.take_action(&b).unwrap();
        assert_ne!(pos, 0);
        assert!(cell == 1 || cell == 2);
    }
}

#[test]
fn random_env_returns_none_on_full_board() {
    let mut env = RandomEnv::from_args("seed=7");
    let full = Board::from_cells([1; 16]);
    assert!(env.take_action(&full).is_none());
}

#[test]
fn random_env_tile_distribution_is_nine_to_one() {
    let mut env = RandomEnv::from_args("seed=11");
    let b = Board::EMPTY;
    let mut fours = 0usize;
    let n = 2000;
    for _ in 0..n {
        let (_, cell) = env.take_action(&b).unwrap();
        if cell == 2 {
            fours += 1;
        }
    }
    // 10% ± generous slack.
    assert!((100..300).contains(&fours), "fours={fours}");
}

#[test]
fn random_player_only_plays_legal_slides() {
    let mut player = RandomPlayer::from_args("seed=3");
    // Only vertical moves are legal.
    let b = Board::from_cells([1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    for _ in 0..20 {
        let d = player.take_action(&b).unwrap();
        assert!(matches!(d.slide, Slide::Down));
    }
}

#[test]
fn td_update_learns_from_an_episode() {
    use crate::player::EpisodeStep;
    let mut player = ExpectimaxPlayer::from_args("init alpha=0.1").unwrap();
    let mut after = Board::EMPTY;
    after.place(0, 1);
    after.place(4, 2);

    let before = player.estimate(&after);
    player.close_episode(&[EpisodeStep {
        after,
        reward: 8,
        value: 0.0,
    }]);
    // The terminal step's target pushes the estimate toward reward - value.
    assert_ne!(player.estimate(&after), before);
}
