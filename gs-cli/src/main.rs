//! gs: CLI harness for the two search players.
//!
//! Subcommands:
//! - play2048: expectimax player vs the random tile environment
//! - nogo: NoGo match between two configured players

mod config;
mod episode;

use std::env;
use std::process;

use config::Config;
use episode::{run_2048_episode, run_nogo_episode};
use gs_2048::{ExpectimaxPlayer, RandomEnv};
use gs_logging::{EventLog, NogoEpisodeEventV1, SlideEpisodeEventV1};
use gs_mcts::MctsPlayer;
use gs_nogo::Piece;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        process::exit(2);
    }
    match args[1].as_str() {
        "play2048" => cmd_play2048(&args[2..]),
        "nogo" => cmd_nogo(&args[2..]),
        "version" | "--version" => println!("gs {}", env!("CARGO_PKG_VERSION")),
        "help" | "--help" | "-h" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(2);
        }
    }
}

fn print_help() {
    eprintln!(
        r#"gs - search players for 2048 and NoGo

USAGE:
    gs <COMMAND> [OPTIONS]

COMMANDS:
    play2048    Run 2048 episodes with the expectimax player
    nogo        Run NoGo games between two players
    version     Print version

Run `gs <COMMAND> --help` for per-command options.
"#
    );
}

/// Take the value following a flag, or exit with a usage error.
fn flag_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(v) => v.clone(),
        None => {
            eprintln!("Missing value for {flag}");
            process::exit(2);
        }
    }
}

fn parse_games(value: &str) -> u32 {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid --games value: {value}");
        process::exit(2);
    })
}

fn load_config(path: &str) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load config {path}: {e}");
        process::exit(1);
    })
}

fn open_log(path: &str) -> EventLog {
    EventLog::open(path, Some(64)).unwrap_or_else(|e| {
        eprintln!("Failed to open log {path}: {e}");
        process::exit(1);
    })
}

fn cmd_play2048(args: &[String]) {
    let mut cfg = Config::default().play2048;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"gs play2048

USAGE:
    gs play2048 [--config FILE] [--games N] [--player PROPS] [--env PROPS] [--log FILE]

OPTIONS:
    --config FILE    Load a YAML match config (flags override it)
    --games N        Number of episodes (default: 1)
    --player PROPS   Player property string (default: "init"), e.g. "load=w.bin save=w.bin"
    --env PROPS      Environment property string, e.g. "seed=7"
    --log FILE       Append NDJSON episode events to FILE
"#
                );
                return;
            }
            "--config" => {
                cfg = load_config(&flag_value(args, i, "--config")).play2048;
                i += 2;
            }
            "--games" => {
                cfg.games = parse_games(&flag_value(args, i, "--games"));
                i += 2;
            }
            "--player" => {
                cfg.player = flag_value(args, i, "--player");
                i += 2;
            }
            "--env" => {
                cfg.env = flag_value(args, i, "--env");
                i += 2;
            }
            "--log" => {
                cfg.log = Some(flag_value(args, i, "--log"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `gs play2048`: {other}");
                eprintln!("Run `gs play2048 --help` for usage.");
                process::exit(2);
            }
        }
    }

    let mut player = ExpectimaxPlayer::from_args(&cfg.player).unwrap_or_else(|e| {
        eprintln!("Failed to construct player: {e}");
        process::exit(1);
    });
    let mut env_agent = RandomEnv::from_args(&cfg.env);
    let mut log = cfg.log.as_deref().map(open_log);

    let mut scores: Vec<u64> = Vec::with_capacity(cfg.games as usize);
    let mut best_tile = 0u32;
    for episode in 0..cfg.games {
        let report = run_2048_episode(&player, &mut env_agent);
        player.close_episode(&report.steps);

        println!(
            "episode {episode}: score={} moves={} max_tile={}",
            report.score, report.moves, report.max_tile
        );
        if let Some(w) = log.as_mut() {
            let event = SlideEpisodeEventV1 {
                event: "episode_2048",
                player: player.name().to_string(),
                episode,
                score: report.score,
                moves: report.moves,
                max_tile: report.max_tile,
            };
            if let Err(e) = w.append(&event) {
                eprintln!("Log write failed: {e}");
                process::exit(1);
            }
        }
        best_tile = best_tile.max(report.max_tile);
        scores.push(report.score);
    }

    if let Some(w) = log.as_mut() {
        let _ = w.flush();
    }
    if let Err(e) = player.save_if_configured() {
        eprintln!("Failed to save weights: {e}");
        process::exit(1);
    }

    let mean = scores.iter().sum::<u64>() as f64 / scores.len().max(1) as f64;
    println!();
    println!("Episodes: {}", scores.len());
    println!(
        "Score: mean={mean:.1}, max={}, best_tile={best_tile}",
        scores.iter().max().copied().unwrap_or(0)
    );
}

fn cmd_nogo(args: &[String]) {
    let mut cfg = Config::default().nogo;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"gs nogo

USAGE:
    gs nogo [--config FILE] [--games N] [--black PROPS] [--white PROPS] [--log FILE]

OPTIONS:
    --config FILE    Load a YAML match config (flags override it)
    --games N        Number of games (default: 1)
    --black PROPS    Black property string (default: "name=mcts role=black N=1000")
    --white PROPS    White property string (default: "name=random role=white N=0")
    --log FILE       Append NDJSON game + root-search events to FILE
"#
                );
                return;
            }
            "--config" => {
                cfg = load_config(&flag_value(args, i, "--config")).nogo;
                i += 2;
            }
            "--games" => {
                cfg.games = parse_games(&flag_value(args, i, "--games"));
                i += 2;
            }
            "--black" => {
                cfg.black = flag_value(args, i, "--black");
                i += 2;
            }
            "--white" => {
                cfg.white = flag_value(args, i, "--white");
                i += 2;
            }
            "--log" => {
                cfg.log = Some(flag_value(args, i, "--log"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `gs nogo`: {other}");
                eprintln!("Run `gs nogo --help` for usage.");
                process::exit(2);
            }
        }
    }

    let mut black = build_nogo_player(&cfg.black, Piece::Black);
    let mut white = build_nogo_player(&cfg.white, Piece::White);
    let mut log = cfg.log.as_deref().map(open_log);

    let mut black_wins = 0u32;
    for episode in 0..cfg.games {
        let report = match run_nogo_episode(&mut black, &mut white, episode, &mut log) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Log write failed: {e}");
                process::exit(1);
            }
        };
        let winner = match report.winner {
            Piece::Black => "black",
            _ => "white",
        };
        println!(
            "game {episode}: winner={winner} moves={}",
            report.moves
        );
        if report.winner == Piece::Black {
            black_wins += 1;
        }
        if let Some(w) = log.as_mut() {
            let event = NogoEpisodeEventV1 {
                event: "episode_nogo",
                black: black.name().to_string(),
                white: white.name().to_string(),
                episode,
                winner,
                moves: report.moves,
            };
            if let Err(e) = w.append(&event) {
                eprintln!("Log write failed: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(w) = log.as_mut() {
        let _ = w.flush();
    }
    println!();
    println!(
        "Games: {}, black wins: {black_wins} ({:.1}%)",
        cfg.games,
        100.0 * black_wins as f64 / cfg.games.max(1) as f64
    );
}

fn build_nogo_player(props: &str, expected: Piece) -> MctsPlayer {
    let player = MctsPlayer::from_args(props).unwrap_or_else(|e| {
        eprintln!("Failed to construct player from {props:?}: {e}");
        process::exit(1);
    });
    if player.who() != expected {
        eprintln!(
            "Player {:?} is configured for the wrong side (expected {expected:?})",
            player.name()
        );
        process::exit(1);
    }
    player
}
