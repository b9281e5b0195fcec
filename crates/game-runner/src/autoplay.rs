use anyhow::Result;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use twenty48_core::session::{GameState, GameSummary, Outcome, Session};

use crate::config::Config;
use crate::policy::Policy;

/// Result of one autoplayed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub game_id: u32,
    pub seed: Option<u64>,
    pub summary: GameSummary,
}

/// Aggregate over every game in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub games: u32,
    pub wins: u32,
    pub best_score: u64,
    pub best_tile: u64,
    pub total_moves: u64,
}

/// Play every configured game to completion. Games are independent sessions
/// and run in parallel.
pub fn run(cfg: &Config) -> Result<RunReport> {
    let results: Vec<GameResult> = (0..cfg.autoplay.games)
        .into_par_iter()
        .map(|game_id| play_one(cfg, game_id))
        .collect::<Result<_>>()?;

    let mut report = RunReport::default();
    for r in &results {
        info!(
            "game {} (seed {:?}): {} moves, score {}, highest tile {}{}",
            r.game_id,
            r.seed,
            r.summary.moves,
            r.summary.score,
            r.summary.highest_tile,
            if r.summary.won { ", won" } else { "" }
        );
        report.games += 1;
        report.wins += u32::from(r.summary.won);
        report.best_score = report.best_score.max(r.summary.score);
        report.best_tile = report.best_tile.max(r.summary.highest_tile);
        report.total_moves += r.summary.moves;
    }
    Ok(report)
}

/// Drive a single seeded session until it is over or hits the move cap.
pub fn play_one(cfg: &Config, game_id: u32) -> Result<GameResult> {
    let seed = cfg.autoplay.seed.map(|s| s.wrapping_add(u64::from(game_id)));
    let (game_rng, policy_rng) = match seed {
        Some(s) => (StdRng::seed_from_u64(s), StdRng::seed_from_u64(!s)),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };
    let mut session = Session::with_rng(cfg.size, game_rng)?.with_target(cfg.target)?;
    let mut policy = Policy::new(cfg.autoplay.policy, policy_rng);

    // Rejected attempts count toward the cap too.
    let mut attempts: u64 = 0;
    let attempt_cap = cfg.autoplay.max_moves.unwrap_or(u64::MAX / 4).saturating_mul(4);
    while cfg.autoplay.max_moves.is_none_or(|cap| session.moves() < cap) && attempts < attempt_cap {
        attempts += 1;
        let dir = policy.select(session.board());
        let result = session.apply_move(dir);
        if result.outcome == Outcome::Won {
            debug!("game {game_id} won at move {}", session.moves());
        }
        // A winning move can lock the board too; it still reports `Won`.
        if session.state() == GameState::Over {
            break;
        }
    }

    Ok(GameResult {
        game_id,
        seed,
        summary: session.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Autoplay, PolicyKind};

    fn cfg(games: u32, max_moves: Option<u64>, policy: PolicyKind) -> Config {
        Config {
            size: 4,
            target: 2048,
            autoplay: Autoplay {
                games,
                seed: Some(7),
                max_moves,
                policy,
            },
        }
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let c = cfg(1, None, PolicyKind::Random);
        assert_eq!(play_one(&c, 0).unwrap(), play_one(&c, 0).unwrap());
        assert_eq!(play_one(&c, 3).unwrap().seed, Some(10));
    }

    #[test]
    fn games_run_until_over() {
        let c = cfg(1, None, PolicyKind::Cycle);
        let r = play_one(&c, 0).unwrap();
        assert!(r.summary.moves > 0);
        assert!(r.summary.score > 0);
    }

    #[test]
    fn game_ends_when_the_winning_move_locks_the_board() {
        let c = Config {
            size: 2,
            target: 8,
            autoplay: Autoplay {
                games: 1,
                seed: Some(8),
                max_moves: None,
                policy: PolicyKind::Cycle,
            },
        };
        let r = play_one(&c, 0).unwrap();
        assert!(r.summary.won);
        assert!(r.summary.highest_tile >= 8);
    }

    #[test]
    fn small_boards_always_finish() {
        let mut c = cfg(32, None, PolicyKind::Cycle);
        c.size = 2;
        c.target = 8;
        let report = run(&c).unwrap();
        assert_eq!(report.games, 32);
    }

    #[test]
    fn move_cap_is_respected() {
        let c = cfg(1, Some(10), PolicyKind::Random);
        let r = play_one(&c, 0).unwrap();
        assert!(r.summary.moves <= 10);
    }

    #[test]
    fn report_aggregates_all_games() {
        let c = cfg(6, Some(50), PolicyKind::Cycle);
        let report = run(&c).unwrap();
        assert_eq!(report.games, 6);
        assert!(report.total_moves <= 6 * 50);
        assert!(report.best_tile >= 4);
    }
}
