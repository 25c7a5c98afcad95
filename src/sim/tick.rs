//! Per-frame simulation tick
//!
//! Pipeline: spawn → motion → collision → game-over evaluation. Driven once
//! per rendered frame with a monotonically increasing timestamp (ms).

use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, motion, spawn};

/// Advance the session by one frame
pub fn tick(state: &mut GameState, now: f64) {
    // Frozen until restart
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.frame += 1;
    state.now = now;

    spawn::run(state, now);
    motion::run(state, now);
    collision::run(state, now);
    evaluate_game_over(state);
}

/// Whether either game-over threshold has been reached
pub fn game_over_reached(state: &GameState) -> bool {
    state.penalties >= state.settings.max_penalties || state.losses >= state.settings.max_losses
}

fn evaluate_game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !game_over_reached(state) {
        return;
    }

    state.phase = GamePhase::GameOver;
    state.player.direction = 0.0;
    let score = state.score();
    state.push_event(GameEvent::GameOver { score });
    log::info!(
        "Game over after {} frames: hits {}, losses {}, penalties {}, score {}",
        state.frame,
        state.hits,
        state.losses,
        state.penalties,
        score
    );
}
