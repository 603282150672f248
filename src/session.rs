//! A game session: engine, state, high score store and metrics wired together
//!
//! The session is what the scheduler drives. It turns input requests and ticks
//! into engine calls, persists new records and keeps the metrics in step with
//! the phase. It has no notion of time or terminals, so a whole game can be
//! replayed from a list of actions.

use rand::{Rng, rngs::ThreadRng};
use std::time::Duration;

use crate::game::{
    Action, GameConfig, GameEngine, GamePhase, GameState, ResizeOutcome, StepResult,
};
use crate::metrics::GameMetrics;
use crate::storage::HighScoreStore;

pub struct GameSession<S, R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    store: S,
    metrics: GameMetrics,
}

impl<S: HighScoreStore> GameSession<S, ThreadRng> {
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_rng(config, store, rand::thread_rng())
    }
}

impl<S: HighScoreStore, R: Rng> GameSession<S, R> {
    pub fn with_rng(config: GameConfig, store: S, rng: R) -> Self {
        let mut engine = GameEngine::with_rng(config, rng);
        let mut state = engine.reset();
        state.high_score = store.load();

        tracing::info!(
            width = state.grid_width,
            height = state.grid_height,
            high_score = state.high_score,
            "session ready"
        );

        Self {
            engine,
            state,
            store,
            metrics: GameMetrics::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the state, for setting up positions in tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tick_interval(&self) -> Duration {
        self.engine.config().tick_interval()
    }

    /// Whether the scheduler should be delivering ticks
    pub fn is_ticking(&self) -> bool {
        self.state.phase.is_running()
    }

    /// Apply an input request, returning the new phase if it changed
    pub fn handle(&mut self, action: Action) -> Option<GamePhase> {
        let previous = self.state.phase;
        let next = self.engine.apply(&mut self.state, action)?;

        match (previous, next) {
            (GamePhase::Paused, GamePhase::Running) => self.metrics.on_resume(),
            (_, GamePhase::Running) => self.metrics.on_game_start(),
            (_, GamePhase::Paused) => self.metrics.on_pause(),
            (_, GamePhase::Ready) => self.metrics.on_reset(),
            (_, GamePhase::Ended) => {}
        }

        tracing::info!(from = ?previous, to = ?next, "phase change");
        Some(next)
    }

    /// Apply whatever the primary input means in the current phase
    pub fn primary(&mut self) -> Option<GamePhase> {
        self.handle(self.state.phase.primary_action())
    }

    /// Run one tick of the engine
    pub fn tick(&mut self) -> StepResult {
        let was_running = self.state.phase.is_running();
        let result = self.engine.advance(&mut self.state);

        if result.ate_food {
            self.metrics.on_food_eaten();
            tracing::debug!(
                score = self.state.score,
                length = self.state.snake.len(),
                "food eaten"
            );
        }

        if result.new_record {
            self.persist_high_score();
        }

        if was_running && self.state.phase == GamePhase::Ended {
            self.metrics.on_game_over();
            tracing::info!(
                score = self.state.score,
                high_score = self.state.high_score,
                collision = ?result.collision_type,
                steps = self.state.steps,
                "game over"
            );
        }

        result
    }

    /// Report a new grid size from the presentation layer
    pub fn resize(&mut self, width: usize, height: usize) -> ResizeOutcome {
        let outcome = self.engine.resize(&mut self.state, width, height);

        match outcome {
            ResizeOutcome::Applied => {
                self.metrics.on_reset();
                tracing::info!(width, height, "grid resized");
            }
            ResizeOutcome::Deferred => {
                tracing::debug!(width, height, "resize deferred until the next game");
            }
            ResizeOutcome::Ignored => {}
        }

        outcome
    }

    fn persist_high_score(&mut self) {
        let high_score = self.state.high_score;
        tracing::info!(high_score, "new high score");

        // Losing the record on disk is not worth interrupting the game for
        if let Err(err) = self.store.save(high_score) {
            tracing::warn!(?err, high_score, "failed to persist high score");
        }
    }
}
