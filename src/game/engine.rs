use super::{
    action::{Action, Direction, request_direction},
    config::GameConfig,
    phase::GamePhase,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{Rng, rngs::ThreadRng};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether this step pushed the score past the high score
    pub new_record: bool,
    /// Whether the game has ended with this step
    pub terminated: bool,
}

/// Outcome of a grid size change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The board was laid out again on the new grid
    Applied,
    /// A game is in progress; the size is kept for the next layout
    Deferred,
    /// Same size, or a size no game fits on
    Ignored,
}

/// The game engine that handles all game logic
///
/// The engine owns the configuration and the random source; the state it
/// works on is passed in by the caller.
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh state in the Ready phase with no known high score
    pub fn reset(&mut self) -> GameState {
        let snake = self.initial_snake();
        let food = self.place_food(&snake);

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Lay out a new snake and food on `state`, clearing the score.
    ///
    /// The high score survives; a grid size deferred by [`Self::resize`] is
    /// applied here.
    fn relayout(&mut self, state: &mut GameState) {
        if let Some((width, height)) = state.pending_grid.take() {
            self.config = self.config.with_grid(width, height);
        }

        let high_score = state.high_score;
        *state = self.reset();
        state.high_score = high_score;
    }

    /// Apply an input request to the state.
    ///
    /// Returns the new phase when the phase changed (or the board was reset),
    /// `None` when the request was ignored or only steered the snake.
    pub fn apply(&mut self, state: &mut GameState, action: Action) -> Option<GamePhase> {
        if let Action::Turn(direction) = action {
            self.request_direction(state, direction);
            return None;
        }

        let next = state.phase.transition(action)?;
        match action {
            Action::Start | Action::Reset => self.relayout(state),
            _ => {}
        }
        state.phase = next;

        Some(next)
    }

    /// Record a direction request for the next tick.
    ///
    /// Ignored unless the game is running; reversals are checked against the
    /// heading of the last committed move, not against earlier requests.
    pub fn request_direction(&self, state: &mut GameState, requested: Direction) {
        if !state.phase.is_running() {
            return;
        }

        state.next_direction = request_direction(state.snake.direction, requested);
    }

    /// Execute one tick of the game in the pending direction
    pub fn advance(&mut self, state: &mut GameState) -> StepResult {
        if !state.phase.is_running() {
            return StepResult {
                terminated: state.phase == GamePhase::Ended,
                ..StepResult::default()
            };
        }

        let direction = state.next_direction;
        let new_head = state.snake.head().moved_in_direction(direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            // The attempted move is discarded, nothing else changes
            state.phase = GamePhase::Ended;
            state.next_direction = state.snake.direction;

            return StepResult {
                collision_type: Some(collision_type),
                terminated: true,
                ..StepResult::default()
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, direction, ate_food);
        state.steps += 1;

        let mut result = StepResult {
            ate_food,
            ..StepResult::default()
        };

        if ate_food {
            state.score += self.config.food_reward;

            if state.score > state.high_score {
                state.high_score = state.score;
                state.new_record = true;
                result.new_record = true;
            }

            if state.snake.len() >= state.cell_count() {
                // No free cell left for food
                state.phase = GamePhase::Ended;
                result.terminated = true;
            } else {
                state.food = self.place_food(&state.snake);
            }
        }

        result
    }

    /// Change the grid size.
    ///
    /// A Ready board is laid out again right away. Otherwise the new size is
    /// only remembered until the next start or reset: the snake is never
    /// moved or clipped, and a finished game keeps its final board.
    pub fn resize(&mut self, state: &mut GameState, width: usize, height: usize) -> ResizeOutcome {
        if GameConfig::validate_grid(width, height).is_err()
            || !fits_food(&self.config.with_grid(width, height))
        {
            return ResizeOutcome::Ignored;
        }

        if (width, height) == (state.grid_width, state.grid_height) {
            state.pending_grid = None;
            return ResizeOutcome::Ignored;
        }

        state.pending_grid = Some((width, height));
        match state.phase {
            GamePhase::Ready => {
                self.relayout(state);
                ResizeOutcome::Applied
            }
            GamePhase::Running | GamePhase::Paused | GamePhase::Ended => ResizeOutcome::Deferred,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so stepping onto it is fatal too
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn initial_snake(&self) -> Snake {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.layout_snake_length(),
        )
    }

    /// Pick a uniformly random free cell by rejection sampling.
    ///
    /// Callers make sure at least one cell is free.
    pub fn place_food(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}

/// A fresh layout must leave at least one cell for food
fn fits_food(config: &GameConfig) -> bool {
    config.grid_width * config.grid_height > config.layout_snake_length()
}
