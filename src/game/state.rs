use super::{action::Direction, phase::GamePhase};

/// A cell on the game grid: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Manhattan distance to another cell
    pub fn distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction of the last committed move
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any cell of the snake, head and tail included, is at `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Commit a move: `new_head` becomes the head and the tail is dropped
    /// unless the snake is growing.
    pub fn advance_to(&mut self, new_head: Position, direction: Direction, grow: bool) {
        self.body.insert(0, new_head);
        self.direction = direction;

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
///
/// This is a plain value: the engine mutates it, the renderer reads it and
/// nothing else holds a reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub high_score: u32,
    pub steps: u32,
    pub phase: GamePhase,
    /// Direction the next tick will move in (last valid request wins)
    pub next_direction: Direction,
    /// Whether the current game has beaten the previous high score
    pub new_record: bool,
    /// Grid size reported by a resize that arrived mid-game
    pub pending_grid: Option<(usize, usize)>,
}

impl GameState {
    /// Create a new game state in the Ready phase
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        let next_direction = snake.direction;
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            high_score: 0,
            steps: 0,
            phase: GamePhase::Ready,
            next_direction,
            new_record: false,
            pending_grid: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }
}
