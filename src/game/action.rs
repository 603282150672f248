/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction.
    /// Rows grow downwards, so `Up` decreases y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Arbitrate a direction request against the current heading.
///
/// The exact opposite of `current` is rejected (the snake would reverse into
/// its own neck); any other request is adopted.
pub fn request_direction(current: Direction, requested: Direction) -> Direction {
    if current.is_opposite(requested) {
        current
    } else {
        requested
    }
}

/// A request coming from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Change the pending direction
    Turn(Direction),
    /// Start a new game (from Ready or Ended)
    Start,
    /// Pause a running game
    Pause,
    /// Resume a paused game
    Resume,
    /// Back to a fresh Ready layout, whatever the phase
    Reset,
}
