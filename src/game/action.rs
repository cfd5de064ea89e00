use super::difficulty::Difficulty;

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
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A command accepted by the game from the control layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a new game, or resume a paused one
    Start,
    Pause,
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    /// Drop the current game and go back to idle
    Reset,
    /// Reset then start, used after a game over
    Restart,
    /// Request a new heading for the next tick
    Turn(Direction),
    SetDifficulty(Difficulty),
    /// Manual speed override, clamped to the slider bounds
    SetSpeed(f32),
    SetWallCollision(bool),
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Turn(direction)
    }
}
