use super::action::Direction;

/// A cell on the game grid
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

    /// Reduce coordinates modulo the grid size; the result is never negative
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }

    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.x < width as i32 && self.y >= 0 && self.y < height as i32
    }
}

/// The snake, head first
///
/// Holds two headings: `direction` is the one applied by the last tick and
/// `pending_direction` is what input asked for the next tick. Reversal checks
/// compare against `direction`, so two quick turns inside one tick can never
/// point the head back into the neck.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    pub direction: Direction,
    pub pending_direction: Direction,
}

impl Snake {
    /// Create a straight snake of `length` cells trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending_direction: direction,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Store a requested heading unless it reverses the current one
    ///
    /// Returns true when the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Promote the pending heading and return it
    pub fn commit_direction(&mut self) -> Direction {
        self.direction = self.pending_direction;
        self.direction
    }

    /// True if `pos` hits a segment that stays in place this tick.
    ///
    /// The tail is skipped because it moves away on a regular step.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        let staying = self.body.len().saturating_sub(1);
        self.body[..staying].contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`; keep the tail when growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(Position::new(-1, 3).wrapped(10, 8), Position::new(9, 3));
        assert_eq!(Position::new(10, 3).wrapped(10, 8), Position::new(0, 3));
        assert_eq!(Position::new(4, -1).wrapped(10, 8), Position::new(4, 7));
        assert_eq!(Position::new(4, 8).wrapped(10, 8), Position::new(4, 0));
        assert_eq!(Position::new(4, 4).wrapped(10, 8), Position::new(4, 4));
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).is_within(20, 10));
        assert!(Position::new(19, 9).is_within(20, 10));
        assert!(!Position::new(-1, 0).is_within(20, 10));
        assert!(!Position::new(20, 0).is_within(20, 10));
        assert!(!Position::new(0, 10).is_within(20, 10));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(6, 10), Direction::Right, 3);
        assert_eq!(
            snake.body,
            vec![Position::new(6, 10), Position::new(5, 10), Position::new(4, 10)]
        );
        assert_eq!(snake.pending_direction, Direction::Right);

        let unique: HashSet<_> = snake.body.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(vec![], Direction::Up).is_none());
        let snake = Snake::from_segments(vec![Position::new(1, 1)], Direction::Up).unwrap();
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn test_reverse_request_is_rejected() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction, Direction::Right);

        // Up then Left within one tick: Left is checked against Right, not Up
        assert!(snake.request_direction(Direction::Up));
        assert!(!snake.request_direction(Direction::Left));
        assert_eq!(snake.pending_direction, Direction::Up);

        assert_eq!(snake.commit_direction(), Direction::Up);
        assert!(snake.request_direction(Direction::Left));
    }

    #[test]
    fn test_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_collision_skips_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(!snake.collides_with_body(Position::new(3, 5))); // tail
        assert!(!snake.collides_with_body(Position::new(10, 10)));
        assert!(snake.occupies(Position::new(3, 5)));
    }
}
