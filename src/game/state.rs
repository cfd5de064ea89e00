use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use super::{
    action::{Command, Direction},
    config::GameConfig,
    difficulty::{self, Difficulty},
    snake::{Position, Snake},
};

/// Random probes before falling back to scanning the free cells
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Points for each food eaten. Speed-up thresholds assume this step size.
pub const FOOD_REWARD: u32 = 10;

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// No game in progress
    Idle,
    Running,
    Paused,
    /// Game finished; the final snake and score stay visible
    Over,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Head left the grid with wall collision enabled
    Wall,
    /// Head ran into the body
    SelfCollision,
    /// Snake covers every cell, nothing left to eat
    BoardFull,
}

/// What the simulation clock has to do after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockCommand {
    /// Leave the clock as it is
    #[default]
    Keep,
    /// Start ticking
    Arm,
    /// Stop ticking
    Disarm,
    /// The speed changed: restart with the new interval
    Reschedule,
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set when this step ended the game
    pub end_reason: Option<EndReason>,
    /// Set when the finished game beat the stored high score
    pub new_high_score: Option<u32>,
    pub clock: ClockCommand,
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Snake cells, head first; empty while idle
    pub snake: &'a [Position],
    pub food: Option<Position>,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    /// The finished game beat the previous high score
    pub new_high_score: bool,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub speed: f32,
    pub difficulty: Difficulty,
    pub wall_collision: bool,
    pub steps: u32,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

/// Authoritative state of the game and the only place it is mutated
///
/// Operations never fail: commands that make no sense in the current status
/// are ignored, out-of-range values are clamped. Each operation reports the
/// [`ClockCommand`] the caller must apply to its clock.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snake: Option<Snake>,
    food: Option<Position>,
    status: GameStatus,
    end_reason: Option<EndReason>,
    score: u32,
    high_score: u32,
    new_record: bool,
    speed: f32,
    difficulty: Difficulty,
    wall_collision: bool,
    steps: u32,
    rng: StdRng,
}

impl GameState {
    /// Create an idle game; `high_score` is the value loaded from storage
    ///
    /// The config is checked with [`GameConfig::validate`] when a game starts.
    /// An unplayable config keeps the state idle.
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        Self::with_rng(config, high_score, StdRng::from_entropy())
    }

    /// Same as [`GameState::new`] with reproducible food placement
    pub fn with_seed(config: GameConfig, high_score: u32, seed: u64) -> Self {
        Self::with_rng(config, high_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, high_score: u32, rng: StdRng) -> Self {
        let difficulty = config.difficulty;
        let wall_collision = config.wall_collision;
        Self {
            config,
            snake: None,
            food: None,
            status: GameStatus::Idle,
            end_reason: None,
            score: 0,
            high_score,
            new_record: false,
            speed: difficulty.initial_speed(),
            difficulty,
            wall_collision,
            steps: 0,
            rng,
        }
    }

    /// Build a running game from an explicit snake and food layout
    pub fn from_layout(config: GameConfig, snake: Snake, food: Position) -> Self {
        let mut state = Self::new(config, 0);
        state.snake = Some(snake);
        state.food = Some(food);
        state.status = GameStatus::Running;
        state
    }

    /// Dispatch a control command
    pub fn apply(&mut self, command: Command) -> ClockCommand {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::Restart => {
                let clock = self.reset();
                match self.start() {
                    ClockCommand::Arm => ClockCommand::Arm,
                    _ => clock,
                }
            }
            Command::Turn(direction) => {
                self.set_direction(direction);
                ClockCommand::Keep
            }
            Command::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
            Command::SetSpeed(speed) => self.set_speed(speed),
            Command::SetWallCollision(enabled) => {
                self.set_wall_collision(enabled);
                ClockCommand::Keep
            }
        }
    }

    /// Begin a fresh game from idle or game over; resumes a paused game
    pub fn start(&mut self) -> ClockCommand {
        match self.status {
            GameStatus::Running => ClockCommand::Keep,
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::Over => {
                if let Err(err) = self.config.validate() {
                    log::warn!("Cannot start a game: {:#}", err);
                    return ClockCommand::Keep;
                }
                self.init_game();
                ClockCommand::Arm
            }
        }
    }

    fn init_game(&mut self) {
        let snake = Snake::new(
            self.config.initial_head(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        self.food = spawn_food(
            &mut self.rng,
            &snake,
            self.config.grid_width,
            self.config.grid_height,
        );
        self.snake = Some(snake);
        self.score = 0;
        self.steps = 0;
        self.end_reason = None;
        self.new_record = false;
        self.speed = self.difficulty.initial_speed();
        self.status = GameStatus::Running;

        log::info!(
            "Game started on {}x{} grid, difficulty {}, walls {}",
            self.config.grid_width,
            self.config.grid_height,
            self.difficulty,
            if self.wall_collision { "on" } else { "off" }
        );
    }

    pub fn pause(&mut self) -> ClockCommand {
        if self.status != GameStatus::Running {
            return ClockCommand::Keep;
        }
        self.status = GameStatus::Paused;
        ClockCommand::Disarm
    }

    pub fn resume(&mut self) -> ClockCommand {
        if self.status != GameStatus::Paused {
            return ClockCommand::Keep;
        }
        self.status = GameStatus::Running;
        ClockCommand::Arm
    }

    pub fn toggle_pause(&mut self) -> ClockCommand {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::Over => ClockCommand::Keep,
        }
    }

    /// Drop the current game; settings and the high score are kept
    pub fn reset(&mut self) -> ClockCommand {
        self.snake = None;
        self.food = None;
        self.score = 0;
        self.steps = 0;
        self.end_reason = None;
        self.new_record = false;
        self.status = GameStatus::Idle;
        ClockCommand::Disarm
    }

    /// Advance the game by one tick. Does nothing unless running.
    pub fn step(&mut self) -> StepResult {
        if self.status != GameStatus::Running {
            return StepResult::default();
        }

        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let wall_collision = self.wall_collision;
        let Some(snake) = self.snake.as_mut() else {
            return StepResult::default();
        };

        let direction = snake.commit_direction();
        let candidate = snake.head().moved_in_direction(direction);

        let new_head = if wall_collision {
            if !candidate.is_within(width, height) {
                return self.finish(EndReason::Wall);
            }
            candidate
        } else {
            candidate.wrapped(width, height)
        };

        if snake.collides_with_body(new_head) {
            return self.finish(EndReason::SelfCollision);
        }

        let ate_food = self.food == Some(new_head);
        snake.advance(new_head, ate_food);
        let length = snake.len();
        self.steps += 1;

        if !ate_food {
            return StepResult::default();
        }

        self.score += FOOD_REWARD;

        if length >= self.config.cell_count() {
            self.food = None;
            return StepResult {
                ate_food: true,
                ..self.finish(EndReason::BoardFull)
            };
        }

        if let Some(snake) = &self.snake {
            self.food = spawn_food(&mut self.rng, snake, width, height);
        }

        let previous = self.speed;
        self.speed = difficulty::speed_after_food(self.speed, self.score, self.difficulty);
        let clock = if self.speed != previous {
            log::info!("Speed up to {} at score {}", self.speed, self.score);
            ClockCommand::Reschedule
        } else {
            ClockCommand::Keep
        };

        StepResult {
            ate_food: true,
            end_reason: None,
            new_high_score: None,
            clock,
        }
    }

    fn finish(&mut self, reason: EndReason) -> StepResult {
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);

        self.new_record = self.score > self.high_score;
        let new_high_score = if self.new_record {
            self.high_score = self.score;
            Some(self.score)
        } else {
            None
        };

        log::info!(
            "Game over ({:?}) with score {} after {} steps",
            reason,
            self.score,
            self.steps
        );

        StepResult {
            ate_food: false,
            end_reason: Some(reason),
            new_high_score,
            clock: ClockCommand::Disarm,
        }
    }

    /// Queue a heading for the next tick; reversing the current heading is ignored
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        match self.snake.as_mut() {
            Some(snake) => snake.request_direction(direction),
            None => false,
        }
    }

    pub fn set_wall_collision(&mut self, enabled: bool) {
        self.wall_collision = enabled;
    }

    /// Select a difficulty and jump to its initial speed
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> ClockCommand {
        self.difficulty = difficulty;
        self.speed = difficulty.initial_speed();
        self.reschedule_if_running()
    }

    /// Manual speed override, clamped to `[MIN_SPEED, MAX_SPEED]`
    pub fn set_speed(&mut self, speed: f32) -> ClockCommand {
        if !speed.is_finite() {
            return ClockCommand::Keep;
        }
        let speed = difficulty::clamp_speed(speed);
        if speed == self.speed {
            return ClockCommand::Keep;
        }
        self.speed = speed;
        self.reschedule_if_running()
    }

    fn reschedule_if_running(&self) -> ClockCommand {
        if self.status == GameStatus::Running {
            ClockCommand::Reschedule
        } else {
            ClockCommand::Keep
        }
    }

    /// Interval between ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        difficulty::tick_interval(self.speed)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            snake: self.snake.as_ref().map(|s| s.body.as_slice()).unwrap_or(&[]),
            food: self.food,
            direction: self
                .snake
                .as_ref()
                .map(|s| s.direction)
                .unwrap_or(Direction::Right),
            score: self.score,
            high_score: self.high_score,
            new_high_score: self.new_record,
            status: self.status,
            end_reason: self.end_reason,
            speed: self.speed,
            difficulty: self.difficulty,
            wall_collision: self.wall_collision,
            steps: self.steps,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn wall_collision(&self) -> bool {
        self.wall_collision
    }
}

/// Pick a uniformly random cell not covered by the snake
///
/// Returns `None` only when the snake fills the whole grid.
fn spawn_food<R: Rng>(rng: &mut R, snake: &Snake, width: usize, height: usize) -> Option<Position> {
    if snake.len() >= width * height {
        return None;
    }

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    // Crowded grid: choose among the free cells directly
    let free: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
        .filter(|pos| !snake.occupies(*pos))
        .collect();
    free.choose(rng).copied()
}
