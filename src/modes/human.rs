use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::clock::IntervalClock;
use crate::game::{Command, GameConfig, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::HighScoreStore;
use crate::render::Renderer;
use crate::session::GameSession;

/// Keyboard-driven game in the terminal
///
/// All game mutation happens inside the single `select!` loop of
/// [`HumanMode::run`], so ticks and key presses never interleave.
pub struct HumanMode<S: HighScoreStore> {
    session: GameSession<IntervalClock, S>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    show_grid: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(config: GameConfig, store: S, seed: Option<u64>) -> Self {
        let clock = IntervalClock::new();
        let session = match seed {
            Some(seed) => GameSession::with_seed(config, clock, store, seed),
            None => GameSession::new(config, clock, store),
        };

        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            show_grid: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, silent while the clock is disarmed
                _ = self.session.clock_mut().tick() => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics, self.show_grid);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let snapshot = self.session.snapshot();
        let (status, speed, walls) = (snapshot.status, snapshot.speed, snapshot.wall_collision);

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                // Steering only counts while the snake is moving
                if status == GameStatus::Running {
                    self.dispatch(direction.into());
                }
            }
            KeyAction::Start => {
                let command = if status == GameStatus::Over {
                    Command::Restart
                } else {
                    Command::Start
                };
                self.dispatch(command);
            }
            KeyAction::TogglePause => self.dispatch(Command::TogglePause),
            KeyAction::Reset => self.dispatch(Command::Reset),
            KeyAction::SelectDifficulty(difficulty) => {
                self.dispatch(Command::SetDifficulty(difficulty))
            }
            KeyAction::SpeedUp => self.dispatch(Command::SetSpeed((speed + 1.0).floor())),
            KeyAction::SpeedDown => self.dispatch(Command::SetSpeed((speed - 1.0).ceil())),
            KeyAction::ToggleWalls => self.dispatch(Command::SetWallCollision(!walls)),
            KeyAction::ToggleGrid => self.show_grid = !self.show_grid,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn dispatch(&mut self, command: Command) {
        let before = self.session.snapshot().status;
        self.session.handle(command);
        let after = self.session.snapshot().status;

        if command == Command::Restart || (before != after && after == GameStatus::Running) {
            if before == GameStatus::Paused {
                self.metrics.on_resume();
            } else {
                self.metrics.on_game_start();
            }
        } else if after == GameStatus::Paused && before == GameStatus::Running {
            self.metrics.on_pause();
        } else if after == GameStatus::Idle && before != GameStatus::Idle {
            self.metrics.on_reset();
        }
    }

    fn on_tick(&mut self) {
        let result = self.session.tick();

        if result.end_reason.is_some() {
            self.metrics.on_game_over(self.session.snapshot().score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulationClock;
    use crate::game::{Difficulty, Direction};
    use crate::persistence::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore> {
        HumanMode::new(GameConfig::default(), MemoryStore::with_score(20), Some(5))
    }

    fn press(mode: &mut HumanMode<MemoryStore>, code: KeyCode) {
        mode.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        let snapshot = mode.session.snapshot();
        assert_eq!(snapshot.status, GameStatus::Idle);
        assert_eq!(snapshot.high_score, 20);
        assert!(!mode.session.clock().is_armed());
    }

    #[tokio::test]
    async fn test_start_pause_and_reset_keys() {
        let mut mode = mode();

        press(&mut mode, KeyCode::Enter);
        assert_eq!(mode.session.snapshot().status, GameStatus::Running);
        assert!(mode.session.clock().is_armed());

        press(&mut mode, KeyCode::Char(' '));
        assert_eq!(mode.session.snapshot().status, GameStatus::Paused);
        assert!(!mode.session.clock().is_armed());

        press(&mut mode, KeyCode::Char(' '));
        assert_eq!(mode.session.snapshot().status, GameStatus::Running);

        press(&mut mode, KeyCode::Char('r'));
        assert_eq!(mode.session.snapshot().status, GameStatus::Idle);
        assert!(!mode.session.clock().is_armed());
    }

    #[tokio::test]
    async fn test_turns_ignored_while_paused() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Enter);
        press(&mut mode, KeyCode::Char(' '));
        press(&mut mode, KeyCode::Up);

        let pending = mode.session.state().snake().unwrap().pending_direction;
        assert_eq!(pending, Direction::Right);

        press(&mut mode, KeyCode::Char(' '));
        press(&mut mode, KeyCode::Up);
        let pending = mode.session.state().snake().unwrap().pending_direction;
        assert_eq!(pending, Direction::Up);
    }

    #[tokio::test]
    async fn test_settings_keys() {
        let mut mode = mode();

        press(&mut mode, KeyCode::Char('1'));
        assert_eq!(mode.session.snapshot().difficulty, Difficulty::Easy);
        assert_eq!(mode.session.snapshot().speed, 3.0);

        press(&mut mode, KeyCode::Char('+'));
        assert_eq!(mode.session.snapshot().speed, 4.0);
        press(&mut mode, KeyCode::Char('-'));
        press(&mut mode, KeyCode::Char('-'));
        assert_eq!(mode.session.snapshot().speed, 2.0);

        assert!(mode.session.snapshot().wall_collision);
        press(&mut mode, KeyCode::Char('c'));
        assert!(!mode.session.snapshot().wall_collision);

        press(&mut mode, KeyCode::Char('g'));
        assert!(mode.show_grid);

        press(&mut mode, KeyCode::Char('q'));
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_enter_after_game_over_restarts() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Enter);
        press(&mut mode, KeyCode::Up);
        while mode.session.snapshot().status == GameStatus::Running {
            mode.on_tick();
        }
        assert_eq!(mode.metrics.games_played, 1);

        press(&mut mode, KeyCode::Enter);
        let snapshot = mode.session.snapshot();
        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.snake.len(), 3);
    }
}
