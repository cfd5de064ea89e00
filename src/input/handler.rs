use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Difficulty, Direction};

/// What a key press asks the game or the UI to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    /// Start a game, or restart after game over
    Start,
    TogglePause,
    Reset,
    SelectDifficulty(Difficulty),
    SpeedUp,
    SpeedDown,
    ToggleWalls,
    ToggleGrid,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Lifecycle
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,

            // Settings
            KeyCode::Char('1') => KeyAction::SelectDifficulty(Difficulty::Easy),
            KeyCode::Char('2') => KeyAction::SelectDifficulty(Difficulty::Medium),
            KeyCode::Char('3') => KeyAction::SelectDifficulty(Difficulty::Hard),
            KeyCode::Char('4') => KeyAction::SelectDifficulty(Difficulty::Extreme),
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::SpeedUp,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::SpeedDown,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::ToggleWalls,
            KeyCode::Char('g') | KeyCode::Char('G') => KeyAction::ToggleGrid,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Turn(Direction::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Turn(Direction::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Turn(Direction::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Turn(Direction::Up));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Turn(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Turn(Direction::Down));
        assert_eq!(press(KeyCode::Char('d')), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();
        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), KeyAction::Turn(Direction::Up));
    }

    #[test]
    fn test_lifecycle_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Start);
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Reset);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Reset);
    }

    #[test]
    fn test_settings_keys() {
        assert_eq!(
            press(KeyCode::Char('1')),
            KeyAction::SelectDifficulty(Difficulty::Easy)
        );
        assert_eq!(
            press(KeyCode::Char('4')),
            KeyAction::SelectDifficulty(Difficulty::Extreme)
        );
        assert_eq!(press(KeyCode::Char('+')), KeyAction::SpeedUp);
        assert_eq!(press(KeyCode::Char('-')), KeyAction::SpeedDown);
        assert_eq!(press(KeyCode::Char('c')), KeyAction::ToggleWalls);
        assert_eq!(press(KeyCode::Char('g')), KeyAction::ToggleGrid);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }
}
