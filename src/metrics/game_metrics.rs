use std::time::{Duration, Instant};

/// Per-session statistics shown next to the board
///
/// Play time only accumulates while the game is running, so pauses and the
/// game over screen do not count.
pub struct GameMetrics {
    running_since: Option<Instant>,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub best_this_session: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            elapsed_time: Duration::ZERO,
            games_played: 0,
            best_this_session: 0,
        }
    }

    /// Fold the running stretch into `elapsed_time`
    pub fn update(&mut self) {
        if let Some(since) = self.running_since {
            let now = Instant::now();
            self.elapsed_time += now - since;
            self.running_since = Some(now);
        }
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        self.update();
        self.running_since = None;
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.games_played += 1;
        self.best_this_session = self.best_this_session.max(final_score);
    }

    /// Stop the timer and clear the time of the abandoned game
    pub fn on_reset(&mut self) {
        self.running_since = None;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
