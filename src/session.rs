//! A running game wired to its clock and high score store
//!
//! [`GameSession`] is the surface the UI talks to: it forwards commands to
//! the [`GameState`], applies the resulting clock work, and persists new
//! records. Storage failures are logged and never interrupt play.

use crate::clock::SimulationClock;
use crate::game::{ClockCommand, Command, GameConfig, GameState, Snapshot, StepResult};
use crate::persistence::HighScoreStore;

pub struct GameSession<C: SimulationClock, S: HighScoreStore> {
    state: GameState,
    clock: C,
    store: S,
}

impl<C: SimulationClock, S: HighScoreStore> GameSession<C, S> {
    pub fn new(config: GameConfig, clock: C, store: S) -> Self {
        let high_score = load_high_score(&store);
        Self::from_state(GameState::new(config, high_score), clock, store)
    }

    /// Session with reproducible food placement
    pub fn with_seed(config: GameConfig, clock: C, store: S, seed: u64) -> Self {
        let high_score = load_high_score(&store);
        Self::from_state(GameState::with_seed(config, high_score, seed), clock, store)
    }

    fn from_state(state: GameState, clock: C, store: S) -> Self {
        Self {
            state,
            clock,
            store,
        }
    }

    /// Apply a control command and update the clock accordingly
    pub fn handle(&mut self, command: Command) -> ClockCommand {
        let clock_command = self.state.apply(command);
        self.clock.apply(clock_command, &self.state);
        clock_command
    }

    /// Run one tick of the game
    pub fn tick(&mut self) -> StepResult {
        let result = self.state.step();
        self.clock.apply(result.clock, &self.state);

        if let Some(score) = result.new_high_score {
            self.save_high_score(score);
        }

        result
    }

    fn save_high_score(&mut self, score: u32) {
        match self.store.save(score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(err) => log::warn!("Could not save high score {}: {:#}", score, err),
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn load_high_score<S: HighScoreStore>(store: &S) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(err) => {
            log::warn!("Could not read high score, starting from 0: {:#}", err);
            0
        }
    }
}
