//! Simulation clock
//!
//! A clock decides when the next tick fires. It knows nothing about the game:
//! it is armed with an [`IntervalProvider`] and told to stop or restart
//! through the [`ClockCommand`]s that game operations return.
//!
//! - [`IntervalClock`] ticks in real time on the tokio runtime
//! - [`ManualClock`] only moves when told to, for tests and fixed-step drivers

pub mod interval;
pub mod manual;

use std::time::Duration;

use crate::game::{ClockCommand, GameState};

pub use interval::IntervalClock;
pub use manual::ManualClock;

/// Source of the period between two ticks
pub trait IntervalProvider {
    fn tick_interval(&self) -> Duration;
}

impl IntervalProvider for GameState {
    fn tick_interval(&self) -> Duration {
        GameState::tick_interval(self)
    }
}

impl IntervalProvider for Duration {
    fn tick_interval(&self) -> Duration {
        *self
    }
}

/// Periodic driver for `GameState::step`
pub trait SimulationClock {
    /// Start ticking with the provider's current interval, replacing any running schedule
    fn arm(&mut self, provider: &dyn IntervalProvider);

    /// Stop ticking. A tick already being handled is not affected.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;

    /// Restart the schedule with a fresh interval. Phase is not preserved.
    fn reschedule(&mut self, provider: &dyn IntervalProvider) {
        if self.is_armed() {
            self.disarm();
            self.arm(provider);
        }
    }

    fn apply(&mut self, command: ClockCommand, provider: &dyn IntervalProvider) {
        match command {
            ClockCommand::Keep => {}
            ClockCommand::Arm => self.arm(provider),
            ClockCommand::Disarm => self.disarm(),
            ClockCommand::Reschedule => self.reschedule(provider),
        }
    }
}
