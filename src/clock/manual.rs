use std::time::Duration;

use super::{IntervalProvider, SimulationClock};

/// Clock that only advances when told to
///
/// Tracks the armed period and accumulated time so a test or a fixed-step
/// driver can ask how many ticks a span of time is worth.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    period: Option<Duration>,
    elapsed: Duration,
    arm_count: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many times the clock was armed, reschedules included
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }

    /// Let `time` pass and return the number of ticks that became due
    ///
    /// A disarmed clock accumulates nothing.
    pub fn advance(&mut self, time: Duration) -> u32 {
        let Some(period) = self.period else {
            return 0;
        };

        self.elapsed += time;
        let due = self.elapsed.as_nanos() / period.as_nanos().max(1);
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        self.elapsed = self.elapsed.saturating_sub(period * due);
        due
    }
}

impl SimulationClock for ManualClock {
    fn arm(&mut self, provider: &dyn IntervalProvider) {
        self.period = Some(provider.tick_interval());
        self.elapsed = Duration::ZERO;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.period = None;
        self.elapsed = Duration::ZERO;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }
}
