use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use super::{IntervalProvider, SimulationClock};

/// Real-time clock backed by a tokio [`Interval`]
///
/// Meant to be polled from a `tokio::select!` loop: [`IntervalClock::tick`]
/// never completes while the clock is disarmed, so the branch simply stays
/// quiet until the game is running again.
#[derive(Debug, Default)]
pub struct IntervalClock {
    timer: Option<Interval>,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self { timer: None }
    }

    pub fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl SimulationClock for IntervalClock {
    fn arm(&mut self, provider: &dyn IntervalProvider) {
        let period = provider.tick_interval();
        // First tick one full period from now, not immediately
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        log::debug!("Clock armed with {:?} period", period);
    }

    fn disarm(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("Clock disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}
