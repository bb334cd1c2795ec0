use std::time::Duration;
use std::time::Instant;

/// Turns wall-clock progress into a number of due ticks for a host-driven event loop.
///
/// The ticker never sleeps or spawns anything; the host calls [`Ticker::poll`] with the current
/// time and runs that many ticks. A zero period or a paused ticker never reports ticks.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
    paused: bool,
    max_catch_up: u32,
}

impl Ticker {
    pub fn new(period: Duration, max_catch_up: u32) -> Self {
        Self {
            period,
            last: None,
            paused: false,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Applies from the next tick on; time already accumulated toward the current tick is kept.
    /// Leaving a zero period restarts the schedule, like [`Ticker::resume`].
    pub fn set_period(&mut self, period: Duration) {
        if self.period.is_zero() && !period.is_zero() {
            self.last = None;
        }
        self.period = period;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.last = None;
    }

    /// Restarts the schedule from the next poll, so time spent paused is not replayed.
    pub fn resume(&mut self) {
        self.paused = false;
        self.last = None;
    }

    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.paused || self.period.is_zero() {
            return 0;
        }
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };

        let elapsed = now.saturating_duration_since(last);
        let due = elapsed.as_nanos() / self.period.as_nanos();
        if due == 0 {
            return 0;
        }
        if due > self.max_catch_up as u128 {
            self.last = Some(now);
            return self.max_catch_up;
        }
        // due <= max_catch_up, so it fits in u32.
        let due = due as u32;
        self.last = Some(last + self.period * due);
        due
    }

    /// How long the host may wait before the next tick is due. `None` while nothing is scheduled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if self.paused || self.period.is_zero() {
            return None;
        }
        match self.last {
            Some(last) => Some((last + self.period).saturating_duration_since(now)),
            None => Some(Duration::ZERO),
        }
    }
}
