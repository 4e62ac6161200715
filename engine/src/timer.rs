//! Timer Module
//!
//! Cooperative, single-threaded timers. Nothing here owns a thread or an
//! event loop: a driver reads the clock and asks each [`TimerSlot`] whether
//! it is due. This keeps timer behaviour deterministic under test, where a
//! [`ManualClock`] is advanced by hand.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Shortest repeat period a slot will accept. Prevents a zero period from
/// firing forever inside a single poll.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`], measured from its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and replay.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jump to an absolute time. Going backwards is allowed but pending
    /// deadlines are not rewound.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Repeat behaviour of an armed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Once,
    Every(Duration),
}

/// A cancellable handle for exactly one timer purpose.
///
/// A slot holds at most one deadline. Arming always replaces whatever was
/// armed before, so two timers for the same purpose can never coexist.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    armed: Option<(Duration, Schedule)>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer firing `delay` after `now`.
    pub fn arm_once(&mut self, now: Duration, delay: Duration) {
        self.armed = Some((now + delay, Schedule::Once));
    }

    /// Arm a repeating timer whose first tick is one `period` after `now`.
    pub fn arm_every(&mut self, now: Duration, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.armed = Some((now + period, Schedule::Every(period)));
    }

    /// Cancel any armed timer. Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Deadline of the next firing, if armed.
    pub fn deadline(&self) -> Option<Duration> {
        self.armed.map(|(deadline, _)| deadline)
    }

    /// Deadline of the next firing if it is at or before `now`.
    pub fn due(&self, now: Duration) -> Option<Duration> {
        self.deadline().filter(|deadline| *deadline <= now)
    }

    /// Consume one firing at `now`. One-shot slots disarm; repeating slots
    /// move their deadline forward by one period, or to one period after
    /// `now` when they have fallen behind, so missed ticks are dropped.
    ///
    /// Returns `false` if the slot was not armed.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.armed {
            Some((_, Schedule::Once)) => {
                self.armed = None;
                true
            }
            Some((deadline, Schedule::Every(period))) => {
                let mut next = deadline + period;
                if next <= now {
                    next = now + period;
                }
                self.armed = Some((next, Schedule::Every(period)));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(ms(250));
        clock.advance(ms(250));
        assert_eq!(clock.now(), ms(500));
    }

    #[test]
    fn test_once_fires_and_disarms() {
        let mut slot = TimerSlot::new();
        slot.arm_once(ms(100), ms(50));

        assert!(slot.due(ms(149)).is_none());
        assert_eq!(slot.due(ms(150)), Some(ms(150)));
        assert!(slot.fire(ms(150)));
        assert!(!slot.is_armed());
        assert!(!slot.fire(ms(150)));
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm_once(ms(0), ms(3000));
        slot.arm_once(ms(1000), ms(3000));

        assert!(slot.due(ms(3000)).is_none());
        assert_eq!(slot.deadline(), Some(ms(4000)));
    }

    #[test]
    fn test_every_reschedules() {
        let mut slot = TimerSlot::new();
        slot.arm_every(ms(0), ms(100));

        assert_eq!(slot.deadline(), Some(ms(100)));
        slot.fire(ms(120));
        assert_eq!(slot.deadline(), Some(ms(200)));
        assert!(slot.is_armed());
    }

    #[test]
    fn test_every_drops_missed_ticks() {
        let mut slot = TimerSlot::new();
        slot.arm_every(ms(0), ms(100));

        slot.fire(ms(1050));
        assert_eq!(slot.deadline(), Some(ms(1150)));
        assert!(slot.due(ms(1050)).is_none());
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut slot = TimerSlot::new();
        slot.arm_every(ms(10), Duration::ZERO);
        assert_eq!(slot.deadline(), Some(ms(11)));
    }

    #[test]
    fn test_cancel() {
        let mut slot = TimerSlot::new();
        assert!(!slot.cancel());
        slot.arm_every(ms(0), ms(16));
        assert!(slot.cancel());
        assert!(slot.due(ms(1000)).is_none());
    }
}
