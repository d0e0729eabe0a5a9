//! Single-slot cancelable timer.
//!
//! Zellij timers (`set_timeout`) cannot be cancelled once scheduled; every one
//! of them eventually arrives as a `Timer` event, and the event does not say
//! who asked for it. A [`TimerSlot`] holds at most one live deadline plus the
//! one host wake-up it is currently waiting on.
//!
//! - Arming replaces the deadline. A new host wake-up is requested only when
//!   none is outstanding or the outstanding one would arrive too late.
//! - A wake-up that arrives before the deadline re-arms the host timer only
//!   if it was this slot's own wake-up. Wake-ups requested by other slots
//!   find the slot [`TimerPoll::Waiting`] and produce nothing.
//!
//! A slot therefore keeps at most one wake-up in flight for its current
//! deadline, no matter how often it is re-armed or polled.

use std::time::{Duration, Instant};

/// Host timers may round the requested delay; a wake-up this close to the
/// expected instant still counts as the slot's own.
const WAKE_TOLERANCE: Duration = Duration::from_millis(1);

/// Outcome of checking a slot against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPoll {
    /// Nothing is armed.
    Idle,
    /// The deadline passed; the slot is now disarmed.
    Fired,
    /// Armed, not yet due, and a host wake-up is already on its way.
    Waiting,
    /// Armed and not yet due, and this slot's wake-up arrived early. Carries
    /// the time remaining, which the runtime must schedule a new wake-up for.
    Pending(Duration),
}

/// One replaceable deadline plus the host wake-up that will check it.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    deadline: Option<Instant>,
    /// Instant of the outstanding host wake-up this slot requested, if any.
    wake_at: Option<Instant>,
}

impl TimerSlot {
    /// Creates a disarmed slot with no wake-up outstanding.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadline: None,
            wake_at: None,
        }
    }

    /// Arms the slot `delay` after `now`, discarding any previous deadline.
    ///
    /// # Returns
    ///
    /// - `Some(delay)` if the runtime must schedule a host wake-up
    /// - `None` if an outstanding wake-up arrives no later than the new
    ///   deadline; it will be followed up when it arrives
    pub fn arm(&mut self, now: Instant, delay: Duration) -> Option<Duration> {
        let deadline = now + delay;
        self.deadline = Some(deadline);

        match self.wake_at {
            Some(wake) if wake <= deadline => None,
            _ => {
                self.wake_at = Some(deadline);
                Some(delay)
            }
        }
    }

    /// Disarms the slot. An outstanding host wake-up stays tracked so a later
    /// [`TimerSlot::arm`] can reuse it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Checks the slot at `now`, disarming it if the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> TimerPoll {
        let own_wake = self.wake_at.is_some_and(|wake| now + WAKE_TOLERANCE >= wake);
        if own_wake {
            self.wake_at = None;
        }

        match self.deadline {
            None => TimerPoll::Idle,
            Some(due) if now >= due => {
                self.deadline = None;
                TimerPoll::Fired
            }
            Some(due) if own_wake || self.wake_at.is_none() => {
                self.wake_at = Some(due);
                TimerPoll::Pending(due - now)
            }
            Some(_) => TimerPoll::Waiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_replaces_previous_deadline() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        assert_eq!(slot.arm(start, Duration::from_millis(300)), Some(Duration::from_millis(300)));
        // The wake-up at 300 ms is still coming, so no second one is requested.
        assert_eq!(slot.arm(start + Duration::from_millis(100), Duration::from_millis(300)), None);

        // That wake-up finds the slot not yet due and asks for the rest.
        assert_eq!(
            slot.poll(start + Duration::from_millis(300)),
            TimerPoll::Pending(Duration::from_millis(100))
        );
        assert_eq!(slot.poll(start + Duration::from_millis(400)), TimerPoll::Fired);
        assert_eq!(slot.poll(start + Duration::from_millis(500)), TimerPoll::Idle);
    }

    #[test]
    fn cancelled_slot_never_fires() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(start, Duration::from_millis(10));
        assert!(slot.is_armed());
        slot.cancel();
        assert_eq!(slot.poll(start + Duration::from_secs(1)), TimerPoll::Idle);
    }

    #[test]
    fn foreign_wake_ups_do_not_rearm() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(start, Duration::from_secs(10));

        for ms in [300, 350, 400, 5_000] {
            assert_eq!(slot.poll(start + Duration::from_millis(ms)), TimerPoll::Waiting);
        }
        assert_eq!(slot.poll(start + Duration::from_secs(10)), TimerPoll::Fired);
    }

    #[test]
    fn earlier_deadline_requests_earlier_wake_up() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(start, Duration::from_secs(10));
        assert_eq!(slot.arm(start, Duration::from_secs(2)), Some(Duration::from_secs(2)));
        assert_eq!(slot.poll(start + Duration::from_secs(2)), TimerPoll::Fired);
    }

    #[test]
    fn cancelled_wake_up_is_reused_by_next_arm() {
        let start = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(start, Duration::from_secs(1));
        slot.cancel();
        assert_eq!(slot.arm(start + Duration::from_millis(200), Duration::from_secs(1)), None);

        assert_eq!(
            slot.poll(start + Duration::from_secs(1)),
            TimerPoll::Pending(Duration::from_millis(200))
        );
        assert_eq!(slot.poll(start + Duration::from_millis(1_200)), TimerPoll::Fired);
    }
}
