//! Cooperative periodic timers.
//!
//! Nothing here owns a thread or a runtime task. A [`Ticker`] remembers when
//! it is next due, and whoever drives the event loop asks it how many periods
//! have elapsed since the last check. Dropping or cancelling the ticker is
//! all it takes to stop it.

/// A periodic timer driven by an external millisecond clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Ticker {
    /// An inactive ticker with the given period. A zero period is treated
    /// as one millisecond.
    #[must_use]
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due_ms: None,
        }
    }

    /// The period in milliseconds.
    #[must_use]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Start (or restart) so the first period ends at `now_ms + period`.
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    /// Stop firing.
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    /// Whether the ticker is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Number of whole periods that ended at or before `now_ms` since the
    /// last call. Inactive tickers always return 0.
    pub fn elapsed(&mut self, now_ms: u64) -> u64 {
        let Some(due) = self.next_due_ms else {
            return 0;
        };
        if now_ms < due {
            return 0;
        }
        let fired = (now_ms - due) / self.period_ms + 1;
        self.next_due_ms = Some(due + fired * self.period_ms);
        fired
    }
}
