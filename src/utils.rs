//! Shared utility types

use std::time::{Duration, Instant};

/// A fixed point in time that several waits share.
///
/// Each wait asks for the time still left, so a sequence of waits never blocks
/// longer in total than the original budget.
///
/// # Example
///
/// ```
/// use switch_testkit::utils::Deadline;
/// use std::time::Duration;
///
/// let deadline = Deadline::after(Duration::from_secs(5));
/// assert!(deadline.remaining() <= Duration::from_secs(5));
///
/// let expired = Deadline::after(Duration::ZERO);
/// assert_eq!(expired.remaining(), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self::starting_at(Instant::now(), budget)
    }

    pub fn starting_at(start: Instant, budget: Duration) -> Self {
        // Saturate instead of overflowing on absurd budgets
        let at = start
            .checked_add(budget)
            .unwrap_or_else(|| start + Duration::from_secs(u32::MAX as u64));
        Self { at }
    }

    /// Time left before the deadline, zero once it has passed
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}
