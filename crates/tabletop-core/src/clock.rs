//! Clock abstraction for determinism.
//!
//! Grids, scenes and campaigns never read the system time directly; every
//! timestamp they record comes from the `Clock` handed to the mutating call.

use chrono::{DateTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough_for_timestamps() {
        // Arrange
        let clock = SystemClock;

        // Act
        let first = clock.now();
        let second = clock.now();

        // Assert
        assert!(second >= first);
    }
}
