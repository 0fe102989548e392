//! Session clock: active time with second/minute/hour carry.

use serde::{Deserialize, Serialize};

/// Elapsed active time within the current period.
///
/// Advanced by the caller once per wall-clock second; never reads the
/// system clock itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    pub seconds: u32,
    pub minutes: u32,
    pub hours: u32,
}

impl SessionClock {
    /// Advance by one second, carrying into minutes and hours at 60.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds == 60 {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes == 60 {
                self.minutes = 0;
                self.hours += 1;
            }
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_one_ticks_carry_into_minutes() {
        let mut clock = SessionClock::default();
        for _ in 0..61 {
            clock.tick();
        }
        assert_eq!(clock.minutes, 1);
        assert_eq!(clock.seconds, 1);
        assert_eq!(clock.hours, 0);
    }

    #[test]
    fn full_hour_carries() {
        let mut clock = SessionClock::default();
        for _ in 0..3600 {
            clock.tick();
        }
        assert_eq!(clock.hours, 1);
        assert_eq!(clock.minutes, 0);
        assert_eq!(clock.seconds, 0);
    }

    #[test]
    fn total_seconds_matches_tick_count() {
        let mut clock = SessionClock::default();
        for _ in 0..7325 {
            clock.tick();
        }
        assert_eq!(clock.total_seconds(), 7325);
    }
}
