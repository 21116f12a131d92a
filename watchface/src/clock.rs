//! Minute boundaries for the tick handler

use chrono::NaiveDateTime;

/// Reports the first call within each new minute
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MinuteTicker {
    /// Minutes since the epoch at the last reported tick
    last: Option<i64>,
}

impl MinuteTicker {
    /// Return whether `now` falls into a different minute than the last call
    pub fn tick(&mut self, now: &NaiveDateTime) -> bool {
        let minute = now.and_utc().timestamp().div_euclid(60);
        if self.last == Some(minute) {
            return false;
        }
        self.last = Some(minute);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_first_call_ticks() {
        let mut ticker = MinuteTicker::default();
        assert!(ticker.tick(&at(10, 15, 42)));
    }

    #[test]
    fn test_same_minute_is_quiet() {
        let mut ticker = MinuteTicker::default();
        assert!(ticker.tick(&at(10, 15, 0)));
        assert!(!ticker.tick(&at(10, 15, 1)));
        assert!(!ticker.tick(&at(10, 15, 59)));
    }

    #[test]
    fn test_hour_rollover_ticks() {
        let mut ticker = MinuteTicker::default();
        assert!(ticker.tick(&at(10, 59, 59)));
        assert!(ticker.tick(&at(11, 0, 0)));
    }

    #[test]
    fn test_day_rollover_ticks() {
        let mut ticker = MinuteTicker::default();
        let next_day = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(ticker.tick(&at(23, 59, 30)));
        assert!(ticker.tick(&next_day));
    }

    #[test]
    fn test_skipped_minutes_tick_once() {
        let mut ticker = MinuteTicker::default();
        assert!(ticker.tick(&at(10, 15, 0)));
        assert!(ticker.tick(&at(10, 42, 10)));
        assert!(!ticker.tick(&at(10, 42, 11)));
    }
}
