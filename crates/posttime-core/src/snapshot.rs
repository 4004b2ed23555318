//! Time snapshot extraction.
//!
//! A [`TimeSnapshot`] is the hour/day/minute view of exactly one local
//! instant. Reading the clock is kept behind the [`Clock`] trait so the
//! engine can be exercised with literal instants.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// Hour, day-of-week and minute of a single local instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    at: NaiveDateTime,
}

impl TimeSnapshot {
    /// Snapshot of the current local time.
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// Snapshot of an explicit local instant.
    pub fn at(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u8 {
        self.at.hour() as u8
    }

    /// Day of week (0-6, Sunday=0)
    pub fn day_of_week(&self) -> u8 {
        self.at.weekday().num_days_from_sunday() as u8
    }

    /// Minute of hour (0-59)
    pub fn minute(&self) -> u8 {
        self.at.minute() as u8
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.day_of_week(), 0 | 6)
    }

    /// The instant this snapshot was taken from.
    pub fn instant(&self) -> NaiveDateTime {
        self.at
    }
}

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn snapshot(&self) -> TimeSnapshot {
        TimeSnapshot::at(self.now())
    }
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn fields_derive_from_instant() {
        // 2024-06-08 is a Saturday
        let snap = TimeSnapshot::at(at(2024, 6, 8, 16, 50));
        assert_eq!(snap.hour(), 16);
        assert_eq!(snap.minute(), 50);
        assert_eq!(snap.day_of_week(), 6);
        assert!(snap.is_weekend());
    }

    #[test]
    fn sunday_is_zero() {
        let snap = TimeSnapshot::at(at(2024, 6, 9, 0, 0));
        assert_eq!(snap.day_of_week(), 0);
        assert!(snap.is_weekend());
    }

    #[test]
    fn weekday_is_not_weekend() {
        // Monday
        let snap = TimeSnapshot::at(at(2024, 6, 10, 10, 0));
        assert_eq!(snap.day_of_week(), 1);
        assert!(!snap.is_weekend());
    }

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let instant = at(2024, 6, 10, 23, 5);
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.snapshot().instant(), instant);
    }

    #[test]
    fn now_is_in_range() {
        let snap = TimeSnapshot::now();
        assert!(snap.hour() < 24);
        assert!(snap.day_of_week() < 7);
        assert!(snap.minute() < 60);
    }
}
