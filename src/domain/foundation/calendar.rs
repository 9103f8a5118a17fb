//! Calendar-day primitives shared by the analysis window calculations.
//!
//! Every reference instant is reduced to the local calendar day it falls on
//! before any window arithmetic happens. All helpers use chrono's checked
//! operations and return `None` instead of panicking on out-of-range dates.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be reduced to a local calendar day ("start of day").
pub trait CalendarDay {
    /// Returns the calendar day this value falls on in its own time zone.
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Number of whole days between `day` and the Sunday that starts its week.
pub fn days_since_sunday(day: NaiveDate) -> u64 {
    u64::from(day.weekday().num_days_from_sunday())
}

/// First calendar day of the month containing `day`.
pub fn first_of_month(day: NaiveDate) -> Option<NaiveDate> {
    day.with_day(1)
}

/// Last calendar day of the month containing `day`, leap years included.
pub fn last_of_month(day: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if day.month() == 12 {
        (day.year().checked_add(1)?, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_sub_days(Days::new(1))
}

/// Whether two days fall in the same month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_day_uses_local_offset() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let late_evening = offset.with_ymd_and_hms(2024, 6, 1, 23, 30, 0).unwrap();

        // 04:30 UTC on June 2nd, but still June 1st for the writer.
        assert_eq!(late_evening.calendar_day(), date(2024, 6, 1));
    }

    #[test]
    fn calendar_day_for_naive_datetime_drops_time() {
        let dt = date(2024, 3, 9).and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(dt.calendar_day(), date(2024, 3, 9));
    }

    #[test]
    fn days_since_sunday_counts_from_sunday() {
        assert_eq!(days_since_sunday(date(2024, 6, 2)), 0); // Sunday
        assert_eq!(days_since_sunday(date(2024, 6, 5)), 3); // Wednesday
        assert_eq!(days_since_sunday(date(2024, 6, 8)), 6); // Saturday
    }

    #[test]
    fn last_of_month_handles_leap_february() {
        assert_eq!(last_of_month(date(2024, 2, 10)), Some(date(2024, 2, 29)));
        assert_eq!(last_of_month(date(2023, 2, 10)), Some(date(2023, 2, 28)));
    }

    #[test]
    fn last_of_month_rolls_over_december() {
        assert_eq!(last_of_month(date(2024, 12, 5)), Some(date(2024, 12, 31)));
    }

    #[test]
    fn first_of_month_is_day_one() {
        assert_eq!(first_of_month(date(2024, 7, 19)), Some(date(2024, 7, 1)));
    }

    #[test]
    fn same_month_compares_year_too() {
        assert!(same_month(date(2024, 3, 1), date(2024, 3, 31)));
        assert!(!same_month(date(2024, 3, 1), date(2025, 3, 1)));
    }
}
