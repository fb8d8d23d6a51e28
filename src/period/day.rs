// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar day.

use super::{Month, Quarter, RegularTimePeriod, Year};
use crate::calendar::{days_in_month, Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::fmt;
use tracing::trace;

/// A single calendar day between 1 January 1900 and 31 December 9999.
///
/// The serial index counts days from 30 December 1899, so 1 January 1900 is
/// day 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Day {
    date: NaiveDate,
}

impl Day {
    /// Serial index of 1 January 1900.
    pub const SERIAL_LOWER_BOUND: i64 = 2;
    /// Serial index of 31 December 9999.
    pub const SERIAL_UPPER_BOUND: i64 = 2_958_465;

    /// Creates a day, validating each field against the calendar.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::{Day, RegularTimePeriod};
    ///
    /// let day = Day::new(29, 2, 2000).unwrap();
    /// assert_eq!(day.serial_index(), 36_585);
    /// assert!(Day::new(29, 2, 2001).is_err());
    /// ```
    pub fn new(day: u32, month: u32, year: i32) -> PeriodResult<Self> {
        let year = Year::new(year)?;
        check_range("month", i64::from(month), 1, 12)?;
        let max_day = days_in_month(month, year.value());
        check_range("day", i64::from(day), 1, i64::from(max_day))?;
        Ok(Day {
            date: crate::calendar::date(year.value(), month, day),
        })
    }

    /// Creates a day from a chrono date in the supported year range.
    pub fn from_date(date: NaiveDate) -> PeriodResult<Self> {
        Year::new(date.year())?;
        Ok(Day { date })
    }

    /// Creates a day from its serial index.
    pub fn from_serial(serial: i64) -> PeriodResult<Self> {
        check_range("day serial", serial, Self::SERIAL_LOWER_BOUND, Self::SERIAL_UPPER_BOUND)?;
        let date = serial::date_from_serial(serial).expect("serial within supported range");
        Ok(Day { date })
    }

    /// The day containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        Day::from_date(calendar.local_time(instant)?.date())
    }

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    #[inline]
    pub fn month_value(&self) -> u32 {
        self.date.month()
    }

    #[inline]
    pub fn year_value(&self) -> i32 {
        self.date.year()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn year(&self) -> Year {
        Year::new(self.year_value()).expect("day within supported years")
    }

    pub fn month(&self) -> Month {
        Month::from_validated(self.month_value(), self.year())
    }

    pub fn quarter(&self) -> Quarter {
        self.month().quarter()
    }

    fn within_range(date: NaiveDate) -> bool {
        (Year::MINIMUM..=Year::MAXIMUM).contains(&date.year())
    }
}

impl RegularTimePeriod for Day {
    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn serial_index(&self) -> i64 {
        serial::day_serial(self.date)
    }

    fn next(&self) -> Option<Self> {
        match self.date.succ_opt().filter(|d| Day::within_range(*d)) {
            Some(date) => Some(Day { date }),
            None => {
                trace!(period = %self, "no next day within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        match self.date.pred_opt().filter(|d| Day::within_range(*d)) {
            Some(date) => Some(Day { date }),
            None => {
                trace!(period = %self, "no previous day within supported range");
                None
            }
        }
    }

    fn local_start(&self, _rule: WeekRule) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        self.local_start(rule) + chrono::Days::new(1)
    }

    fn iso_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.day_of_month(),
            self.month().name(),
            self.year_value()
        )
    }
}

impl From<Day> for NaiveDate {
    fn from(day: Day) -> Self {
        day.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PeriodError;
    use chrono_tz::Tz;

    #[test]
    fn test_field_validation() {
        assert!(Day::new(31, 4, 2001).is_err());
        assert!(Day::new(29, 2, 1900).is_err());
        assert!(Day::new(0, 1, 2000).is_err());
        assert!(matches!(
            Day::new(1, 13, 2000),
            Err(PeriodError::Range { field: "month", .. })
        ));
        assert!(matches!(
            Day::new(1, 1, 1899),
            Err(PeriodError::Range { field: "year", .. })
        ));
    }

    #[test]
    fn test_equal_days_hash_alike() {
        use std::collections::hash_map::DefaultHasher;
        use std::collections::HashSet;
        use std::hash::{Hash, Hasher};

        fn hash_of(day: &Day) -> u64 {
            let mut hasher = DefaultHasher::new();
            day.hash(&mut hasher);
            hasher.finish()
        }

        let a = Day::new(29, 2, 2004).unwrap();
        let b = Day::new(29, 2, 2004).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(Day::from_serial(a.serial_index()).map(|d| hash_of(&d)), Ok(hash_of(&a)));
        let set: HashSet<Day> = [a, b, Day::new(1, 3, 2004).unwrap()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serial_fixtures() {
        assert_eq!(Day::new(1, 1, 1900).unwrap().serial_index(), 2);
        assert_eq!(Day::new(15, 4, 2000).unwrap().serial_index(), 36_631);
        assert_eq!(Day::new(31, 12, 2001).unwrap().serial_index(), 37_256);
        assert_eq!(Day::new(31, 12, 9999).unwrap().serial_index(), Day::SERIAL_UPPER_BOUND);
    }

    #[test]
    fn test_from_serial() {
        assert_eq!(Day::from_serial(36_631).unwrap(), Day::new(15, 4, 2000).unwrap());
        assert!(Day::from_serial(1).is_err());
        assert!(Day::from_serial(Day::SERIAL_UPPER_BOUND + 1).is_err());
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(Day::new(1, 1, 1900).unwrap().previous(), None);
        assert_eq!(Day::new(31, 12, 9999).unwrap().next(), None);
        assert_eq!(Day::new(28, 2, 2000).unwrap().next(), Some(Day::new(29, 2, 2000).unwrap()));
        assert_eq!(Day::new(1, 3, 2001).unwrap().previous(), Some(Day::new(28, 2, 2001).unwrap()));
    }

    #[test]
    fn test_parents() {
        let day = Day::new(15, 8, 2003).unwrap();
        assert_eq!(day.month(), Month::new(8, 2003).unwrap());
        assert_eq!(day.quarter(), Quarter::new(3, 2003).unwrap());
        assert_eq!(day.year(), Year::new(2003).unwrap());
        assert_eq!(day.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_month_boundary_by_zone() {
        let gmt = Calendar::for_zone(Tz::Etc__GMT);
        assert_eq!(
            Day::from_instant(1_078_099_199_999, &gmt).unwrap(),
            Day::new(29, 2, 2004).unwrap()
        );
        assert_eq!(
            Day::from_instant(1_078_099_200_000, &gmt).unwrap(),
            Day::new(1, 3, 2004).unwrap()
        );
        let helsinki = Calendar::for_zone(Tz::Europe__Helsinki);
        assert_eq!(
            Day::from_instant(1_078_091_999_999, &helsinki).unwrap(),
            Day::new(29, 2, 2004).unwrap()
        );
        assert_eq!(
            Day::from_instant(1_078_092_000_000, &helsinki).unwrap(),
            Day::new(1, 3, 2004).unwrap()
        );
    }

    #[test]
    fn test_bounds_fixtures() {
        let la = Tz::America__Los_Angeles;
        assert_eq!(Day::new(26, 4, 1950).unwrap().first_instant(la), Ok(-621_187_200_000));
        assert_eq!(Day::new(1, 2, 1950).unwrap().last_instant(la), Ok(-628_358_400_001));
        let london = Tz::Europe__London;
        assert_eq!(Day::new(1, 3, 1970).unwrap().first_instant(london), Ok(5_094_000_000));
        assert_eq!(Day::new(1, 1, 1970).unwrap().last_instant(london), Ok(82_799_999));
        assert_eq!(Day::new(4, 5, 2001).unwrap().last_instant(london), Ok(989_017_199_999));
    }

    #[test]
    fn test_display_and_iso() {
        let day = Day::new(5, 3, 2000).unwrap();
        assert_eq!(day.to_string(), "5-March-2000");
        assert_eq!(day.iso_string(), "2000-03-05");
    }
}
