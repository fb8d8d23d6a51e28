// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Hour of a day.

use super::{Day, RegularTimePeriod};
use crate::calendar::{Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use std::fmt;
use tracing::trace;

/// Hour 0..=23 of a [`Day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hour {
    day: Day,
    hour: u32,
}

impl Hour {
    pub const FIRST_HOUR_IN_DAY: u32 = 0;
    pub const LAST_HOUR_IN_DAY: u32 = 23;

    /// Creates an hour of `day`.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::{Day, Hour};
    ///
    /// let day = Day::new(5, 3, 2000).unwrap();
    /// let hour = Hour::new(7, day).unwrap();
    /// assert_eq!(hour.to_string(), "[7,5/3/2000]");
    /// assert!(Hour::new(24, day).is_err());
    /// ```
    pub fn new(hour: u32, day: Day) -> PeriodResult<Self> {
        check_range(
            "hour",
            i64::from(hour),
            i64::from(Self::FIRST_HOUR_IN_DAY),
            i64::from(Self::LAST_HOUR_IN_DAY),
        )?;
        Ok(Hour { day, hour })
    }

    /// Creates an hour from integer fields.
    pub fn from_ymd_h(year: i32, month: u32, day: u32, hour: u32) -> PeriodResult<Self> {
        Hour::new(hour, Day::new(day, month, year)?)
    }

    /// The hour containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let local = calendar.local_time(instant)?;
        Hour::new(local.hour(), Day::from_date(local.date())?)
    }

    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }
}

impl RegularTimePeriod for Hour {
    fn granularity(&self) -> Granularity {
        Granularity::Hour
    }

    fn serial_index(&self) -> i64 {
        serial::hour_index(self.day.serial_index(), self.hour)
    }

    fn next(&self) -> Option<Self> {
        if self.hour < Self::LAST_HOUR_IN_DAY {
            return Some(Hour {
                hour: self.hour + 1,
                ..*self
            });
        }
        match self.day.next() {
            Some(day) => Some(Hour {
                day,
                hour: Self::FIRST_HOUR_IN_DAY,
            }),
            None => {
                trace!(period = %self, "no next hour within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.hour > Self::FIRST_HOUR_IN_DAY {
            return Some(Hour {
                hour: self.hour - 1,
                ..*self
            });
        }
        match self.day.previous() {
            Some(day) => Some(Hour {
                day,
                hour: Self::LAST_HOUR_IN_DAY,
            }),
            None => {
                trace!(period = %self, "no previous hour within supported range");
                None
            }
        }
    }

    fn local_start(&self, rule: WeekRule) -> NaiveDateTime {
        self.day.local_start(rule) + TimeDelta::hours(i64::from(self.hour))
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        self.local_start(rule) + TimeDelta::hours(1)
    }

    fn iso_string(&self) -> String {
        format!("{} {:02}", self.day.iso_string(), self.hour)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.hour, short_date(&self.day))
    }
}

/// `d/m/yyyy` without padding, shared by the sub-day `Display` forms.
pub(crate) fn short_date(day: &Day) -> String {
    format!(
        "{}/{}/{}",
        day.day_of_month(),
        day.month_value(),
        day.year_value()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn test_range_validation() {
        let day = Day::new(1, 1, 2000).unwrap();
        assert!(Hour::new(24, day).is_err());
        assert!(Hour::new(23, day).is_ok());
        assert!(Hour::from_ymd_h(2001, 2, 29, 0).is_err());
    }

    #[test]
    fn test_navigation_crosses_days() {
        let last = Hour::from_ymd_h(1999, 12, 31, 23).unwrap();
        let first = Hour::from_ymd_h(2000, 1, 1, 0).unwrap();
        assert_eq!(last.next(), Some(first));
        assert_eq!(first.previous(), Some(last));
        assert_eq!(Hour::from_ymd_h(9999, 12, 31, 23).unwrap().next(), None);
        assert_eq!(Hour::from_ymd_h(1900, 1, 1, 0).unwrap().previous(), None);
    }

    #[test]
    fn test_serial_index() {
        assert_eq!(Hour::from_ymd_h(2000, 4, 15, 2).unwrap().serial_index(), 879_146);
    }

    #[test]
    fn test_parent() {
        let hour = Hour::from_ymd_h(2000, 4, 15, 2).unwrap();
        assert_eq!(hour.day(), Day::new(15, 4, 2000).unwrap());
        assert_eq!(hour.hour(), 2);
    }

    #[test]
    fn test_bounds_utc() {
        let hour = Hour::from_ymd_h(2000, 4, 15, 2).unwrap();
        assert_eq!(hour.first_instant(Tz::UTC), Ok(955_764_000_000));
        assert_eq!(hour.last_instant(Tz::UTC), Ok(955_767_599_999));
    }

    #[test]
    fn test_hour_skipped_by_spring_forward() {
        // London skips 01:00..02:00 on 2006-03-26.
        let london = Tz::Europe__London;
        let skipped = Hour::from_ymd_h(2006, 3, 26, 1).unwrap();
        assert_eq!(skipped.first_instant(london), Ok(1_143_334_800_000));
        assert_eq!(skipped.last_instant(london), Ok(1_143_334_800_000));
        let before = Hour::from_ymd_h(2006, 3, 26, 0).unwrap();
        assert_eq!(before.first_instant(london), Ok(1_143_331_200_000));
        assert_eq!(before.last_instant(london), Ok(1_143_334_799_999));
    }

    #[test]
    fn test_hour_repeated_by_fall_back() {
        // 01:00..02:00 happens twice in London on 2006-10-29.
        let london = Tz::Europe__London;
        let repeated = Hour::from_ymd_h(2006, 10, 29, 1).unwrap();
        assert_eq!(repeated.first_instant(london), Ok(1_162_080_000_000));
        assert_eq!(repeated.last_instant(london), Ok(1_162_087_199_999));
    }

    #[test]
    fn test_display_and_iso() {
        let hour = Hour::from_ymd_h(2000, 3, 5, 7).unwrap();
        assert_eq!(hour.to_string(), "[7,5/3/2000]");
        assert_eq!(hour.iso_string(), "2000-03-05 07");
    }
}
