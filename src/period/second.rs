// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Second of a minute.

use super::hour::short_date;
use super::{Day, Hour, Minute, RegularTimePeriod};
use crate::calendar::{Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use std::fmt;
use tracing::trace;

/// Second 0..=59 of a [`Minute`]. Leap seconds are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Second {
    day: Day,
    hour: u32,
    minute: u32,
    second: u32,
}

impl Second {
    pub const FIRST_SECOND_IN_MINUTE: u32 = 0;
    pub const LAST_SECOND_IN_MINUTE: u32 = 59;

    /// Creates a second of `minute`.
    pub fn new(second: u32, minute: Minute) -> PeriodResult<Self> {
        check_range(
            "second",
            i64::from(second),
            i64::from(Self::FIRST_SECOND_IN_MINUTE),
            i64::from(Self::LAST_SECOND_IN_MINUTE),
        )?;
        Ok(Second::with_minute(minute, second))
    }

    /// Creates a second from integer fields.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> PeriodResult<Self> {
        Second::new(second, Minute::from_ymd_hm(year, month, day, hour, minute)?)
    }

    /// The second containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let second = calendar.local_time(instant)?.second();
        Second::new(second, Minute::from_instant(instant, calendar)?)
    }

    #[inline]
    pub const fn second(&self) -> u32 {
        self.second
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// The containing minute.
    pub fn minute(&self) -> Minute {
        let hour = Hour::new(self.hour, self.day).expect("validated hour");
        Minute::new(self.minute, hour).expect("validated minute")
    }

    fn with_minute(minute: Minute, second: u32) -> Self {
        Second {
            day: minute.day(),
            hour: minute.hour_value(),
            minute: minute.minute(),
            second,
        }
    }
}

impl RegularTimePeriod for Second {
    fn granularity(&self) -> Granularity {
        Granularity::Second
    }

    fn serial_index(&self) -> i64 {
        serial::second_index(self.minute().serial_index(), self.second)
    }

    fn next(&self) -> Option<Self> {
        if self.second < Self::LAST_SECOND_IN_MINUTE {
            return Some(Second {
                second: self.second + 1,
                ..*self
            });
        }
        match self.minute().next() {
            Some(minute) => Some(Second::with_minute(minute, Self::FIRST_SECOND_IN_MINUTE)),
            None => {
                trace!(period = %self, "no next second within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.second > Self::FIRST_SECOND_IN_MINUTE {
            return Some(Second {
                second: self.second - 1,
                ..*self
            });
        }
        match self.minute().previous() {
            Some(minute) => Some(Second::with_minute(minute, Self::LAST_SECOND_IN_MINUTE)),
            None => {
                trace!(period = %self, "no previous second within supported range");
                None
            }
        }
    }

    fn local_start(&self, rule: WeekRule) -> NaiveDateTime {
        self.minute().local_start(rule) + TimeDelta::seconds(i64::from(self.second))
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        self.local_start(rule) + TimeDelta::seconds(1)
    }

    fn iso_string(&self) -> String {
        format!("{}:{:02}", self.minute().iso_string(), self.second)
    }
}

impl fmt::Display for Second {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{:02}:{:02},{}]",
            self.hour,
            self.minute,
            self.second,
            short_date(&self.day)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    #[test]
    fn test_range_validation() {
        let minute = Minute::from_ymd_hm(2000, 1, 1, 0, 0).unwrap();
        assert!(Second::new(60, minute).is_err());
        assert!(Second::new(59, minute).is_ok());
    }

    #[test]
    fn test_navigation_cascades() {
        let last = Second::from_ymd_hms(2000, 2, 28, 23, 59, 59).unwrap();
        let first = Second::from_ymd_hms(2000, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(last.next(), Some(first));
        assert_eq!(first.previous(), Some(last));
        assert_eq!(Second::from_ymd_hms(9999, 12, 31, 23, 59, 59).unwrap().next(), None);
        assert_eq!(Second::from_ymd_hms(1900, 1, 1, 0, 0, 0).unwrap().previous(), None);
    }

    #[test]
    fn test_parent_chain() {
        let s = Second::from_ymd_hms(2000, 4, 15, 2, 40, 55).unwrap();
        assert_eq!(s.minute(), Minute::from_ymd_hm(2000, 4, 15, 2, 40).unwrap());
        assert_eq!(s.minute().hour().day(), Day::new(15, 4, 2000).unwrap());
        assert_eq!(s.serial_index(), (879_146 * 60 + 40) * 60 + 55);
    }

    #[test]
    fn test_from_instant_in_zone() {
        // 2000-04-15T02:40:55.500Z is 04:40:55 in Paris (CEST).
        let paris = Calendar::for_zone(Tz::Europe__Paris);
        let s = Second::from_instant(955_762_855_500, &paris).unwrap();
        assert_eq!(s, Second::from_ymd_hms(2000, 4, 15, 4, 40, 55).unwrap());
        assert_eq!(s.first_instant_in(&paris), Ok(955_762_855_000));
        assert_eq!(s.last_instant_in(&paris), Ok(955_762_855_999));
    }

    #[test]
    fn test_display_and_iso() {
        let s = Second::from_ymd_hms(2000, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(s.to_string(), "[7:08:09,5/3/2000]");
        assert_eq!(s.iso_string(), "2000-03-05 07:08:09");
    }
}
