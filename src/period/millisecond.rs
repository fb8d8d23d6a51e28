// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Millisecond of a second, the finest granularity.

use super::hour::short_date;
use super::{Day, Hour, Minute, RegularTimePeriod, Second};
use crate::calendar::{Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use std::fmt;
use tracing::trace;

/// Millisecond 0..=999 of a [`Second`].
///
/// Its bounds span exactly one instant, so first, middle and last coincide
/// (except inside a DST gap, where they collapse onto the transition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Millisecond {
    day: Day,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl Millisecond {
    pub const FIRST_MILLISECOND_IN_SECOND: u32 = 0;
    pub const LAST_MILLISECOND_IN_SECOND: u32 = 999;

    /// Creates a millisecond of `second`.
    pub fn new(millisecond: u32, second: Second) -> PeriodResult<Self> {
        check_range(
            "millisecond",
            i64::from(millisecond),
            i64::from(Self::FIRST_MILLISECOND_IN_SECOND),
            i64::from(Self::LAST_MILLISECOND_IN_SECOND),
        )?;
        Ok(Millisecond::with_second(second, millisecond))
    }

    /// Creates a millisecond from integer fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::{Millisecond, RegularTimePeriod};
    /// use chrono_tz::Tz;
    ///
    /// let ms = Millisecond::from_ymd_hms_milli(2000, 4, 15, 2, 40, 55, 500).unwrap();
    /// assert_eq!(ms.first_instant(Tz::UTC), Ok(955_762_855_500));
    /// assert_eq!(ms.last_instant(Tz::UTC), Ok(955_762_855_500));
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> PeriodResult<Self> {
        let second = Second::from_ymd_hms(year, month, day, hour, minute, second)?;
        Millisecond::new(millisecond, second)
    }

    /// The millisecond containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let local = calendar.local_time(instant)?;
        let day = Day::from_date(local.date())?;
        let minute = Minute::new(local.minute(), Hour::new(local.hour(), day)?)?;
        let second = Second::new(local.second(), minute)?;
        Millisecond::new(local.nanosecond() / 1_000_000, second)
    }

    #[inline]
    pub const fn millisecond(&self) -> u32 {
        self.millisecond
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// The containing second.
    pub fn second(&self) -> Second {
        let hour = Hour::new(self.hour, self.day).expect("validated hour");
        let minute = Minute::new(self.minute, hour).expect("validated minute");
        Second::new(self.second, minute).expect("validated second")
    }

    fn with_second(second: Second, millisecond: u32) -> Self {
        let minute = second.minute();
        Millisecond {
            day: second.day(),
            hour: minute.hour_value(),
            minute: minute.minute(),
            second: second.second(),
            millisecond,
        }
    }
}

impl RegularTimePeriod for Millisecond {
    fn granularity(&self) -> Granularity {
        Granularity::Millisecond
    }

    fn serial_index(&self) -> i64 {
        serial::millisecond_index(self.second().serial_index(), self.millisecond)
    }

    fn next(&self) -> Option<Self> {
        if self.millisecond < Self::LAST_MILLISECOND_IN_SECOND {
            return Some(Millisecond {
                millisecond: self.millisecond + 1,
                ..*self
            });
        }
        match self.second().next() {
            Some(second) => Some(Millisecond::with_second(
                second,
                Self::FIRST_MILLISECOND_IN_SECOND,
            )),
            None => {
                trace!(period = %self, "no next millisecond within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.millisecond > Self::FIRST_MILLISECOND_IN_SECOND {
            return Some(Millisecond {
                millisecond: self.millisecond - 1,
                ..*self
            });
        }
        match self.second().previous() {
            Some(second) => Some(Millisecond::with_second(
                second,
                Self::LAST_MILLISECOND_IN_SECOND,
            )),
            None => {
                trace!(period = %self, "no previous millisecond within supported range");
                None
            }
        }
    }

    fn local_start(&self, rule: WeekRule) -> NaiveDateTime {
        self.second().local_start(rule) + TimeDelta::milliseconds(i64::from(self.millisecond))
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        self.local_start(rule) + TimeDelta::milliseconds(1)
    }

    fn iso_string(&self) -> String {
        format!("{}.{:03}", self.second().iso_string(), self.millisecond)
    }
}

impl fmt::Display for Millisecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{:02}:{:02}.{:03},{}]",
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
            short_date(&self.day)
        )
    }
}
