// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Minute of an hour.

use super::hour::short_date;
use super::{Day, Hour, RegularTimePeriod};
use crate::calendar::{Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{NaiveDateTime, TimeDelta, Timelike};
use std::fmt;
use tracing::trace;

/// Minute 0..=59 of an [`Hour`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Minute {
    day: Day,
    hour: u32,
    minute: u32,
}

impl Minute {
    pub const FIRST_MINUTE_IN_HOUR: u32 = 0;
    pub const LAST_MINUTE_IN_HOUR: u32 = 59;

    /// Creates a minute of `hour`.
    pub fn new(minute: u32, hour: Hour) -> PeriodResult<Self> {
        check_range(
            "minute",
            i64::from(minute),
            i64::from(Self::FIRST_MINUTE_IN_HOUR),
            i64::from(Self::LAST_MINUTE_IN_HOUR),
        )?;
        Ok(Minute {
            day: hour.day(),
            hour: hour.hour(),
            minute,
        })
    }

    /// Creates a minute from integer fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::{Minute, RegularTimePeriod};
    ///
    /// let m = Minute::from_ymd_hm(2000, 3, 5, 7, 8).unwrap();
    /// assert_eq!(m.iso_string(), "2000-03-05 07:08");
    /// assert_eq!(m.hour().hour(), 7);
    /// ```
    pub fn from_ymd_hm(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> PeriodResult<Self> {
        Minute::new(minute, Hour::from_ymd_h(year, month, day, hour)?)
    }

    /// The minute containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let local = calendar.local_time(instant)?;
        let hour = Hour::new(local.hour(), Day::from_date(local.date())?)?;
        Minute::new(local.minute(), hour)
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// The containing hour.
    pub fn hour(&self) -> Hour {
        Hour::new(self.hour, self.day).expect("validated hour")
    }

    /// Hour-of-day field.
    #[inline]
    pub const fn hour_value(&self) -> u32 {
        self.hour
    }

    fn with_hour(hour: Hour, minute: u32) -> Self {
        Minute {
            day: hour.day(),
            hour: hour.hour(),
            minute,
        }
    }
}

impl RegularTimePeriod for Minute {
    fn granularity(&self) -> Granularity {
        Granularity::Minute
    }

    fn serial_index(&self) -> i64 {
        serial::minute_index(self.hour().serial_index(), self.minute)
    }

    fn next(&self) -> Option<Self> {
        if self.minute < Self::LAST_MINUTE_IN_HOUR {
            return Some(Minute {
                minute: self.minute + 1,
                ..*self
            });
        }
        match self.hour().next() {
            Some(hour) => Some(Minute::with_hour(hour, Self::FIRST_MINUTE_IN_HOUR)),
            None => {
                trace!(period = %self, "no next minute within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.minute > Self::FIRST_MINUTE_IN_HOUR {
            return Some(Minute {
                minute: self.minute - 1,
                ..*self
            });
        }
        match self.hour().previous() {
            Some(hour) => Some(Minute::with_hour(hour, Self::LAST_MINUTE_IN_HOUR)),
            None => {
                trace!(period = %self, "no previous minute within supported range");
                None
            }
        }
    }

    fn local_start(&self, rule: WeekRule) -> NaiveDateTime {
        self.hour().local_start(rule) + TimeDelta::minutes(i64::from(self.minute))
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        self.local_start(rule) + TimeDelta::minutes(1)
    }

    fn iso_string(&self) -> String {
        format!("{}:{:02}", self.hour().iso_string(), self.minute)
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{:02},{}]", self.hour, self.minute, short_date(&self.day))
    }
}
