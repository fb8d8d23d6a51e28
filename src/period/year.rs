// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar year, the root of every containment chain.

use super::RegularTimePeriod;
use crate::calendar::{date, wall_time, Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use tracing::trace;

/// A year in the supported range 1900..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Year {
    year: i32,
}

impl Year {
    /// Earliest supported year.
    pub const MINIMUM: i32 = 1900;
    /// Latest supported year.
    pub const MAXIMUM: i32 = 9999;

    /// Creates a year, failing with a range error outside 1900..=9999.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::Year;
    ///
    /// assert_eq!(Year::new(2002).unwrap().value(), 2002);
    /// assert!(Year::new(1899).is_err());
    /// ```
    pub fn new(year: i32) -> PeriodResult<Self> {
        check_range("year", i64::from(year), i64::from(Self::MINIMUM), i64::from(Self::MAXIMUM))?;
        Ok(Year { year })
    }

    /// The year containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        Year::new(calendar.local_time(instant)?.year())
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.year
    }
}

impl RegularTimePeriod for Year {
    fn granularity(&self) -> Granularity {
        Granularity::Year
    }

    fn serial_index(&self) -> i64 {
        serial::year_index(self.year)
    }

    fn next(&self) -> Option<Self> {
        if self.year < Self::MAXIMUM {
            Some(Year { year: self.year + 1 })
        } else {
            trace!(period = %self, "no next year within supported range");
            None
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.year > Self::MINIMUM {
            Some(Year { year: self.year - 1 })
        } else {
            trace!(period = %self, "no previous year within supported range");
            None
        }
    }

    fn local_start(&self, _rule: WeekRule) -> NaiveDateTime {
        wall_time(date(self.year, 1, 1), 0, 0, 0, 0)
    }

    fn local_end(&self, _rule: WeekRule) -> NaiveDateTime {
        wall_time(date(self.year + 1, 1, 1), 0, 0, 0, 0)
    }

    fn iso_string(&self) -> String {
        format!("{:04}", self.year)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}

impl TryFrom<i32> for Year {
    type Error = crate::error::PeriodError;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Year::new(year)
    }
}
