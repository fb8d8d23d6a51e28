// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar month of a year.

use super::{Quarter, RegularTimePeriod, Year};
use crate::calendar::{date, days_in_month, wall_time, Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use tracing::trace;

/// English month names, January first.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month number (1..=12) for a full or three-letter English name.
pub(crate) fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|full| {
            full.eq_ignore_ascii_case(name)
                || (name.len() == 3 && full[..3].eq_ignore_ascii_case(name))
        })
        .map(|i| i as u32 + 1)
}

/// Month 1..=12 of a [`Year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    year: Year,
    month: u32,
}

impl Month {
    /// Creates a month from integer fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::Month;
    ///
    /// let m = Month::new(3, 2000).unwrap();
    /// assert_eq!(m.to_string(), "March 2000");
    /// assert!(Month::new(13, 2000).is_err());
    /// ```
    pub fn new(month: u32, year: i32) -> PeriodResult<Self> {
        Month::with_year(month, Year::new(year)?)
    }

    /// Creates a month of an existing year.
    pub fn with_year(month: u32, year: Year) -> PeriodResult<Self> {
        check_range("month", i64::from(month), 1, 12)?;
        Ok(Month { year, month })
    }

    pub(crate) const fn from_validated(month: u32, year: Year) -> Self {
        Month { year, month }
    }

    /// The month containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let local = calendar.local_time(instant)?;
        Month::with_year(local.month(), Year::new(local.year())?)
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[inline]
    pub const fn year_value(&self) -> i32 {
        self.year.value()
    }

    /// English name of the month.
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    /// Number of days in this month.
    pub const fn days(&self) -> u32 {
        days_in_month(self.month, self.year.value())
    }

    /// The quarter containing this month.
    pub fn quarter(&self) -> Quarter {
        let q = super::quarter::quarter_of_month(self.month);
        Quarter::with_year(q, self.year).expect("quarter of a valid month")
    }
}

impl RegularTimePeriod for Month {
    fn granularity(&self) -> Granularity {
        Granularity::Month
    }

    fn serial_index(&self) -> i64 {
        serial::month_index(self.year.value(), self.month)
    }

    fn next(&self) -> Option<Self> {
        if self.month < 12 {
            return Some(Month {
                month: self.month + 1,
                ..*self
            });
        }
        match self.year.next() {
            Some(year) => Some(Month { year, month: 1 }),
            None => {
                trace!(period = %self, "no next month within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.month > 1 {
            return Some(Month {
                month: self.month - 1,
                ..*self
            });
        }
        match self.year.previous() {
            Some(year) => Some(Month { year, month: 12 }),
            None => {
                trace!(period = %self, "no previous month within supported range");
                None
            }
        }
    }

    fn local_start(&self, _rule: WeekRule) -> NaiveDateTime {
        wall_time(date(self.year.value(), self.month, 1), 0, 0, 0, 0)
    }

    fn local_end(&self, _rule: WeekRule) -> NaiveDateTime {
        let (year, month) = match self.month {
            12 => (self.year.value() + 1, 1),
            m => (self.year.value(), m + 1),
        };
        wall_time(date(year, month, 1), 0, 0, 0, 0)
    }

    fn iso_string(&self) -> String {
        format!("{:04}-{:02}", self.year.value(), self.month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}
