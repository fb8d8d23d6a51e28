// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar quarter (three-month block) of a year.

use super::{Month, RegularTimePeriod, Year};
use crate::calendar::{date, wall_time, Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use tracing::trace;

/// Quarter 1..=4 of a [`Year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quarter {
    year: Year,
    quarter: u32,
}

impl Quarter {
    pub const FIRST: u32 = 1;
    pub const LAST: u32 = 4;

    /// Creates a quarter from integer fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::Quarter;
    ///
    /// let q = Quarter::new(2, 2001).unwrap();
    /// assert_eq!(q.quarter(), 2);
    /// assert_eq!(q.year().value(), 2001);
    /// assert!(Quarter::new(5, 2001).is_err());
    /// ```
    pub fn new(quarter: u32, year: i32) -> PeriodResult<Self> {
        Quarter::with_year(quarter, Year::new(year)?)
    }

    /// Creates a quarter of an existing year.
    pub fn with_year(quarter: u32, year: Year) -> PeriodResult<Self> {
        check_range("quarter", i64::from(quarter), i64::from(Self::FIRST), i64::from(Self::LAST))?;
        Ok(Quarter { year, quarter })
    }

    /// The quarter containing `instant` under `calendar`.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let local = calendar.local_time(instant)?;
        Quarter::with_year(quarter_of_month(local.month()), Year::new(local.year())?)
    }

    #[inline]
    pub const fn quarter(&self) -> u32 {
        self.quarter
    }

    #[inline]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[inline]
    pub const fn year_value(&self) -> i32 {
        self.year.value()
    }

    /// First month (1, 4, 7 or 10) of the quarter.
    pub const fn first_month(&self) -> u32 {
        (self.quarter - 1) * 3 + 1
    }

    /// Last month (3, 6, 9 or 12) of the quarter.
    pub const fn last_month(&self) -> u32 {
        self.quarter * 3
    }

    /// The three months of the quarter, in order.
    pub fn months(&self) -> [Month; 3] {
        let first = self.first_month();
        [first, first + 1, first + 2].map(|m| Month::from_validated(m, self.year))
    }
}

/// Quarter (1..=4) containing `month` (1..=12).
pub(crate) const fn quarter_of_month(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

impl RegularTimePeriod for Quarter {
    fn granularity(&self) -> Granularity {
        Granularity::Quarter
    }

    fn serial_index(&self) -> i64 {
        serial::quarter_index(self.year.value(), self.quarter)
    }

    fn next(&self) -> Option<Self> {
        if self.quarter < Self::LAST {
            return Some(Quarter {
                quarter: self.quarter + 1,
                ..*self
            });
        }
        match self.year.next() {
            Some(year) => Some(Quarter {
                year,
                quarter: Self::FIRST,
            }),
            None => {
                trace!(period = %self, "no next quarter within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.quarter > Self::FIRST {
            return Some(Quarter {
                quarter: self.quarter - 1,
                ..*self
            });
        }
        match self.year.previous() {
            Some(year) => Some(Quarter {
                year,
                quarter: Self::LAST,
            }),
            None => {
                trace!(period = %self, "no previous quarter within supported range");
                None
            }
        }
    }

    fn local_start(&self, _rule: WeekRule) -> NaiveDateTime {
        wall_time(date(self.year.value(), self.first_month(), 1), 0, 0, 0, 0)
    }

    fn local_end(&self, _rule: WeekRule) -> NaiveDateTime {
        let (year, month) = if self.quarter == Self::LAST {
            (self.year.value() + 1, 1)
        } else {
            (self.year.value(), self.last_month() + 1)
        };
        wall_time(date(year, month, 1), 0, 0, 0, 0)
    }

    fn iso_string(&self) -> String {
        format!("{:04}-Q{}", self.year.value(), self.quarter)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}/{}", self.quarter, self.year)
    }
}
