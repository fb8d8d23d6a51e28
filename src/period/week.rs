// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Numbered week of a week-numbering year.
//!
//! The wall-clock position of a week depends on the calendar's [`WeekRule`],
//! so the same `Week` value starts on different dates under different
//! locales. Navigation (`next`/`previous`) always counts weeks with the
//! default rule.

use super::{RegularTimePeriod, Year};
use crate::calendar::{Calendar, WeekRule};
use crate::error::{check_range, PeriodResult};
use crate::granularity::Granularity;
use crate::serial;
use chrono::{Days, NaiveDateTime, NaiveTime};
use std::fmt;
use tracing::trace;

/// Week 1..=53 of a week-numbering [`Year`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    year: Year,
    week: u32,
}

impl Week {
    pub const FIRST_WEEK_IN_YEAR: u32 = 1;
    pub const LAST_WEEK_IN_YEAR: u32 = 53;

    /// Creates a week from integer fields.
    ///
    /// Week 53 is accepted for every year; in a 52-week year it denotes the
    /// seven days following week 52. Such a week sits outside the `next` and
    /// `previous` chain: its `next` is week 1 of the following year, whose
    /// `previous` is week 52. Under the ISO rule it also has the same bounds
    /// as that week 1 while comparing unequal to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use calperiod::Week;
    ///
    /// let w = Week::new(5, 2000).unwrap();
    /// assert_eq!(w.to_string(), "Week 5, 2000");
    /// assert!(Week::new(54, 2000).is_err());
    /// ```
    pub fn new(week: u32, year: i32) -> PeriodResult<Self> {
        Week::with_year(week, Year::new(year)?)
    }

    /// Creates a week of an existing year.
    pub fn with_year(week: u32, year: Year) -> PeriodResult<Self> {
        check_range(
            "week",
            i64::from(week),
            i64::from(Self::FIRST_WEEK_IN_YEAR),
            i64::from(Self::LAST_WEEK_IN_YEAR),
        )?;
        Ok(Week { year, week })
    }

    /// The week containing `instant`, numbered with `calendar`'s week rule.
    ///
    /// The year is the week-numbering year, which differs from the Gregorian
    /// year for a few days around New Year.
    pub fn from_instant(instant: i64, calendar: &Calendar) -> PeriodResult<Self> {
        let local = calendar.local_time(instant)?;
        let (year, week) = calendar.week_rule().week_of(local.date());
        Week::with_year(week, Year::new(year)?)
    }

    #[inline]
    pub const fn week(&self) -> u32 {
        self.week
    }

    #[inline]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[inline]
    pub const fn year_value(&self) -> i32 {
        self.year.value()
    }

    fn last_week_of(year: Year) -> u32 {
        WeekRule::default().weeks_in_year(year.value())
    }
}

impl RegularTimePeriod for Week {
    fn granularity(&self) -> Granularity {
        Granularity::Week
    }

    fn serial_index(&self) -> i64 {
        serial::week_index(self.year.value(), self.week)
    }

    fn next(&self) -> Option<Self> {
        if self.week < Week::last_week_of(self.year) {
            return Some(Week {
                week: self.week + 1,
                ..*self
            });
        }
        match self.year.next() {
            Some(year) => Some(Week {
                year,
                week: Self::FIRST_WEEK_IN_YEAR,
            }),
            None => {
                trace!(period = %self, "no next week within supported range");
                None
            }
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.week > Self::FIRST_WEEK_IN_YEAR {
            return Some(Week {
                week: self.week - 1,
                ..*self
            });
        }
        match self.year.previous() {
            Some(year) => Some(Week {
                year,
                week: Week::last_week_of(year),
            }),
            None => {
                trace!(period = %self, "no previous week within supported range");
                None
            }
        }
    }

    fn local_start(&self, rule: WeekRule) -> NaiveDateTime {
        let start =
            rule.first_week_start(self.year.value()) + Days::new(u64::from(self.week - 1) * 7);
        start.and_time(NaiveTime::MIN)
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        self.local_start(rule) + Days::new(7)
    }

    fn iso_string(&self) -> String {
        format!("{:04}-W{:02}", self.year.value(), self.week)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week {}, {}", self.week, self.year)
    }
}
