// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Regular time periods.
//!
//! One immutable value type per [`Granularity`], all implementing
//! [`RegularTimePeriod`]:
//!
//! | Type | Fields | Contained in |
//! |------|--------|--------------|
//! | [`Year`] | year 1900..=9999 | (root) |
//! | [`Quarter`] | quarter 1..=4 | [`Year`] |
//! | [`Month`] | month 1..=12 | [`Year`] |
//! | [`Week`] | week 1..=53 | [`Year`] |
//! | [`Day`] | day, month, year | (flat) |
//! | [`Hour`] | hour 0..=23 | [`Day`] |
//! | [`Minute`] | minute 0..=59 | [`Hour`] |
//! | [`Second`] | second 0..=59 | [`Minute`] |
//! | [`Millisecond`] | millisecond 0..=999 | [`Second`] |
//!
//! Sub-day types store the flat fields of their whole containment chain and
//! rebuild parent values on demand, so every period is a small `Copy` value.
//! Equality and hashing are field-wise; ordering follows the serial index.
//!
//! [`TimePeriod`] wraps any of the nine types when the granularity is only
//! known at run time.

mod day;
mod hour;
mod millisecond;
mod minute;
mod month;
mod quarter;
mod second;
mod week;
mod year;

pub use day::Day;
pub use hour::Hour;
pub use millisecond::Millisecond;
pub use minute::Minute;
pub use month::Month;
pub use quarter::Quarter;
pub use second::Second;
pub use week::Week;
pub use year::Year;

pub(crate) use month::month_from_name;

use crate::bounds::{self, InstantSpan, TimePeriodAnchor};
use crate::calendar::{Calendar, WeekRule};
use crate::error::PeriodResult;
use crate::granularity::Granularity;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

// ═══════════════════════════════════════════════════════════════════════════
// RegularTimePeriod trait
// ═══════════════════════════════════════════════════════════════════════════

/// Common contract of every period type.
///
/// Implementors provide the calendar arithmetic (`serial_index`, `next`,
/// `previous`, wall-clock bounds); the absolute-instant queries are provided
/// on top of [`crate::bounds`].
pub trait RegularTimePeriod: Copy + Eq + Hash + fmt::Debug + fmt::Display {
    /// Resolution of this period.
    fn granularity(&self) -> Granularity;

    /// Ordering key within this period's granularity.
    fn serial_index(&self) -> i64;

    /// The following period of the same granularity, `None` past 9999.
    fn next(&self) -> Option<Self>;

    /// The preceding period of the same granularity, `None` before 1900.
    fn previous(&self) -> Option<Self>;

    /// Wall-clock start of the period.
    fn local_start(&self, rule: WeekRule) -> NaiveDateTime;

    /// Wall-clock start of the immediately following period (exclusive end).
    ///
    /// Defined for every period, including the last supported one.
    fn local_end(&self, rule: WeekRule) -> NaiveDateTime;

    /// Canonical text form, accepted back by the parser.
    fn iso_string(&self) -> String;

    // ── bounds ────────────────────────────────────────────────────────

    /// First instant in `zone` (default locale week rule).
    fn first_instant(&self, zone: impl Into<Option<Tz>>) -> PeriodResult<i64> {
        bounds::first_instant(self, zone.into())
    }

    /// Last (inclusive) instant in `zone`.
    fn last_instant(&self, zone: impl Into<Option<Tz>>) -> PeriodResult<i64> {
        bounds::last_instant(self, zone.into())
    }

    /// First instant under a fully configured calendar.
    fn first_instant_in<'a>(&self, calendar: impl Into<Option<&'a Calendar>>) -> PeriodResult<i64> {
        bounds::first_instant_in(self, calendar.into())
    }

    /// Last (inclusive) instant under a fully configured calendar.
    fn last_instant_in<'a>(&self, calendar: impl Into<Option<&'a Calendar>>) -> PeriodResult<i64> {
        bounds::last_instant_in(self, calendar.into())
    }

    /// Truncated midpoint under a fully configured calendar.
    fn middle_instant_in<'a>(
        &self,
        calendar: impl Into<Option<&'a Calendar>>,
    ) -> PeriodResult<i64> {
        bounds::middle_instant_in(self, calendar.into())
    }

    /// Instant selected by `anchor` under a fully configured calendar.
    fn instant_at<'a>(
        &self,
        anchor: TimePeriodAnchor,
        calendar: impl Into<Option<&'a Calendar>>,
    ) -> PeriodResult<i64> {
        bounds::instant_at(self, anchor, calendar.into())
    }

    /// Both bounds at once.
    fn span(&self, calendar: &Calendar) -> InstantSpan {
        bounds::span_of(self, calendar)
    }
}

/// Ordering by serial index; all implementors share one granularity per type.
macro_rules! impl_serial_ordering {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialOrd for $ty {
                fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }

            impl Ord for $ty {
                fn cmp(&self, other: &Self) -> Ordering {
                    self.serial_index().cmp(&other.serial_index())
                }
            }
        )+
    };
}

impl_serial_ordering!(Year, Quarter, Month, Week, Day, Hour, Minute, Second, Millisecond);

/// serde support: every period travels as its ISO string.
#[cfg(feature = "serde")]
macro_rules! impl_iso_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(&self.iso_string())
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                    raw.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

#[cfg(feature = "serde")]
impl_iso_serde!(Year, Quarter, Month, Week, Day, Hour, Minute, Second, Millisecond);

// ═══════════════════════════════════════════════════════════════════════════
// TimePeriod: run-time granularity
// ═══════════════════════════════════════════════════════════════════════════

/// A period whose granularity is chosen at run time.
///
/// Equality is structural (periods of different granularities are never
/// equal); ordering is only defined between periods of the same granularity,
/// so `partial_cmp` returns `None` across granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePeriod {
    Year(Year),
    Quarter(Quarter),
    Month(Month),
    Week(Week),
    Day(Day),
    Hour(Hour),
    Minute(Minute),
    Second(Second),
    Millisecond(Millisecond),
}

/// Applies `$body` to the inner period of every variant.
macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            TimePeriod::Year($inner) => $body,
            TimePeriod::Quarter($inner) => $body,
            TimePeriod::Month($inner) => $body,
            TimePeriod::Week($inner) => $body,
            TimePeriod::Day($inner) => $body,
            TimePeriod::Hour($inner) => $body,
            TimePeriod::Minute($inner) => $body,
            TimePeriod::Second($inner) => $body,
            TimePeriod::Millisecond($inner) => $body,
        }
    };
}

/// Like `dispatch!`, re-wrapping an `Option` of the same variant.
macro_rules! dispatch_step {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            TimePeriod::Year($inner) => $body.map(TimePeriod::Year),
            TimePeriod::Quarter($inner) => $body.map(TimePeriod::Quarter),
            TimePeriod::Month($inner) => $body.map(TimePeriod::Month),
            TimePeriod::Week($inner) => $body.map(TimePeriod::Week),
            TimePeriod::Day($inner) => $body.map(TimePeriod::Day),
            TimePeriod::Hour($inner) => $body.map(TimePeriod::Hour),
            TimePeriod::Minute($inner) => $body.map(TimePeriod::Minute),
            TimePeriod::Second($inner) => $body.map(TimePeriod::Second),
            TimePeriod::Millisecond($inner) => $body.map(TimePeriod::Millisecond),
        }
    };
}

impl TimePeriod {
    /// The period of `granularity` containing `instant` under `calendar`.
    pub fn from_instant(
        granularity: Granularity,
        instant: i64,
        calendar: &Calendar,
    ) -> PeriodResult<Self> {
        Ok(match granularity {
            Granularity::Year => TimePeriod::Year(Year::from_instant(instant, calendar)?),
            Granularity::Quarter => TimePeriod::Quarter(Quarter::from_instant(instant, calendar)?),
            Granularity::Month => TimePeriod::Month(Month::from_instant(instant, calendar)?),
            Granularity::Week => TimePeriod::Week(Week::from_instant(instant, calendar)?),
            Granularity::Day => TimePeriod::Day(Day::from_instant(instant, calendar)?),
            Granularity::Hour => TimePeriod::Hour(Hour::from_instant(instant, calendar)?),
            Granularity::Minute => TimePeriod::Minute(Minute::from_instant(instant, calendar)?),
            Granularity::Second => TimePeriod::Second(Second::from_instant(instant, calendar)?),
            Granularity::Millisecond => {
                TimePeriod::Millisecond(Millisecond::from_instant(instant, calendar)?)
            }
        })
    }
}

impl RegularTimePeriod for TimePeriod {
    fn granularity(&self) -> Granularity {
        dispatch!(self, p => p.granularity())
    }

    fn serial_index(&self) -> i64 {
        dispatch!(self, p => p.serial_index())
    }

    fn next(&self) -> Option<Self> {
        dispatch_step!(self, p => p.next())
    }

    fn previous(&self) -> Option<Self> {
        dispatch_step!(self, p => p.previous())
    }

    fn local_start(&self, rule: WeekRule) -> NaiveDateTime {
        dispatch!(self, p => p.local_start(rule))
    }

    fn local_end(&self, rule: WeekRule) -> NaiveDateTime {
        dispatch!(self, p => p.local_end(rule))
    }

    fn iso_string(&self) -> String {
        dispatch!(self, p => p.iso_string())
    }
}

impl PartialOrd for TimePeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.granularity() == other.granularity() {
            Some(self.serial_index().cmp(&other.serial_index()))
        } else {
            None
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, p => fmt::Display::fmt(p, f))
    }
}

macro_rules! impl_from_period {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for TimePeriod {
                fn from(period: $variant) -> Self {
                    TimePeriod::$variant(period)
                }
            }
        )+
    };
}

impl_from_period!(Year, Quarter, Month, Week, Day, Hour, Minute, Second, Millisecond);

// Serde support for TimePeriod
//
// The ISO strings of different granularities overlap (`2000-03` reads as a
// month and as a week), so the granularity travels next to the value.
#[cfg(feature = "serde")]
impl serde::Serialize for TimePeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("TimePeriod", 2)?;
        s.serialize_field("granularity", &self.granularity())?;
        s.serialize_field("value", &self.iso_string())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimePeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            granularity: Granularity,
            value: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        crate::parse::parse(&raw.value, raw.granularity).map_err(serde::de::Error::custom)
    }
}
