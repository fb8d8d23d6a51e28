// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Regular calendar periods
//!
//! This crate models the calendar periods used as time-series keys, from a
//! whole year down to a single millisecond, and maps them onto absolute time
//! under an explicit time zone and week-numbering rule.
//!
//! # Core types
//!
//! | Type | Granularity | Serial index |
//! |------|-------------|--------------|
//! | [`Year`] | year | `year` |
//! | [`Quarter`] | quarter | `year * 4 + quarter` |
//! | [`Month`] | month | `year * 12 + month` |
//! | [`Week`] | week | `year * 53 + week` |
//! | [`Day`] | day | days since 1899-12-30 |
//! | [`Hour`] | hour | `day * 24 + hour` |
//! | [`Minute`] | minute | `hour * 60 + minute` |
//! | [`Second`] | second | `minute * 60 + second` |
//! | [`Millisecond`] | millisecond | `second * 1000 + millisecond` |
//!
//! Every type implements [`RegularTimePeriod`]: ordering by serial index,
//! `next`/`previous` bounded to 1900..=9999, and the bounds queries
//! (`first_instant`, `last_instant`, `middle_instant_in`, ...). Instants are
//! signed milliseconds since 1970-01-01T00:00:00Z.
//!
//! # Calendars
//!
//! A [`Calendar`] bundles an IANA zone ([`chrono_tz::Tz`]), a [`Locale`] and
//! a [`WeekRule`]. It is a `Copy` value, so concurrent callers never share
//! mutable calendar state.
//!
//! ```
//! use calperiod::{Calendar, Locale, RegularTimePeriod, Week};
//! use chrono_tz::Tz;
//!
//! let week = Week::new(1, 2005).unwrap();
//! assert_eq!(week.first_instant(Tz::Europe__London), Ok(1_104_710_400_000));
//!
//! let us = Calendar::new(Tz::America__New_York, Locale::US);
//! assert_eq!(week.first_instant_in(&us), Ok(1_104_037_200_000));
//! ```
//!
//! # Parsing
//!
//! [`parse`] reads text for a run-time [`Granularity`]; each period type also
//! implements [`std::str::FromStr`].
//!
//! # Features
//!
//! - `serde`: periods serialise as their ISO strings.
//! - `telemetry`: [`init_default_tracing`] installs a `tracing` subscriber.

pub mod bounds;
pub mod calendar;
mod error;
mod granularity;
pub mod parse;
mod period;
pub mod serial;
pub mod telemetry;
pub mod timeline;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use bounds::{InstantSpan, TimePeriodAnchor};
pub use calendar::{
    days_in_month, is_leap_year, parse_zone, Calendar, Locale, ShortDateOrder, ShortDatePattern,
    WeekRule,
};
pub use error::{PeriodError, PeriodResult};
pub use granularity::Granularity;
pub use parse::{parse, parse_with_locale};
pub use period::{
    Day, Hour, Millisecond, Minute, Month, Quarter, RegularTimePeriod, Second, TimePeriod, Week,
    Year,
};
pub use telemetry::init_default_tracing;
