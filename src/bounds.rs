// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar bounds: the absolute instants a period occupies.
//!
//! A period's range is resolved from wall-clock fields under a [`Calendar`]:
//!
//! ```text
//! first = resolve(local start of period)
//! last  = resolve(local start of the following period) - 1 ms
//! ```
//!
//! The "following period" is computed by calendar arithmetic, so the last
//! period of year 9999 still has a last instant even though it has no
//! successor. `last` never precedes `first`: a sub-day period lying entirely
//! inside a daylight-saving gap collapses onto the transition instant.
//!
//! Every entry point taking an `Option` fails with
//! [`PeriodError::InvalidArgument`] when the zone or calendar is absent.

use crate::calendar::Calendar;
use crate::error::{PeriodError, PeriodResult};
use crate::period::RegularTimePeriod;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use qtty::{Days, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which instant of a period to use when a single point is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimePeriodAnchor {
    #[default]
    Start,
    Middle,
    End,
}

// ═══════════════════════════════════════════════════════════════════════════
// InstantSpan
// ═══════════════════════════════════════════════════════════════════════════

/// Inclusive range of epoch milliseconds occupied by a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstantSpan {
    pub first: i64,
    pub last: i64,
}

impl InstantSpan {
    pub const fn new(first: i64, last: i64) -> Self {
        InstantSpan { first, last }
    }

    /// Midpoint, truncated so that a one-millisecond span has
    /// `first == middle == last`.
    pub const fn middle(&self) -> i64 {
        self.first + (self.last - self.first) / 2
    }

    /// The instant selected by `anchor`.
    pub const fn at(&self, anchor: TimePeriodAnchor) -> i64 {
        match anchor {
            TimePeriodAnchor::Start => self.first,
            TimePeriodAnchor::Middle => self.middle(),
            TimePeriodAnchor::End => self.last,
        }
    }

    pub const fn contains(&self, instant: i64) -> bool {
        self.first <= instant && instant <= self.last
    }

    /// Number of milliseconds covered, counting both ends.
    pub const fn duration_millis(&self) -> i64 {
        self.last - self.first + 1
    }

    /// Covered length in days.
    pub fn duration_days(&self) -> Days {
        const MILLIS_PER_DAY: f64 = 86_400_000.0;
        Days::new(self.duration_millis() as f64 / MILLIS_PER_DAY)
    }

    /// Covered length in seconds.
    pub fn duration_seconds(&self) -> Seconds {
        Seconds::new(self.duration_millis() as f64 / 1000.0)
    }

    /// Overlapping part of two spans, `None` when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        if first <= last {
            Some(Self::new(first, last))
        } else {
            None
        }
    }

    /// Both ends as UTC date-times, `None` outside chrono's range.
    pub fn to_utc(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((
            DateTime::from_timestamp_millis(self.first)?,
            DateTime::from_timestamp_millis(self.last)?,
        ))
    }
}

impl fmt::Display for InstantSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms to {} ms", self.first, self.last)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Resolution
// ═══════════════════════════════════════════════════════════════════════════

fn require_zone(zone: Option<Tz>) -> PeriodResult<Calendar> {
    zone.map(Calendar::for_zone)
        .ok_or_else(|| PeriodError::absent("zone"))
}

fn require_calendar(calendar: Option<&Calendar>) -> PeriodResult<&Calendar> {
    calendar.ok_or_else(|| PeriodError::absent("calendar"))
}

/// Span of `period` under a calendar that is known to be present.
pub fn span_of<P: RegularTimePeriod>(period: &P, calendar: &Calendar) -> InstantSpan {
    let rule = calendar.week_rule();
    let first = calendar.resolve_local(period.local_start(rule));
    let following = calendar.resolve_local(period.local_end(rule));
    InstantSpan::new(first, (following - 1).max(first))
}

/// First instant of `period` in `zone`, with the default locale's week rule.
pub fn first_instant<P: RegularTimePeriod>(period: &P, zone: Option<Tz>) -> PeriodResult<i64> {
    let calendar = require_zone(zone)?;
    Ok(span_of(period, &calendar).first)
}

/// Last (inclusive) instant of `period` in `zone`.
pub fn last_instant<P: RegularTimePeriod>(period: &P, zone: Option<Tz>) -> PeriodResult<i64> {
    let calendar = require_zone(zone)?;
    Ok(span_of(period, &calendar).last)
}

/// First instant of `period` under a fully configured calendar.
pub fn first_instant_in<P: RegularTimePeriod>(
    period: &P,
    calendar: Option<&Calendar>,
) -> PeriodResult<i64> {
    Ok(span_of(period, require_calendar(calendar)?).first)
}

/// Last (inclusive) instant of `period` under a fully configured calendar.
pub fn last_instant_in<P: RegularTimePeriod>(
    period: &P,
    calendar: Option<&Calendar>,
) -> PeriodResult<i64> {
    Ok(span_of(period, require_calendar(calendar)?).last)
}

/// Midpoint of `period` under `calendar`.
pub fn middle_instant_in<P: RegularTimePeriod>(
    period: &P,
    calendar: Option<&Calendar>,
) -> PeriodResult<i64> {
    Ok(span_of(period, require_calendar(calendar)?).middle())
}

/// The instant of `period` selected by `anchor` under `calendar`.
pub fn instant_at<P: RegularTimePeriod>(
    period: &P,
    anchor: TimePeriodAnchor,
    calendar: Option<&Calendar>,
) -> PeriodResult<i64> {
    Ok(span_of(period, require_calendar(calendar)?).at(anchor))
}
