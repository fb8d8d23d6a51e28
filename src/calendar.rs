// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar configuration: time zone, locale and week numbering.
//!
//! A [`Calendar`] is an immutable snapshot of everything a bounds computation
//! needs besides the period itself:
//!
//! - an IANA time zone ([`chrono_tz::Tz`]),
//! - a [`WeekRule`] (first day of week, minimal days in the first week),
//! - the [`Locale`] it was built from (short date pattern for parsing).
//!
//! Because a `Calendar` is a plain `Copy` value there is no shared mutable
//! calendar state: every computation works on its own copy.
//!
//! # Week numbering
//!
//! Week 1 of a year is the first week (starting on the rule's first day) that
//! has at least `minimal_days` days inside that year. Consequently week 1 may
//! start in the previous Gregorian year and a year may have 53 weeks. The
//! default rule is Monday-first with 4 minimal days; it is always set
//! explicitly and never taken from a host default.
//!
//! # Wall-clock resolution
//!
//! Turning a local date-time into an instant follows two fixed rules:
//!
//! | Situation | Result |
//! |-----------|--------|
//! | unique wall time | that instant |
//! | ambiguous (clocks fall back) | the earlier instant |
//! | nonexistent (clocks spring forward) | the transition instant |

use crate::error::{check_range, PeriodError, PeriodResult};
use chrono::{
    DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Weekday,
};
use chrono_tz::Tz;
use tracing::{debug, trace};

const MILLIS_PER_DAY: i64 = 86_400_000;

// ═══════════════════════════════════════════════════════════════════════════
// Gregorian helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Gregorian leap-year test.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) of `year`.
pub const fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Builds a date from fields that were validated by a period constructor.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("validated calendar date")
}

/// Builds a wall-clock date-time from validated fields.
pub(crate) fn wall_time(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    second: u32,
    millis: u32,
) -> NaiveDateTime {
    let time =
        NaiveTime::from_hms_milli_opt(hour, minute, second, millis).expect("validated time of day");
    date.and_time(time)
}

// ═══════════════════════════════════════════════════════════════════════════
// WeekRule
// ═══════════════════════════════════════════════════════════════════════════

/// Locale-specific week numbering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekRule {
    first_day: Weekday,
    minimal_days: u8,
}

impl WeekRule {
    /// Monday-first, at least four days in week 1 (ISO 8601 style).
    pub const ISO: WeekRule = WeekRule {
        first_day: Weekday::Mon,
        minimal_days: 4,
    };

    /// Sunday-first, the week containing January 1st is week 1.
    pub const US: WeekRule = WeekRule {
        first_day: Weekday::Sun,
        minimal_days: 1,
    };

    /// Creates a rule, rejecting `minimal_days` outside `1..=7`.
    pub fn new(first_day: Weekday, minimal_days: u8) -> PeriodResult<Self> {
        check_range("minimal days in first week", i64::from(minimal_days), 1, 7)?;
        Ok(Self {
            first_day,
            minimal_days,
        })
    }

    pub const fn first_day(&self) -> Weekday {
        self.first_day
    }

    pub const fn minimal_days(&self) -> u8 {
        self.minimal_days
    }

    /// The date on which week 1 of `year` begins.
    pub fn first_week_start(&self, year: i32) -> NaiveDate {
        let jan1 = date(year, 1, 1);
        let offset =
            (jan1.weekday().num_days_from_monday() + 7 - self.first_day.num_days_from_monday()) % 7;
        let start = jan1 - Days::new(u64::from(offset));
        if 7 - offset < u32::from(self.minimal_days) {
            start + Days::new(7)
        } else {
            start
        }
    }

    /// Number of weeks (52 or 53) in the week-numbering year `year`.
    pub fn weeks_in_year(&self, year: i32) -> u32 {
        let days = (self.first_week_start(year + 1) - self.first_week_start(year)).num_days();
        (days / 7) as u32
    }

    /// Week-numbering year and week of `day`.
    ///
    /// Late December days may belong to week 1 of the following year, early
    /// January days to the last week of the previous one.
    pub fn week_of(&self, day: NaiveDate) -> (i32, u32) {
        let year = day.year();
        let next_start = self.first_week_start(year + 1);
        if day >= next_start {
            return (year + 1, 1);
        }
        let start = self.first_week_start(year);
        if day < start {
            let prev_start = self.first_week_start(year - 1);
            return (year - 1, ((day - prev_start).num_days() / 7) as u32 + 1);
        }
        (year, ((day - start).num_days() / 7) as u32 + 1)
    }
}

impl Default for WeekRule {
    fn default() -> Self {
        WeekRule::ISO
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Locale
// ═══════════════════════════════════════════════════════════════════════════

/// Field order of a locale's short numeric date pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortDateOrder {
    /// `dd/MM/yyyy`
    DayMonthYear,
    /// `MM/dd/yyyy`
    MonthDayYear,
}

/// A locale's short numeric date pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortDatePattern {
    pub order: ShortDateOrder,
    pub separator: char,
}

/// The calendar-relevant part of a locale.
///
/// Only what periods need is modelled: the week rule and the short date
/// pattern used by the day parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: &'static str,
    week_rule: WeekRule,
    short_date: ShortDatePattern,
}

impl Locale {
    pub const UK: Locale =
        Locale::preset("en-GB", WeekRule::ISO, ShortDateOrder::DayMonthYear, '/');
    pub const US: Locale = Locale::preset("en-US", WeekRule::US, ShortDateOrder::MonthDayYear, '/');
    pub const FRANCE: Locale =
        Locale::preset("fr-FR", WeekRule::ISO, ShortDateOrder::DayMonthYear, '/');
    pub const GERMANY: Locale =
        Locale::preset("de-DE", WeekRule::ISO, ShortDateOrder::DayMonthYear, '.');
    pub const ITALY: Locale =
        Locale::preset("it-IT", WeekRule::ISO, ShortDateOrder::DayMonthYear, '/');

    const PRESETS: [Locale; 5] = [
        Locale::UK,
        Locale::US,
        Locale::FRANCE,
        Locale::GERMANY,
        Locale::ITALY,
    ];

    const fn preset(
        tag: &'static str,
        week_rule: WeekRule,
        order: ShortDateOrder,
        separator: char,
    ) -> Self {
        Locale {
            tag,
            week_rule,
            short_date: ShortDatePattern { order, separator },
        }
    }

    /// Looks up a preset by BCP-47 style tag (`en-GB`, `en_US`, ...).
    pub fn from_tag(tag: &str) -> PeriodResult<Self> {
        let wanted = tag.trim().replace('_', "-");
        Locale::PRESETS
            .into_iter()
            .find(|l| l.tag.eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| PeriodError::InvalidArgument {
                name: "locale",
                reason: format!("unsupported locale {tag:?}"),
            })
    }

    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    pub const fn week_rule(&self) -> WeekRule {
        self.week_rule
    }

    pub const fn short_date(&self) -> ShortDatePattern {
        self.short_date
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::UK
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar
// ═══════════════════════════════════════════════════════════════════════════

/// Parses an IANA zone name such as `"Europe/London"`.
pub fn parse_zone(name: &str) -> PeriodResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|err| PeriodError::InvalidArgument {
            name: "zone",
            reason: format!("unknown time zone {name:?}: {err}"),
        })
}

/// A fully configured calendar: zone, locale and week rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    zone: Tz,
    locale: Locale,
    week_rule: WeekRule,
}

impl Calendar {
    /// Calendar for `zone` using `locale`'s week rule.
    pub const fn new(zone: Tz, locale: Locale) -> Self {
        Calendar {
            zone,
            locale,
            week_rule: locale.week_rule,
        }
    }

    /// Calendar for `zone` with the default locale.
    pub fn for_zone(zone: Tz) -> Self {
        Calendar::new(zone, Locale::default())
    }

    /// UTC with the default locale.
    pub fn utc() -> Self {
        Calendar::for_zone(Tz::UTC)
    }

    /// Same calendar with weeks starting on `first_day`.
    pub fn with_first_day_of_week(self, first_day: Weekday) -> Self {
        Calendar {
            week_rule: WeekRule {
                first_day,
                ..self.week_rule
            },
            ..self
        }
    }

    /// Same calendar with a different minimal number of days in week 1.
    pub fn with_minimal_days_in_first_week(self, minimal_days: u8) -> PeriodResult<Self> {
        let week_rule = WeekRule::new(self.week_rule.first_day, minimal_days)?;
        Ok(Calendar { week_rule, ..self })
    }

    /// Same calendar in another zone.
    pub fn with_zone(self, zone: Tz) -> Self {
        Calendar { zone, ..self }
    }

    pub const fn zone(&self) -> Tz {
        self.zone
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub const fn week_rule(&self) -> WeekRule {
        self.week_rule
    }

    // ── instant ↔ wall clock ──────────────────────────────────────────

    /// Wall-clock date-time of an epoch-millisecond instant in this zone.
    pub fn local_time(&self, instant: i64) -> PeriodResult<NaiveDateTime> {
        DateTime::from_timestamp_millis(instant)
            .map(|utc| utc.with_timezone(&self.zone).naive_local())
            .ok_or_else(|| PeriodError::InvalidArgument {
                name: "instant",
                reason: format!("{instant} ms is outside the representable range"),
            })
    }

    /// Epoch millisecond of a wall-clock date-time in this zone.
    ///
    /// See the module docs for how ambiguous and nonexistent wall times are
    /// resolved.
    pub fn resolve_local(&self, local: NaiveDateTime) -> i64 {
        match self.zone.from_local_datetime(&local) {
            chrono::LocalResult::Single(dt) => dt.timestamp_millis(),
            chrono::LocalResult::Ambiguous(earliest, latest) => {
                trace!(
                    zone = %self.zone,
                    %local,
                    earliest = %earliest,
                    latest = %latest,
                    "ambiguous wall time, using earlier instant"
                );
                earliest.timestamp_millis()
            }
            chrono::LocalResult::None => {
                let shifted = self.gap_transition(local);
                debug!(
                    zone = %self.zone,
                    %local,
                    instant = shifted,
                    "nonexistent wall time, using transition instant"
                );
                shifted
            }
        }
    }

    fn offset_millis_at(&self, instant: i64) -> i64 {
        DateTime::from_timestamp_millis(instant)
            .map(|utc| {
                let offset = self.zone.offset_from_utc_datetime(&utc.naive_utc());
                i64::from(offset.fix().local_minus_utc()) * 1000
            })
            .unwrap_or(0)
    }

    /// Earliest instant whose wall time is not before `local`, for a `local`
    /// inside a spring-forward gap.
    fn gap_transition(&self, local: NaiveDateTime) -> i64 {
        let wall = local.and_utc().timestamp_millis();
        let before = self.offset_millis_at(wall - MILLIS_PER_DAY);
        let after = self.offset_millis_at(wall + MILLIS_PER_DAY);
        let wall_of = |instant: i64| instant + self.offset_millis_at(instant);

        // lo maps before `local`, hi maps at or after it.
        let mut lo = wall - after;
        let mut hi = wall - before;
        if lo >= hi || wall_of(lo) >= wall || wall_of(hi) < wall {
            return hi;
        }
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if wall_of(mid) >= wall {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Calendar::utc()
    }
}
