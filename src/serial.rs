// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Serial indices: per-granularity ordering keys.
//!
//! Every period maps to an `i64` such that, for two periods of the **same**
//! granularity, `serial(a) < serial(b)` iff `a` precedes `b`. The numeric
//! spaces of different granularities are unrelated and must not be mixed.
//!
//! | Granularity | Formula |
//! |-------------|---------|
//! | Year | `year` |
//! | Quarter | `year * 4 + quarter` |
//! | Month | `year * 12 + month` |
//! | Week | `year * 53 + week` |
//! | Day | days since 1899-12-30 (1900-01-01 is serial 2) |
//! | Hour | `day * 24 + hour` |
//! | Minute | `hour_index * 60 + minute` |
//! | Second | `minute_index * 60 + second` |
//! | Millisecond | `second_index * 1000 + millisecond` |
//!
//! The week space has holes (years with 52 weeks skip `year * 53 + 53`), so
//! serial differences only count steps for the other granularities.
//!
//! Known quirk kept as-is: because the day serial starts at 2 rather than 0,
//! sub-day indices in 1900 look small. `1900-01-01 01:01:01.500` has the
//! millisecond index `176_461_500`, which historical test suites flagged as
//! suspicious. It is the tested value and is preserved.

use chrono::NaiveDate;

/// The date with day serial 0.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

fn serial_epoch() -> NaiveDate {
    crate::calendar::date(SERIAL_EPOCH.0, SERIAL_EPOCH.1, SERIAL_EPOCH.2)
}

/// Day serial of a calendar date.
pub fn day_serial(date: NaiveDate) -> i64 {
    (date - serial_epoch()).num_days()
}

/// Calendar date of a day serial, `None` outside chrono's range.
pub fn date_from_serial(serial: i64) -> Option<NaiveDate> {
    let days = chrono::Days::new(serial.unsigned_abs());
    if serial >= 0 {
        serial_epoch().checked_add_days(days)
    } else {
        serial_epoch().checked_sub_days(days)
    }
}

#[inline]
pub const fn year_index(year: i32) -> i64 {
    year as i64
}

#[inline]
pub const fn quarter_index(year: i32, quarter: u32) -> i64 {
    year as i64 * 4 + quarter as i64
}

#[inline]
pub const fn month_index(year: i32, month: u32) -> i64 {
    year as i64 * 12 + month as i64
}

#[inline]
pub const fn week_index(year: i32, week: u32) -> i64 {
    year as i64 * 53 + week as i64
}

#[inline]
pub const fn hour_index(day_serial: i64, hour: u32) -> i64 {
    day_serial * 24 + hour as i64
}

#[inline]
pub const fn minute_index(hour_index: i64, minute: u32) -> i64 {
    hour_index * 60 + minute as i64
}

#[inline]
pub const fn second_index(minute_index: i64, second: u32) -> i64 {
    minute_index * 60 + second as i64
}

#[inline]
pub const fn millisecond_index(second_index: i64, millisecond: u32) -> i64 {
    second_index * 1000 + millisecond as i64
}
