// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Text to period conversion.
//!
//! Every granularity has a small hand-written grammar; all of them accept the
//! canonical form produced by [`RegularTimePeriod::iso_string`]:
//!
//! | Granularity | Accepted forms |
//! |-------------|----------------|
//! | Year | `2000` |
//! | Quarter | `Q1-2000`, `2000-Q1`, `Q1, 2000`, `Q1/2000` |
//! | Month | `2000-03`, `March 2000`, `Mar-2000`, `3.2000`, `200003` |
//! | Week | `2000-W05`, `W5-2000`, `5, 2000` |
//! | Day | `2000-03-05`, then the locale short date (`05/03/2000`, `05.03.00`, ...) |
//! | Hour | day text, space or `T`, `07` |
//! | Minute | ... `07:08` |
//! | Second | ... `07:08:09` |
//! | Millisecond | ... `07:08:09.010` |
//!
//! Only the day grammar is locale sensitive, and its ISO form is always tried
//! first. Any failure, including a field that parses but is out of range, is
//! a [`PeriodError::Format`] carrying the rejected text.
//!
//! [`RegularTimePeriod::iso_string`]: crate::RegularTimePeriod::iso_string

use crate::calendar::{Locale, ShortDateOrder};
use crate::error::{PeriodError, PeriodResult};
use crate::granularity::Granularity;
use crate::period::{
    month_from_name, Day, Hour, Millisecond, Minute, Month, Quarter, Second, TimePeriod, Week,
    Year,
};
use std::str::FromStr;
use tracing::debug;

/// Parses `text` as a period of `granularity` with the default locale.
///
/// # Examples
///
/// ```
/// use calperiod::{parse, Granularity, Quarter, TimePeriod};
///
/// let q = parse("Q1-2000", Granularity::Quarter).unwrap();
/// assert_eq!(q, TimePeriod::Quarter(Quarter::new(1, 2000).unwrap()));
/// assert!(parse("Q9-2000", Granularity::Quarter).is_err());
/// ```
pub fn parse(text: &str, granularity: Granularity) -> PeriodResult<TimePeriod> {
    parse_with_locale(text, granularity, &Locale::default())
}

/// Parses `text` as a period of `granularity`, reading short dates with
/// `locale`'s pattern.
pub fn parse_with_locale(
    text: &str,
    granularity: Granularity,
    locale: &Locale,
) -> PeriodResult<TimePeriod> {
    Ok(match granularity {
        Granularity::Year => parse_year(text)?.into(),
        Granularity::Quarter => parse_quarter(text)?.into(),
        Granularity::Month => parse_month(text)?.into(),
        Granularity::Week => parse_week(text)?.into(),
        Granularity::Day => parse_day(text, locale)?.into(),
        Granularity::Hour => parse_hour(text, locale)?.into(),
        Granularity::Minute => parse_minute(text, locale)?.into(),
        Granularity::Second => parse_second(text, locale)?.into(),
        Granularity::Millisecond => parse_millisecond(text, locale)?.into(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn reject(text: &str, granularity: Granularity, reason: &'static str) -> PeriodError {
    debug!(text, %granularity, reason, "rejected period text");
    PeriodError::format(text, granularity, reason)
}

/// Re-labels a constructor failure as a format error on `text`.
fn fields<T>(result: PeriodResult<T>, text: &str, granularity: Granularity) -> PeriodResult<T> {
    result.map_err(|_| reject(text, granularity, "field outside its valid range"))
}

/// Unsigned decimal number of at most nine digits.
fn number(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() || token.len() > 9 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// A token that reads as a supported year.
fn year_token(token: &str) -> Option<Year> {
    let value = i32::try_from(number(token)?).ok()?;
    Year::new(value).ok()
}

fn month_token(token: &str) -> Option<u32> {
    let token = token.trim();
    match number(token) {
        Some(m) if (1..=12).contains(&m) => Some(m),
        Some(_) => None,
        None => month_from_name(token),
    }
}

fn week_token(token: &str) -> Option<u32> {
    let token = token.trim();
    let digits = token
        .strip_prefix('W')
        .or_else(|| token.strip_prefix('w'))
        .unwrap_or(token);
    number(digits).filter(|w| (Week::FIRST_WEEK_IN_YEAR..=Week::LAST_WEEK_IN_YEAR).contains(w))
}

/// Splits at the first `-`, else `,`, else space, else `.`.
fn split_pair(text: &str) -> Option<(&str, &str)> {
    ['-', ',', ' ', '.']
        .into_iter()
        .find_map(|sep| text.split_once(sep))
        .map(|(a, b)| (a.trim(), b.trim()))
}

/// Orders a two-part text as `(year, other)`.
///
/// When both sides read as a year, the longer one is taken as the year.
fn year_and_other<'a>(first: &'a str, second: &'a str) -> Option<(Year, &'a str)> {
    match (year_token(first), year_token(second)) {
        (Some(y), None) => Some((y, second)),
        (None, Some(y)) => Some((y, first)),
        (Some(y1), Some(y2)) => {
            if first.len() > second.len() {
                Some((y1, second))
            } else {
                Some((y2, first))
            }
        }
        (None, None) => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Date grammars
// ═══════════════════════════════════════════════════════════════════════════

/// Parses a four-digit year in 1900..=9999.
pub fn parse_year(text: &str) -> PeriodResult<Year> {
    let g = Granularity::Year;
    let value = number(text).ok_or_else(|| reject(text, g, "expected a decimal year"))?;
    let value = i32::try_from(value).map_err(|_| reject(text, g, "year too large"))?;
    fields(Year::new(value), text, g)
}

/// Parses a quarter: a `Q<n>` token anywhere, the rest being the year.
pub fn parse_quarter(text: &str) -> PeriodResult<Quarter> {
    let g = Granularity::Quarter;
    let trimmed = text.trim();
    let at = trimmed
        .find(['Q', 'q'])
        .ok_or_else(|| reject(text, g, "missing `Q` marker"))?;
    let after = &trimmed[at + 1..];
    let digit = after
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| reject(text, g, "expected a digit after `Q`"))?;
    if !(Quarter::FIRST..=Quarter::LAST).contains(&digit) {
        return Err(reject(text, g, "quarter must be 1..=4"));
    }
    let remainder: String = format!("{}{}", &trimmed[..at], &after[1..])
        .chars()
        .map(|c| if matches!(c, '/' | ',' | '-') { ' ' } else { c })
        .collect();
    let year = year_token(&remainder).ok_or_else(|| reject(text, g, "cannot read the year"))?;
    fields(Quarter::with_year(digit, year), text, g)
}

/// Parses a month with the year on either side of the separator.
pub fn parse_month(text: &str) -> PeriodResult<Month> {
    let g = Granularity::Month;
    let trimmed = text.trim();
    let (year, month) = match split_pair(trimmed) {
        Some((first, second)) => {
            let (year, other) = year_and_other(first, second)
                .ok_or_else(|| reject(text, g, "cannot read the year"))?;
            let month =
                month_token(other).ok_or_else(|| reject(text, g, "cannot read the month"))?;
            (year, month)
        }
        None if trimmed.len() == 6 && trimmed.is_char_boundary(4) => {
            let year = year_token(&trimmed[..4])
                .ok_or_else(|| reject(text, g, "cannot read the year"))?;
            let month = month_token(&trimmed[4..])
                .ok_or_else(|| reject(text, g, "cannot read the month"))?;
            (year, month)
        }
        None => return Err(reject(text, g, "expected a year and a month")),
    };
    fields(Month::with_year(month, year), text, g)
}

/// Parses a week number (optionally `W`-prefixed) and a year.
pub fn parse_week(text: &str) -> PeriodResult<Week> {
    let g = Granularity::Week;
    let (first, second) =
        split_pair(text.trim()).ok_or_else(|| reject(text, g, "expected a year and a week"))?;
    let (year, other) =
        year_and_other(first, second).ok_or_else(|| reject(text, g, "cannot read the year"))?;
    let week = week_token(other).ok_or_else(|| reject(text, g, "week must be 1..=53"))?;
    fields(Week::with_year(week, year), text, g)
}

/// Parses a day: ISO `yyyy-MM-dd` first, then `locale`'s short date.
pub fn parse_day(text: &str, locale: &Locale) -> PeriodResult<Day> {
    let g = Granularity::Day;
    let trimmed = text.trim();
    let (year, month, day) = iso_date(trimmed)
        .or_else(|| short_date(trimmed, locale))
        .ok_or_else(|| reject(text, g, "expected yyyy-MM-dd or the locale short date"))?;
    fields(Day::new(day, month, year), text, g)
}

fn iso_date(text: &str) -> Option<(i32, u32, u32)> {
    let mut parts = text.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() > 2 || d.len() > 2 {
        return None;
    }
    Some((i32::try_from(number(y)?).ok()?, number(m)?, number(d)?))
}

fn short_date(text: &str, locale: &Locale) -> Option<(i32, u32, u32)> {
    let pattern = locale.short_date();
    let mut parts = text.split(pattern.separator);
    let (a, b, y) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || a.len() > 2 || b.len() > 2 {
        return None;
    }
    let year = match y.len() {
        2 => two_digit_year(number(y)?),
        4 => i32::try_from(number(y)?).ok()?,
        _ => return None,
    };
    let (a, b) = (number(a)?, number(b)?);
    Some(match pattern.order {
        ShortDateOrder::DayMonthYear => (year, b, a),
        ShortDateOrder::MonthDayYear => (year, a, b),
    })
}

/// Two-digit years fall in 1950..=2049.
fn two_digit_year(yy: u32) -> i32 {
    let yy = yy as i32;
    if yy < 50 {
        2000 + yy
    } else {
        1900 + yy
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Time-of-day grammars
// ═══════════════════════════════════════════════════════════════════════════

/// Splits `<day>[ |T]<time>` and parses the day part.
fn day_and_time<'a>(
    text: &'a str,
    locale: &Locale,
    g: Granularity,
) -> PeriodResult<(Day, &'a str)> {
    let trimmed = text.trim();
    let (day_text, time_text) = trimmed
        .split_once([' ', 'T'])
        .ok_or_else(|| reject(text, g, "expected a date followed by a time"))?;
    let day = parse_day(day_text, locale).map_err(|_| reject(text, g, "cannot read the date"))?;
    Ok((day, time_text.trim()))
}

/// Reads `count` colon-separated two-digit-or-less fields.
fn clock_fields(time: &str, count: usize) -> Option<Vec<u32>> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != count || parts.iter().any(|p| p.is_empty() || p.len() > 2) {
        return None;
    }
    parts.into_iter().map(number).collect()
}

/// Parses `<day> HH`.
pub fn parse_hour(text: &str, locale: &Locale) -> PeriodResult<Hour> {
    let g = Granularity::Hour;
    let (day, time) = day_and_time(text, locale, g)?;
    let f = clock_fields(time, 1).ok_or_else(|| reject(text, g, "expected HH"))?;
    fields(Hour::new(f[0], day), text, g)
}

/// Parses `<day> HH:mm`.
pub fn parse_minute(text: &str, locale: &Locale) -> PeriodResult<Minute> {
    let g = Granularity::Minute;
    let (day, time) = day_and_time(text, locale, g)?;
    let f = clock_fields(time, 2).ok_or_else(|| reject(text, g, "expected HH:mm"))?;
    fields(Hour::new(f[0], day).and_then(|h| Minute::new(f[1], h)), text, g)
}

/// Parses `<day> HH:mm:ss`.
pub fn parse_second(text: &str, locale: &Locale) -> PeriodResult<Second> {
    let g = Granularity::Second;
    let (day, time) = day_and_time(text, locale, g)?;
    let f = clock_fields(time, 3).ok_or_else(|| reject(text, g, "expected HH:mm:ss"))?;
    let second = Hour::new(f[0], day)
        .and_then(|h| Minute::new(f[1], h))
        .and_then(|m| Second::new(f[2], m));
    fields(second, text, g)
}

/// Parses `<day> HH:mm:ss.SSS`.
pub fn parse_millisecond(text: &str, locale: &Locale) -> PeriodResult<Millisecond> {
    let g = Granularity::Millisecond;
    let (day, time) = day_and_time(text, locale, g)?;
    let (clock, millis) = time
        .split_once('.')
        .ok_or_else(|| reject(text, g, "expected HH:mm:ss.SSS"))?;
    let f = clock_fields(clock, 3).ok_or_else(|| reject(text, g, "expected HH:mm:ss.SSS"))?;
    let millis = Some(millis)
        .filter(|m| m.len() == 3)
        .and_then(number)
        .ok_or_else(|| reject(text, g, "expected three millisecond digits"))?;
    let ms = Hour::new(f[0], day)
        .and_then(|h| Minute::new(f[1], h))
        .and_then(|m| Second::new(f[2], m))
        .and_then(|s| Millisecond::new(millis, s));
    fields(ms, text, g)
}

// ═══════════════════════════════════════════════════════════════════════════
// FromStr (default locale)
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! impl_from_str {
    ($($ty:ty => $parse:expr),+ $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = PeriodError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $parse(s)
                }
            }
        )+
    };
}

impl_from_str!(
    Year => parse_year,
    Quarter => parse_quarter,
    Month => parse_month,
    Week => parse_week,
    Day => |s: &str| parse_day(s, &Locale::default()),
    Hour => |s: &str| parse_hour(s, &Locale::default()),
    Minute => |s: &str| parse_minute(s, &Locale::default()),
    Second => |s: &str| parse_second(s, &Locale::default()),
    Millisecond => |s: &str| parse_millisecond(s, &Locale::default()),
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::RegularTimePeriod;

    #[test]
    fn test_year() {
        assert_eq!(parse_year(" 2002 ").unwrap(), Year::new(2002).unwrap());
        assert!(parse_year("20O2").is_err());
        let err = parse_year("1899").unwrap_err();
        assert!(matches!(err, PeriodError::Format { .. }));
        assert_eq!(err.rejected_text(), Some("1899"));
    }

    #[test]
    fn test_quarter_forms() {
        let q1 = Quarter::new(1, 2000).unwrap();
        assert_eq!(parse_quarter("Q1-2000").unwrap(), q1);
        assert_eq!(parse_quarter("Q1, 2000").unwrap(), q1);
        assert_eq!(parse_quarter("Q1/2000").unwrap(), q1);
        assert_eq!(parse_quarter("2000-Q1").unwrap(), q1);
        assert_eq!(parse_quarter("2001-Q2").unwrap(), Quarter::new(2, 2001).unwrap());
    }

    #[test]
    fn test_quarter_rejections() {
        for bad in ["Q9-2000", "Q0-2000", "2000", "Q1-", "Qx-2000", "Q1-1899", "Q12-2000"] {
            let err = parse_quarter(bad).unwrap_err();
            assert_eq!(err.rejected_text(), Some(bad), "{bad}");
        }
    }

    #[test]
    fn test_month_forms() {
        let march = Month::new(3, 2000).unwrap();
        for text in [
            "2000-03",
            "2000-3",
            "March 2000",
            "Mar-2000",
            "march, 2000",
            "3.2000",
            "200003",
            "03-2000",
        ] {
            assert_eq!(parse_month(text).unwrap(), march, "{text}");
        }
        assert!(parse_month("2000-13").is_err());
        assert!(parse_month("Marz 2000").is_err());
        assert!(parse_month("2000").is_err());
    }

    #[test]
    fn test_month_both_sides_look_like_years() {
        // Equal lengths make the second token the year, and 2000 is no month.
        assert!(parse_month("2000-1999").is_err());
    }

    #[test]
    fn test_week_forms() {
        let w5 = Week::new(5, 2000).unwrap();
        for text in ["2000-W05", "W5-2000", "5, 2000", "2000 5", "w05.2000"] {
            assert_eq!(parse_week(text).unwrap(), w5, "{text}");
        }
        assert!(parse_week("2000-W54").is_err());
        assert!(parse_week("2000-W0").is_err());
    }

    #[test]
    fn test_day_iso_and_locale() {
        let day = Day::new(5, 3, 2000).unwrap();
        assert_eq!(parse_day("2000-03-05", &Locale::US).unwrap(), day);
        assert_eq!(parse_day("05/03/2000", &Locale::UK).unwrap(), day);
        assert_eq!(parse_day("03/05/2000", &Locale::US).unwrap(), day);
        assert_eq!(parse_day("5.3.00", &Locale::GERMANY).unwrap(), day);
        assert_eq!(parse_day("05/03/99", &Locale::FRANCE).unwrap(), Day::new(5, 3, 1999).unwrap());
        assert!(parse_day("31/02/2000", &Locale::UK).is_err());
        assert!(parse_day("05.03.2000", &Locale::UK).is_err());
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(two_digit_year(49), 2049);
        assert_eq!(two_digit_year(50), 1950);
        assert_eq!(two_digit_year(0), 2000);
    }

    #[test]
    fn test_time_of_day_forms() {
        let uk = Locale::UK;
        assert_eq!(
            parse_hour("2000-03-05 07", &uk).unwrap(),
            Hour::from_ymd_h(2000, 3, 5, 7).unwrap()
        );
        assert_eq!(
            parse_minute("05/03/2000T07:08", &uk).unwrap(),
            Minute::from_ymd_hm(2000, 3, 5, 7, 8).unwrap()
        );
        assert_eq!(
            parse_second("2000-03-05 7:08:09", &uk).unwrap(),
            Second::from_ymd_hms(2000, 3, 5, 7, 8, 9).unwrap()
        );
        assert_eq!(
            parse_millisecond("2000-03-05 07:08:09.010", &uk).unwrap(),
            Millisecond::from_ymd_hms_milli(2000, 3, 5, 7, 8, 9, 10).unwrap()
        );
    }

    #[test]
    fn test_time_of_day_rejections() {
        let uk = Locale::UK;
        assert!(parse_hour("2000-03-05 24", &uk).is_err());
        assert!(parse_hour("2000-03-05", &uk).is_err());
        assert!(parse_minute("2000-03-05 07:60", &uk).is_err());
        assert!(parse_second("2000-03-05 07:08", &uk).is_err());
        assert!(parse_millisecond("2000-03-05 07:08:09.5", &uk).is_err());
        let err = parse_hour("2000-02-30 01", &uk).unwrap_err();
        assert!(matches!(err, PeriodError::Format { granularity: Granularity::Hour, .. }));
    }

    #[test]
    fn test_dispatch_and_from_str() {
        let period = parse("2000-W05", Granularity::Week).unwrap();
        assert_eq!(period, TimePeriod::Week(Week::new(5, 2000).unwrap()));
        let period = parse("2000-W05", Granularity::Month);
        assert!(period.is_err());
        let day: Day = "2000-12-25".parse().unwrap();
        assert_eq!(day, Day::new(25, 12, 2000).unwrap());
        let ms: Millisecond = "2000-12-25 00:00:00.999".parse().unwrap();
        assert_eq!(ms.millisecond(), 999);
    }

    #[test]
    fn test_iso_strings_parse_back() {
        let hour = Hour::from_ymd_h(2000, 3, 5, 7).unwrap();
        let samples: Vec<TimePeriod> = vec![
            Year::new(2000).unwrap().into(),
            Quarter::new(1, 2000).unwrap().into(),
            Month::new(3, 2000).unwrap().into(),
            Week::new(5, 2000).unwrap().into(),
            Day::new(5, 3, 2000).unwrap().into(),
            hour.into(),
            Minute::new(8, hour).unwrap().into(),
            Second::from_ymd_hms(2000, 3, 5, 7, 8, 9).unwrap().into(),
            Millisecond::from_ymd_hms_milli(2000, 3, 5, 7, 8, 9, 10).unwrap().into(),
        ];
        for period in samples {
            let text = period.iso_string();
            assert_eq!(parse(&text, period.granularity()).unwrap(), period, "{text}");
        }
    }
}
