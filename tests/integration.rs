use calperiod::{
    parse, parse_with_locale, timeline, Calendar, Day, Granularity, Hour, Locale, Millisecond,
    Minute, Month, PeriodError, Quarter, RegularTimePeriod, Second, TimePeriod, TimePeriodAnchor,
    Week, Year,
};
use chrono::Weekday;
use chrono_tz::Tz;
use qtty::Days;

#[test]
fn week_bounds_follow_zone_offsets() {
    let w53 = Week::new(53, 2004).unwrap();
    assert_eq!(w53.first_instant(Tz::Europe__London), Ok(1_104_105_600_000));
    assert_eq!(w53.last_instant(Tz::Europe__London), Ok(1_104_710_399_999));
    assert_eq!(w53.first_instant(Tz::Europe__Paris), Ok(1_104_102_000_000));
    assert_eq!(w53.last_instant(Tz::Europe__Paris), Ok(1_104_706_799_999));

    let w1 = Week::new(1, 2005).unwrap();
    assert_eq!(w53.next(), Some(w1));
    assert_eq!(
        w53.last_instant(Tz::Europe__London).unwrap() + 1,
        w1.first_instant(Tz::Europe__London).unwrap()
    );
}

#[test]
fn week_bounds_in_1970_london_standard_time() {
    let london = Tz::Europe__London;
    assert_eq!(Week::new(3, 1970).unwrap().first_instant(london), Ok(946_800_000));
    assert_eq!(Week::new(31, 1970).unwrap().last_instant(london), Ok(18_485_999_999));
}

#[test]
fn week_bounds_in_1950_los_angeles() {
    let la = Tz::America__Los_Angeles;
    assert_eq!(Week::new(47, 1950).unwrap().first_instant(la), Ok(-603_216_000_000));
    assert_eq!(Week::new(2, 1950).unwrap().last_instant(la), Ok(-629_827_200_001));
}

#[test]
fn week_bounds_with_explicit_calendar() {
    let cal = Calendar::new(Tz::UTC, Locale::UK);
    assert_eq!(Week::new(1, 2001).unwrap().first_instant_in(&cal), Ok(978_307_200_000));
    assert_eq!(Week::new(52, 2001).unwrap().last_instant_in(&cal), Ok(1_009_756_799_999));
}

#[test]
fn custom_week_rule_moves_week_one() {
    // Sunday-first with 4 minimal days: 2005 week 1 starts Sunday 2 January.
    let cal = Calendar::utc().with_first_day_of_week(Weekday::Sun);
    let start = Week::new(1, 2005).unwrap().first_instant_in(&cal).unwrap();
    assert_eq!(start, 1_104_624_000_000);
    assert_eq!(Week::from_instant(start, &cal).unwrap(), Week::new(1, 2005).unwrap());
}

#[test]
fn month_and_day_boundaries_by_zone() {
    let gmt = Calendar::for_zone(Tz::Etc__GMT);
    let helsinki = Calendar::for_zone(Tz::Europe__Helsinki);
    for (cal, last_feb) in [(gmt, 1_078_099_199_999_i64), (helsinki, 1_078_091_999_999)] {
        assert_eq!(Month::from_instant(last_feb, &cal).unwrap(), Month::new(2, 2004).unwrap());
        assert_eq!(Month::from_instant(last_feb + 1, &cal).unwrap(), Month::new(3, 2004).unwrap());
        assert_eq!(Day::from_instant(last_feb + 1, &cal).unwrap(), Day::new(1, 3, 2004).unwrap());
    }
}

#[test]
fn day_bounds_fixtures() {
    let la = Tz::America__Los_Angeles;
    let london = Tz::Europe__London;
    assert_eq!(Day::new(26, 4, 1950).unwrap().first_instant(la), Ok(-621_187_200_000));
    assert_eq!(Day::new(1, 2, 1950).unwrap().last_instant(la), Ok(-628_358_400_001));
    assert_eq!(Day::new(1, 3, 1970).unwrap().first_instant(london), Ok(5_094_000_000));
    assert_eq!(Day::new(1, 1, 1970).unwrap().last_instant(london), Ok(82_799_999));
    assert_eq!(Day::new(4, 5, 2001).unwrap().last_instant(london), Ok(989_017_199_999));
}

#[test]
fn millisecond_bounds_fixtures() {
    let utc = Calendar::utc();
    let ms = Millisecond::from_instant(955_762_855_500, &utc).unwrap();
    assert_eq!(ms, Millisecond::from_ymd_hms_milli(2000, 4, 15, 2, 40, 55, 500).unwrap());
    assert_eq!(ms.first_instant_in(&utc), Ok(955_762_855_500));
    assert_eq!(ms.middle_instant_in(&utc), Ok(955_762_855_500));
    assert_eq!(ms.last_instant_in(&utc), Ok(955_762_855_500));

    let london = Calendar::for_zone(Tz::Europe__London);
    let ms = Millisecond::from_instant(1_143_902_595_500, &london).unwrap();
    assert_eq!(ms.iso_string(), "2006-04-01 15:43:15.500");
}

#[test]
fn year_bounds_in_los_angeles() {
    let year = Year::new(1950).unwrap();
    assert_eq!(year.first_instant(Tz::America__Los_Angeles), Ok(-631_123_200_000));
    assert_eq!(year.last_instant(Tz::America__Los_Angeles), Ok(-599_587_200_001));
}

#[test]
fn serial_index_fixtures() {
    assert_eq!(Week::new(1, 2000).unwrap().serial_index(), 106_001);
    assert_eq!(Day::new(1, 1, 1900).unwrap().serial_index(), 2);
    assert_eq!(Day::new(15, 4, 2000).unwrap().serial_index(), 36_631);
    assert_eq!(
        Millisecond::from_ymd_hms_milli(2000, 1, 1, 1, 1, 1, 500).unwrap().serial_index(),
        3_155_850_061_500
    );
}

#[test]
fn absent_zone_or_calendar_is_invalid_argument() {
    let hour = Hour::from_ymd_h(2000, 1, 1, 0).unwrap();
    assert!(matches!(
        hour.first_instant(None),
        Err(PeriodError::InvalidArgument { name: "zone", .. })
    ));
    assert!(matches!(
        hour.last_instant_in(None),
        Err(PeriodError::InvalidArgument { name: "calendar", .. })
    ));
    assert!(matches!(
        hour.instant_at(TimePeriodAnchor::End, None),
        Err(PeriodError::InvalidArgument { name: "calendar", .. })
    ));
}

#[test]
fn out_of_range_fields_are_range_errors() {
    assert!(matches!(Quarter::new(0, 2000), Err(PeriodError::Range { field: "quarter", .. })));
    assert!(matches!(Quarter::new(5, 2000), Err(PeriodError::Range { .. })));
    assert!(matches!(Month::new(13, 2000), Err(PeriodError::Range { field: "month", .. })));
    let day = Day::new(1, 1, 2000).unwrap();
    assert!(matches!(Hour::new(24, day), Err(PeriodError::Range { field: "hour", .. })));
    let hour = Hour::new(0, day).unwrap();
    assert!(matches!(Minute::new(60, hour), Err(PeriodError::Range { .. })));
}

#[test]
fn navigation_stops_at_supported_range() {
    assert_eq!(Year::new(9999).unwrap().next(), None);
    assert_eq!(Quarter::new(1, 1900).unwrap().previous(), None);
    assert_eq!(Day::new(31, 12, 9999).unwrap().next(), None);
    assert_eq!(Second::from_ymd_hms(1900, 1, 1, 0, 0, 0).unwrap().previous(), None);
    // The last period still has bounds.
    let last = Millisecond::from_ymd_hms_milli(9999, 12, 31, 23, 59, 59, 999).unwrap();
    assert_eq!(last.last_instant(Tz::UTC), Ok(253_402_300_799_999));
}

#[test]
fn quarter_parse_scenarios() {
    let q = parse("Q1-2000", Granularity::Quarter).unwrap();
    assert_eq!(q, TimePeriod::Quarter(Quarter::new(1, 2000).unwrap()));
    let q: Quarter = "2001-Q2".parse().unwrap();
    assert_eq!((q.quarter(), q.year_value()), (2, 2001));
    let err = parse("Q9-2000", Granularity::Quarter).unwrap_err();
    assert!(matches!(err, PeriodError::Format { .. }));
    assert_eq!(err.rejected_text(), Some("Q9-2000"));
}

#[test]
fn day_parse_uses_locale_after_iso() {
    let text = "04/05/2001";
    let uk = parse_with_locale(text, Granularity::Day, &Locale::UK).unwrap();
    let us = parse_with_locale(text, Granularity::Day, &Locale::US).unwrap();
    assert_eq!(uk, TimePeriod::Day(Day::new(4, 5, 2001).unwrap()));
    assert_eq!(us, TimePeriod::Day(Day::new(5, 4, 2001).unwrap()));
    let iso = parse_with_locale("2001-05-04", Granularity::Day, &Locale::US).unwrap();
    assert_eq!(iso, uk);
}

#[test]
fn anchors_and_spans() {
    let cal = Calendar::utc();
    let day = Day::new(1, 1, 1970).unwrap();
    let span = day.span(&cal);
    assert_eq!(span.duration_days(), Days::new(1.0));
    assert_eq!(day.instant_at(TimePeriodAnchor::Middle, &cal), Ok(43_199_999));
    let month = Month::new(1, 1970).unwrap();
    assert_eq!(month.span(&cal).intersection(&span), Some(span));
}

#[test]
fn timeline_walks_hours_across_dst_change() {
    // London clocks go forward at 01:00 on 2006-03-26.
    let cal = Calendar::for_zone(Tz::Europe__London);
    let from = Hour::from_ymd_h(2006, 3, 26, 0).unwrap();
    let to = Hour::from_ymd_h(2006, 3, 26, 3).unwrap();
    let firsts: Vec<i64> = timeline::between(from, to)
        .unwrap()
        .map(|h| h.first_instant_in(&cal).unwrap())
        .collect();
    assert_eq!(
        firsts,
        [
            1_143_331_200_000,
            1_143_334_800_000,
            1_143_334_800_000,
            1_143_338_400_000
        ]
    );
    assert!(firsts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn time_period_factory_covers_every_granularity() {
    let cal = Calendar::for_zone(Tz::Europe__Paris);
    let instant = 978_305_400_000;
    let periods: Vec<TimePeriod> = Granularity::ALL
        .iter()
        .map(|g| TimePeriod::from_instant(*g, instant, &cal).unwrap())
        .collect();
    for period in &periods {
        assert!(period.span(&cal).contains(instant), "{period}");
    }
    assert_eq!(periods.last().unwrap().iso_string(), "2001");
}

#[cfg(feature = "serde")]
#[test]
fn serde_periods_travel_as_iso_strings() {
    let week = Week::new(5, 2000).unwrap();
    let json = serde_json::to_string(&week).unwrap();
    assert_eq!(json, "\"2000-W05\"");
    let back: Week = serde_json::from_str(&json).unwrap();
    assert_eq!(back, week);

    let period = TimePeriod::from(Month::new(3, 2000).unwrap());
    let json = serde_json::to_string(&period).unwrap();
    assert_eq!(json, r#"{"granularity":"month","value":"2000-03"}"#);
    let back: TimePeriod = serde_json::from_str(&json).unwrap();
    assert_eq!(back, period);

    assert!(serde_json::from_str::<Quarter>("\"Q9-2000\"").is_err());
}
