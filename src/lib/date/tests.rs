use chrono::{Duration, FixedOffset, NaiveDate, Utc};

use super::*;

fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
        .and_utc()
}

#[test]
fn distance_between_dates() {
    let from = at(2004, 3, 6, 21, 41, 18);
    let cases = [
        (at(2004, 3, 6, 21, 41, 25), "less than a minute"),
        (at(2004, 3, 6, 21, 46, 25), "5 minutes"),
        (at(2004, 3, 6, 22, 47, 25), "about 1 hour"),
        (at(2004, 3, 7, 0, 41, 0), "about 3 hours"),
        (at(2004, 3, 7, 1, 20, 0), "about 4 hours"),
        (at(2004, 3, 9, 15, 40, 0), "2 days"),
        (at(2004, 3, 7, 21, 41, 18), "about 24 hours"),
        (at(2004, 3, 7, 21, 51, 18), "1 day"),
        (at(2004, 3, 6, 21, 41, 50), "1 minute"),
    ];
    for (to, expected) in cases {
        assert_eq!(distance_of_time_in_words(&from, &to, false), expected);
        assert_eq!(distance_of_time_in_words(&to, &from, false), expected);
    }
}

#[test]
fn distance_across_time_zones() {
    let from = at(2004, 3, 6, 21, 41, 18);
    let offset = FixedOffset::east_opt(3600).unwrap();
    let to = from.with_timezone(&offset) + Duration::minutes(5);
    assert_eq!(distance_of_time_in_words(&from, &to, false), "5 minutes");
}

#[test]
fn seconds_table() {
    let cases = [
        (7.0, "less than a minute"),
        (49.0, "1 minute"),
        (300.0, "5 minutes"),
        (66.0 * 60.0, "about 1 hour"),
        (11160.0, "about 3 hours"),
        (14399.0, "about 4 hours"),
        (180000.0, "2 days"),
        (86400.0, "about 24 hours"),
        (87000.0, "1 day"),
        (40.0 * 86400.0, "about 1 month"),
        (100.0 * 86400.0, "3 months"),
        (400.0 * 86400.0, "about 1 year"),
        (800.0 * 86400.0, "over 2 years"),
    ];
    for (seconds, expected) in cases {
        assert_eq!(seconds_in_words(seconds, false), expected, "{seconds}s");
    }
    assert_eq!(seconds_in_words(-300.0, false), "5 minutes");
}

#[test]
fn seconds_detail_under_a_minute() {
    let cases = [
        (3.0, "less than 5 seconds"),
        (7.0, "less than 10 seconds"),
        (15.0, "less than 20 seconds"),
        (30.0, "half a minute"),
        (50.0, "less than a minute"),
        (75.0, "1 minute"),
        (120.0, "2 minutes"),
    ];
    for (seconds, expected) in cases {
        assert_eq!(seconds_in_words(seconds, true), expected, "{seconds}s");
    }
}

#[test]
fn time_ago_counts_from_now() {
    let now = Utc::now();
    assert_eq!(time_ago_in_words(&(now - Duration::seconds(25)), false), "less than a minute");
    assert_eq!(time_ago_in_words(&(now - Duration::seconds(320)), false), "5 minutes");
    assert_eq!(
        time_ago_in_words(&(now - Duration::hours(3) - Duration::minutes(13)), false),
        "about 3 hours"
    );
    assert_eq!(
        time_ago_in_words(&(now + Duration::hours(3) + Duration::minutes(56)), false),
        "about 4 hours"
    );
    assert_eq!(
        time_ago_in_words(&(now - Duration::days(2) - Duration::hours(3)), false),
        "2 days"
    );
}
