//! Rough, human-readable time distances ("about 3 hours").
use chrono::{DateTime, TimeZone, Utc};

/// Approximate distance between two instants. The order does not matter.
///
/// With `include_seconds`, distances under a minute and a half are reported
/// in finer steps ("less than 10 seconds", "half a minute", ...).
pub fn distance_of_time_in_words<A: TimeZone, B: TimeZone>(
    from: &DateTime<A>,
    to: &DateTime<B>,
    include_seconds: bool,
) -> String {
    let millis = to.clone().signed_duration_since(from).num_milliseconds();
    seconds_in_words(millis as f64 / 1000.0, include_seconds)
}

/// Distance between `from` and now.
pub fn time_ago_in_words<Tz: TimeZone>(from: &DateTime<Tz>, include_seconds: bool) -> String {
    distance_of_time_in_words(from, &Utc::now(), include_seconds)
}

/// Describe a span of `seconds` (negative spans count as positive).
pub fn seconds_in_words(seconds: f64, include_seconds: bool) -> String {
    let seconds = seconds.abs();
    let minutes = (seconds / 60.0).round() as u64;
    let whole_seconds = seconds.round() as u64;

    match minutes {
        0..=1 if include_seconds => match whole_seconds {
            0..5 => "less than 5 seconds".to_string(),
            5..10 => "less than 10 seconds".to_string(),
            10..20 => "less than 20 seconds".to_string(),
            20..40 => "half a minute".to_string(),
            40..60 => "less than a minute".to_string(),
            _ => "1 minute".to_string(),
        },
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=45 => format!("{minutes} minutes"),
        46..=90 => "about 1 hour".to_string(),
        91..=1440 => format!("about {} hours", (minutes as f64 / 60.0).round() as u64),
        1441..=2880 => "1 day".to_string(),
        2881..=43220 => format!("{} days", minutes / 1440),
        43221..=86400 => "about 1 month".to_string(),
        86401..=525960 => format!("{} months", minutes / 43200),
        525961..=1051920 => "about 1 year".to_string(),
        _ => format!("over {} years", minutes / 525600),
    }
}

#[cfg(test)]
mod tests;
