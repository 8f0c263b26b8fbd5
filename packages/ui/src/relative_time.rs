//! "5 minutes ago" style timestamps for post cards.
//!
//! Thresholds follow the conventional from-now buckets: each unit is used until the
//! rounded value crosses into the next bucket (45 seconds, 90 seconds, 45 minutes,
//! 90 minutes, 22 hours, 36 hours, 26 days, 46 days, 11 months, 18 months).

use chrono::{DateTime, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const MONTH: f64 = 30.436875 * DAY;
const YEAR: f64 = 365.2425 * DAY;

/// Describe how long before `now` the instant `then` was.
///
/// Instants in the future (clock skew between server and browser) read as just now.
pub fn from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_milliseconds().max(0) as f64 / 1000.0;
    format!("{} ago", describe(seconds))
}

fn describe(seconds: f64) -> String {
    if seconds.round() <= 44.0 {
        return "a few seconds".to_string();
    }
    if seconds.round() <= 89.0 {
        return "a minute".to_string();
    }

    let minutes = (seconds / MINUTE).round();
    if minutes <= 44.0 {
        return format!("{minutes} minutes");
    }
    if minutes <= 89.0 {
        return "an hour".to_string();
    }

    let hours = (seconds / HOUR).round();
    if hours <= 21.0 {
        return format!("{hours} hours");
    }
    if hours <= 35.0 {
        return "a day".to_string();
    }

    let days = (seconds / DAY).round();
    if days <= 25.0 {
        return format!("{days} days");
    }
    if days <= 45.0 {
        return "a month".to_string();
    }

    let months = (seconds / MONTH).round();
    if months <= 10.0 {
        return format!("{months} months");
    }
    if months <= 17.0 {
        return "a year".to_string();
    }

    format!("{} years", (seconds / YEAR).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(delta: Duration) -> String {
        let now = Utc::now();
        from_now(now - delta, now)
    }

    #[test]
    fn test_buckets() {
        let cases = [
            (Duration::seconds(10), "a few seconds ago"),
            (Duration::seconds(60), "a minute ago"),
            (Duration::seconds(90), "2 minutes ago"),
            (Duration::minutes(5), "5 minutes ago"),
            (Duration::minutes(60), "an hour ago"),
            (Duration::hours(3), "3 hours ago"),
            (Duration::hours(30), "a day ago"),
            (Duration::days(3), "3 days ago"),
            (Duration::days(40), "a month ago"),
            (Duration::days(90), "3 months ago"),
            (Duration::days(400), "a year ago"),
            (Duration::days(3 * 365), "3 years ago"),
        ];
        for (delta, expected) in cases {
            assert_eq!(ago(delta), expected, "for {delta:?}");
        }
    }

    #[test]
    fn test_future_reads_as_just_now() {
        assert_eq!(ago(Duration::seconds(-30)), "a few seconds ago");
    }
}
