use std::fmt;

use time::OffsetDateTime;

/// Coarse age of a review, as shown next to it in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAge {
    JustNow,
    Minutes(u64),
    Hours(u64),
    Days(u64),
    Weeks(u64),
    Months(u64),
    Years(u64),
}

impl RelativeAge {
    /// Age of `then` as seen at `now`. Timestamps in the future count as
    /// just now.
    #[must_use]
    pub fn between(then: OffsetDateTime, now: OffsetDateTime) -> Self {
        let secs = u64::try_from((now - then).whole_seconds()).unwrap_or(0);
        if secs < 60 {
            return Self::JustNow;
        }
        let minutes = secs.div_euclid(60);
        if minutes < 60 {
            return Self::Minutes(minutes);
        }
        let hours = minutes.div_euclid(60);
        if hours < 24 {
            return Self::Hours(hours);
        }
        let days = hours.div_euclid(24);
        if days < 7 {
            return Self::Days(days);
        }
        let weeks = days.div_euclid(7);
        if weeks < 5 {
            return Self::Weeks(weeks);
        }
        let months = days.div_euclid(30);
        if months < 12 {
            return Self::Months(months);
        }
        Self::Years(days.div_euclid(365).max(1))
    }

    #[must_use]
    pub fn since(then: OffsetDateTime) -> Self {
        Self::between(then, OffsetDateTime::now_utc())
    }
}

impl fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, unit) = match *self {
            Self::JustNow => return f.write_str("just now"),
            Self::Minutes(n) => (n, "minute"),
            Self::Hours(n) => (n, "hour"),
            Self::Days(n) => (n, "day"),
            Self::Weeks(n) => (n, "week"),
            Self::Months(n) => (n, "month"),
            Self::Years(n) => (n, "year"),
        };
        let plural = if n == 1 { "" } else { "s" };
        write!(f, "{n} {unit}{plural} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn age(d: Duration) -> RelativeAge {
        let now = OffsetDateTime::UNIX_EPOCH + Duration::days(1000);
        RelativeAge::between(now - d, now)
    }

    #[test]
    fn thresholds() {
        assert_eq!(age(Duration::seconds(59)), RelativeAge::JustNow);
        assert_eq!(age(Duration::minutes(3)), RelativeAge::Minutes(3));
        assert_eq!(age(Duration::hours(23)), RelativeAge::Hours(23));
        assert_eq!(age(Duration::days(6)), RelativeAge::Days(6));
        assert_eq!(age(Duration::days(34)), RelativeAge::Weeks(4));
        assert_eq!(age(Duration::days(35)), RelativeAge::Months(1));
        assert_eq!(age(Duration::days(359)), RelativeAge::Months(11));
        assert_eq!(age(Duration::days(360)), RelativeAge::Years(1));
        assert_eq!(age(Duration::days(800)), RelativeAge::Years(2));
    }

    #[test]
    fn future_is_just_now() {
        assert_eq!(age(Duration::minutes(-5)), RelativeAge::JustNow);
    }

    #[test]
    fn display_pluralizes() {
        assert_eq!(RelativeAge::JustNow.to_string(), "just now");
        assert_eq!(RelativeAge::Minutes(1).to_string(), "1 minute ago");
        assert_eq!(RelativeAge::Weeks(3).to_string(), "3 weeks ago");
    }
}
