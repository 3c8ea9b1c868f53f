//! ISO 8601 durations as reported by the YouTube Data API
//!
//! Typical video: `PT12M3S` (12 minutes, 3 seconds). Very long video:
//! `P3W3DT20H31M21S`. The `M` unit means months before the `T` marker and
//! minutes after it.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?",
    )
    .expect("duration pattern is valid")
});

/// Parsed duration components. Absent components are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsoDuration {
    pub years: u64,
    pub months: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl IsoDuration {
    /// Parse a duration string. Never fails: text that doesn't match yields
    /// an all-zero duration.
    pub fn parse(text: &str) -> Self {
        let Some(caps) = DURATION_PATTERN.captures(text) else {
            return Self::default();
        };

        let field = |i: usize| {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .unwrap_or(0)
        };

        Self {
            years: field(1),
            months: field(2),
            weeks: field(3),
            days: field(4),
            hours: field(5),
            minutes: field(6),
            seconds: field(7),
        }
    }

    /// Playing time for display: `M:SS`, or `H:MM:SS` once hours are present.
    pub fn to_display(&self) -> String {
        if self.hours > 0 {
            format!("{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        } else {
            format!("{}:{:02}", self.minutes, self.seconds)
        }
    }

    /// Clock-time part in seconds. Calendar components are ignored.
    pub fn clock_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display())
    }
}

impl From<&str> for IsoDuration {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Free-function form of [`IsoDuration::parse`].
pub fn parse_duration(text: &str) -> IsoDuration {
    IsoDuration::parse(text)
}

/// Free-function form of [`IsoDuration::to_display`].
pub fn format_duration(duration: &IsoDuration) -> String {
    duration.to_display()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_minutes_and_seconds() {
        let d = IsoDuration::parse("PT3M12S");
        assert_eq!(
            d,
            IsoDuration {
                minutes: 3,
                seconds: 12,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_every_component() {
        let d = IsoDuration::parse("P2Y3M4W5DT20H31M21S");
        assert_eq!(d.years, 2);
        assert_eq!(d.months, 3);
        assert_eq!(d.weeks, 4);
        assert_eq!(d.days, 5);
        assert_eq!(d.hours, 20);
        assert_eq!(d.minutes, 31);
        assert_eq!(d.seconds, 21);
    }

    #[test]
    fn test_month_before_time_marker() {
        let d = IsoDuration::parse("P7M");
        assert_eq!(d.months, 7);
        assert_eq!(d.minutes, 0);
    }

    #[test]
    fn test_unmatched_text_is_zero() {
        assert_eq!(IsoDuration::parse("three minutes"), IsoDuration::default());
        assert_eq!(IsoDuration::parse(""), IsoDuration::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(IsoDuration::parse("PT6S").to_display(), "0:06");
        assert_eq!(IsoDuration::parse("PT4M56S").to_display(), "4:56");
        assert_eq!(IsoDuration::parse("PT1H3M19S").to_display(), "1:03:19");
        assert_eq!(IsoDuration::parse("PT10M").to_display(), "10:00");
        assert_eq!(IsoDuration::default().to_display(), "0:00");
    }

    #[test]
    fn test_clock_seconds() {
        assert_eq!(IsoDuration::parse("PT1H30M45S").clock_seconds(), 5445);
        assert_eq!(
            IsoDuration::parse("PT5124095576030432H").clock_seconds(),
            u64::MAX
        );
    }

    proptest! {
        #[test]
        fn clock_components_survive_parse(h in 0u64..100, m in 0u64..60, s in 0u64..60) {
            let d = IsoDuration::parse(&format!("PT{h}H{m}M{s}S"));
            prop_assert_eq!((d.hours, d.minutes, d.seconds), (h, m, s));

            let shown = d.to_display();
            let expected_len = if h > 0 { 2 } else { 1 };
            prop_assert_eq!(shown.matches(':').count(), expected_len);
            let secs = format!("{:02}", s);
            prop_assert!(shown.ends_with(&secs));
        }
    }
}
