use chrono::{DateTime, Duration, Utc};

/// Granularity a breadth measurement is taken at.
///
/// The values match Polygon aggregate timespans; the `as_str` form is
/// what gets persisted and interpolated into aggregate range URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timespan {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl Timespan {
    pub fn as_str(self) -> &'static str {
        match self {
            Timespan::Minute => "minute",
            Timespan::Hour => "hour",
            Timespan::Day => "day",
            Timespan::Week => "week",
            Timespan::Month => "month",
        }
    }
}

/// A collection granularity: `multiplier` units of `timespan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub timespan: Timespan,
    pub multiplier: i64,
}

impl Interval {
    pub fn new(timespan: Timespan, multiplier: i64) -> Self {
        Self {
            timespan,
            multiplier,
        }
    }

    /// The fixed measurement schedule, finest to coarsest.
    pub fn schedule() -> [Self; 5] {
        [
            Self::new(Timespan::Minute, 1),
            Self::new(Timespan::Hour, 1),
            Self::new(Timespan::Day, 1),
            Self::new(Timespan::Week, 1),
            Self::new(Timespan::Month, 1),
        ]
    }

    /// Start of the date range queried for the previous open price.
    ///
    /// Months look back `30 * multiplier` days, everything else
    /// `multiplier` days. Day resolution is all the aggregates API needs.
    pub fn lookback_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self.timespan {
            Timespan::Month => 30 * self.multiplier,
            _ => self.multiplier,
        };
        now - Duration::days(days)
    }
}
