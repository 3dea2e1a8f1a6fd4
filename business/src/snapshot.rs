use serde::{Deserialize, Serialize};

/// One persisted breadth measurement for a universe at an interval.
///
/// Field names are the wire contract of `/api/breadth_data`; the
/// `timestamp` is kept as the formatted string it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadthSnapshot {
    pub index_name: String,
    pub multiplier: i64,
    pub timespan: String,
    pub declining: i64,
    pub unchanged: i64,
    pub advancing: i64,
    pub timestamp: String,
}

/// Result of tallying one universe: how many tickers moved each way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreadthCounts {
    pub advancing: i64,
    pub declining: i64,
    pub unchanged: i64,
}

impl BreadthCounts {
    /// Builds the snapshot to persist for these counts.
    pub fn into_snapshot(
        self,
        index_name: impl Into<String>,
        interval: crate::Interval,
        timestamp: impl Into<String>,
    ) -> BreadthSnapshot {
        BreadthSnapshot {
            index_name: index_name.into(),
            multiplier: interval.multiplier,
            timespan: interval.timespan.as_str().to_owned(),
            declining: self.declining,
            unchanged: self.unchanged,
            advancing: self.advancing,
            timestamp: timestamp.into(),
        }
    }
}
