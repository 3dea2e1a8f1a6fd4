//! Shared test utilities for integration tests.

use breadth_business::BreadthSnapshot;
use breadth_services::database::{BreadthStorage, StorageError};
use std::future::Future;

/// Mock storage backed by a fixed snapshot list.
#[derive(Clone)]
pub struct MockStorage {
    pub is_connected: bool,
    pub snapshots: Vec<BreadthSnapshot>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            is_connected: true,
            snapshots: vec![],
        }
    }

    #[allow(dead_code)]
    pub fn with_snapshots(snapshots: Vec<BreadthSnapshot>) -> Self {
        Self {
            is_connected: true,
            snapshots,
        }
    }

    #[allow(dead_code)]
    pub fn disconnected() -> Self {
        Self {
            is_connected: false,
            snapshots: vec![],
        }
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl BreadthStorage for MockStorage {
    fn is_connected(&self) -> impl Future<Output = bool> + Send {
        let connected = self.is_connected;
        async move { connected }
    }

    fn insert_snapshot(
        &self,
        _snapshot: &BreadthSnapshot,
    ) -> impl Future<Output = Result<(), StorageError>> + Send {
        async { Ok(()) }
    }

    fn latest_snapshots(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<BreadthSnapshot>, StorageError>> + Send {
        let mut rows = self.snapshots.clone();
        async move {
            rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            Ok(rows)
        }
    }
}

/// A snapshot with recognizable values for assertions.
#[allow(dead_code)]
pub fn sample_snapshot(index_name: &str) -> BreadthSnapshot {
    BreadthSnapshot {
        index_name: index_name.to_owned(),
        multiplier: 1,
        timespan: "day".to_owned(),
        declining: 10,
        unchanged: 2,
        advancing: 38,
        timestamp: "2024-01-01 00:00:00".to_owned(),
    }
}
