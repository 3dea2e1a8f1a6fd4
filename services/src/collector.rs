//! Background breadth collection.
//!
//! On a fixed cadence the collector walks every universe and every
//! interval in the schedule, fetches per-ticker price pairs from
//! Polygon with bounded concurrency, tallies them, and persists one
//! snapshot per (universe, interval). Individual failures are logged;
//! the loop itself never stops.

use crate::database::BreadthStorage;
use crate::polygon::PolygonClient;
use crate::universe::Universe;
use breadth_business::{BreadthCounts, Interval, tally};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Cap on simultaneous Polygon requests per measurement.
const MAX_IN_FLIGHT: usize = 50;

/// Stored timestamp layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct Collector<S> {
    storage: S,
    client: PolygonClient,
    universes: Vec<Universe>,
    cadence: Duration,
}

impl<S: BreadthStorage> Collector<S> {
    pub fn new(
        storage: S,
        client: PolygonClient,
        universes: Vec<Universe>,
        cadence: Duration,
    ) -> Self {
        Self {
            storage,
            client,
            universes,
            cadence,
        }
    }

    /// Runs collection passes forever, one per cadence tick.
    pub async fn run(self) {
        loop {
            info!("Getting and loading breadth data...");
            self.collect_once().await;
            info!("Breadth data procured");
            tokio::time::sleep(self.cadence).await;
        }
    }

    /// One full pass over every universe and interval.
    pub async fn collect_once(&self) {
        for universe in &self.universes {
            for interval in Interval::schedule() {
                let counts = self.measure(universe, interval).await;
                let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
                let snapshot = counts.into_snapshot(&universe.name, interval, timestamp);

                if let Err(storage_error) = self.storage.insert_snapshot(&snapshot).await {
                    error!(
                        universe = %universe.name,
                        timespan = interval.timespan.as_str(),
                        error = %storage_error,
                        "failed to persist breadth snapshot"
                    );
                }
            }
        }
    }

    /// Fetches (previous open, latest trade) for every ticker and tallies.
    async fn measure(&self, universe: &Universe, interval: Interval) -> BreadthCounts {
        let now = Utc::now();
        let start_date = interval.lookback_start(now).format("%Y-%m-%d").to_string();
        let end_date = now.format("%Y-%m-%d").to_string();

        let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));
        let mut tasks = JoinSet::new();

        for ticker in universe.tickers.iter().cloned() {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let start_date = start_date.clone();
            let end_date = end_date.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    // Semaphore is never closed while tasks run.
                    return (None, None);
                };
                let prev = client
                    .range_open(&ticker, interval, &start_date, &end_date)
                    .await;
                let last = client.last_trade(&ticker).await;
                (prev, last)
            });
        }

        let mut pairs = Vec::with_capacity(universe.tickers.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(pair) => pairs.push(pair),
                Err(join_error) => error!(error = %join_error, "price fetch task failed"),
            }
        }

        tally(pairs)
    }
}
