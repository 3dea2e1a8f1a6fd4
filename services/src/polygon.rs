//! Polygon.io market data client.
//!
//! Only the two lookups breadth needs: the latest trade price and the
//! open price at the start of an interval's lookback range. Both degrade
//! to `None` instead of failing the caller; the collector treats a
//! ticker without prices as unmeasurable, not as an error.

use breadth_business::interval::{Interval, Timespan};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const MAX_ATTEMPTS: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct PolygonClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LastTradeResponse {
    results: Option<LastTrade>,
}

#[derive(Debug, Deserialize)]
struct LastTrade {
    p: f64,
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    results: Option<Vec<AggregateBar>>,
}

#[derive(Debug, Deserialize)]
struct AggregateBar {
    o: f64,
}

impl PolygonClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.polygon.io";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Custom base URL, for pointing tests at a mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Price of the most recent trade for `ticker`.
    pub async fn last_trade(&self, ticker: &str) -> Option<f64> {
        let url = format!("{}/v2/last/trade/{}", self.base_url, ticker);
        let response: LastTradeResponse = self.get_json(&url, &[]).await?;
        response.results.map(|trade| trade.p)
    }

    /// Open price at the start of the aggregate range for `ticker`.
    ///
    /// The minute timespan reads the bar at `multiplier - 1` so a
    /// multi-minute interval compares against the right minute; every
    /// other timespan uses the first bar of the range.
    pub async fn range_open(
        &self,
        ticker: &str,
        interval: Interval,
        start_date: &str,
        end_date: &str,
    ) -> Option<f64> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}",
            self.base_url,
            ticker,
            interval.multiplier,
            interval.timespan.as_str(),
            start_date,
            end_date,
        );
        let response: AggregatesResponse = self
            .get_json(&url, &[("adjusted", "true"), ("sort", "asc")])
            .await?;

        let bars = response.results?;
        let index = match interval.timespan {
            Timespan::Minute => usize::try_from(interval.multiplier - 1).ok()?,
            _ => 0,
        };
        bars.get(index).map(|bar| bar.o)
    }

    /// GET with the API key appended, retried on transport and decode
    /// failures, `None` once attempts are exhausted.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Option<T> {
        for attempt in 1..=MAX_ATTEMPTS {
            let result = self
                .http
                .get(url)
                .query(query)
                .query(&[("apiKey", self.api_key.as_str())])
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match result {
                Ok(response) => match response.json::<T>().await {
                    Ok(parsed) => return Some(parsed),
                    Err(error) => {
                        warn!(attempt, %error, "failed to decode Polygon response");
                    }
                },
                Err(error) => {
                    warn!(attempt, %error, "Polygon request failed");
                }
            }
        }
        None
    }
}
