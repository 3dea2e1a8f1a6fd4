//! Table renderer for the market breadth dashboard.
//!
//! One invocation performs exactly one GET against the breadth endpoint
//! and produces the HTML fragment for the page's table container:
//! a populated `data-table`, a no-data message, or an error message.
//! There are no retries and no timeout; a run resolves or fails once.

pub mod html;
pub mod record;

pub use html::{HEADER_LABELS, NO_DATA_MESSAGE, container, render_dataset, render_error};
pub use record::{MISSING_FIELD, Record};

use thiserror::Error;

/// Why a fetch-and-parse pass failed.
///
/// The display form is the description embedded in the user-visible
/// error message, so the status variant spells out the HTTP status the
/// endpoint answered with.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches the breadth dataset and renders it as an HTML fragment.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    http: reqwest::Client,
    endpoint: String,
}

impl TableRenderer {
    /// Conventional dataset path on the breadth service.
    pub const API_PATH: &'static str = "/api/breadth_data";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues the single GET and parses the body as records.
    ///
    /// A non-2xx response fails without reading the body as data.
    pub async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        let response = self.http.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let records = serde_json::from_slice(&body)?;
        Ok(records)
    }

    /// One full fetch-and-render pass.
    ///
    /// Always returns the complete container fragment: every failure in
    /// fetching or parsing is caught here, logged, and rendered as the
    /// error message. Repeated runs rebuild the fragment from scratch,
    /// so re-rendering never accumulates stale tables.
    pub async fn run(&self) -> String {
        let inner = match self.fetch_records().await {
            Ok(records) => render_dataset(&records),
            Err(error) => {
                tracing::error!(endpoint = %self.endpoint, %error, "failed to load breadth data");
                render_error(&error.to_string())
            }
        };
        container(&inner)
    }
}
