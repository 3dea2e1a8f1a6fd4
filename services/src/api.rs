//! HTTP handlers: the JSON breadth endpoint and the dashboard page.

use crate::AppState;
use crate::database::{BreadthStorage, SNAPSHOT_LIMIT};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use breadth_business::BreadthSnapshot;
use breadth_renderer::{Record, container, render_dataset};
use serde::Serialize;

/// Generic error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.into(),
        }
    }
}

/// `GET /api/breadth_data` — latest snapshots, newest first, as a JSON array.
pub async fn breadth_data<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
    S: BreadthStorage,
{
    match state.storage.latest_snapshots(SNAPSHOT_LIMIT).await {
        Ok(snapshots) => (StatusCode::OK, Json(snapshots)).into_response(),
        Err(e) => {
            tracing::error!("Failed to load breadth snapshots: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error("Failed to load breadth data")),
            )
                .into_response()
        }
    }
}

/// `GET /` — the dashboard page with the breadth table rendered in.
pub async fn dashboard<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
    S: BreadthStorage,
{
    match state.storage.latest_snapshots(SNAPSHOT_LIMIT).await {
        Ok(snapshots) => {
            let records: Vec<Record> = snapshots.iter().map(record_from).collect();
            Html(page(&container(&render_dataset(&records)))).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render dashboard: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error("Failed to load breadth data")),
            )
                .into_response()
        }
    }
}

fn record_from(snapshot: &BreadthSnapshot) -> Record {
    Record {
        index_name: Some(snapshot.index_name.clone()),
        multiplier: Some(snapshot.multiplier),
        timespan: Some(snapshot.timespan.clone()),
        declining: Some(snapshot.declining),
        unchanged: Some(snapshot.unchanged),
        advancing: Some(snapshot.advancing),
        timestamp: Some(snapshot.timestamp.clone()),
    }
}

fn page(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Market Breadth</title>\n\
         </head>\n\
         <body>\n\
         <div id=\"root\">{fragment}</div>\n\
         </body>\n\
         </html>\n"
    )
}
