use crate::database::BreadthStorage;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod collector;
pub mod config;
pub mod database;
pub mod polygon;
pub mod universe;

/// Shared handler state: just the storage backend.
#[derive(Clone)]
pub struct AppState<S> {
    pub storage: S,
}

/// Builds the application router over any storage backend.
pub fn routes<S>(storage: S) -> Router
where
    S: BreadthStorage,
{
    let state = AppState { storage };

    Router::new()
        .route("/", get(api::dashboard::<S>))
        .route("/api/breadth_data", get(api::breadth_data::<S>))
        .route("/is-health", get(health_check::<S>))
        .fallback(any(not_found))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check<S>(State(state): State<AppState<S>>) -> impl IntoResponse
where
    S: BreadthStorage,
{
    if state.storage.is_connected().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "502").into_response()
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
