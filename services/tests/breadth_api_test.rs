//! End-to-end checks of the HTTP surface against mock storage.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use breadth_business::BreadthSnapshot;
use breadth_services::routes;
use common::{MockStorage, sample_snapshot};

#[tokio::test]
async fn breadth_data_returns_stored_rows_verbatim() {
    let storage = MockStorage::with_snapshots(vec![
        sample_snapshot("ndx"),
        sample_snapshot("sp500"),
    ]);
    let server = TestServer::new(routes(storage)).unwrap();

    let response = server.get("/api/breadth_data").await;
    response.assert_status(StatusCode::OK);

    let rows: Vec<BreadthSnapshot> = response.json();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], sample_snapshot("ndx"));
    assert_eq!(rows[1], sample_snapshot("sp500"));
}

#[tokio::test]
async fn breadth_data_with_empty_storage_is_an_empty_array() {
    let server = TestServer::new(routes(MockStorage::new())).unwrap();

    let response = server.get("/api/breadth_data").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "[]");
}

#[tokio::test]
async fn dashboard_serves_rendered_table_page() {
    let storage = MockStorage::with_snapshots(vec![sample_snapshot("XLK")]);
    let server = TestServer::new(routes(storage)).unwrap();

    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);

    let body = response.text();
    assert!(body.contains("<div id=\"root\">"));
    assert!(body.contains(r#"<div class="table-container">"#));
    assert!(body.contains(
        "<tr><td>XLK</td><td>1</td><td>day</td><td>10</td>\
         <td>2</td><td>38</td><td>2024-01-01 00:00:00</td></tr>"
    ));
}

#[tokio::test]
async fn dashboard_with_no_rows_shows_no_data_message() {
    let server = TestServer::new(routes(MockStorage::new())).unwrap();

    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);

    let body = response.text();
    assert!(body.contains("<p>No data available.</p>"));
    assert!(!body.contains("<table"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = TestServer::new(routes(MockStorage::new())).unwrap();

    let response = server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
