use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use kingston_core::networth::{
    ChangeSinceLast, NetWorthSnapshot, NetWorthSnapshotSummary, NewSnapshotRequest, SnapshotData,
};

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentQuery {
    /// RFC 3339 instant to compare against. Defaults to now.
    as_of: Option<String>,
}

#[derive(serde::Deserialize)]
struct CompareQuery {
    from: i32,
    to: i32,
}

fn parse_instant(value: &str, field: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", field, e)))
}

async fn get_current_networth(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<CurrentQuery>,
) -> ApiResult<Json<SnapshotData>> {
    let as_of = match q.as_of.as_deref() {
        Some(value) => parse_instant(value, "asOf")?,
        None => Utc::now(),
    };
    let data = state
        .net_worth_service
        .get_current_networth(&client_id, as_of)?;
    Ok(Json(data))
}

async fn create_snapshot(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewSnapshotRequest>,
) -> ApiResult<(StatusCode, Json<NetWorthSnapshot>)> {
    let snapshot = state
        .net_worth_service
        .create_snapshot(&client_id, &body.created_by, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn list_snapshots(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<NetWorthSnapshotSummary>>> {
    let snapshots = state.net_worth_service.list_snapshots(&client_id)?;
    Ok(Json(snapshots))
}

async fn get_snapshot(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<NetWorthSnapshot>> {
    let snapshot = state.net_worth_service.get_snapshot(id)?;
    Ok(Json(snapshot))
}

async fn compare_snapshots(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CompareQuery>,
) -> ApiResult<Json<ChangeSinceLast>> {
    let change = state.net_worth_service.compare_snapshots(q.from, q.to)?;
    Ok(Json(change))
}

// `compare` and `snapshot` are fixed segments; client group ids may not use them
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/networth/compare", get(compare_snapshots))
        .route("/networth/snapshot/{id}", get(get_snapshot))
        .route("/networth/{client_id}", get(get_current_networth))
        .route("/networth/{client_id}/snapshot", post(create_snapshot))
        .route("/networth/{client_id}/snapshots", get(list_snapshots))
}
