use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use kingston_core::holdings::{Holding, HoldingUpdate, NewHolding};

async fn list_holdings(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Holding>>> {
    let holdings = state.holding_service.list_holdings(&id)?;
    Ok(Json(holdings))
}

async fn create_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut holding): Json<NewHolding>,
) -> ApiResult<(StatusCode, Json<Holding>)> {
    holding.client_group_id = id;
    let h = state.holding_service.create_holding(holding).await?;
    Ok((StatusCode::CREATED, Json(h)))
}

async fn update_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut update): Json<HoldingUpdate>,
) -> ApiResult<Json<Holding>> {
    update.id = Some(id);
    let h = state.holding_service.update_holding(update).await?;
    Ok(Json(h))
}

async fn delete_holding(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.holding_service.delete_holding(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/client-groups/{id}/holdings",
            get(list_holdings).post(create_holding),
        )
        .route("/holdings/{id}", put(update_holding).delete(delete_holding))
}
