use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use kingston_core::clients::{
    ClientGroup, ClientGroupUpdate, NewClientGroup, NewProductOwner, ProductOwner,
    ProductOwnerUpdate,
};

async fn list_client_groups(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ClientGroup>>> {
    let groups = state.client_service.list_client_groups()?;
    Ok(Json(groups))
}

async fn create_client_group(
    State(state): State<Arc<AppState>>,
    Json(group): Json<NewClientGroup>,
) -> ApiResult<(StatusCode, Json<ClientGroup>)> {
    let g = state.client_service.create_client_group(group).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn get_client_group(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClientGroup>> {
    let g = state.client_service.get_client_group(&id)?;
    Ok(Json(g))
}

async fn update_client_group(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut update): Json<ClientGroupUpdate>,
) -> ApiResult<Json<ClientGroup>> {
    update.id = Some(id);
    let g = state.client_service.update_client_group(update).await?;
    Ok(Json(g))
}

async fn list_owners(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProductOwner>>> {
    let owners = state.client_service.list_owners(&id)?;
    Ok(Json(owners))
}

async fn create_owner(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut owner): Json<NewProductOwner>,
) -> ApiResult<(StatusCode, Json<ProductOwner>)> {
    owner.client_group_id = id;
    let o = state.client_service.create_owner(owner).await?;
    Ok((StatusCode::CREATED, Json(o)))
}

async fn update_owner(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut update): Json<ProductOwnerUpdate>,
) -> ApiResult<Json<ProductOwner>> {
    update.id = Some(id);
    let o = state.client_service.update_owner(update).await?;
    Ok(Json(o))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/client-groups",
            get(list_client_groups).post(create_client_group),
        )
        .route(
            "/client-groups/{id}",
            get(get_client_group).put(update_client_group),
        )
        .route(
            "/client-groups/{id}/owners",
            get(list_owners).post(create_owner),
        )
        .route("/owners/{id}", put(update_owner))
}
