//! Popsicle HTTP Routes
//!
//! CRUD and search endpoints for popsicle records, nested under `/api`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use crate::popsicle::{
    CreatePopsicleRequest, PopsicleError, PopsicleService, PopsicleView, SearchCriteria,
    UpdatePopsicleRequest,
};

// ==================
// Shared State
// ==================

/// Popsicle state shared across handlers
pub struct PopsicleState {
    pub service: PopsicleService,
}

impl PopsicleState {
    pub fn new(service: PopsicleService) -> Self {
        Self { service }
    }
}

// ==================
// Popsicle Routes
// ==================

/// Create popsicle routes
pub fn popsicle_routes(state: Arc<PopsicleState>) -> Router {
    Router::new()
        .route("/popsicle", get(list_popsicles_handler).post(create_popsicle_handler))
        .route("/popsicle/search", get(search_popsicles_handler))
        .route(
            "/popsicle/:id",
            get(get_popsicle_handler)
                .put(replace_popsicle_handler)
                .patch(update_popsicle_handler)
                .delete(delete_popsicle_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// Ids are positive; anything else names a record that cannot exist
fn record_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<u64> {
    let Path(raw) = id?;
    u64::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::UnknownId(raw))
}

async fn list_popsicles_handler(
    State(state): State<Arc<PopsicleState>>,
) -> ApiResult<Json<Vec<PopsicleView>>> {
    Ok(Json(state.service.get_all()?))
}

async fn get_popsicle_handler(
    State(state): State<Arc<PopsicleState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<PopsicleView>> {
    let id = record_id(id)?;
    Ok(Json(state.service.get_by_id(id)?))
}

async fn create_popsicle_handler(
    State(state): State<Arc<PopsicleState>>,
    body: Result<Json<CreatePopsicleRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = body?;
    let created = state.service.create(&request)?;
    let location = format!("/api/popsicle/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

async fn replace_popsicle_handler(
    State(state): State<Arc<PopsicleState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreatePopsicleRequest>, JsonRejection>,
) -> ApiResult<Json<PopsicleView>> {
    let id = record_id(id)?;
    let Json(request) = body?;
    Ok(Json(state.service.replace(id, &request)?))
}

async fn update_popsicle_handler(
    State(state): State<Arc<PopsicleState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdatePopsicleRequest>, JsonRejection>,
) -> ApiResult<Json<PopsicleView>> {
    let id = record_id(id)?;
    let Json(request) = body?;
    Ok(Json(state.service.partial_update(id, &request)?))
}

async fn delete_popsicle_handler(
    State(state): State<Arc<PopsicleState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = record_id(id)?;
    if state.service.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::from(PopsicleError::NotFound(id)))
    }
}

async fn search_popsicles_handler(
    State(state): State<Arc<PopsicleState>>,
    criteria: Result<Query<SearchCriteria>, QueryRejection>,
) -> ApiResult<Json<Vec<PopsicleView>>> {
    let Query(criteria) = criteria?;
    Ok(Json(state.service.search(&criteria)?))
}
