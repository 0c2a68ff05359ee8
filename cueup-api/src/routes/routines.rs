//! Routine REST API routes.
//!
//! Routines are published by administrators and browsable by anyone;
//! the listing supports an optional OR-semantics tag filter.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cueup_core::{new_record_id, PagedResult, Routine};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthExtractor;
use crate::store::MemoryStore;
use crate::types::{CreateRoutineRequest, ListRoutinesParams, RoutineListResponse};
use crate::validation::{ValidateNonEmpty, ValidateRange};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for routine routes.
#[derive(Clone)]
pub struct RoutineState {
    pub store: Arc<MemoryStore>,
}

impl RoutineState {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/routines - Publish a new routine (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/routines",
    tag = "Routines",
    request_body = CreateRoutineRequest,
    responses(
        (status = 201, description = "Routine created successfully", body = Routine),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError),
        (status = 403, description = "Forbidden", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn create_routine(
    State(state): State<Arc<RoutineState>>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateRoutineRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_admin()?;
    req.title.validate_non_empty("title")?;

    let routine = req.into_routine(new_record_id());
    let routine = state.store.routines.insert(routine).await?;
    tracing::debug!(routine_id = %routine.id, "routine published");

    Ok((StatusCode::CREATED, Json(routine)))
}

/// GET /api/v1/routines - List routines with an optional tag filter
#[utoipa::path(
    get,
    path = "/api/v1/routines",
    tag = "Routines",
    params(
        ("pageNumber" = Option<u32>, Query, description = "0-based page number"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 50"),
        ("tags" = Option<String>, Query, description = "Comma-separated tags; a routine matches when it carries any of them"),
    ),
    responses(
        (status = 200, description = "One page of routines", body = RoutineListResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn list_routines(
    State(state): State<Arc<RoutineState>>,
    Query(params): Query<ListRoutinesParams>,
) -> ApiResult<impl IntoResponse> {
    params.page_size.validate_positive("pageSize")?;

    let criteria = params.criteria();
    let pageable = params.pageable();
    let (items, total) = state
        .store
        .routines
        .find_matching(|routine| criteria.matches(routine), pageable)
        .await;

    Ok(Json(RoutineListResponse::from(PagedResult::new(
        items, pageable, total,
    ))))
}

/// GET /api/v1/routines/{id} - Get a routine
#[utoipa::path(
    get,
    path = "/api/v1/routines/{id}",
    tag = "Routines",
    params(
        ("id" = String, Path, description = "Routine ID"),
    ),
    responses(
        (status = 200, description = "Routine details", body = Routine),
        (status = 404, description = "Routine not found", body = ApiError),
    ),
)]
pub async fn get_routine(
    State(state): State<Arc<RoutineState>>,
    Path(routine_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let routine = state
        .store
        .routines
        .find_by_id(&routine_id)
        .await
        .ok_or_else(|| ApiError::routine_not_found(&routine_id))?;

    Ok(Json(routine))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the routine routes router.
pub fn create_router(store: Arc<MemoryStore>) -> Router {
    let state = Arc::new(RoutineState::new(store));

    Router::new()
        .route("/", post(create_routine))
        .route("/", get(list_routines))
        .route("/:id", get(get_routine))
        .with_state(state)
}
