//! Score REST API routes.
//!
//! Score creation runs a short-circuiting validation pipeline against the
//! parent routine before anything is written: referential check, then each
//! optional attribute against the routine's allow-lists, then id and
//! timestamp assignment, then the single insert. Listings build one
//! conjunctive criteria value from the request parameters and force it
//! through the caller's access scope, so a non-admin can never widen
//! visibility past their own scores.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cueup_core::{
    new_record_id, now_to_minute, truncate_to_minute, AccessScope, Constraint, PagedResult,
    Routine, Score, ScoreCriteria,
};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthExtractor;
use crate::store::MemoryStore;
use crate::types::{CreateScoreRequest, ListScoresParams, ScoreListResponse};
use crate::validation::ValidateRange;

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for score routes.
#[derive(Clone)]
pub struct ScoreState {
    pub store: Arc<MemoryStore>,
}

impl ScoreState {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check each optional score attribute against the routine's allow-lists,
/// short-circuiting on the first rejected field. The routine value is the
/// immutable snapshot loaded for this request; nothing re-reads it.
fn validate_score_fields(req: &CreateScoreRequest, routine: &Routine) -> ApiResult<()> {
    if let Some(limit) = req.cushion_limit {
        if !routine.permits_cushion_limit(limit) {
            return Err(ApiError::invalid_score_field("cushionLimit"));
        }
    }
    if let Some(colours) = &req.colours {
        if !routine.permits_colours(colours) {
            return Err(ApiError::invalid_score_field("colours"));
        }
    }
    if let Some(count) = req.num_balls {
        if !routine.permits_num_balls(count) {
            return Err(ApiError::invalid_score_field("numBalls"));
        }
    }
    if req.looped && !routine.permits_loop() {
        return Err(ApiError::invalid_score_field("loop"));
    }
    Ok(())
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/scores - Record a score
#[utoipa::path(
    post,
    path = "/api/v1/scores",
    tag = "Scores",
    request_body = CreateScoreRequest,
    responses(
        (status = 201, description = "Score recorded", body = Score),
        (status = 400, description = "Invalid request or attribute not allowed by the routine", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError),
        (status = 403, description = "Forbidden", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn create_score(
    State(state): State<Arc<ScoreState>>,
    AuthExtractor(auth): AuthExtractor,
    Json(req): Json<CreateScoreRequest>,
) -> ApiResult<impl IntoResponse> {
    if !auth.is_admin() && req.user_id != auth.user_id {
        return Err(ApiError::forbidden(
            "Scores can only be submitted for your own account",
        ));
    }

    let routine = state
        .store
        .routines
        .find_by_id(&req.routine_id)
        .await
        .ok_or_else(|| ApiError::routine_for_score_not_found(&req.routine_id))?;

    validate_score_fields(&req, &routine)?;

    let score = Score {
        id: new_record_id(),
        value: req.value,
        routine_id: req.routine_id,
        user_id: req.user_id,
        date_time: req
            .date_time
            .map(truncate_to_minute)
            .unwrap_or_else(now_to_minute),
        cushion_limit: req.cushion_limit,
        colours: req.colours,
        num_balls: req.num_balls,
        looped: req.looped,
    };

    let score = state.store.scores.insert(score).await?;
    tracing::debug!(score_id = %score.id, routine_id = %score.routine_id, "score recorded");

    Ok((StatusCode::CREATED, Json(score)))
}

/// GET /api/v1/scores - List scores visible to the caller
#[utoipa::path(
    get,
    path = "/api/v1/scores",
    tag = "Scores",
    params(
        ("pageNumber" = Option<u32>, Query, description = "0-based page number"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 50"),
        ("from" = Option<String>, Query, description = "Inclusive lower date bound, dd/MM/yyyy HH:mm"),
        ("to" = Option<String>, Query, description = "Inclusive upper date bound, dd/MM/yyyy HH:mm"),
        ("routineId" = Option<String>, Query, description = "Filter by routine"),
        ("userId" = Option<String>, Query, description = "Filter by user; ignored for non-admins, whose own id always applies"),
        ("cushionLimit" = Option<i32>, Query, description = "Filter by cushion limit"),
        ("colours" = Option<String>, Query, description = "Filter by colour configuration"),
        ("numBalls" = Option<i32>, Query, description = "Filter by ball count"),
        ("loop" = Option<bool>, Query, description = "Filter by loop flag"),
    ),
    responses(
        (status = 200, description = "One page of scores", body = ScoreListResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn list_scores(
    State(state): State<Arc<ScoreState>>,
    AuthExtractor(auth): AuthExtractor,
    Query(params): Query<ListScoresParams>,
) -> ApiResult<impl IntoResponse> {
    params.page_size.validate_positive("pageSize")?;

    let criteria = params.criteria().scoped(&auth.access_scope());
    let pageable = params.pageable();
    let (items, total) = state
        .store
        .scores
        .find_matching(|score| criteria.matches(score), pageable)
        .await;

    Ok(Json(ScoreListResponse::from(PagedResult::new(
        items, pageable, total,
    ))))
}

/// GET /api/v1/users/{id}/scores - List one user's scores (owner or admin)
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/scores",
    tag = "Scores",
    params(
        ("id" = String, Path, description = "User ID"),
        ("pageNumber" = Option<u32>, Query, description = "0-based page number"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 50"),
        ("from" = Option<String>, Query, description = "Inclusive lower date bound, dd/MM/yyyy HH:mm"),
        ("to" = Option<String>, Query, description = "Inclusive upper date bound, dd/MM/yyyy HH:mm"),
        ("routineId" = Option<String>, Query, description = "Filter by routine"),
        ("cushionLimit" = Option<i32>, Query, description = "Filter by cushion limit"),
        ("colours" = Option<String>, Query, description = "Filter by colour configuration"),
        ("numBalls" = Option<i32>, Query, description = "Filter by ball count"),
        ("loop" = Option<bool>, Query, description = "Filter by loop flag"),
    ),
    responses(
        (status = 200, description = "One page of the user's scores", body = ScoreListResponse),
        (status = 401, description = "Unauthorized", body = ApiError),
        (status = 403, description = "Forbidden", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn list_scores_for_user(
    State(state): State<Arc<ScoreState>>,
    AuthExtractor(auth): AuthExtractor,
    Path(user_id): Path<String>,
    Query(params): Query<ListScoresParams>,
) -> ApiResult<impl IntoResponse> {
    auth.require_owner_or_admin(&user_id)?;
    params.page_size.validate_positive("pageSize")?;

    let criteria = ScoreCriteria {
        user_id: Constraint::EqualTo(user_id),
        ..params.criteria()
    }
    .scoped(&auth.access_scope());
    let pageable = params.pageable();
    let (items, total) = state
        .store
        .scores
        .find_matching(|score| criteria.matches(score), pageable)
        .await;

    Ok(Json(ScoreListResponse::from(PagedResult::new(
        items, pageable, total,
    ))))
}

/// GET /api/v1/scores/{id} - Get a score (owner or admin)
#[utoipa::path(
    get,
    path = "/api/v1/scores/{id}",
    tag = "Scores",
    params(
        ("id" = String, Path, description = "Score ID"),
    ),
    responses(
        (status = 200, description = "Score details", body = Score),
        (status = 401, description = "Unauthorized", body = ApiError),
        (status = 404, description = "Score not found", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn get_score(
    State(state): State<Arc<ScoreState>>,
    AuthExtractor(auth): AuthExtractor,
    Path(score_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let score = state
        .store
        .scores
        .find_by_id(&score_id)
        .await
        .ok_or_else(|| ApiError::score_not_found(&score_id))?;

    // Out-of-scope records read as absent, not forbidden.
    if !auth.access_scope().permits(&score.user_id) {
        return Err(ApiError::score_not_found(&score_id));
    }

    Ok(Json(score))
}

/// DELETE /api/v1/scores/{id} - Delete a score (owner or admin)
#[utoipa::path(
    delete,
    path = "/api/v1/scores/{id}",
    tag = "Scores",
    params(
        ("id" = String, Path, description = "Score ID"),
    ),
    responses(
        (status = 204, description = "Score deleted (or was already absent)"),
        (status = 401, description = "Unauthorized", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn delete_score(
    State(state): State<Arc<ScoreState>>,
    AuthExtractor(auth): AuthExtractor,
    Path(score_id): Path<String>,
) -> ApiResult<StatusCode> {
    match auth.access_scope() {
        AccessScope::Unrestricted => {
            state.store.scores.delete_by_id(&score_id).await;
        }
        AccessScope::OwnedBy(owner) => {
            state
                .store
                .scores
                .delete_if(&score_id, |score| score.user_id == owner)
                .await;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the score routes router.
pub fn create_router(store: Arc<MemoryStore>) -> Router {
    let state = Arc::new(ScoreState::new(store));

    Router::new()
        .route("/", post(create_score))
        .route("/", get(list_scores))
        .route("/:id", get(get_score))
        .route("/:id", axum::routing::delete(delete_score))
        .with_state(state)
}

/// Create the `/users/{id}/scores` router, merged into the users subtree.
pub fn user_scores_router(store: Arc<MemoryStore>) -> Router {
    let state = Arc::new(ScoreState::new(store));

    Router::new()
        .route("/:id/scores", get(list_scores_for_user))
        .with_state(state)
}
