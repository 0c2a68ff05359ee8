//! User REST API routes.
//!
//! Registration is public; the listing is admin-only and individual
//! profiles are visible to their owner or an administrator.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cueup_core::{new_record_id, PagedResult, User};

use crate::auth::hash_password;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthExtractor;
use crate::store::MemoryStore;
use crate::types::{CreateUserRequest, ListUsersParams, UserListResponse, UserResponse};
use crate::validation::{ValidateNonEmpty, ValidateRange};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for user routes.
#[derive(Clone)]
pub struct UserState {
    pub store: Arc<MemoryStore>,
}

impl UserState {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /api/v1/users - Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError),
    ),
)]
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    req.first_name.validate_non_empty("firstName")?;
    req.last_name.validate_non_empty("lastName")?;
    req.email.validate_non_empty("email")?;
    req.password.validate_non_empty("password")?;

    let user = User {
        id: new_record_id(),
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password_hash: hash_password(&req.password)?,
        // Self-registration can never grant admin.
        is_admin: false,
    };

    let user = state.store.users.insert(user).await?;
    tracing::debug!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/v1/users - List users (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(
        ("pageNumber" = Option<u32>, Query, description = "0-based page number"),
        ("pageSize" = Option<u32>, Query, description = "Page size, default 50"),
    ),
    responses(
        (status = 200, description = "One page of users", body = UserListResponse),
        (status = 401, description = "Unauthorized", body = ApiError),
        (status = 403, description = "Forbidden", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn list_users(
    State(state): State<Arc<UserState>>,
    AuthExtractor(auth): AuthExtractor,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<impl IntoResponse> {
    auth.require_admin()?;
    params.page_size.validate_positive("pageSize")?;

    let pageable = params.pageable();
    let (items, total) = state.store.users.find_matching(|_| true, pageable).await;

    Ok(Json(UserListResponse::from(PagedResult::new(
        items, pageable, total,
    ))))
}

/// GET /api/v1/users/{id} - Get a user profile (owner or admin)
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ApiError),
        (status = 403, description = "Forbidden", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
    ),
    security(("basic_auth" = [])),
)]
pub async fn get_user(
    State(state): State<Arc<UserState>>,
    AuthExtractor(auth): AuthExtractor,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    auth.require_owner_or_admin(&user_id)?;

    let user = state
        .store
        .users
        .find_by_id(&user_id)
        .await
        .ok_or_else(|| ApiError::user_not_found(&user_id))?;

    Ok(Json(UserResponse::from(user)))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the user routes router.
pub fn create_router(store: Arc<MemoryStore>) -> Router {
    let state = Arc::new(UserState::new(store));

    Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .with_state(state)
}
