//! Axum middleware for authentication.
//!
//! The middleware validates Basic credentials when an `Authorization`
//! header is present and injects the resulting [`AuthContext`] into request
//! extensions. Requests without the header pass through untouched so public
//! endpoints (registration, routine browsing, health) keep working; the
//! [`AuthExtractor`] used by protected handlers rejects with 401 when no
//! context was injected.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::auth::{authenticate, parse_basic_header, AuthContext};
use crate::error::ApiError;
use crate::store::MemoryStore;

// ============================================================================
// MIDDLEWARE STATE
// ============================================================================

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub store: Arc<MemoryStore>,
}

impl AuthMiddlewareState {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// MIDDLEWARE FUNCTION
// ============================================================================

/// Authentication middleware.
///
/// 1. No `Authorization` header: pass the request through unannotated.
/// 2. Present but malformed or failing verification: 401.
/// 3. Valid credentials: inject [`AuthContext`] into request extensions.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if let Some(header) = header {
        let credentials = parse_basic_header(&header)
            .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;
        let auth = authenticate(&state.store, &credentials).await?;
        tracing::debug!(user_id = %auth.user_id, "request authenticated");
        request.extensions_mut().insert(auth);
    }

    Ok(next.run(request).await)
}

// ============================================================================
// AUTH EXTRACTOR
// ============================================================================

/// Typed extractor for the authenticated caller.
///
/// ```ignore
/// pub async fn list_scores(
///     State(state): State<Arc<ScoreState>>,
///     AuthExtractor(auth): AuthExtractor,
/// ) -> ApiResult<impl IntoResponse> {
///     auth.require_admin()?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthExtractor(pub AuthContext);

#[async_trait]
impl<S> FromRequestParts<S> for AuthExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthExtractor)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

impl std::ops::Deref for AuthExtractor {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use tower::ServiceExt;

    use cueup_core::User;

    use super::*;
    use crate::auth::hash_password;

    async fn seeded_state() -> AuthMiddlewareState {
        let store = MemoryStore::shared();
        store
            .users
            .insert(User {
                id: "u1".to_string(),
                first_name: "Neil".to_string(),
                last_name: "Robertson".to_string(),
                email: "neil@example.com".to_string(),
                password_hash: hash_password("melbourne").unwrap(),
                is_admin: false,
            })
            .await
            .unwrap();
        AuthMiddlewareState::new(store)
    }

    fn basic(email: &str, password: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{email}:{password}")))
    }

    async fn protected_app() -> Router {
        async fn handler(AuthExtractor(auth): AuthExtractor) -> String {
            format!("User: {}", auth.user_id)
        }

        Router::new()
            .route("/protected", get(handler))
            .layer(middleware::from_fn_with_state(
                seeded_state().await,
                auth_middleware,
            ))
    }

    #[tokio::test]
    async fn test_valid_credentials_reach_handler() {
        let app = protected_app().await;
        let request = HttpRequest::builder()
            .uri("/protected")
            .header("authorization", basic("neil@example.com", "melbourne"))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), "User: u1");
    }

    #[tokio::test]
    async fn test_bad_password_is_unauthorized() {
        let app = protected_app().await;
        let request = HttpRequest::builder()
            .uri("/protected")
            .header("authorization", basic("neil@example.com", "wrong"))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_header_on_protected_route_is_unauthorized() {
        let app = protected_app().await;
        let request = HttpRequest::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_header_passes_through_public_route() {
        async fn handler() -> &'static str {
            "open"
        }

        let app = Router::new()
            .route("/public", get(handler))
            .layer(middleware::from_fn_with_state(
                seeded_state().await,
                auth_middleware,
            ));

        let request = HttpRequest::builder()
            .uri("/public")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
