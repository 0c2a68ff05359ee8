//! REST API routes, organized by resource.
//!
//! `create_api_router` assembles the full application: per-resource
//! routers under `/api/v1`, health probes, the OpenAPI document, the
//! authentication middleware, CORS, and request tracing.

pub mod health;
pub mod routines;
pub mod scores;
pub mod users;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, AuthMiddlewareState};
use crate::store::MemoryStore;

// Re-export route creation functions for convenience
pub use health::create_router as health_router;
pub use routines::create_router as routine_router;
pub use scores::create_router as score_router;
pub use users::create_router as user_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;

    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// ROUTER ASSEMBLY
// ============================================================================

/// Build the complete application router.
pub fn create_api_router(store: Arc<MemoryStore>, config: &ApiConfig) -> Router {
    let auth_state = AuthMiddlewareState::new(store.clone());

    let api = Router::new()
        .nest(
            "/users",
            users::create_router(store.clone()).merge(scores::user_scores_router(store.clone())),
        )
        .nest("/routines", routines::create_router(store.clone()))
        .nest("/scores", scores::create_router(store));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api/v1", api)
        .nest("/health", health::create_router());

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", axum::routing::get(openapi_json));
    }

    #[cfg(feature = "swagger-ui")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/openapi.json", crate::openapi::ApiDoc::openapi()),
        );
    }

    router
        .layer(from_fn_with_state(auth_state, auth_middleware))
        .layer(build_cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig. Empty origins (development mode)
/// allow all origins; configured origins are enforced as-is.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: allowing configured origins");
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// TEST SUPPORT
// ============================================================================
