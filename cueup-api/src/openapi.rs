//! OpenAPI specification for the Cueup API.
//!
//! Generated with utoipa from route annotations and type schemas.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ApiError;
use crate::routes::{health, routines, scores, users};
use crate::types::{
    CreateRoutineRequest, CreateScoreRequest, CreateUserRequest, RoutineListResponse,
    ScoreListResponse, UserListResponse, UserResponse,
};

use cueup_core::{Balls, Routine, Score};

/// OpenAPI document for the Cueup API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cueup API",
        version = "0.1.0",
        description = "Practice-routine score tracking for snooker and billiards training",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local Development")
    ),
    tags(
        (name = "Users", description = "Account registration and profiles"),
        (name = "Routines", description = "Published practice routines"),
        (name = "Scores", description = "Recorded attempts against routines"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        users::create_user,
        users::list_users,
        users::get_user,
        routines::create_routine,
        routines::list_routines,
        routines::get_routine,
        scores::create_score,
        scores::list_scores,
        scores::list_scores_for_user,
        scores::get_score,
        scores::delete_score,
        health::live,
        health::ready,
    ),
    components(
        schemas(
            ApiError,
            Balls,
            Routine,
            Score,
            CreateUserRequest,
            UserResponse,
            UserListResponse,
            CreateRoutineRequest,
            RoutineListResponse,
            CreateScoreRequest,
            ScoreListResponse,
            health::HealthResponse,
            health::HealthStatus,
        )
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

/// Registers the Basic authentication scheme referenced by the routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .build(),
                ),
            );
        }
    }
}
