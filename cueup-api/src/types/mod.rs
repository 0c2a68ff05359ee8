//! Request and response types for the REST API, one module per resource.

pub mod routine;
pub mod score;
pub mod user;

pub use routine::{CreateRoutineRequest, ListRoutinesParams, RoutineListResponse};
pub use score::{CreateScoreRequest, ListScoresParams, ScoreListResponse};
pub use user::{CreateUserRequest, ListUsersParams, UserListResponse, UserResponse};
