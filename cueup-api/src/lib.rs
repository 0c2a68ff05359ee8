//! Cueup API - REST API Layer
//!
//! This crate provides the HTTP layer for the cueup practice-score
//! tracker: per-resource Axum routes, Basic authentication with explicit
//! role checks, the document store the handlers query, and the structured
//! error taxonomy every endpoint shares.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use auth::{authenticate, hash_password, verify_password, AuthContext, BasicCredentials};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use middleware::{auth_middleware, AuthExtractor, AuthMiddlewareState};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use store::{MemoryCollection, MemoryStore, Record, StoreError};
pub use types::*;
