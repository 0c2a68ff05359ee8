//! Cueup API server entry point.
//!
//! Bootstraps tracing and configuration, seeds the bootstrap administrator
//! when configured, and starts the Axum HTTP server.

use cueup_api::{create_api_router, hash_password, ApiConfig, ApiError, ApiResult, MemoryStore};
use cueup_core::{new_record_id, User};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ApiConfig::from_env();
    let store = MemoryStore::shared();

    bootstrap_admin(&store, &config).await?;

    let app = create_api_router(store, &config);
    let addr = config.bind_addr()?;
    tracing::info!(%addr, "Starting Cueup API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Create the bootstrap administrator when configured. A fresh store holds
/// no accounts, and registration never grants admin, so without this the
/// admin-only endpoints would be unreachable.
async fn bootstrap_admin(store: &MemoryStore, config: &ApiConfig) -> ApiResult<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    let admin = User {
        id: new_record_id(),
        first_name: "Admin".to_string(),
        last_name: "Admin".to_string(),
        email: email.clone(),
        password_hash: hash_password(password)?,
        is_admin: true,
    };

    let admin = store.users.insert(admin).await?;
    tracing::info!(user_id = %admin.id, email = %admin.email, "bootstrap administrator created");
    Ok(())
}
