//! Authentication and authorization for the Cueup API.
//!
//! Requests authenticate with HTTP Basic credentials on every call: the
//! middleware looks the account up by email and verifies the Argon2id
//! hash, then injects an [`AuthContext`] into request extensions. There is
//! no session or token state — each request stands alone.
//!
//! Authorization is explicit: handlers call `require_admin` /
//! `require_owner_or_admin` and thread `access_scope()` into their store
//! queries, rather than relying on declarative route guards.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use cueup_core::{AccessScope, RecordId, Role, User};

use crate::error::{ApiError, ApiResult};
use crate::store::MemoryStore;

// ============================================================================
// AUTHENTICATION CONTEXT
// ============================================================================

/// Authentication context extracted from a request.
///
/// Injected into Axum request extensions after successful authentication.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: RecordId,
    pub email: String,
    pub roles: Vec<Role>,
}

impl AuthContext {
    /// Build the context for an authenticated account. Every account holds
    /// the user role; administrators additionally hold the admin role.
    pub fn for_user(user: &User) -> Self {
        let mut roles = vec![Role::User];
        if user.is_admin {
            roles.push(Role::Admin);
        }
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            roles,
        }
    }

    /// Check if the caller holds a specific role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Reject non-administrators.
    pub fn require_admin(&self) -> ApiResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Administrator access required"))
        }
    }

    /// Reject callers that neither own the resource nor hold admin.
    pub fn require_owner_or_admin(&self, owner_id: &str) -> ApiResult<()> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(ApiError::forbidden("Access limited to the owning user"))
        }
    }

    /// Resolve the caller's visibility scope, the value threaded into
    /// every scoped store query.
    pub fn access_scope(&self) -> AccessScope {
        AccessScope::resolve(&self.user_id, &self.roles)
    }
}

// ============================================================================
// BASIC CREDENTIALS
// ============================================================================

/// Credentials parsed from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

/// Parse an `Authorization` header value into Basic credentials.
/// Returns None for other schemes or malformed payloads.
pub fn parse_basic_header(header: &str) -> Option<BasicCredentials> {
    let (scheme, payload) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Authenticate Basic credentials against the user collection.
pub async fn authenticate(
    store: &MemoryStore,
    credentials: &BasicCredentials,
) -> ApiResult<AuthContext> {
    let user = store
        .users
        .find_one(|user| user.email == credentials.email)
        .await
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&credentials.password, &user.password_hash)? {
        tracing::debug!(email = %credentials.email, "password verification failed");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    Ok(AuthContext::for_user(&user))
}

// ============================================================================
// PASSWORD HASHING
// ============================================================================

/// Hash a password with Argon2id.
///
/// Returns the PHC-formatted hash string including salt and parameters.
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal_error(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ApiError::internal_error(format!("Invalid stored password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
