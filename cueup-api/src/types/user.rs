//! User-related API types.

use serde::{Deserialize, Serialize};

use cueup_core::{PagedResult, Pageable, RecordId, User};

/// Request to register a new user. Registration can never grant admin;
/// the flag is forced off server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plaintext password, hashed before it reaches the store.
    pub password: String,
}

/// User details returned to clients. Credentials never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// Paging parameters for the user listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    #[serde(default)]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    Pageable::DEFAULT_PAGE_SIZE
}

impl ListUsersParams {
    pub fn pageable(&self) -> Pageable {
        Pageable::new(self.page_number, self.page_size)
    }
}

/// One page of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub page_size: u32,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl From<PagedResult<User>> for UserListResponse {
    fn from(page: PagedResult<User>) -> Self {
        Self {
            users: page.items.into_iter().map(UserResponse::from).collect(),
            page_size: page.page_size,
            page_number: page.page_number,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            first_name: "Shaun".to_string(),
            last_name: "Murphy".to_string(),
            email: "shaun@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_admin: true,
        }
    }

    #[test]
    fn test_user_response_drops_credentials() {
        let json = serde_json::to_value(UserResponse::from(user())).unwrap();
        assert_eq!(json["firstName"], "Shaun");
        assert_eq!(json["isAdmin"], true);
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_list_response_carries_page_metadata() {
        let page = PagedResult::new(vec![user()], Pageable::new(0, 50), 1);
        let response = UserListResponse::from(page);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pageSize"], 50);
        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["users"][0]["email"], "shaun@example.com");
    }

    #[test]
    fn test_params_default_to_first_page_of_fifty() {
        let params: ListUsersParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.pageable(), Pageable::new(0, 50));
    }
}
