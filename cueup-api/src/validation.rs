//! Request-shape validation helpers.
//!
//! These traits check the shape of incoming requests (non-empty strings,
//! sane page sizes) before handlers touch the store. Domain validation —
//! score attributes against routine allow-lists — lives in the score-create
//! pipeline, not here.

use crate::error::{ApiError, ApiResult};

/// Trait for validating non-empty strings.
///
/// # Example
/// ```ignore
/// use cueup_api::validation::ValidateNonEmpty;
///
/// fn create_user(email: &str) -> ApiResult<()> {
///     email.validate_non_empty("email")?;
///     // ... rest of logic
/// }
/// ```
pub trait ValidateNonEmpty {
    /// Validate that the value is non-empty.
    ///
    /// # Errors
    /// Returns `ApiError::missing_field` if the value is empty or
    /// whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        if self.trim().is_empty() {
            return Err(ApiError::missing_field(field_name));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        self.as_str().validate_non_empty(field_name)
    }
}

/// Trait for validating numeric request parameters.
pub trait ValidateRange {
    /// Validate that the value is positive (> 0).
    fn validate_positive(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateRange for u32 {
    fn validate_positive(&self, field_name: &str) -> ApiResult<()> {
        if *self == 0 {
            return Err(ApiError::invalid_range(field_name, 1, u32::MAX));
        }
        Ok(())
    }
}

impl ValidateRange for i32 {
    fn validate_positive(&self, field_name: &str) -> ApiResult<()> {
        if *self <= 0 {
            return Err(ApiError::invalid_range(field_name, 1, i32::MAX));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty() {
        assert!("hello".validate_non_empty("test").is_ok());
        assert!("".validate_non_empty("test").is_err());
        assert!("   ".validate_non_empty("test").is_err());
        assert!(String::from("  hi  ").validate_non_empty("test").is_ok());
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let err = "".validate_non_empty("email").unwrap_err();
        assert!(err.error_message.contains("email"));
        assert_eq!(
            err.context.unwrap().get("field").map(String::as_str),
            Some("email")
        );
    }

    #[test]
    fn test_validate_positive() {
        assert!(50u32.validate_positive("pageSize").is_ok());
        assert!(1u32.validate_positive("pageSize").is_ok());
        assert!(0u32.validate_positive("pageSize").is_err());
        assert!(147i32.validate_positive("value").is_ok());
        assert!((-1i32).validate_positive("value").is_err());
    }
}
