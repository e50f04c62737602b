//! Account field validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ApiAuthError;

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid regex"));

/// Validate a login handle: 3-50 characters of letters, digits, underscores.
/// Stored as given; matched case-insensitively everywhere.
pub fn validate_handle(raw: &str) -> Result<String, ApiAuthError> {
    let handle = raw.trim();
    if handle.len() < 3 || handle.len() > 50 {
        return Err(ApiAuthError::Validation(
            "user id must be 3 to 50 characters".to_string(),
        ));
    }
    if !HANDLE_RE.is_match(handle) {
        return Err(ApiAuthError::Validation(
            "user id may only contain letters, digits, and underscores".to_string(),
        ));
    }
    Ok(handle.to_string())
}

/// Validate a display name: 1-255 characters after trimming.
pub fn validate_display_name(raw: &str) -> Result<String, ApiAuthError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiAuthError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    if name.len() > 255 {
        return Err(ApiAuthError::Validation(
            "name must be at most 255 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Validate a password: at least 8 characters.
pub fn validate_password(raw: &str) -> Result<(), ApiAuthError> {
    if raw.len() < 8 {
        return Err(ApiAuthError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}
