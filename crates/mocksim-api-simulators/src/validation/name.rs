//! Simulator name rules.

use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9-]+$").expect("valid regex"));

/// Maximum length of a simulator name.
pub const NAME_MAX_LEN: usize = 255;

/// Validate a simulator name and return the trimmed form to store.
///
/// Names are 1-255 characters of ASCII letters, digits, and hyphens. The
/// name is part of the public data URL, so anything that needs escaping is
/// rejected outright.
pub fn validate_simulator_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            "name",
            "empty",
            "simulator name must not be empty",
        ));
    }
    if name.len() > NAME_MAX_LEN {
        return Err(ValidationError::new(
            "name",
            "too_long",
            format!("simulator name must be at most {NAME_MAX_LEN} characters"),
        ));
    }
    if !NAME_RE.is_match(name) {
        return Err(ValidationError::new(
            "name",
            "invalid_chars",
            "simulator name may only contain letters, digits, and hyphens",
        ));
    }
    Ok(name.to_string())
}
