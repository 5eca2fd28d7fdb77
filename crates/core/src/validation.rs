//! Input validation for analysis targets.

use crate::error::CoreError;

/// Maximum length of a submitted URL.
const MAX_URL_LEN: usize = 2048;

/// Validate a URL submitted for analysis.
///
/// Rules:
/// - Must not be empty (after trimming).
/// - Must not exceed `MAX_URL_LEN` characters.
/// - Must use the `http://` or `https://` scheme.
/// - Must not contain whitespace.
pub fn validate_submit_url(url: &str) -> Result<(), CoreError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Submitted URL must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_URL_LEN {
        return Err(CoreError::Validation(format!(
            "Submitted URL must not exceed {MAX_URL_LEN} characters"
        )));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(CoreError::Validation(
            "Submitted URL must start with http:// or https://".to_string(),
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Submitted URL must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}
