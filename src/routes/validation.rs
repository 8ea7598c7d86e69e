use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::constants::{ERR_INVALID_EMAIL, ERR_INVALID_PHONE, ERR_MISSING_FIELDS};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    /// US phone numbers, tolerant of separators and an optional country code
    static ref PHONE_RE: Regex =
        Regex::new(r"^\+?1?[-. (]*\d{3}[-. )]*\d{3}[-. ]*\d{4}$").unwrap();
}

/// Result shape consumed by every form UI on the site.
///
/// Validation failures are reported inline through this shape (HTTP 200),
/// never as thrown errors; the pipeline stops before any database write.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
}

impl SubmissionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Check that every named field is present and non-blank.
///
/// Returns the failure to hand back to the UI, or None when all fields pass.
pub fn require_fields(fields: &[(&str, &str)]) -> Option<SubmissionResult> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            tracing::info!("Form rejected: missing field '{}'", name);
            return Some(SubmissionResult::fail(ERR_MISSING_FIELDS));
        }
    }
    None
}

/// Email then phone format checks, in the order the UI reports them
pub fn validate_contact(email: &str, phone: &str) -> Option<SubmissionResult> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Some(SubmissionResult::fail(ERR_INVALID_EMAIL));
    }
    if !PHONE_RE.is_match(phone.trim()) {
        return Some(SubmissionResult::fail(ERR_INVALID_PHONE));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields_all_present() {
        assert!(require_fields(&[("name", "Jane"), ("email", "j@x.com")]).is_none());
    }

    #[test]
    fn test_require_fields_blank_value() {
        let result = require_fields(&[("name", "Jane"), ("email", "   ")]).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, ERR_MISSING_FIELDS);
    }

    #[test]
    fn test_validate_contact_accepts_common_formats() {
        assert!(validate_contact("jane@example.com", "555-867-5309").is_none());
        assert!(validate_contact("jane@example.com", "(555) 867-5309").is_none());
        assert!(validate_contact("jane@example.com", "+1 555 867 5309").is_none());
        assert!(validate_contact("jane@example.com", "5558675309").is_none());
    }

    #[test]
    fn test_validate_contact_rejects_bad_email() {
        let result = validate_contact("not-an-email", "555-867-5309").unwrap();
        assert_eq!(result.message, ERR_INVALID_EMAIL);
    }

    #[test]
    fn test_validate_contact_rejects_bad_phone() {
        let result = validate_contact("jane@example.com", "12345").unwrap();
        assert_eq!(result.message, ERR_INVALID_PHONE);
    }
}
