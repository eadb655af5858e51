//! Cross-cutting error types for the purchase order model.
//!
//! Expected business outcomes are values, not errors: an unrecognized role
//! resolves to an empty capability set, a refused transition is a
//! `TransitionDecision::Deny`, and malformed audit rows are skipped and
//! counted. `CoreError` covers the shape violations callers must surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A status value outside the closed `PoStatus` set.
    #[error("Unknown purchase order status: {value}")]
    UnknownStatus { value: String },

    /// A permission name outside the closed `Permission` set.
    #[error("Unknown permission: {value}")]
    UnknownPermission { value: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::CoreError;
    use crate::enums::{Permission, PoStatus};

    #[test]
    fn parse_failures_name_the_rejected_value() {
        let status = "ARCHIVED".parse::<PoStatus>().unwrap_err();
        assert_eq!(status.to_string(), "Unknown purchase order status: ARCHIVED");

        let permission = "TELEPORT".parse::<Permission>().unwrap_err();
        assert!(matches!(permission, CoreError::UnknownPermission { ref value } if value == "TELEPORT"));
    }
}
