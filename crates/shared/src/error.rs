use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FriendId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },
    #[error("no friend with id {0}")]
    NotFound(FriendId),
    #[error("no friend is selected")]
    NoSelection,
}

impl LedgerError {
    pub fn validation(field: &'static str, reason: &'static str) -> Self {
        Self::Validation { field, reason }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::NotFound(_) => ErrorCode::NotFound,
            LedgerError::Validation { .. } | LedgerError::NoSelection => ErrorCode::Validation,
        }
    }
}

/// Serializable form of a [`LedgerError`] for the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&LedgerError> for ErrorReport {
    fn from(value: &LedgerError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<LedgerError> for ErrorReport {
    fn from(value: LedgerError) -> Self {
        Self::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_code() {
        let err = LedgerError::NotFound(FriendId::from_seed(7));
        let report = ErrorReport::from(&err);
        assert_eq!(report.code, ErrorCode::NotFound);
        assert!(report.message.contains("no friend with id"));
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = LedgerError::validation("name", "must not be empty");
        assert_eq!(err.to_string(), "invalid name: must not be empty");
        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(LedgerError::NoSelection.code(), ErrorCode::Validation);
    }
}
