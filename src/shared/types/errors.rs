use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Rejected input. The message is surfaced to the caller verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn user_not_found(id: i32) -> Self {
        DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Failure talking to the external role service.
#[derive(Debug, Error)]
pub enum RoleServiceError {
    #[error("role service responded with status {status}")]
    Status { status: u16 },

    #[error("role service request failed: {0}")]
    Transport(String),

    #[error("invalid role service response: {0}")]
    Decode(String),
}

/// A batch enrichment aborted because one role lookup failed.
///
/// The display text is what callers see; the failing user and the
/// underlying cause are kept for logs.
#[derive(Debug, Error)]
#[error("role service unavailable")]
pub struct EnrichmentError {
    pub user_id: i32,
    #[source]
    pub source: RoleServiceError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_message_is_verbatim() {
        let err = DomainError::Validation("name must not be empty".into());
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn enrichment_error_hides_cause_in_display() {
        let err = EnrichmentError {
            user_id: 2,
            source: RoleServiceError::Status { status: 503 },
        };
        assert_eq!(err.to_string(), "role service unavailable");
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(
            cause.as_deref(),
            Some("role service responded with status 503")
        );
    }
}
