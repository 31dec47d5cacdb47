use thiserror::Error;

/// Error type for claim-set construction and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("unknown credential type: {0}")]
    UnknownVct(String),
}

pub type CredResult<T> = Result<T, CredError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cred_error_display() {
        let e = CredError::InvalidDate("15/03/1990".into());
        assert_eq!(e.to_string(), "invalid date: 15/03/1990");

        let e = CredError::UnknownVct("x.y.z".into());
        assert_eq!(e.to_string(), "unknown credential type: x.y.z");
    }
}
