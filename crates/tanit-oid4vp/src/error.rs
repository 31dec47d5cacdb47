use thiserror::Error;

/// Error type for OID4VP request handling. Every variant names the
/// offending parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Oid4vpError {
    #[error("unsupported response_type: {0}, expected \"vp_token\"")]
    UnsupportedResponseType(String),

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid presentation_definition: {0}")]
    InvalidPresentationDefinition(String),

    #[error("encoding failed: {0}")]
    Encoding(String),
}

pub type Oid4vpResult<T> = Result<T, Oid4vpError>;
