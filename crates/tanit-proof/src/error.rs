use tanit_core::TanitError;
use thiserror::Error;

/// Error type for the SD-JWT engine.
///
/// Verification never surfaces these; it fails closed with an invalid
/// result. No key material appears in any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("malformed SD-JWT: {0}")]
    MalformedSdJwt(String),

    #[error("malformed disclosure: {0}")]
    MalformedDisclosure(String),

    #[error("signing failed")]
    SigningFailed,

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("invalid vct: {0}")]
    InvalidVct(String),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] TanitError),
}

pub type ProofResult<T> = Result<T, ProofError>;

impl From<serde_json::Error> for ProofError {
    fn from(e: serde_json::Error) -> Self {
        ProofError::EncodingFailed(e.to_string())
    }
}
