use thiserror::Error;

/// Error type for the wallet crate, aggregating the library crates' errors.
#[derive(Debug, Error)]
pub enum RootError {
    #[error("credential error: {0}")]
    Credential(#[from] tanit_cred::CredError),

    #[error("proof error: {0}")]
    Proof(#[from] tanit_proof::ProofError),

    #[error("request error: {0}")]
    Request(#[from] tanit_oid4vp::Oid4vpError),

    #[error("no matching credential")]
    NoMatchingCredential,

    #[error("presentation failed: {0}")]
    Presentation(String),

    #[error("no active presentation request")]
    NoActiveRequest,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RootError {
    fn from(e: serde_json::Error) -> Self {
        RootError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for RootError {
    fn from(e: toml::de::Error) -> Self {
        RootError::Config(format!("TOML parse error: {}", e))
    }
}

pub type RootResult<T> = Result<T, RootError>;
