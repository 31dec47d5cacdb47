use thiserror::Error;

/// Error type shared by the primitive layer.
///
/// Crypto variants stay opaque: no key material or signature bytes are ever
/// carried in a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TanitError {
    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

pub type TanitResult<T> = Result<T, TanitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = TanitError::Crypto("signature rejected".into());
        assert_eq!(e.to_string(), "crypto error: signature rejected");

        let e = TanitError::Encoding("bad base64url".into());
        assert_eq!(e.to_string(), "encoding error: bad base64url");
    }

    #[test]
    fn test_result_alias() {
        let r: TanitResult<u8> = Err(TanitError::InvalidKey("short".into()));
        assert!(r.is_err());
    }
}
