//! SD-JWT disclosures: `base64url(JSON [salt, claim_name, claim_value])`.

use rand::RngCore;
use serde_json::Value;

use tanit_core::{b64url_decode, b64url_encode, digest_b64url};

use crate::error::{ProofError, ProofResult};

const SALT_BYTES: usize = 16;

/// One selectively disclosable claim and its wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure {
    pub salt: String,
    pub name: String,
    pub value: Value,
    /// Base64url of the JSON array, exactly as it appears on the wire.
    pub encoded: String,
}

impl Disclosure {
    /// Create a disclosure with a fresh 128-bit salt from the OS RNG.
    pub fn new(name: &str, value: Value) -> ProofResult<Self> {
        let mut salt_bytes = [0u8; SALT_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut salt_bytes);
        Self::with_salt(b64url_encode(salt_bytes), name, value)
    }

    pub fn with_salt(salt: String, name: &str, value: Value) -> ProofResult<Self> {
        let array = serde_json::json!([salt, name, value]);
        let json = serde_json::to_string(&array)?;
        Ok(Self {
            salt,
            name: name.to_string(),
            value,
            encoded: b64url_encode(json.as_bytes()),
        })
    }

    /// Parse a wire disclosure. The array must have exactly three elements
    /// with string salt and name.
    pub fn parse(encoded: &str) -> ProofResult<Self> {
        let bytes = b64url_decode(encoded.trim_end_matches('='))
            .map_err(|_| ProofError::MalformedDisclosure("not base64url".into()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|_| ProofError::MalformedDisclosure("not JSON".into()))?;

        let Value::Array(mut items) = value else {
            return Err(ProofError::MalformedDisclosure("not a JSON array".into()));
        };
        if items.len() != 3 {
            return Err(ProofError::MalformedDisclosure(format!(
                "expected 3 elements, got {}",
                items.len()
            )));
        }

        let claim_value = items.pop().unwrap_or(Value::Null);
        let name = match items.pop() {
            Some(Value::String(s)) => s,
            _ => return Err(ProofError::MalformedDisclosure("claim name not a string".into())),
        };
        let salt = match items.pop() {
            Some(Value::String(s)) => s,
            _ => return Err(ProofError::MalformedDisclosure("salt not a string".into())),
        };

        Ok(Self {
            salt,
            name,
            value: claim_value,
            encoded: encoded.to_string(),
        })
    }

    /// The `_sd` digest committing to this disclosure.
    pub fn digest(&self) -> String {
        digest_b64url(&self.encoded)
    }
}
