use p256::ecdsa::signature::{Signer as _, Verifier as _};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::crypto::{b64url_decode, b64url_encode};
use crate::error::{TanitError, TanitResult};
use crate::traits::Signer;

/// ECDSA P-256 key pair signing with SHA-256 (`ES256`).
///
/// Generated once per process and shared by reference. Not persisted and
/// never rotated; acceptable for a demo issuer, a gap for production use.
pub struct Es256KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Es256KeyPair {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        let verifying_key = *signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Create a key pair from a 32-byte secret scalar (for testing).
    pub fn from_bytes(secret: &[u8; 32]) -> TanitResult<Self> {
        let signing_key = SigningKey::from_slice(secret)
            .map_err(|_| TanitError::InvalidKey("not a valid P-256 scalar".into()))?;
        let verifying_key = *signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// Uncompressed SEC1 encoding of the public key.
    pub fn public_key_sec1(&self) -> Vec<u8> {
        self.verifying_key.to_encoded_point(false).as_bytes().to_vec()
    }
}

impl fmt::Debug for Es256KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Es256KeyPair({})", self.key_id())
    }
}

impl Signer for Es256KeyPair {
    fn algorithm(&self) -> &'static str {
        "ES256"
    }

    fn key_id(&self) -> String {
        let hash = Sha256::digest(self.public_key_sec1());
        hex::encode(&hash[..8])
    }

    fn sign(&self, message: &[u8]) -> TanitResult<Vec<u8>> {
        let signature: Signature = self
            .signing_key
            .try_sign(message)
            .map_err(|_| TanitError::Crypto("ES256 signing failed".into()))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_slice(signature) {
            Ok(sig) => self.verifying_key.verify(message, &sig).is_ok(),
            Err(_) => false,
        }
    }

    fn public_jwk(&self) -> serde_json::Value {
        let point = self.verifying_key.to_encoded_point(false);
        let x = point.x().map(|x| b64url_encode(x)).unwrap_or_default();
        let y = point.y().map(|y| b64url_encode(y)).unwrap_or_default();
        serde_json::json!({
            "kty": "EC",
            "crv": "P-256",
            "x": x,
            "y": y,
        })
    }
}

/// Verify an ES256 signature against a public key given as a P-256 JWK.
///
/// Used for key-binding JWTs, where the holder key arrives in `cnf.jwk`.
/// Anything that is not a well-formed P-256 JWK verifies as `false`.
pub fn verify_with_jwk(jwk: &serde_json::Value, message: &[u8], signature: &[u8]) -> bool {
    if jwk.get("kty").and_then(|v| v.as_str()) != Some("EC")
        || jwk.get("crv").and_then(|v| v.as_str()) != Some("P-256")
    {
        return false;
    }
    let coordinate = |name: &str| {
        jwk.get(name)
            .and_then(|v| v.as_str())
            .and_then(|s| b64url_decode(s).ok())
            .filter(|bytes| bytes.len() == 32)
    };
    let (Some(x), Some(y)) = (coordinate("x"), coordinate("y")) else {
        return false;
    };
    // SEC1 uncompressed point: 0x04 || x || y
    let mut sec1 = Vec::with_capacity(65);
    sec1.push(0x04);
    sec1.extend_from_slice(&x);
    sec1.extend_from_slice(&y);
    let Ok(key) = VerifyingKey::from_sec1_bytes(&sec1) else {
        return false;
    };
    match Signature::from_slice(signature) {
        Ok(sig) => key.verify(message, &sig).is_ok(),
        Err(_) => false,
    }
}
