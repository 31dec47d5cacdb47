use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{TanitError, TanitResult};
use crate::traits::Signer;

/// Base64url without padding, the only encoding used on the SD-JWT wire.
pub fn b64url_encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn b64url_decode(encoded: &str) -> TanitResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded.as_bytes())
        .map_err(|_| TanitError::Encoding("invalid base64url".into()))
}

/// SHA-256 over the UTF-8 bytes of `data`, base64url-encoded without padding.
///
/// This is the `sha-256` digest used for `_sd` commitments and `sd_hash`.
pub fn digest_b64url(data: &str) -> String {
    b64url_encode(Sha256::digest(data.as_bytes()))
}

/// Compare two encoded digests without short-circuiting on the first
/// differing byte.
pub fn digests_equal(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}

/// Sign a JWS signing input and return the base64url signature.
pub fn sign_b64url(signer: &dyn Signer, data: &str) -> TanitResult<String> {
    let signature = signer.sign(data.as_bytes())?;
    Ok(b64url_encode(signature))
}

/// Verify a base64url signature over a JWS signing input.
pub fn verify_b64url(signer: &dyn Signer, data: &str, signature_b64: &str) -> bool {
    match b64url_decode(signature_b64) {
        Ok(signature) => signer.verify(data.as_bytes(), &signature),
        Err(_) => false,
    }
}
