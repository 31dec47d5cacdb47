use crate::error::TanitResult;

// ---------------------------------------------------------------------------
// Signer — JWS signing capability
//
// The SD-JWT engine never touches raw key material. It is handed a signer at
// construction time and asks it to sign or verify JWS signing inputs.
// ---------------------------------------------------------------------------

pub trait Signer: Send + Sync {
    /// JWS `alg` value written into headers produced with this signer.
    fn algorithm(&self) -> &'static str;

    /// Short key identifier written into the JWS `kid` header.
    fn key_id(&self) -> String;

    /// Sign a message, returning the raw signature bytes.
    fn sign(&self, message: &[u8]) -> TanitResult<Vec<u8>>;

    /// Check a raw signature over a message. Malformed signatures are `false`.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;

    /// Public half of the key as a JWK object.
    fn public_jwk(&self) -> serde_json::Value;
}
