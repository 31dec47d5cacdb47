use serde::{Deserialize, Serialize};
use serde_json::Value;

use tanit_cred::ClaimMap;

/// Default issuer identifier written into `iss`.
pub const DEFAULT_ISSUER: &str = "https://demo.zktanit.id/issuer";

/// Hash algorithm name carried in `_sd_alg`.
pub const SD_ALG: &str = "sha-256";

/// JWS `typ` of an issued credential.
pub const SD_JWT_VC_TYP: &str = "vc+sd-jwt";

/// JWS `typ` of a key-binding JWT.
pub const KB_JWT_TYP: &str = "kb+jwt";

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for the SD-JWT engine. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// `iss` of every issued credential.
    pub issuer: String,
    /// `exp - iat` of issued credentials.
    pub validity_seconds: i64,
    /// Tolerance applied to `exp` and `nbf` during verification.
    pub clock_skew_seconds: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            validity_seconds: 365 * 24 * 60 * 60,
            clock_skew_seconds: 60,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.issuer.is_empty() {
            return Err("issuer must not be empty".into());
        }
        if self.validity_seconds <= 0 {
            return Err("validity_seconds must be positive".into());
        }
        if self.clock_skew_seconds < 0 {
            return Err("clock_skew_seconds must not be negative".into());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of verifying a credential or presentation.
///
/// `claims` is empty whenever `valid` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub claims: ClaimMap,
}

impl VerificationResult {
    pub fn valid(claims: ClaimMap) -> Self {
        Self {
            valid: true,
            claims,
        }
    }

    pub fn invalid() -> Self {
        Self {
            valid: false,
            claims: ClaimMap::new(),
        }
    }
}

/// Unverified view of an SD-JWT, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSdJwt {
    pub header: Value,
    pub payload: ClaimMap,
    /// Disclosure segments, not counting a trailing key-binding JWT.
    pub disclosure_count: usize,
}
