//! SD-JWT-VC issuance.
//!
//! Every claim is selectively disclosable: the signed payload carries only
//! envelope metadata and the `_sd` digests.

use serde_json::{json, Value};

use tanit_core::{b64url_encode, sign_b64url, Signer, Timestamp};
use tanit_cred::ClaimMap;

use crate::compact::assemble;
use crate::disclosure::Disclosure;
use crate::error::{ProofError, ProofResult};
use crate::types::{EngineConfig, SD_ALG, SD_JWT_VC_TYP};

/// Claim names owned by the envelope; they can never be disclosures.
pub const RESERVED_CLAIMS: [&str; 8] = ["iss", "iat", "nbf", "exp", "vct", "cnf", "_sd", "_sd_alg"];

/// Build the unsigned payload and the disclosures backing its `_sd` array.
fn build_payload(
    config: &EngineConfig,
    signer: &dyn Signer,
    claims: &ClaimMap,
    vct: &str,
    now: Timestamp,
) -> ProofResult<(Value, Vec<Disclosure>)> {
    let iat = now.seconds_since_epoch;
    let mut payload = json!({
        "vct": vct,
        "iss": config.issuer,
        "iat": iat,
        "nbf": iat,
        "exp": now.plus_seconds(config.validity_seconds).seconds_since_epoch,
        "cnf": { "jwk": signer.public_jwk() },
    });

    let mut disclosures = Vec::with_capacity(claims.len());
    for (name, value) in claims {
        if RESERVED_CLAIMS.contains(&name.as_str()) {
            return Err(ProofError::MalformedDisclosure(format!(
                "reserved claim name: {}",
                name
            )));
        }
        disclosures.push(Disclosure::new(name, value.clone())?);
    }

    // Sorted so digest order reveals nothing about claim order.
    let mut digests: Vec<String> = disclosures.iter().map(Disclosure::digest).collect();
    digests.sort();

    payload["_sd"] = Value::from(digests);
    payload["_sd_alg"] = Value::from(SD_ALG);

    Ok((payload, disclosures))
}

/// Issue a signed SD-JWT-VC in compact form, ending in `~`.
pub fn issue_sd_jwt(
    config: &EngineConfig,
    signer: &dyn Signer,
    claims: &ClaimMap,
    vct: &str,
    now: Timestamp,
) -> ProofResult<String> {
    if vct.trim().is_empty() {
        return Err(ProofError::InvalidVct("vct must not be empty".into()));
    }

    let (payload, disclosures) = build_payload(config, signer, claims, vct, now)?;

    let header = json!({
        "alg": signer.algorithm(),
        "typ": SD_JWT_VC_TYP,
        "kid": signer.key_id(),
    });

    let header_b64 = b64url_encode(serde_json::to_string(&header)?);
    let payload_b64 = b64url_encode(serde_json::to_string(&payload)?);

    let signing_input = format!("{}.{}", header_b64, payload_b64);
    let sig_b64 = sign_b64url(signer, &signing_input).map_err(|_| ProofError::SigningFailed)?;

    tracing::debug!(vct, disclosures = disclosures.len(), "issued SD-JWT-VC");

    let jwt = format!("{}.{}", signing_input, sig_b64);
    Ok(assemble(&jwt, disclosures.iter().map(|d| d.encoded.as_str())))
}
