//! Verification of issued credentials and presentations.
//!
//! Fails closed: every problem yields `VerificationResult::invalid()` and a
//! `warn!` naming the reason. Errors never escape.

use std::collections::HashSet;

use serde_json::Value;

use tanit_core::{digest_b64url, digests_equal, verify_b64url, verify_with_jwk, Signer, Timestamp};
use tanit_cred::ClaimMap;

use crate::compact::{Jws, SdJwtParts};
use crate::disclosure::Disclosure;
use crate::types::{EngineConfig, VerificationResult, KB_JWT_TYP, SD_ALG};

/// What a successful verification established.
#[derive(Debug, Clone)]
pub(crate) struct Verified {
    pub claims: ClaimMap,
    /// Payload of the key-binding JWT, when one was presented.
    pub key_binding: Option<ClaimMap>,
}

type Rejection = String;

/// Verify issuer signature, disclosures, validity window and key binding.
pub fn verify_sd_jwt(
    config: &EngineConfig,
    signer: &dyn Signer,
    serialized: &str,
    now: Timestamp,
) -> VerificationResult {
    match check(config, signer, serialized, now) {
        Ok(verified) => VerificationResult::valid(verified.claims),
        Err(reason) => {
            tracing::warn!(%reason, "SD-JWT rejected");
            VerificationResult::invalid()
        }
    }
}

/// [`verify_sd_jwt`], additionally requiring a key-binding JWT issued for
/// `nonce` and `audience`.
pub fn verify_sd_jwt_key_binding(
    config: &EngineConfig,
    signer: &dyn Signer,
    serialized: &str,
    nonce: &str,
    audience: &str,
    now: Timestamp,
) -> VerificationResult {
    let outcome = check(config, signer, serialized, now).and_then(|verified| {
        let kb = verified
            .key_binding
            .as_ref()
            .ok_or_else(|| "key-binding JWT required".to_string())?;
        if kb.get("nonce").and_then(Value::as_str) != Some(nonce) {
            return Err("key-binding nonce mismatch".into());
        }
        if kb.get("aud").and_then(Value::as_str) != Some(audience) {
            return Err("key-binding audience mismatch".into());
        }
        Ok(verified)
    });

    match outcome {
        Ok(verified) => VerificationResult::valid(verified.claims),
        Err(reason) => {
            tracing::warn!(%reason, "SD-JWT presentation rejected");
            VerificationResult::invalid()
        }
    }
}

pub(crate) fn check(
    config: &EngineConfig,
    signer: &dyn Signer,
    serialized: &str,
    now: Timestamp,
) -> Result<Verified, Rejection> {
    let parts = SdJwtParts::parse(serialized).map_err(|e| e.to_string())?;
    let jws = parts.jws().map_err(|e| e.to_string())?;

    let header = jws.header().map_err(|e| e.to_string())?;
    if header.get("alg").and_then(Value::as_str) != Some(signer.algorithm()) {
        return Err("unexpected alg".into());
    }
    if !verify_b64url(signer, &jws.signing_input(), jws.signature_b64) {
        return Err("issuer signature invalid".into());
    }

    let mut payload = match jws.payload().map_err(|e| e.to_string())? {
        Value::Object(map) => map,
        _ => return Err("payload is not a JSON object".into()),
    };

    match payload.get("_sd_alg") {
        None => {}
        Some(alg) if alg.as_str() == Some(SD_ALG) => {}
        Some(_) => return Err("unsupported _sd_alg".into()),
    }

    check_validity_window(&payload, now, config.clock_skew_seconds)?;

    let digests = sd_digests(&payload)?;
    let mut seen = HashSet::new();
    let mut disclosed = Vec::with_capacity(parts.disclosures.len());
    for encoded in &parts.disclosures {
        let disclosure = Disclosure::parse(encoded).map_err(|e| e.to_string())?;
        let digest = disclosure.digest();
        if !seen.insert(digest.clone()) {
            return Err("duplicate disclosure".into());
        }
        if !digests.iter().any(|d| digests_equal(d, &digest)) {
            return Err(format!("disclosure for '{}' not committed", disclosure.name));
        }
        disclosed.push(disclosure);
    }

    let key_binding = match parts.key_binding_jwt {
        Some(kb_jwt) => Some(check_key_binding(&payload, kb_jwt, &parts.presentation_prefix())?),
        None => None,
    };

    payload.remove("_sd");
    payload.remove("_sd_alg");
    for disclosure in disclosed {
        if payload.contains_key(&disclosure.name) {
            return Err(format!("disclosure overwrites claim '{}'", disclosure.name));
        }
        payload.insert(disclosure.name, disclosure.value);
    }

    Ok(Verified {
        claims: payload,
        key_binding,
    })
}

fn sd_digests(payload: &ClaimMap) -> Result<Vec<String>, Rejection> {
    match payload.get("_sd") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| "_sd entry is not a string".to_string())
            })
            .collect(),
        Some(_) => Err("_sd is not an array".into()),
    }
}

fn numeric_claim(payload: &ClaimMap, name: &str) -> Result<Option<i64>, Rejection> {
    match payload.get(name) {
        None => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("{} is not a NumericDate", name)),
    }
}

fn check_validity_window(payload: &ClaimMap, now: Timestamp, skew: i64) -> Result<(), Rejection> {
    let now = now.seconds_since_epoch;
    if let Some(exp) = numeric_claim(payload, "exp")? {
        if now > exp.saturating_add(skew) {
            return Err("credential expired".into());
        }
    }
    if let Some(nbf) = numeric_claim(payload, "nbf")? {
        if now.saturating_add(skew) < nbf {
            return Err("credential not yet valid".into());
        }
    }
    Ok(())
}

/// Check the key-binding JWT against the holder key in `cnf.jwk` and the
/// presented prefix. Returns its payload.
fn check_key_binding(
    payload: &ClaimMap,
    kb_jwt: &str,
    presentation_prefix: &str,
) -> Result<ClaimMap, Rejection> {
    let jws = Jws::parse(kb_jwt).map_err(|e| e.to_string())?;

    let header = jws.header().map_err(|e| e.to_string())?;
    if header.get("typ").and_then(Value::as_str) != Some(KB_JWT_TYP) {
        return Err("key-binding JWT has wrong typ".into());
    }

    let holder_jwk = payload
        .get("cnf")
        .and_then(|cnf| cnf.get("jwk"))
        .ok_or_else(|| "no holder key in cnf".to_string())?;
    let signature = tanit_core::b64url_decode(jws.signature_b64)
        .map_err(|_| "key-binding signature not base64url".to_string())?;
    if !verify_with_jwk(holder_jwk, jws.signing_input().as_bytes(), &signature) {
        return Err("key-binding signature invalid".into());
    }

    let kb_payload = match jws.payload().map_err(|e| e.to_string())? {
        Value::Object(map) => map,
        _ => return Err("key-binding payload is not a JSON object".into()),
    };
    let sd_hash = kb_payload
        .get("sd_hash")
        .and_then(Value::as_str)
        .ok_or_else(|| "key-binding JWT has no sd_hash".to_string())?;
    if !digests_equal(sd_hash, &digest_b64url(presentation_prefix)) {
        return Err("sd_hash mismatch".into());
    }
    numeric_claim(&kb_payload, "iat")?.ok_or_else(|| "key-binding JWT has no iat".to_string())?;

    Ok(kb_payload)
}
