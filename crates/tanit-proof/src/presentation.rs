//! Selective disclosure presentation with optional key binding.
//!
//! The issuer JWT is carried through byte for byte. Only the set of
//! disclosures changes, plus a key-binding JWT when an audience is given.

use serde_json::json;

use tanit_core::{b64url_encode, digest_b64url, sign_b64url, Signer, Timestamp};

use crate::compact::{assemble, SdJwtParts};
use crate::disclosure::Disclosure;
use crate::error::{ProofError, ProofResult};
use crate::types::KB_JWT_TYP;

/// Build a presentation keeping only the disclosures whose claim name is in
/// `selected`. Selected names with no matching disclosure are ignored.
pub fn present_sd_jwt<S: AsRef<str>>(
    signer: &dyn Signer,
    serialized: &str,
    selected: &[S],
    nonce: &str,
    audience: Option<&str>,
    now: Timestamp,
) -> ProofResult<String> {
    let parts = SdJwtParts::parse(serialized)?;
    parts.jws()?;

    let mut kept = Vec::new();
    for encoded in &parts.disclosures {
        let disclosure = Disclosure::parse(encoded)?;
        if selected.iter().any(|s| s.as_ref() == disclosure.name) {
            kept.push(*encoded);
        }
    }

    tracing::debug!(
        kept = kept.len(),
        dropped = parts.disclosures.len() - kept.len(),
        key_binding = audience.is_some(),
        "built SD-JWT presentation"
    );

    let prefix = assemble(parts.issuer_jwt, kept);
    match audience {
        Some(aud) => {
            let kb_jwt = build_key_binding_jwt(signer, &prefix, nonce, aud, now)?;
            Ok(format!("{}{}", prefix, kb_jwt))
        }
        None => Ok(prefix),
    }
}

/// Sign a key-binding JWT over the presented `<jwt>~d…~` prefix.
pub fn build_key_binding_jwt(
    signer: &dyn Signer,
    presentation_prefix: &str,
    nonce: &str,
    audience: &str,
    now: Timestamp,
) -> ProofResult<String> {
    let header = json!({
        "alg": signer.algorithm(),
        "typ": KB_JWT_TYP,
    });
    let payload = json!({
        "aud": audience,
        "nonce": nonce,
        "iat": now.seconds_since_epoch,
        "sd_hash": digest_b64url(presentation_prefix),
    });

    let header_b64 = b64url_encode(serde_json::to_string(&header)?);
    let payload_b64 = b64url_encode(serde_json::to_string(&payload)?);
    let signing_input = format!("{}.{}", header_b64, payload_b64);
    let sig_b64 = sign_b64url(signer, &signing_input).map_err(|_| ProofError::SigningFailed)?;

    Ok(format!("{}.{}", signing_input, sig_b64))
}
