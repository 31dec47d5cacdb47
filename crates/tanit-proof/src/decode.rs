//! Lenient, unverified decoding for display.

use serde_json::Value;

use crate::compact::SdJwtParts;
use crate::disclosure::Disclosure;
use crate::error::{ProofError, ProofResult};
use crate::types::DecodedSdJwt;

/// Decode header and payload and merge every decodable disclosure into the
/// payload. No signature or digest is checked. Malformed disclosures are
/// skipped but still counted; a trailing key-binding JWT is not counted.
pub fn decode_sd_jwt(serialized: &str) -> ProofResult<DecodedSdJwt> {
    let parts = SdJwtParts::parse(serialized)?;
    let jws = parts.jws()?;
    let header = jws.header()?;
    let mut payload = match jws.payload()? {
        Value::Object(map) => map,
        _ => {
            return Err(ProofError::MalformedSdJwt(
                "payload is not a JSON object".into(),
            ))
        }
    };

    for encoded in &parts.disclosures {
        match Disclosure::parse(encoded) {
            Ok(disclosure) => {
                payload.insert(disclosure.name, disclosure.value);
            }
            Err(e) => tracing::debug!(error = %e, "skipping undecodable disclosure"),
        }
    }

    Ok(DecodedSdJwt {
        header,
        payload,
        disclosure_count: parts.disclosures.len(),
    })
}
