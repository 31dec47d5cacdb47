//! Compact serialization: `<issuer-jwt>~<d1>~…~<dn>~[<kb-jwt>]`.

use serde_json::Value;

use tanit_core::b64url_decode;

use crate::error::{ProofError, ProofResult};

/// A JWS in compact form, split but not verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jws<'a> {
    pub header_b64: &'a str,
    pub payload_b64: &'a str,
    pub signature_b64: &'a str,
}

impl<'a> Jws<'a> {
    pub fn parse(jwt: &'a str) -> ProofResult<Self> {
        let mut parts = jwt.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() => Ok(Self {
                header_b64: h,
                payload_b64: p,
                signature_b64: s,
            }),
            _ => Err(ProofError::MalformedSdJwt(
                "JWT must have three dot-separated parts".into(),
            )),
        }
    }

    /// `<header>.<payload>`, the bytes the signature covers.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    pub fn header(&self) -> ProofResult<Value> {
        decode_json_segment(self.header_b64, "header")
    }

    pub fn payload(&self) -> ProofResult<Value> {
        decode_json_segment(self.payload_b64, "payload")
    }
}

/// An SD-JWT split into issuer JWT, disclosures and optional key-binding JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdJwtParts<'a> {
    pub issuer_jwt: &'a str,
    pub disclosures: Vec<&'a str>,
    pub key_binding_jwt: Option<&'a str>,
}

impl<'a> SdJwtParts<'a> {
    /// Split on `~`. A non-empty segment after the last `~` is the
    /// key-binding JWT; empty segments between separators are dropped.
    pub fn parse(serialized: &'a str) -> ProofResult<Self> {
        let mut segments: Vec<&str> = serialized.split('~').collect();
        let issuer_jwt = segments.remove(0);
        if issuer_jwt.is_empty() {
            return Err(ProofError::MalformedSdJwt("missing issuer JWT".into()));
        }

        let has_key_binding = segments.last().is_some_and(|last| !last.is_empty());
        let key_binding_jwt = if has_key_binding { segments.pop() } else { None };
        let disclosures = segments.into_iter().filter(|d| !d.is_empty()).collect();

        Ok(Self {
            issuer_jwt,
            disclosures,
            key_binding_jwt,
        })
    }

    pub fn jws(&self) -> ProofResult<Jws<'a>> {
        Jws::parse(self.issuer_jwt)
    }

    /// `<issuer-jwt>~<d1>~…~<dn>~`, the string `sd_hash` is computed over.
    pub fn presentation_prefix(&self) -> String {
        assemble(self.issuer_jwt, self.disclosures.iter().copied())
    }
}

/// Join an issuer JWT and disclosures with the trailing `~`.
pub fn assemble<'d>(issuer_jwt: &str, disclosures: impl IntoIterator<Item = &'d str>) -> String {
    let mut out = String::from(issuer_jwt);
    for disclosure in disclosures {
        out.push('~');
        out.push_str(disclosure);
    }
    out.push('~');
    out
}

/// Decode a base64url JSON segment. Padding is tolerated.
pub fn decode_json_segment(segment: &str, what: &str) -> ProofResult<Value> {
    let bytes = b64url_decode(segment.trim_end_matches('='))
        .map_err(|_| ProofError::MalformedSdJwt(format!("{} is not base64url", what)))?;
    serde_json::from_slice(&bytes)
        .map_err(|_| ProofError::MalformedSdJwt(format!("{} is not JSON", what)))
}
