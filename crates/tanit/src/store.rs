//! Holder credential store.
//!
//! In-memory and process-scoped; credentials are not persisted.

use serde::{Deserialize, Serialize};

use tanit_cred::CredentialClaims;
use tanit_oid4vp::CredentialShape;
use tanit_proof::decode::decode_sd_jwt;

use crate::error::RootResult;

/// A held SD-JWT-VC together with the claims it was issued over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    pub id: String,
    /// Compact SD-JWT as issued, all disclosures included.
    pub raw: String,
    pub vct: String,
    pub claims: CredentialClaims,
    pub issued_at: String,
    pub expires_at: String,
    pub issuer: String,
}

impl CredentialShape for StoredCredential {
    fn id(&self) -> &str {
        &self.id
    }

    fn vct(&self) -> &str {
        &self.vct
    }

    fn has_claim(&self, name: &str) -> bool {
        self.claims.has_claim(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    credentials: Vec<StoredCredential>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw credential. `vct` and `issuer` come from the decoded
    /// payload, falling back to the claim set's type and `"unknown"`.
    pub fn add(&mut self, raw: &str, claims: CredentialClaims) -> RootResult<&StoredCredential> {
        let decoded = decode_sd_jwt(raw)?;
        let payload_str = |name: &str| {
            decoded
                .payload
                .get(name)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let stored = StoredCredential {
            id: uuid::Uuid::new_v4().to_string(),
            raw: raw.to_string(),
            vct: payload_str("vct").unwrap_or_else(|| claims.vct().to_string()),
            issued_at: claims.issued_on().to_string(),
            expires_at: claims.expires_on().to_string(),
            issuer: payload_str("iss").unwrap_or_else(|| "unknown".to_string()),
            claims,
        };
        tracing::debug!(id = %stored.id, vct = %stored.vct, "stored credential");

        self.credentials.push(stored);
        let index = self.credentials.len() - 1;
        Ok(&self.credentials[index])
    }

    pub fn get(&self, id: &str) -> Option<&StoredCredential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    pub fn list(&self) -> &[StoredCredential] {
        &self.credentials
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
