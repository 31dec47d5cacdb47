//! Tanit Proof
//!
//! SD-JWT-VC engine for the Tanit ID wallet. Issues credentials with every
//! claim selectively disclosable, derives presentations that reveal a chosen
//! subset, optionally bound to a verifier nonce and audience by a
//! key-binding JWT, and verifies or decodes the result.
//!
//! ```text
//! issue -> <jwt>~d1~…~dn~
//! present -> <jwt>~di~…~dk~[<kb-jwt>]
//! verify -> { valid, claims }
//! ```

pub mod compact;
pub mod decode;
pub mod disclosure;
pub mod error;
pub mod issuance;
pub mod presentation;
pub mod types;
pub mod verify;

use std::sync::Arc;

use tanit_core::{Signer, Timestamp};
use tanit_cred::{ClaimMap, CredentialClaims};

pub use disclosure::Disclosure;
pub use error::{ProofError, ProofResult};
pub use types::{
    DecodedSdJwt, EngineConfig, VerificationResult, DEFAULT_ISSUER, KB_JWT_TYP, SD_ALG,
    SD_JWT_VC_TYP,
};

/// The SdJwtEngine bundles issuance, presentation and verification around a
/// single signing key. The key is shared read-only, so the engine is
/// `Send + Sync` and concurrent calls are independent.
#[derive(Clone)]
pub struct SdJwtEngine {
    config: EngineConfig,
    signer: Arc<dyn Signer>,
}

impl std::fmt::Debug for SdJwtEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdJwtEngine")
            .field("config", &self.config)
            .field("kid", &self.signer.key_id())
            .finish()
    }
}

impl SdJwtEngine {
    /// Create a new engine with the given configuration and key.
    pub fn new(config: EngineConfig, signer: Arc<dyn Signer>) -> ProofResult<Self> {
        config.validate().map_err(ProofError::InvalidConfig)?;
        Ok(Self { config, signer })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn signer(&self) -> &dyn Signer {
        self.signer.as_ref()
    }

    /// Issue a typed claim set under its own VCT.
    pub fn issue(&self, claims: &CredentialClaims) -> ProofResult<String> {
        self.issue_claims(&claims.to_claim_map(), claims.vct())
    }

    /// Issue an arbitrary flat claim map under `vct`.
    pub fn issue_claims(&self, claims: &ClaimMap, vct: &str) -> ProofResult<String> {
        issuance::issue_sd_jwt(
            &self.config,
            self.signer.as_ref(),
            claims,
            vct,
            Timestamp::now(),
        )
    }

    /// Derive a presentation disclosing only `selected` claims. With an
    /// audience, a key-binding JWT over `nonce` and `audience` is appended.
    pub fn present<S: AsRef<str>>(
        &self,
        serialized: &str,
        selected: &[S],
        nonce: &str,
        audience: Option<&str>,
    ) -> ProofResult<String> {
        presentation::present_sd_jwt(
            self.signer.as_ref(),
            serialized,
            selected,
            nonce,
            audience,
            Timestamp::now(),
        )
    }

    /// Verify a credential or presentation. Never errors; failure is
    /// `{ valid: false, claims: {} }`.
    pub fn verify(&self, serialized: &str) -> VerificationResult {
        verify::verify_sd_jwt(
            &self.config,
            self.signer.as_ref(),
            serialized,
            Timestamp::now(),
        )
    }

    /// Verify a presentation and require a key-binding JWT issued for this
    /// `nonce` and `audience`.
    pub fn verify_key_binding(
        &self,
        serialized: &str,
        nonce: &str,
        audience: &str,
    ) -> VerificationResult {
        verify::verify_sd_jwt_key_binding(
            &self.config,
            self.signer.as_ref(),
            serialized,
            nonce,
            audience,
            Timestamp::now(),
        )
    }

    /// Decode without verification, for display.
    pub fn decode(&self, serialized: &str) -> ProofResult<DecodedSdJwt> {
        decode::decode_sd_jwt(serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanit_core::Es256KeyPair;
    use tanit_cred::{create_demo_cin_claims, create_demo_pid_claims, CredentialKind, PID_VCT};

    fn engine() -> SdJwtEngine {
        SdJwtEngine::new(EngineConfig::default(), Arc::new(Es256KeyPair::generate())).unwrap()
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SdJwtEngine>();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            validity_seconds: 0,
            ..EngineConfig::default()
        };
        let err = SdJwtEngine::new(config, Arc::new(Es256KeyPair::generate())).unwrap_err();
        assert!(matches!(err, ProofError::InvalidConfig(_)));
    }

    #[test]
    fn test_round_trip_all_claims() {
        let engine = engine();
        let claims = CredentialClaims::Pid(create_demo_pid_claims());
        let sd_jwt = engine.issue(&claims).unwrap();
        let result = engine.verify(&sd_jwt);
        assert!(result.valid);

        for (name, value) in claims.to_claim_map() {
            assert_eq!(result.claims.get(&name), Some(&value), "claim {}", name);
        }
        let rebuilt =
            CredentialClaims::from_claim_map(CredentialKind::Pid, &result.claims).unwrap();
        assert_eq!(rebuilt, claims);
    }

    #[test]
    fn test_present_every_claim_round_trip() {
        let engine = engine();
        let all = [
            CredentialClaims::Pid(create_demo_pid_claims()),
            CredentialClaims::Cin(create_demo_cin_claims()),
        ];
        for claims in all {
            let map = claims.to_claim_map();
            let names: Vec<&str> = map.keys().map(String::as_str).collect();
            let sd_jwt = engine.issue(&claims).unwrap();

            let plain = engine.present(&sd_jwt, names.as_slice(), "n-1", None).unwrap();
            let bound = engine
                .present(&sd_jwt, names.as_slice(), "n-2", Some("https://verifier.example"))
                .unwrap();

            for (p, result) in [
                (&plain, engine.verify(&plain)),
                (
                    &bound,
                    engine.verify_key_binding(&bound, "n-2", "https://verifier.example"),
                ),
            ] {
                assert!(result.valid);
                assert_eq!(engine.decode(p).unwrap().disclosure_count, map.len());
                for (name, value) in &map {
                    assert_eq!(result.claims.get(name), Some(value), "claim {}", name);
                }
            }
        }
    }

    #[test]
    fn test_selective_disclosure_does_not_leak() {
        let engine = engine();
        let sd_jwt = engine
            .issue(&CredentialClaims::Pid(create_demo_pid_claims()))
            .unwrap();
        let p = engine.present(&sd_jwt, &["family_name"], "n", None).unwrap();

        assert_eq!(engine.decode(&p).unwrap().disclosure_count, 1);
        let result = engine.verify(&p);
        assert!(result.valid);
        assert_eq!(result.claims["family_name"], "Ben Salah");
        assert!(!result.claims.contains_key("given_name"));
    }

    #[test]
    fn test_issue_claims_custom_vct() {
        let engine = engine();
        let mut claims = ClaimMap::new();
        claims.insert("membership".into(), "gold".into());
        let sd_jwt = engine.issue_claims(&claims, "example.membership.1").unwrap();
        let result = engine.verify(&sd_jwt);
        assert_eq!(result.claims["vct"], "example.membership.1");
        assert_eq!(result.claims["membership"], "gold");
        assert!(engine.issue_claims(&claims, " ").is_err());
    }

    #[test]
    fn test_engines_do_not_share_keys() {
        let a = engine();
        let b = engine();
        let sd_jwt = a.issue(&create_demo_pid_claims().into()).unwrap();
        assert!(a.verify(&sd_jwt).valid);
        assert!(!b.verify(&sd_jwt).valid);
    }

    #[test]
    fn test_concurrent_presentations_are_independent() {
        let engine = Arc::new(engine());
        let sd_jwt = Arc::new(engine.issue(&create_demo_pid_claims().into()).unwrap());
        let selections: Vec<Vec<&'static str>> = vec![
            vec!["family_name"],
            vec!["given_name", "age_over_18"],
            vec!["birth_date", "nationality", "gender"],
            vec![],
        ];

        let handles: Vec<_> = selections
            .into_iter()
            .enumerate()
            .map(|(i, selected)| {
                let engine = Arc::clone(&engine);
                let sd_jwt = Arc::clone(&sd_jwt);
                std::thread::spawn(move || {
                    let nonce = format!("nonce-{}", i);
                    let p = engine
                        .present(
                            &sd_jwt,
                            selected.as_slice(),
                            &nonce,
                            Some("https://rp.example"),
                        )
                        .unwrap();
                    let result = engine.verify_key_binding(&p, &nonce, "https://rp.example");
                    (selected, result)
                })
            })
            .collect();

        for handle in handles {
            let (selected, result) = handle.join().unwrap();
            assert!(result.valid);
            for name in &selected {
                assert!(result.claims.contains_key(*name));
            }
            assert!(selected.contains(&"family_name") || !result.claims.contains_key("family_name"));
            assert_eq!(result.claims["vct"], PID_VCT);
        }
    }

    #[test]
    fn test_decode_unverified_view() {
        let engine = engine();
        let sd_jwt = engine
            .issue(&CredentialClaims::Pid(create_demo_pid_claims()))
            .unwrap();
        let decoded = engine.decode(&sd_jwt).unwrap();
        assert_eq!(decoded.payload["given_name"], "Ali");
        assert_eq!(decoded.header["alg"], "ES256");
        assert_eq!(decoded.header["kid"], engine.signer().key_id());
    }
}
