//! Tanit ID holder wallet.
//!
//! Ties the SD-JWT-VC engine, the OID4VP protocol layer and the held
//! credentials together. A [`Wallet`] owns one engine, one
//! [`CredentialStore`] and one [`PresentationSession`]; the CLI in `main.rs`
//! drives it for the demo walkthrough.
//!
//! # Architecture
//!
//! ```text
//! tanit (store, session, config, CLI)
//!  ├──► tanit-proof ───► tanit-core
//!  │        └──────────► tanit-cred
//!  ├──► tanit-oid4vp ──► tanit-cred
//!  └──► tanit-core, tanit-cred
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use config::{IssuerConfig, RootConfig, VerifierConfig};
pub use error::{RootError, RootResult};
pub use session::{
    ConsentField, FlowState, PendingPresentation, PresentationConsent, PresentationSession,
};
pub use store::{CredentialStore, StoredCredential};

use std::sync::Arc;

use tanit_core::Es256KeyPair;
use tanit_cred::{create_demo_cin_claims, create_demo_pid_claims, CredentialClaims};
use tanit_oid4vp::AuthorizationResponse;
use tanit_proof::SdJwtEngine;
use tracing::info;

/// Engine, held credentials and the presentation in progress.
#[derive(Debug, Clone)]
pub struct Wallet {
    engine: SdJwtEngine,
    store: CredentialStore,
    session: PresentationSession,
}

impl Wallet {
    pub fn new(engine: SdJwtEngine) -> Self {
        Self {
            engine,
            store: CredentialStore::new(),
            session: PresentationSession::new(),
        }
    }

    /// Build a wallet with a freshly generated ES256 key. The key serves as
    /// both the issuer key and the holder binding key.
    pub fn from_config(config: &RootConfig) -> RootResult<Self> {
        config.validate()?;
        let engine = SdJwtEngine::new(config.engine_config(), Arc::new(Es256KeyPair::generate()))?;
        Ok(Self::new(engine))
    }

    pub fn engine(&self) -> &SdJwtEngine {
        &self.engine
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn session(&self) -> &PresentationSession {
        &self.session
    }

    pub fn credentials(&self) -> &[StoredCredential] {
        self.store.list()
    }

    /// Store an already issued credential. Returns its wallet id.
    pub fn add_credential(&mut self, raw: &str, claims: CredentialClaims) -> RootResult<String> {
        Ok(self.store.add(raw, claims)?.id.clone())
    }

    /// Issue the demo PID with this wallet's engine and store it.
    pub fn load_demo_pid_credential(&mut self) -> RootResult<String> {
        self.load_demo(create_demo_pid_claims().into(), "demo credential")
    }

    /// Issue the demo CIN with this wallet's engine and store it.
    pub fn load_demo_cin_credential(&mut self) -> RootResult<String> {
        self.load_demo(create_demo_cin_claims().into(), "demo CIN credential")
    }

    fn load_demo(&mut self, claims: CredentialClaims, what: &str) -> RootResult<String> {
        self.session.clear_error();
        let issued = self
            .engine
            .issue(&claims)
            .map_err(RootError::from)
            .and_then(|raw| self.add_credential(&raw, claims));
        match issued {
            Ok(id) => {
                info!(id = %id, "loaded {}", what);
                Ok(id)
            }
            Err(e) => Err(self
                .session
                .fail(format!("Failed to issue {}: {}", what, e), e)),
        }
    }

    pub fn handle_authorization_request(&mut self, uri: &str) -> RootResult<()> {
        self.session.handle_authorization_request(uri, &self.store)
    }

    pub fn update_selected_field(&mut self, path: &str, selected: bool) {
        self.session.update_selected_field(path, selected);
    }

    pub fn submit_presentation(&mut self) -> RootResult<AuthorizationResponse> {
        self.session.submit_presentation(&self.engine, &self.store)
    }

    pub fn cancel_presentation(&mut self) {
        self.session.cancel_presentation();
    }

    pub fn clear_error(&mut self) {
        self.session.clear_error();
    }
}
