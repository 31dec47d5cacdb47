//! Presentation flow: request → match → consent → approve → response.
//!
//! One tagged [`FlowState`] replaces independently nullable request, consent,
//! matched-credential and response slots. Failures are reported both as the
//! returned error and as a display string in [`PresentationSession::error`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tanit_cred::{label_for, CredentialKind};
use tanit_oid4vp::{
    build_authorization_response, extract_requested_fields, match_credentials,
    parse_authorization_request, AuthorizationRequest, AuthorizationResponse,
};
use tanit_proof::SdJwtEngine;

use crate::error::{RootError, RootResult};
use crate::store::{CredentialStore, StoredCredential};

const NO_MATCH_MESSAGE: &str = "No matching credentials found. Load a PID credential first.";
const NO_ACTIVE_REQUEST_MESSAGE: &str = "No active presentation request";

// ---------------------------------------------------------------------------
// Consent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentField {
    pub path: String,
    pub label: String,
    pub required: bool,
    pub selected: bool,
}

/// What the holder is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationConsent {
    pub verifier_name: String,
    pub verifier_purpose: Option<String>,
    pub requested_fields: Vec<ConsentField>,
}

impl PresentationConsent {
    fn for_request(request: &AuthorizationRequest, credential: &StoredCredential) -> Self {
        let kind = CredentialKind::from_vct(&credential.vct).unwrap_or(CredentialKind::Pid);
        let requested_fields = extract_requested_fields(request)
            .into_iter()
            .map(|f| ConsentField {
                label: label_for(kind, &f.path),
                path: f.path,
                required: f.required,
                selected: true,
            })
            .collect();

        Self {
            verifier_name: request.client_id.clone(),
            verifier_purpose: request.presentation_definition.purpose.clone(),
            requested_fields,
        }
    }

    /// Paths the holder agreed to disclose, in request order.
    pub fn selected_paths(&self) -> Vec<&str> {
        self.requested_fields
            .iter()
            .filter(|f| f.selected)
            .map(|f| f.path.as_str())
            .collect()
    }
}

/// A request matched to a held credential, waiting for approval.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPresentation {
    pub request: AuthorizationRequest,
    pub consent: PresentationConsent,
    pub credential_id: String,
}

// ---------------------------------------------------------------------------
// FlowState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FlowState {
    #[default]
    Idle,
    RequestReceived(AuthorizationRequest),
    Matched(PendingPresentation),
    /// Presentation is being built.
    Approving(PendingPresentation),
    Completed(AuthorizationResponse),
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::RequestReceived(_) => "request_received",
            FlowState::Matched(_) => "matched",
            FlowState::Approving(_) => "approving",
            FlowState::Completed(_) => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// PresentationSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PresentationSession {
    state: FlowState,
    error: Option<String>,
}

impl PresentationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.state, FlowState::Approving(_))
    }

    pub fn current_request(&self) -> Option<&AuthorizationRequest> {
        match &self.state {
            FlowState::RequestReceived(request) => Some(request),
            FlowState::Matched(p) | FlowState::Approving(p) => Some(&p.request),
            _ => None,
        }
    }

    pub fn consent(&self) -> Option<&PresentationConsent> {
        match &self.state {
            FlowState::Matched(p) | FlowState::Approving(p) => Some(&p.consent),
            _ => None,
        }
    }

    pub fn matched_credential_id(&self) -> Option<&str> {
        match &self.state {
            FlowState::Matched(p) | FlowState::Approving(p) => Some(&p.credential_id),
            _ => None,
        }
    }

    pub fn last_response(&self) -> Option<&AuthorizationResponse> {
        match &self.state {
            FlowState::Completed(response) => Some(response),
            _ => None,
        }
    }

    fn transition(&mut self, next: FlowState) {
        info!(from = self.state.name(), to = next.name(), "presentation flow");
        self.state = next;
    }

    pub(crate) fn fail(&mut self, message: String, err: RootError) -> RootError {
        warn!(error = %message, "presentation flow");
        self.error = Some(message);
        err
    }

    /// Parse an `openid4vp://` URI. Replaces whatever flow was in progress,
    /// including a previous response.
    pub fn receive_request(&mut self, uri: &str) -> RootResult<()> {
        self.error = None;
        match parse_authorization_request(uri) {
            Ok(request) => {
                self.transition(FlowState::RequestReceived(request));
                Ok(())
            }
            Err(e) => {
                self.transition(FlowState::Idle);
                Err(self.fail(format!("Invalid request: {}", e), e.into()))
            }
        }
    }

    /// Select the first held credential satisfying the received request and
    /// build the consent with every field selected.
    pub fn match_request(&mut self, store: &CredentialStore) -> RootResult<()> {
        let request = match &self.state {
            FlowState::RequestReceived(request) => request,
            _ => {
                return Err(self.fail(
                    NO_ACTIVE_REQUEST_MESSAGE.to_string(),
                    RootError::NoActiveRequest,
                ))
            }
        };

        let Some(credential) = match_credentials(request, store.list()).into_iter().next() else {
            self.transition(FlowState::Idle);
            return Err(self.fail(NO_MATCH_MESSAGE.to_string(), RootError::NoMatchingCredential));
        };

        let pending = PendingPresentation {
            consent: PresentationConsent::for_request(request, credential),
            request: request.clone(),
            credential_id: credential.id.clone(),
        };
        self.transition(FlowState::Matched(pending));
        Ok(())
    }

    /// Parse and match in one step.
    pub fn handle_authorization_request(
        &mut self,
        uri: &str,
        store: &CredentialStore,
    ) -> RootResult<()> {
        self.receive_request(uri)?;
        self.match_request(store)
    }

    /// Toggle a consent field. Required and unknown paths, and any state
    /// other than Matched, leave the consent unchanged.
    pub fn update_selected_field(&mut self, path: &str, selected: bool) {
        if let FlowState::Matched(pending) = &mut self.state {
            if let Some(field) = pending
                .consent
                .requested_fields
                .iter_mut()
                .find(|f| f.path == path && !f.required)
            {
                field.selected = selected;
            }
        }
    }

    /// Present the selected fields of the matched credential, bound to the
    /// request's nonce and client id, and wrap it as an authorization
    /// response. On failure the flow stays Matched so the holder can retry.
    pub fn submit_presentation(
        &mut self,
        engine: &SdJwtEngine,
        store: &CredentialStore,
    ) -> RootResult<AuthorizationResponse> {
        let pending = match &self.state {
            FlowState::Matched(pending) => pending.clone(),
            _ => {
                return Err(self.fail(
                    NO_ACTIVE_REQUEST_MESSAGE.to_string(),
                    RootError::NoActiveRequest,
                ))
            }
        };

        self.error = None;
        self.transition(FlowState::Approving(pending.clone()));

        match create_response(&pending, engine, store) {
            Ok(response) => {
                self.transition(FlowState::Completed(response.clone()));
                Ok(response)
            }
            Err(e) => {
                self.transition(FlowState::Matched(pending));
                let message = format!("Presentation failed: {}", e);
                Err(self.fail(message, RootError::Presentation(e.to_string())))
            }
        }
    }

    /// Abandon the flow. A pending error message is kept.
    pub fn cancel_presentation(&mut self) {
        self.transition(FlowState::Idle);
    }
}

fn create_response(
    pending: &PendingPresentation,
    engine: &SdJwtEngine,
    store: &CredentialStore,
) -> RootResult<AuthorizationResponse> {
    let credential = store
        .get(&pending.credential_id)
        .ok_or(RootError::NoMatchingCredential)?;
    let request = &pending.request;
    let selected = pending.consent.selected_paths();
    let vp_token = engine.present(
        &credential.raw,
        selected.as_slice(),
        &request.nonce,
        Some(&request.client_id),
    )?;
    Ok(build_authorization_response(request, &vp_token))
}
