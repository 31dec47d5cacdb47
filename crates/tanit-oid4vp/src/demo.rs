//! Demo verifier requests for self-test and the CLI walkthrough.
//!
//! Each call mints a fresh nonce and session state.

use serde_json::json;

use tanit_cred::{CIN_VCT, PID_VCT};

use crate::error::Oid4vpResult;
use crate::types::{
    AuthorizationRequest, Constraints, FieldConstraint, InputDescriptor, PresentationDefinition,
    SD_JWT_VC_FORMAT, VP_TOKEN,
};

pub const DEMO_BANK_CLIENT_ID: &str = "https://demo-bank.example.com";
pub const DEMO_GOV_CLIENT_ID: &str = "https://demo-admin.gov.tn";

fn sd_jwt_es256_format() -> Option<serde_json::Map<String, serde_json::Value>> {
    let mut formats = serde_json::Map::new();
    formats.insert(
        SD_JWT_VC_FORMAT.to_string(),
        json!({ "sd-jwt_alg_values": ["ES256"] }),
    );
    Some(formats)
}

fn demo_request(client_id: &str, definition: PresentationDefinition) -> AuthorizationRequest {
    AuthorizationRequest {
        response_type: VP_TOKEN.to_string(),
        client_id: client_id.to_string(),
        client_id_scheme: None,
        response_mode: Some("direct_post".into()),
        response_uri: None,
        redirect_uri: None,
        nonce: uuid::Uuid::new_v4().to_string(),
        state: Some(format!("session-{}", chrono::Utc::now().timestamp_millis())),
        presentation_definition: definition,
    }
}

/// A bank asking for basic PID attributes for account opening.
pub fn demo_bank_kyc_request() -> AuthorizationRequest {
    demo_request(
        DEMO_BANK_CLIENT_ID,
        PresentationDefinition {
            id: "demo-bank-kyc-1".into(),
            name: Some("Bank KYC Verification".into()),
            purpose: Some("Verify your identity for account opening".into()),
            input_descriptors: vec![InputDescriptor {
                id: "eu-pid-basic".into(),
                name: Some("EU Person Identification Data".into()),
                purpose: Some("Basic identity verification".into()),
                format: sd_jwt_es256_format(),
                constraints: Constraints {
                    fields: vec![
                        FieldConstraint::with_const("$.vct", PID_VCT),
                        FieldConstraint::new("$.family_name"),
                        FieldConstraint::new("$.given_name"),
                        FieldConstraint::new("$.age_over_18"),
                    ],
                },
            }],
        },
    )
}

/// A government office checking the national identity card.
pub fn demo_cin_check_request() -> AuthorizationRequest {
    demo_request(
        DEMO_GOV_CLIENT_ID,
        PresentationDefinition {
            id: "demo-gov-cin-1".into(),
            name: Some("Vérification CIN".into()),
            purpose: Some("Vérifier votre carte d'identité nationale".into()),
            input_descriptors: vec![InputDescriptor {
                id: "tn-cin-basic".into(),
                name: Some("Carte d'Identité Nationale".into()),
                purpose: Some("Identity card check".into()),
                format: sd_jwt_es256_format(),
                constraints: Constraints {
                    fields: vec![
                        FieldConstraint::with_const("$.vct", CIN_VCT),
                        FieldConstraint::new("$.cin_number"),
                        FieldConstraint::new("$.nom"),
                        FieldConstraint::new("$.prenom"),
                        FieldConstraint::new("$.date_naissance"),
                    ],
                },
            }],
        },
    )
}

pub fn demo_bank_kyc_request_uri() -> Oid4vpResult<String> {
    demo_bank_kyc_request().to_uri()
}

pub fn demo_cin_check_request_uri() -> Oid4vpResult<String> {
    demo_cin_check_request().to_uri()
}
