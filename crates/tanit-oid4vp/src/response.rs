//! Authorization response construction.

use crate::types::{
    AuthorizationRequest, AuthorizationResponse, DescriptorMapEntry, PresentationSubmission,
    SD_JWT_VC_FORMAT,
};

/// Wrap a VP token in an authorization response. Every input descriptor maps
/// to the whole token (`$`), in request order; `state` is echoed.
pub fn build_authorization_response(
    request: &AuthorizationRequest,
    vp_token: &str,
) -> AuthorizationResponse {
    let definition = &request.presentation_definition;
    let descriptor_map = definition
        .input_descriptors
        .iter()
        .map(|d| DescriptorMapEntry {
            id: d.id.clone(),
            format: SD_JWT_VC_FORMAT.to_string(),
            path: "$".to_string(),
        })
        .collect();

    AuthorizationResponse {
        vp_token: vp_token.to_string(),
        presentation_submission: PresentationSubmission {
            id: format!("ps-{}", uuid::Uuid::new_v4()),
            definition_id: definition.id.clone(),
            descriptor_map,
        },
        state: request.state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_bank_kyc_request;
    use crate::types::{Constraints, InputDescriptor};

    #[test]
    fn test_descriptor_map_and_state() {
        let request = demo_bank_kyc_request();
        let response = build_authorization_response(&request, "jwt~d~");
        assert_eq!(response.vp_token, "jwt~d~");
        assert_eq!(response.state, request.state);

        let submission = &response.presentation_submission;
        assert!(submission.id.starts_with("ps-"));
        assert_eq!(submission.definition_id, "demo-bank-kyc-1");
        assert_eq!(
            submission.descriptor_map,
            vec![DescriptorMapEntry {
                id: "eu-pid-basic".into(),
                format: "vc+sd-jwt".into(),
                path: "$".into(),
            }]
        );
    }

    #[test]
    fn test_order_preserved_and_state_absent() {
        let mut request = demo_bank_kyc_request();
        request.state = None;
        for id in ["second", "third"] {
            request
                .presentation_definition
                .input_descriptors
                .push(InputDescriptor {
                    id: id.into(),
                    name: None,
                    purpose: None,
                    format: None,
                    constraints: Constraints::default(),
                });
        }
        let response = build_authorization_response(&request, "t");
        let ids: Vec<&str> = response
            .presentation_submission
            .descriptor_map
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["eu-pid-basic", "second", "third"]);
        assert_eq!(response.state, None);
    }

    #[test]
    fn test_submission_ids_unique() {
        let request = demo_bank_kyc_request();
        let a = build_authorization_response(&request, "t");
        let b = build_authorization_response(&request, "t");
        assert_ne!(a.presentation_submission.id, b.presentation_submission.id);
    }
}
