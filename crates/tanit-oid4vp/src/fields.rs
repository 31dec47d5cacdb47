//! Requested-field extraction for the consent screen.

use crate::types::{AuthorizationRequest, RequestedField};

/// SD-JWT envelope claims; never shown as requested attributes.
pub const ENVELOPE_CLAIMS: [&str; 6] = ["vct", "iss", "iat", "exp", "nbf", "cnf"];

/// Flatten every descriptor's field paths into bare claim names, first
/// occurrence wins. A field is required when its constraint has a filter.
pub fn extract_requested_fields(request: &AuthorizationRequest) -> Vec<RequestedField> {
    let mut fields: Vec<RequestedField> = Vec::new();

    for descriptor in &request.presentation_definition.input_descriptors {
        for constraint in &descriptor.constraints.fields {
            for name in constraint.claim_names() {
                if ENVELOPE_CLAIMS.contains(&name) || fields.iter().any(|f| f.path == name) {
                    continue;
                }
                fields.push(RequestedField {
                    path: name.to_string(),
                    required: constraint.filter.is_some(),
                });
            }
        }
    }

    fields
}
