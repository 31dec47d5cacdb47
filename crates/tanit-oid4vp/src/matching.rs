//! Matching held credentials against a presentation definition.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::{AuthorizationRequest, CredentialShape, InputDescriptor};

/// Return every held credential that satisfies at least one input
/// descriptor, once each, in first-matched order.
///
/// A descriptor whose declared formats exclude `vc+sd-jwt` is skipped. A
/// `$.vct` constraint with a `const` filter matches on type alone;
/// otherwise a credential matches when it holds every requested claim name.
/// That fallback can match a credential of an unrelated type that happens to
/// share claim names.
pub fn match_credentials<'a, C: CredentialShape>(
    request: &AuthorizationRequest,
    held: &'a [C],
) -> Vec<&'a C> {
    let mut seen = HashSet::new();
    let mut matched = Vec::new();

    for descriptor in &request.presentation_definition.input_descriptors {
        if !descriptor.accepts_sd_jwt_vc() {
            tracing::debug!(descriptor = %descriptor.id, "descriptor excludes vc+sd-jwt");
            continue;
        }
        for credential in held {
            if descriptor_matches(descriptor, credential) && seen.insert(credential.id()) {
                matched.push(credential);
            }
        }
    }

    tracing::debug!(held = held.len(), matched = matched.len(), "matched credentials");
    matched
}

fn descriptor_matches<C: CredentialShape>(descriptor: &InputDescriptor, credential: &C) -> bool {
    match descriptor.vct_filter() {
        Some(expected) if is_truthy(expected) => expected.as_str() == Some(credential.vct()),
        _ => descriptor.constraints.fields.iter().all(|field| {
            field
                .claim_names()
                .any(|name| credential.has_claim(name))
        }),
    }
}

/// A `const` of `null`, `false`, `0` or `""` does not constrain the type.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_bank_kyc_request, demo_cin_check_request};
    use crate::types::{Constraints, FieldConstraint};
    use serde_json::json;
    use tanit_cred::{CIN_VCT, PID_VCT};

    struct Held {
        id: &'static str,
        vct: &'static str,
        claims: Vec<&'static str>,
    }

    impl CredentialShape for Held {
        fn id(&self) -> &str {
            self.id
        }
        fn vct(&self) -> &str {
            self.vct
        }
        fn has_claim(&self, name: &str) -> bool {
            self.claims.contains(&name)
        }
    }

    fn pid(id: &'static str) -> Held {
        Held {
            id,
            vct: PID_VCT,
            claims: vec!["family_name", "given_name", "age_over_18", "birth_date"],
        }
    }

    fn cin(id: &'static str) -> Held {
        Held {
            id,
            vct: CIN_VCT,
            claims: vec!["cin_number", "nom", "prenom", "date_naissance"],
        }
    }

    fn descriptor(id: &str, fields: Vec<FieldConstraint>) -> InputDescriptor {
        InputDescriptor {
            id: id.into(),
            name: None,
            purpose: None,
            format: None,
            constraints: Constraints { fields },
        }
    }

    fn request_with(descriptors: Vec<InputDescriptor>) -> AuthorizationRequest {
        let mut request = demo_bank_kyc_request();
        request.presentation_definition.input_descriptors = descriptors;
        request
    }

    #[test]
    fn test_match_by_vct() {
        let held = vec![pid("pid-1"), cin("cin-1")];
        let matched = match_credentials(&demo_bank_kyc_request(), &held);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "pid-1");

        let matched = match_credentials(&demo_cin_check_request(), &held);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "cin-1");
    }

    #[test]
    fn test_unrelated_vct_matches_nothing() {
        let held = vec![pid("pid-1")];
        let request = request_with(vec![descriptor(
            "d",
            vec![FieldConstraint::with_const("$.vct", "org.example.other.1")],
        )]);
        assert!(match_credentials(&request, &held).is_empty());
    }

    #[test]
    fn test_vct_filter_ignores_field_presence() {
        let held = vec![Held {
            id: "thin",
            vct: PID_VCT,
            claims: vec![],
        }];
        assert_eq!(match_credentials(&demo_bank_kyc_request(), &held).len(), 1);
    }

    #[test]
    fn test_field_fallback_requires_every_field() {
        let held = vec![pid("pid-1"), cin("cin-1")];
        let request = request_with(vec![descriptor(
            "d",
            vec![
                FieldConstraint::new("$.nom"),
                FieldConstraint::new("$.cin_number"),
            ],
        )]);
        let matched = match_credentials(&request, &held);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "cin-1");

        let request = request_with(vec![descriptor(
            "d",
            vec![FieldConstraint::new("$.nom"), FieldConstraint::new("$.email")],
        )]);
        assert!(match_credentials(&request, &held).is_empty());
    }

    #[test]
    fn test_alternative_paths_any_suffices() {
        let held = vec![cin("cin-1")];
        let request = request_with(vec![descriptor(
            "d",
            vec![FieldConstraint {
                path: vec!["$.family_name".into(), "$.nom".into()],
                filter: None,
            }],
        )]);
        assert_eq!(match_credentials(&request, &held).len(), 1);
    }

    #[test]
    fn test_empty_const_falls_back_to_fields() {
        let held = vec![pid("pid-1")];
        let request = request_with(vec![descriptor(
            "d",
            vec![
                FieldConstraint::with_const("$.vct", ""),
                FieldConstraint::new("$.given_name"),
            ],
        )]);
        // `vct` is envelope metadata, never a held claim.
        assert!(match_credentials(&request, &held).is_empty());
    }

    #[test]
    fn test_format_exclusion_skips_descriptor() {
        let held = vec![pid("pid-1")];
        let mut d = descriptor("mdoc", vec![FieldConstraint::with_const("$.vct", PID_VCT)]);
        d.format = Some(serde_json::from_value(json!({ "mso_mdoc": {} })).unwrap());
        let request = request_with(vec![d]);
        assert!(match_credentials(&request, &held).is_empty());
    }

    #[test]
    fn test_deduplicated_across_descriptors() {
        let held = vec![pid("pid-1"), cin("cin-1")];
        let request = request_with(vec![
            descriptor("by-fields", vec![FieldConstraint::new("$.given_name")]),
            descriptor("by-vct", vec![FieldConstraint::with_const("$.vct", PID_VCT)]),
            descriptor("cin", vec![FieldConstraint::with_const("$.vct", CIN_VCT)]),
        ]);
        let ids: Vec<&str> = match_credentials(&request, &held)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["pid-1", "cin-1"]);
    }

    #[test]
    fn test_no_held_credentials() {
        let held: Vec<Held> = vec![];
        assert!(match_credentials(&demo_bank_kyc_request(), &held).is_empty());
    }
}
