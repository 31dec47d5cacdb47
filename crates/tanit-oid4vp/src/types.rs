use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only `response_type` a holder answers.
pub const VP_TOKEN: &str = "vp_token";

/// Credential format identifier for SD-JWT-VC in presentation definitions.
pub const SD_JWT_VC_FORMAT: &str = "vc+sd-jwt";

/// URI scheme prefix of same-device authorization requests.
pub const OPENID4VP_SCHEME: &str = "openid4vp://";

// ---------------------------------------------------------------------------
// Presentation definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
}

/// Constraint on one credential field, addressed by JSONPath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraint {
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FieldFilter>,
}

impl FieldConstraint {
    pub fn new(path: &str) -> Self {
        Self {
            path: vec![path.to_string()],
            filter: None,
        }
    }

    /// A string field that must equal `value`.
    pub fn with_const(path: &str, value: &str) -> Self {
        Self {
            path: vec![path.to_string()],
            filter: Some(FieldFilter {
                filter_type: Some("string".into()),
                const_value: Some(Value::from(value)),
            }),
        }
    }

    /// Claim names addressed by this constraint, with the `$.` root stripped.
    pub fn claim_names(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(|p| claim_name(p))
    }
}

/// Strip the JSONPath root (`$.`) from a field path.
pub fn claim_name(path: &str) -> &str {
    path.strip_prefix("$.").unwrap_or(path)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default)]
    pub fields: Vec<FieldConstraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Accepted formats keyed by format identifier; absent means any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub constraints: Constraints,
}

impl InputDescriptor {
    /// False only when a format map is declared without `vc+sd-jwt`.
    pub fn accepts_sd_jwt_vc(&self) -> bool {
        match &self.format {
            None => true,
            Some(formats) => formats
                .get(SD_JWT_VC_FORMAT)
                .is_some_and(|v| !v.is_null()),
        }
    }

    /// The `const` of the first `$.vct` constraint, if it carries one.
    pub fn vct_filter(&self) -> Option<&Value> {
        self.constraints
            .fields
            .iter()
            .find(|f| f.path.iter().any(|p| p == "$.vct"))
            .and_then(|f| f.filter.as_ref())
            .and_then(|filter| filter.const_value.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub input_descriptors: Vec<InputDescriptor>,
}

// ---------------------------------------------------------------------------
// Authorization request / response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub response_type: String,
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    pub nonce: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub presentation_definition: PresentationDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorMapEntry {
    pub id: String,
    pub format: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationSubmission {
    pub id: String,
    pub definition_id: String,
    pub descriptor_map: Vec<DescriptorMapEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub vp_token: String,
    pub presentation_submission: PresentationSubmission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A claim the verifier asks for, as shown on the consent screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedField {
    pub path: String,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// CredentialShape — what matching needs to know about a held credential
// ---------------------------------------------------------------------------

pub trait CredentialShape {
    fn id(&self) -> &str;
    fn vct(&self) -> &str;
    fn has_claim(&self, name: &str) -> bool;
}
