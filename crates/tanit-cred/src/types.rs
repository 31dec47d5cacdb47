use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CredError, CredResult};
use crate::validation::{validate_cin_claims, validate_pid_claims, ValidationReport};

/// Verifiable Credential Type of the EU Person Identification Data credential.
pub const PID_VCT: &str = "eu.europa.ec.eudi.pid.1";

/// Verifiable Credential Type of the Tunisian national identity card.
pub const CIN_VCT: &str = "tn.gov.moi.cin.1";

/// Flat claim name → scalar value mapping, the shape every claim set
/// flattens to before issuance and the shape partial inputs are validated in.
pub type ClaimMap = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// CredentialKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Pid,
    Cin,
}

impl CredentialKind {
    pub fn vct(&self) -> &'static str {
        match self {
            CredentialKind::Pid => PID_VCT,
            CredentialKind::Cin => CIN_VCT,
        }
    }

    pub fn from_vct(vct: &str) -> Option<Self> {
        match vct {
            PID_VCT => Some(CredentialKind::Pid),
            CIN_VCT => Some(CredentialKind::Cin),
            _ => None,
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::Pid => write!(f, "pid"),
            CredentialKind::Cin => write!(f, "cin"),
        }
    }
}

// ---------------------------------------------------------------------------
// Enumerated claim values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sexe {
    #[serde(rename = "masculin")]
    Masculin,
    #[serde(rename = "féminin")]
    Feminin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EtatCivil {
    #[serde(rename = "célibataire")]
    Celibataire,
    #[serde(rename = "marié(e)")]
    Marie,
    #[serde(rename = "divorcé(e)")]
    Divorce,
    #[serde(rename = "veuf(ve)")]
    Veuf,
}

// ---------------------------------------------------------------------------
// PidClaims — eu.europa.ec.eudi.pid.1 (ARF v2.8.0)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PidClaims {
    pub family_name: String,
    pub given_name: String,
    /// ISO 8601 (YYYY-MM-DD)
    pub birth_date: String,
    pub age_over_18: bool,
    pub issuance_date: String,
    pub expiry_date: String,
    pub issuing_authority: String,
    /// ISO 3166-1 alpha-2
    pub issuing_country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_12: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_14: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_16: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_21: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_over_65: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_in_years: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_country: Option<String>,
    /// Base64 JPEG
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

impl PidClaims {
    pub fn validate(&self) -> ValidationReport {
        validate_pid_claims(&to_claim_map(self))
    }
}

// ---------------------------------------------------------------------------
// CinClaims — tn.gov.moi.cin.1
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinClaims {
    pub cin_number: String,
    pub nom: String,
    pub prenom: String,
    pub nom_ar: String,
    pub prenom_ar: String,
    pub date_naissance: String,
    pub lieu_naissance: String,
    pub gouvernorat_naissance: String,
    pub sexe: Sexe,
    pub nationalite: String,
    pub etat_civil: EtatCivil,
    pub nom_pere: String,
    pub nom_mere: String,
    pub adresse: String,
    pub gouvernorat: String,
    pub code_postal: String,
    pub date_delivrance: String,
    pub date_expiration: String,
    pub autorite_delivrance: String,
}

impl CinClaims {
    pub fn validate(&self) -> ValidationReport {
        validate_cin_claims(&to_claim_map(self))
    }
}

// ---------------------------------------------------------------------------
// CredentialClaims — closed union of supported claim sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "claims", rename_all = "lowercase")]
pub enum CredentialClaims {
    Pid(PidClaims),
    Cin(CinClaims),
}

impl CredentialClaims {
    pub fn kind(&self) -> CredentialKind {
        match self {
            CredentialClaims::Pid(_) => CredentialKind::Pid,
            CredentialClaims::Cin(_) => CredentialKind::Cin,
        }
    }

    pub fn vct(&self) -> &'static str {
        self.kind().vct()
    }

    /// Flatten to the present claims only; absent optional fields are omitted.
    pub fn to_claim_map(&self) -> ClaimMap {
        match self {
            CredentialClaims::Pid(c) => to_claim_map(c),
            CredentialClaims::Cin(c) => to_claim_map(c),
        }
    }

    /// Rebuild a typed claim set from a flat map, e.g. a decoded credential.
    pub fn from_claim_map(kind: CredentialKind, claims: &ClaimMap) -> CredResult<Self> {
        let value = Value::Object(claims.clone());
        let parsed = match kind {
            CredentialKind::Pid => serde_json::from_value(value).map(CredentialClaims::Pid),
            CredentialKind::Cin => serde_json::from_value(value).map(CredentialClaims::Cin),
        };
        parsed.map_err(|e| CredError::SchemaViolation(format!("{} claims: {}", kind, e)))
    }

    /// [`from_claim_map`](Self::from_claim_map) keyed by a VCT string.
    pub fn from_vct_claims(vct: &str, claims: &ClaimMap) -> CredResult<Self> {
        let kind =
            CredentialKind::from_vct(vct).ok_or_else(|| CredError::UnknownVct(vct.to_string()))?;
        Self::from_claim_map(kind, claims)
    }

    pub fn has_claim(&self, name: &str) -> bool {
        self.to_claim_map().contains_key(name)
    }

    pub fn validate(&self) -> ValidationReport {
        match self {
            CredentialClaims::Pid(c) => c.validate(),
            CredentialClaims::Cin(c) => c.validate(),
        }
    }

    /// Document issuance date as carried in the claims.
    pub fn issued_on(&self) -> &str {
        match self {
            CredentialClaims::Pid(c) => &c.issuance_date,
            CredentialClaims::Cin(c) => &c.date_delivrance,
        }
    }

    /// Document expiry date as carried in the claims.
    pub fn expires_on(&self) -> &str {
        match self {
            CredentialClaims::Pid(c) => &c.expiry_date,
            CredentialClaims::Cin(c) => &c.date_expiration,
        }
    }
}

impl From<PidClaims> for CredentialClaims {
    fn from(claims: PidClaims) -> Self {
        CredentialClaims::Pid(claims)
    }
}

impl From<CinClaims> for CredentialClaims {
    fn from(claims: CinClaims) -> Self {
        CredentialClaims::Cin(claims)
    }
}

fn to_claim_map<T: Serialize>(claims: &T) -> ClaimMap {
    match serde_json::to_value(claims) {
        Ok(Value::Object(map)) => map,
        _ => ClaimMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{create_demo_cin_claims, create_demo_pid_claims};

    #[test]
    fn test_kind_vct_roundtrip() {
        for kind in [CredentialKind::Pid, CredentialKind::Cin] {
            assert_eq!(CredentialKind::from_vct(kind.vct()), Some(kind));
        }
        assert_eq!(CredentialKind::from_vct("some.other.type"), None);
    }

    #[test]
    fn test_pid_claim_map_omits_absent_optionals() {
        let claims = CredentialClaims::Pid(create_demo_pid_claims());
        let map = claims.to_claim_map();
        assert_eq!(map["family_name"], "Ben Salah");
        assert_eq!(map["age_over_18"], true);
        assert_eq!(map["gender"], "male");
        assert!(!map.contains_key("portrait"));
        assert!(!map.contains_key("age_over_65"));
        assert!(claims.has_claim("given_name"));
        assert!(!claims.has_claim("cin_number"));
    }

    #[test]
    fn test_cin_claim_map_has_all_fields() {
        let claims = CredentialClaims::Cin(create_demo_cin_claims());
        let map = claims.to_claim_map();
        assert_eq!(map.len(), 19);
        assert_eq!(map["sexe"], "masculin");
        assert_eq!(map["etat_civil"], "célibataire");
        assert_eq!(claims.kind(), CredentialKind::Cin);
        assert_eq!(claims.vct(), CIN_VCT);
    }

    #[test]
    fn test_from_claim_map_roundtrip() {
        let original = CredentialClaims::Cin(create_demo_cin_claims());
        let map = original.to_claim_map();
        let rebuilt = CredentialClaims::from_claim_map(CredentialKind::Cin, &map).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_from_claim_map_ignores_envelope_metadata() {
        let mut map = CredentialClaims::Pid(create_demo_pid_claims()).to_claim_map();
        map.insert("vct".into(), PID_VCT.into());
        map.insert("iat".into(), 1_700_000_000.into());
        let rebuilt = CredentialClaims::from_claim_map(CredentialKind::Pid, &map).unwrap();
        assert_eq!(rebuilt.kind(), CredentialKind::Pid);
    }

    #[test]
    fn test_from_claim_map_wrong_kind_fails() {
        let map = CredentialClaims::Pid(create_demo_pid_claims()).to_claim_map();
        let err = CredentialClaims::from_claim_map(CredentialKind::Cin, &map).unwrap_err();
        assert!(matches!(err, CredError::SchemaViolation(_)));
    }

    #[test]
    fn test_from_vct_claims() {
        let map = CredentialClaims::Cin(create_demo_cin_claims()).to_claim_map();
        let rebuilt = CredentialClaims::from_vct_claims(CIN_VCT, &map).unwrap();
        assert_eq!(rebuilt.kind(), CredentialKind::Cin);

        let err = CredentialClaims::from_vct_claims("x.y.z", &map).unwrap_err();
        assert_eq!(err, CredError::UnknownVct("x.y.z".into()));
    }

    #[test]
    fn test_issued_and_expires_on() {
        let pid = CredentialClaims::Pid(create_demo_pid_claims());
        assert_eq!(pid.issued_on(), "2025-01-15");
        assert_eq!(pid.expires_on(), "2030-01-15");

        let cin = CredentialClaims::Cin(create_demo_cin_claims());
        assert_eq!(cin.issued_on(), "2025-01-15");
        assert_eq!(cin.expires_on(), "2035-01-15");
    }

    #[test]
    fn test_tagged_serialization() {
        let claims = CredentialClaims::Pid(create_demo_pid_claims());
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["kind"], "pid");
        assert_eq!(json["claims"]["given_name"], "Ali");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("F"), None);
    }
}
