//! Mandatory-field validation for PID and CIN claim sets.
//!
//! A field is missing when it is absent, `null`, or the empty string. Every
//! missing mandatory field is reported, in mandatory-list order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ClaimMap, CredentialKind};

/// Mandatory PID attributes per ARF v2.8.0.
pub const PID_MANDATORY_FIELDS: [&str; 8] = [
    "family_name",
    "given_name",
    "birth_date",
    "age_over_18",
    "issuance_date",
    "expiry_date",
    "issuing_authority",
    "issuing_country",
];

pub const CIN_MANDATORY_FIELDS: [&str; 19] = [
    "cin_number",
    "nom",
    "prenom",
    "nom_ar",
    "prenom_ar",
    "date_naissance",
    "lieu_naissance",
    "gouvernorat_naissance",
    "sexe",
    "nationalite",
    "etat_civil",
    "nom_pere",
    "nom_mere",
    "adresse",
    "gouvernorat",
    "code_postal",
    "date_delivrance",
    "date_expiration",
    "autorite_delivrance",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub missing_fields: Vec<String>,
}

pub fn mandatory_fields(kind: CredentialKind) -> &'static [&'static str] {
    match kind {
        CredentialKind::Pid => &PID_MANDATORY_FIELDS,
        CredentialKind::Cin => &CIN_MANDATORY_FIELDS,
    }
}

/// Absent, null and empty-string values all count as missing.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn validate_mandatory(claims: &ClaimMap, fields: &[&str]) -> ValidationReport {
    let missing_fields: Vec<String> = fields
        .iter()
        .filter(|field| is_missing(claims.get(**field)))
        .map(|field| field.to_string())
        .collect();

    if !missing_fields.is_empty() {
        tracing::debug!(missing = missing_fields.len(), "claim set incomplete");
    }

    ValidationReport {
        valid: missing_fields.is_empty(),
        missing_fields,
    }
}

pub fn validate_pid_claims(claims: &ClaimMap) -> ValidationReport {
    validate_mandatory(claims, &PID_MANDATORY_FIELDS)
}

pub fn validate_cin_claims(claims: &ClaimMap) -> ValidationReport {
    validate_mandatory(claims, &CIN_MANDATORY_FIELDS)
}
