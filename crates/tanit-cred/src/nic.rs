//! Bridge from the Tunisian NIC verification record to the EU PID namespace.

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CredError, CredResult};
use crate::types::{Gender, PidClaims};

const NIC_ISSUING_AUTHORITY: &str = "Ministry of Interior - Tunisia";
const NIC_VALIDITY_MONTHS: u32 = 60;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity record produced by the national identity card check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicRecord {
    pub first_name: String,
    pub last_name: String,
    /// ISO 8601 (YYYY-MM-DD)
    pub date_of_birth: String,
    pub nic_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Map a NIC record to PID claims as of `today`.
///
/// Age is the difference of calendar years; month and day are ignored. The
/// PID is valid for five years from `today`.
pub fn map_tunisia_nic_to_pid(nic: &NicRecord, today: NaiveDate) -> CredResult<PidClaims> {
    let birth = NaiveDate::parse_from_str(&nic.date_of_birth, DATE_FORMAT)
        .map_err(|e| CredError::InvalidDate(format!("{}: {}", nic.date_of_birth, e)))?;
    let expiry = today
        .checked_add_months(Months::new(NIC_VALIDITY_MONTHS))
        .ok_or_else(|| CredError::InvalidDate(format!("expiry overflow from {}", today)))?;

    let age = today.year() - birth.year();
    tracing::debug!(age, "mapped NIC record to PID");

    Ok(PidClaims {
        family_name: nic.last_name.clone(),
        given_name: nic.first_name.clone(),
        birth_date: nic.date_of_birth.clone(),
        age_over_18: age >= 18,
        issuance_date: today.format(DATE_FORMAT).to_string(),
        expiry_date: expiry.format(DATE_FORMAT).to_string(),
        issuing_authority: NIC_ISSUING_AUTHORITY.into(),
        issuing_country: "TN".into(),
        nationality: Some(non_empty(&nic.nationality).unwrap_or_else(|| "Tunisian".into())),
        document_number: Some(nic.nic_number.clone()),
        gender: nic.gender.as_deref().and_then(Gender::parse),
        age_in_years: Some(age),
        age_birth_year: Some(birth.year()),
        resident_address: non_empty(&nic.address),
        resident_city: non_empty(&nic.city),
        resident_country: Some(non_empty(&nic.country).unwrap_or_else(|| "TN".into())),
        ..PidClaims::default()
    })
}

/// [`map_tunisia_nic_to_pid`] against the current UTC date.
pub fn map_tunisia_nic_to_pid_today(nic: &NicRecord) -> CredResult<PidClaims> {
    map_tunisia_nic_to_pid(nic, Utc::now().date_naive())
}
