//! Tanit credential claim sets.
//!
//! Typed PID (`eu.europa.ec.eudi.pid.1`) and Tunisian CIN (`tn.gov.moi.cin.1`)
//! claim sets, mandatory-field validation, consent labels, the NIC → PID
//! bridge and the demo persona used by the walkthrough.

pub mod demo;
pub mod error;
pub mod labels;
pub mod nic;
pub mod types;
pub mod validation;

pub use demo::{create_demo_cin_claims, create_demo_pid_claims};
pub use error::{CredError, CredResult};
pub use labels::{label_for, CIN_FIELD_LABELS, PID_FIELD_LABELS};
pub use nic::{map_tunisia_nic_to_pid, map_tunisia_nic_to_pid_today, NicRecord};
pub use types::*;
pub use validation::{
    validate_cin_claims, validate_pid_claims, ValidationReport, CIN_MANDATORY_FIELDS,
    PID_MANDATORY_FIELDS,
};
