//! Demo personas for "Ali Ben Salah".
//!
//! The PID and CIN claim sets describe the same virtual holder: same names,
//! same birth date.

use crate::types::{CinClaims, EtatCivil, Gender, PidClaims, Sexe};

pub fn create_demo_pid_claims() -> PidClaims {
    PidClaims {
        family_name: "Ben Salah".into(),
        given_name: "Ali".into(),
        birth_date: "1990-03-15".into(),
        age_over_18: true,
        issuance_date: "2025-01-15".into(),
        expiry_date: "2030-01-15".into(),
        issuing_authority: "Ministry of Interior - Tunisia".into(),
        issuing_country: "TN".into(),
        nationality: Some("Tunisian".into()),
        document_number: Some("TN-12345678".into()),
        gender: Some(Gender::Male),
        age_in_years: Some(35),
        age_birth_year: Some(1990),
        resident_city: Some("Tunis".into()),
        resident_country: Some("TN".into()),
        birth_city: Some("Tunis".into()),
        birth_country: Some("TN".into()),
        ..PidClaims::default()
    }
}

pub fn create_demo_cin_claims() -> CinClaims {
    CinClaims {
        cin_number: "09876543".into(),
        nom: "Ben Salah".into(),
        prenom: "Ali".into(),
        nom_ar: "بن صالح".into(),
        prenom_ar: "علي".into(),
        date_naissance: "1990-03-15".into(),
        lieu_naissance: "Tunis".into(),
        gouvernorat_naissance: "Tunis".into(),
        sexe: Sexe::Masculin,
        nationalite: "Tunisienne".into(),
        etat_civil: EtatCivil::Celibataire,
        nom_pere: "Mohamed Ben Salah".into(),
        nom_mere: "Fatma Trabelsi".into(),
        adresse: "12 Rue de la Liberté".into(),
        gouvernorat: "Tunis".into(),
        code_postal: "1000".into(),
        date_delivrance: "2025-01-15".into(),
        date_expiration: "2035-01-15".into(),
        autorite_delivrance: "Ministère de l'Intérieur".into(),
    }
}
