//! Human-readable consent-screen labels.

use crate::types::CredentialKind;

pub const PID_FIELD_LABELS: &[(&str, &str)] = &[
    ("family_name", "Family Name"),
    ("given_name", "Given Name"),
    ("birth_date", "Date of Birth"),
    ("age_over_18", "Age Over 18"),
    ("issuance_date", "Issuance Date"),
    ("expiry_date", "Expiry Date"),
    ("issuing_authority", "Issuing Authority"),
    ("issuing_country", "Issuing Country"),
    ("nationality", "Nationality"),
    ("document_number", "Document Number"),
    ("administrative_number", "Administrative Number"),
    ("gender", "Gender"),
    ("age_over_12", "Age Over 12"),
    ("age_over_14", "Age Over 14"),
    ("age_over_16", "Age Over 16"),
    ("age_over_21", "Age Over 21"),
    ("age_over_65", "Age Over 65"),
    ("age_in_years", "Age in Years"),
    ("age_birth_year", "Birth Year"),
    ("resident_address", "Residential Address"),
    ("resident_city", "City of Residence"),
    ("resident_postal_code", "Postal Code"),
    ("resident_state", "State/Province"),
    ("resident_country", "Country of Residence"),
    ("birth_place", "Place of Birth"),
    ("birth_city", "City of Birth"),
    ("birth_state", "State of Birth"),
    ("birth_country", "Country of Birth"),
    ("family_name_birth", "Family Name at Birth"),
    ("given_name_birth", "Given Name at Birth"),
];

pub const CIN_FIELD_LABELS: &[(&str, &str)] = &[
    ("cin_number", "Numéro CIN"),
    ("nom", "Nom"),
    ("prenom", "Prénom"),
    ("nom_ar", "الاسم العائلي"),
    ("prenom_ar", "الاسم الشخصي"),
    ("date_naissance", "Date de Naissance"),
    ("lieu_naissance", "Lieu de Naissance"),
    ("gouvernorat_naissance", "Gouvernorat de Naissance"),
    ("sexe", "Sexe"),
    ("nationalite", "Nationalité"),
    ("etat_civil", "État Civil"),
    ("nom_pere", "Nom du Père"),
    ("nom_mere", "Nom de la Mère"),
    ("adresse", "Adresse"),
    ("gouvernorat", "Gouvernorat"),
    ("code_postal", "Code Postal"),
    ("date_delivrance", "Date de Délivrance"),
    ("date_expiration", "Date d'Expiration"),
    ("autorite_delivrance", "Autorité de Délivrance"),
];

fn lookup(table: &[(&'static str, &'static str)], path: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, label)| *label)
}

pub fn pid_label(path: &str) -> Option<&'static str> {
    lookup(PID_FIELD_LABELS, path)
}

pub fn cin_label(path: &str) -> Option<&'static str> {
    lookup(CIN_FIELD_LABELS, path)
}

/// Resolve the consent label for a claim of the given credential kind.
///
/// CIN credentials see CIN labels first and PID labels as a fallback; PID
/// credentials see PID labels only. Unknown names label as themselves.
pub fn label_for(kind: CredentialKind, path: &str) -> String {
    let label = match kind {
        CredentialKind::Cin => cin_label(path).or_else(|| pid_label(path)),
        CredentialKind::Pid => pid_label(path),
    };
    label.unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{CIN_MANDATORY_FIELDS, PID_MANDATORY_FIELDS};

    #[test]
    fn test_every_pid_mandatory_field_has_label() {
        for field in PID_MANDATORY_FIELDS {
            assert!(pid_label(field).is_some(), "no label for {}", field);
        }
    }

    #[test]
    fn test_every_cin_mandatory_field_has_label() {
        for field in CIN_MANDATORY_FIELDS {
            assert!(cin_label(field).is_some(), "no label for {}", field);
        }
    }

    #[test]
    fn test_label_for_pid() {
        assert_eq!(label_for(CredentialKind::Pid, "family_name"), "Family Name");
        assert_eq!(label_for(CredentialKind::Pid, "nom"), "nom");
    }

    #[test]
    fn test_label_for_cin_falls_back_to_pid() {
        assert_eq!(label_for(CredentialKind::Cin, "nom"), "Nom");
        assert_eq!(label_for(CredentialKind::Cin, "nom_ar"), "الاسم العائلي");
        assert_eq!(label_for(CredentialKind::Cin, "age_over_18"), "Age Over 18");
    }

    #[test]
    fn test_unknown_field_labels_as_itself() {
        assert_eq!(label_for(CredentialKind::Cin, "shoe_size"), "shoe_size");
    }
}
