//! Tanit OID4VP
//!
//! Holder side of OpenID for Verifiable Presentations: parse an
//! `openid4vp://` authorization request, find held credentials that satisfy
//! its presentation definition, list the attributes to put in front of the
//! holder, and wrap the resulting VP token in an authorization response.
//!
//! No cryptography happens here. Held credentials are seen only through
//! [`CredentialShape`].

pub mod demo;
pub mod error;
pub mod fields;
pub mod matching;
pub mod request;
pub mod response;
pub mod types;

pub use demo::{
    demo_bank_kyc_request, demo_bank_kyc_request_uri, demo_cin_check_request,
    demo_cin_check_request_uri, DEMO_BANK_CLIENT_ID, DEMO_GOV_CLIENT_ID,
};
pub use error::{Oid4vpError, Oid4vpResult};
pub use fields::extract_requested_fields;
pub use matching::match_credentials;
pub use request::parse_authorization_request;
pub use response::build_authorization_response;
pub use types::*;
