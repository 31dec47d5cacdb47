//! `openid4vp://` authorization request parsing and encoding.
//!
//! Only inline parameters are supported; `request_uri` dereferencing is not.

use std::collections::HashMap;

use crate::error::{Oid4vpError, Oid4vpResult};
use crate::types::{AuthorizationRequest, PresentationDefinition, OPENID4VP_SCHEME, VP_TOKEN};

/// Parse an authorization request URI.
///
/// The scheme prefix and a leading `?` are optional. Repeated parameters
/// keep their first value. Empty optional parameters are treated as absent.
pub fn parse_authorization_request(uri: &str) -> Oid4vpResult<AuthorizationRequest> {
    let query = uri.strip_prefix(OPENID4VP_SCHEME).unwrap_or(uri);
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut params: HashMap<String, String> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }

    let get = |name: &str| params.get(name).filter(|v| !v.is_empty()).cloned();
    let require = |name: &'static str| get(name).ok_or(Oid4vpError::MissingParameter(name));

    match params.get("response_type") {
        Some(rt) if rt == VP_TOKEN => {}
        Some(rt) => return Err(Oid4vpError::UnsupportedResponseType(rt.clone())),
        None => return Err(Oid4vpError::UnsupportedResponseType("(none)".into())),
    }

    let client_id = require("client_id")?;
    let nonce = require("nonce")?;
    let definition_raw = require("presentation_definition")?;

    let definition_json: serde_json::Value = serde_json::from_str(&definition_raw)
        .map_err(|_| Oid4vpError::InvalidPresentationDefinition("not valid JSON".into()))?;
    let presentation_definition: PresentationDefinition =
        serde_json::from_value(definition_json).map_err(|e| {
            Oid4vpError::InvalidPresentationDefinition(format!("unexpected shape: {}", e))
        })?;

    tracing::debug!(
        client_id = %client_id,
        definition_id = %presentation_definition.id,
        descriptors = presentation_definition.input_descriptors.len(),
        "parsed authorization request"
    );

    Ok(AuthorizationRequest {
        response_type: VP_TOKEN.to_string(),
        client_id,
        client_id_scheme: get("client_id_scheme"),
        response_mode: get("response_mode"),
        response_uri: get("response_uri"),
        redirect_uri: get("redirect_uri"),
        nonce,
        state: get("state"),
        presentation_definition,
    })
}

impl AuthorizationRequest {
    /// Encode as an `openid4vp://?…` URI with inline parameters.
    pub fn to_uri(&self) -> Oid4vpResult<String> {
        let definition = serde_json::to_string(&self.presentation_definition)
            .map_err(|e| Oid4vpError::Encoding(e.to_string()))?;

        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("response_type", &self.response_type);
        query.append_pair("client_id", &self.client_id);
        let optional = [
            ("client_id_scheme", &self.client_id_scheme),
            ("response_mode", &self.response_mode),
            ("response_uri", &self.response_uri),
            ("redirect_uri", &self.redirect_uri),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                query.append_pair(name, value);
            }
        }
        query.append_pair("nonce", &self.nonce);
        if let Some(state) = &self.state {
            query.append_pair("state", state);
        }
        query.append_pair("presentation_definition", &definition);

        Ok(format!("{}?{}", OPENID4VP_SCHEME, query.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_bank_kyc_request;

    fn uri_without(param: &str) -> String {
        let uri = demo_bank_kyc_request().to_uri().unwrap();
        let query = uri.strip_prefix("openid4vp://?").unwrap();
        let kept: Vec<&str> = query
            .split('&')
            .filter(|kv| !kv.starts_with(&format!("{}=", param)))
            .collect();
        format!("openid4vp://?{}", kept.join("&"))
    }

    #[test]
    fn test_round_trip() {
        let request = demo_bank_kyc_request();
        let parsed = parse_authorization_request(&request.to_uri().unwrap()).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_missing_response_type() {
        let err = parse_authorization_request(&uri_without("response_type")).unwrap_err();
        assert!(err.to_string().contains("response_type"));
    }

    #[test]
    fn test_wrong_response_type() {
        let uri = demo_bank_kyc_request()
            .to_uri()
            .unwrap()
            .replace("response_type=vp_token", "response_type=id_token");
        let err = parse_authorization_request(&uri).unwrap_err();
        assert_eq!(err, Oid4vpError::UnsupportedResponseType("id_token".into()));
        assert!(err.to_string().contains("response_type"));
    }

    #[test]
    fn test_missing_client_id() {
        let err = parse_authorization_request(&uri_without("client_id")).unwrap_err();
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_missing_nonce() {
        let err = parse_authorization_request(&uri_without("nonce")).unwrap_err();
        assert!(err.to_string().contains("nonce"));
    }

    #[test]
    fn test_missing_presentation_definition() {
        let err =
            parse_authorization_request(&uri_without("presentation_definition")).unwrap_err();
        assert_eq!(
            err,
            Oid4vpError::MissingParameter("presentation_definition")
        );
    }

    #[test]
    fn test_presentation_definition_not_json() {
        let uri = "openid4vp://?response_type=vp_token&client_id=c&nonce=n&presentation_definition=%7Bnot-json";
        let err = parse_authorization_request(uri).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_presentation_definition_wrong_shape() {
        let uri = "openid4vp://?response_type=vp_token&client_id=c&nonce=n&presentation_definition=%7B%7D";
        let err = parse_authorization_request(uri).unwrap_err();
        assert!(matches!(err, Oid4vpError::InvalidPresentationDefinition(_)));
    }

    #[test]
    fn test_empty_client_id_is_missing() {
        let uri = "openid4vp://?response_type=vp_token&client_id=&nonce=n&presentation_definition=%7B%7D";
        let err = parse_authorization_request(uri).unwrap_err();
        assert_eq!(err, Oid4vpError::MissingParameter("client_id"));
    }

    #[test]
    fn test_without_scheme_and_first_value_wins() {
        let pd = r#"{"id":"d","input_descriptors":[]}"#;
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("response_type", "vp_token")
            .append_pair("client_id", "first")
            .append_pair("client_id", "second")
            .append_pair("nonce", "n")
            .append_pair("response_mode", "fragment")
            .append_pair("presentation_definition", pd)
            .finish();
        let parsed = parse_authorization_request(&query).unwrap();
        assert_eq!(parsed.client_id, "first");
        assert_eq!(parsed.response_mode.as_deref(), Some("fragment"));
        assert_eq!(parsed.state, None);
        assert!(parsed.presentation_definition.input_descriptors.is_empty());
    }

    #[test]
    fn test_optional_parameters_pass_through() {
        let mut request = demo_bank_kyc_request();
        request.client_id_scheme = Some("redirect_uri".into());
        request.response_uri = Some("https://demo-bank.example.com/cb?x=1&y=2".into());
        request.redirect_uri = Some("https://demo-bank.example.com/done".into());
        let parsed = parse_authorization_request(&request.to_uri().unwrap()).unwrap();
        assert_eq!(parsed.client_id_scheme.as_deref(), Some("redirect_uri"));
        assert_eq!(
            parsed.response_uri.as_deref(),
            Some("https://demo-bank.example.com/cb?x=1&y=2")
        );
        assert_eq!(
            parsed.redirect_uri.as_deref(),
            Some("https://demo-bank.example.com/done")
        );
    }
}
