use crate::error::Result;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const APP_KEY_HEADER: &str = "ST-App-Key";

/// Body returned by `POST {auth_root}/connect/token`.
///
/// Only `access_token` is required; the rest is informational and never used
/// to cache or refresh the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let lifetime = TimeDelta::try_seconds(self.expires_in?)?;
        issued_at.checked_add_signed(lifetime)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthHeaders {
    /// Raw access token, sent without a `Bearer ` prefix.
    #[serde(rename = "Authorization")]
    pub authorization: String,
    #[serde(rename = "ST-App-Key")]
    pub app_key: String,
}

impl AuthHeaders {
    pub fn to_map(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            (AUTHORIZATION_HEADER, self.authorization.as_str()),
            (APP_KEY_HEADER, self.app_key.as_str()),
        ])
    }

    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&self.authorization)?);
        headers.insert(
            HeaderName::from_static("st-app-key"),
            HeaderValue::from_str(&self.app_key)?,
        );
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn headers() -> AuthHeaders {
        AuthHeaders {
            authorization: "abc123".into(),
            app_key: "ak_1".into(),
        }
    }

    #[test]
    fn test_headers_map() {
        let headers = headers();
        let map = headers.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["Authorization"], "abc123");
        assert_eq!(map["ST-App-Key"], "ak_1");
    }

    #[test]
    fn test_header_map_has_no_bearer_prefix() {
        let map = headers().to_header_map().unwrap();
        assert_eq!(map.get("authorization").unwrap(), "abc123");
        assert_eq!(map.get("st-app-key").unwrap(), "ak_1");
    }

    #[test]
    fn test_header_map_rejects_control_characters() {
        let bad = AuthHeaders {
            authorization: "abc\n123".into(),
            app_key: String::new(),
        };
        assert!(bad.to_header_map().is_err());
    }

    #[test]
    fn test_headers_serialize_with_wire_names() {
        let value = serde_json::to_value(headers()).unwrap();
        assert_eq!(value["Authorization"], "abc123");
        assert_eq!(value["ST-App-Key"], "ak_1");
    }

    #[test]
    fn test_token_response_minimal() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token": "abc123"}"#).unwrap();
        assert_eq!(token.access_token, "abc123");
        assert!(token.token_type.is_none());
        assert!(token.expires_at(Utc::now()).is_none());
    }

    #[test]
    fn test_token_response_expiry() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "abc123", "token_type": "Bearer", "expires_in": 900}"#,
        )
        .unwrap();
        let issued = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 12, 15, 0).unwrap();
        assert_eq!(token.expires_at(issued), Some(expected));
    }

    #[test]
    fn test_token_response_huge_expiry_is_unknown() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "x", "expires_in": 10000000000000}"#,
        )
        .unwrap();
        assert!(token.expires_at(Utc::now()).is_none());

        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "x", "expires_in": 9223372036854775807}"#,
        )
        .unwrap();
        assert!(token.expires_at(Utc::now()).is_none());
    }
}
