//! Connection configuration for the ServiceTitan API.
//!
//! A [`ConnectionConfig`] always carries every recognized key. Values that no
//! source could provide are empty strings, so callers only ever need to check
//! for emptiness, never for absence.

mod environment;
mod resolve;

pub use environment::ApiEnvironment;
pub use resolve::{load_env_vars, ConnectOptions, EnvVars};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const APP_KEY: &str = "SERVICETITAN_APP_KEY";
pub const TENANT_ID: &str = "SERVICETITAN_TENANT_ID";
pub const CLIENT_ID: &str = "SERVICETITAN_CLIENT_ID";
pub const CLIENT_SECRET: &str = "SERVICETITAN_CLIENT_SECRET";
pub const APP_ID: &str = "SERVICETITAN_APP_ID";
pub const TIMEZONE: &str = "SERVICETITAN_TIMEZONE";
pub const API_ENVIRONMENT: &str = "SERVICETITAN_API_ENVIRONMENT";
pub const AUTH_ROOT: &str = "auth_root";
pub const API_ROOT: &str = "api_root";

/// Keys read from a config file or the environment.
pub const AUTH_VARIABLES: [&str; 7] = [
    APP_KEY,
    TENANT_ID,
    CLIENT_ID,
    CLIENT_SECRET,
    APP_ID,
    TIMEZONE,
    API_ENVIRONMENT,
];

/// The credential half of a connection, keyed exactly like the config file
/// and the environment variables.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "SERVICETITAN_APP_KEY", default, deserialize_with = "value_as_string")]
    pub app_key: String,
    #[serde(rename = "SERVICETITAN_TENANT_ID", default, deserialize_with = "value_as_string")]
    pub tenant_id: String,
    #[serde(rename = "SERVICETITAN_CLIENT_ID", default, deserialize_with = "value_as_string")]
    pub client_id: String,
    #[serde(rename = "SERVICETITAN_CLIENT_SECRET", default, deserialize_with = "value_as_string")]
    pub client_secret: String,
    #[serde(rename = "SERVICETITAN_APP_ID", default, deserialize_with = "value_as_string")]
    pub app_id: String,
    #[serde(rename = "SERVICETITAN_TIMEZONE", default, deserialize_with = "value_as_string")]
    pub timezone: String,
    #[serde(rename = "SERVICETITAN_API_ENVIRONMENT", default, deserialize_with = "value_as_string")]
    pub api_environment: String,
}

/// Any JSON value is accepted: `null` becomes `""`, strings are taken as-is
/// and everything else keeps its JSON text (`12345`, `true`).
fn value_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Fully resolved connection settings.
///
/// Serializes to a flat JSON object with the nine recognized keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub auth_root: String,
    pub api_root: String,
}

impl ConnectionConfig {
    pub fn new(credentials: Credentials, environment: ApiEnvironment) -> Self {
        Self {
            credentials,
            auth_root: environment.auth_root_url().to_string(),
            api_root: environment.api_root_url().to_string(),
        }
    }

    pub fn app_key(&self) -> &str {
        &self.credentials.app_key
    }

    pub fn tenant_id(&self) -> &str {
        &self.credentials.tenant_id
    }

    pub fn client_id(&self) -> &str {
        &self.credentials.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.credentials.client_secret
    }

    pub fn auth_root(&self) -> &str {
        &self.auth_root
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Looks up a value by its flat key name.
    pub fn get(&self, key: &str) -> Option<&str> {
        let creds = &self.credentials;
        let value = match key {
            APP_KEY => &creds.app_key,
            TENANT_ID => &creds.tenant_id,
            CLIENT_ID => &creds.client_id,
            CLIENT_SECRET => &creds.client_secret,
            APP_ID => &creds.app_id,
            TIMEZONE => &creds.timezone,
            API_ENVIRONMENT => &creds.api_environment,
            AUTH_ROOT => &self.auth_root,
            API_ROOT => &self.api_root,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Flat key/value view holding all nine keys.
    pub fn to_map(&self) -> BTreeMap<&'static str, &str> {
        AUTH_VARIABLES
            .iter()
            .chain([AUTH_ROOT, API_ROOT].iter())
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
            .collect()
    }
}
