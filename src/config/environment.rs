use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const PRODUCTION_AUTH_ROOT: &str = "https://auth.servicetitan.io";
const PRODUCTION_API_ROOT: &str = "https://api.servicetitan.io";
const INTEGRATION_AUTH_ROOT: &str = "https://auth-integration.servicetitan.io";
const INTEGRATION_API_ROOT: &str = "https://api-integration.servicetitan.io";

/// Target ServiceTitan deployment.
///
/// Only the exact selector `"production"` picks [`ApiEnvironment::Production`];
/// every other string, the empty one included, lands on
/// [`ApiEnvironment::Integration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    Production,
    #[default]
    Integration,
}

impl ApiEnvironment {
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "production" => ApiEnvironment::Production,
            _ => ApiEnvironment::Integration,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ApiEnvironment::Production => "production",
            ApiEnvironment::Integration => "integration",
        }
    }

    pub const fn auth_root_url(self) -> &'static str {
        match self {
            ApiEnvironment::Production => PRODUCTION_AUTH_ROOT,
            ApiEnvironment::Integration => INTEGRATION_AUTH_ROOT,
        }
    }

    pub const fn api_root_url(self) -> &'static str {
        match self {
            ApiEnvironment::Production => PRODUCTION_API_ROOT,
            ApiEnvironment::Integration => INTEGRATION_API_ROOT,
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_selector(s))
    }
}

impl Serialize for ApiEnvironment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiEnvironment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let selector = String::deserialize(deserializer)?;
        Ok(Self::from_selector(&selector))
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
