use crate::config::{
    ApiEnvironment, ConnectionConfig, Credentials, API_ENVIRONMENT, APP_ID, APP_KEY,
    CLIENT_ID, CLIENT_SECRET, TENANT_ID, TIMEZONE,
};
use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DEFAULT_TIMEZONE: &str = "UTC";

/// Snapshot of environment variables handed to the resolver.
pub type EnvVars = HashMap<String, String>;

/// Reads `.env` entries and the process environment into an [`EnvVars`].
///
/// Process variables win over `.env` entries. Without an explicit path a
/// missing `.env` file is not an error.
pub fn load_env_vars(env_file: Option<&Path>) -> Result<EnvVars> {
    let mut vars = EnvVars::new();

    let entries = match env_file {
        Some(path) => Some(dotenvy::from_path_iter(path)?),
        None => dotenvy::dotenv_iter().ok(),
    };
    if let Some(entries) = entries {
        for entry in entries {
            let (key, value) = entry?;
            vars.insert(key, value);
        }
    }

    vars.extend(std::env::vars());
    Ok(vars)
}

/// Inputs to connection resolution.
///
/// Resolution picks exactly one source:
///
/// 1. a config file, when a non-empty path is set; explicit credentials are ignored
///    entirely in this case,
/// 2. the environment, when any of the environment selector, app key, tenant
///    id, client id or client secret is missing or empty,
/// 3. the explicit values otherwise.
///
/// The base URLs always follow the explicit environment selector.
#[derive(Debug, Default, Clone)]
pub struct ConnectOptions {
    pub api_environment: Option<String>,
    pub app_key: Option<String>,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub app_id: Option<String>,
    pub timezone: Option<String>,
    pub config_file: Option<PathBuf>,
}

impl ConnectOptions {
    pub fn new(api_environment: impl Into<String>) -> Self {
        Self {
            api_environment: Some(api_environment.into()),
            ..Self::default()
        }
    }

    pub fn app_key(mut self, value: impl Into<String>) -> Self {
        self.app_key = Some(value.into());
        self
    }

    pub fn tenant_id(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = Some(value.into());
        self
    }

    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(value.into());
        self
    }

    pub fn app_id(mut self, value: impl Into<String>) -> Self {
        self.app_id = Some(value.into());
        self
    }

    pub fn timezone(mut self, value: impl Into<String>) -> Self {
        self.timezone = Some(value.into());
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn environment(&self) -> ApiEnvironment {
        ApiEnvironment::from_selector(self.api_environment.as_deref().unwrap_or_default())
    }

    pub fn resolve(&self, env: &EnvVars) -> Result<ConnectionConfig> {
        let config_file = self
            .config_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty());

        let credentials = if let Some(path) = config_file {
            info!(path = %path.display(), "Setting auth config from file...");
            credentials_from_file(path)?
        } else if self.missing_core_field() {
            info!("Auth config not provided, loading from environment variables...");
            credentials_from_env(env)
        } else {
            debug!("Using explicitly provided auth config");
            self.explicit_credentials()
        };

        Ok(ConnectionConfig::new(credentials, self.environment()))
    }

    fn missing_core_field(&self) -> bool {
        [
            &self.api_environment,
            &self.app_key,
            &self.tenant_id,
            &self.client_id,
            &self.client_secret,
        ]
        .into_iter()
        .any(|value| value.as_deref().is_none_or(str::is_empty))
    }

    fn explicit_credentials(&self) -> Credentials {
        Credentials {
            app_key: self.app_key.clone().unwrap_or_default(),
            tenant_id: self.tenant_id.clone().unwrap_or_default(),
            client_id: self.client_id.clone().unwrap_or_default(),
            client_secret: self.client_secret.clone().unwrap_or_default(),
            app_id: self.app_id.clone().unwrap_or_default(),
            timezone: self
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            api_environment: self.api_environment.clone().unwrap_or_default(),
        }
    }
}

fn credentials_from_file(path: &Path) -> Result<Credentials> {
    let contents = std::fs::read_to_string(path)?;
    let credentials: Credentials = serde_json::from_str(&contents)?;
    Ok(credentials)
}

fn credentials_from_env(env: &EnvVars) -> Credentials {
    let lookup = |name: &str| match env.get(name).filter(|value| !value.is_empty()) {
        Some(value) => value.clone(),
        None => {
            warn!("Environment variable {name} not found or provided in function. Defaulting to empty string.");
            String::new()
        }
    };

    Credentials {
        app_key: lookup(APP_KEY),
        tenant_id: lookup(TENANT_ID),
        client_id: lookup(CLIENT_ID),
        client_secret: lookup(CLIENT_SECRET),
        app_id: lookup(APP_ID),
        timezone: lookup(TIMEZONE),
        api_environment: lookup(API_ENVIRONMENT),
    }
}
