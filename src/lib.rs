//! Connection settings and OAuth2 client-credentials tokens for the
//! ServiceTitan REST API.
//!
//! ```no_run
//! use servicetitan_auth::{load_env_vars, ConnectOptions, TokenClient};
//!
//! # async fn run() -> servicetitan_auth::Result<()> {
//! let env = load_env_vars(None)?;
//! let conn = ConnectOptions::new("production").resolve(&env)?;
//! let headers = TokenClient::new()?.auth_headers(&conn).await?;
//! println!("{}", headers.app_key);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod types;

pub use api::TokenClient;
pub use config::{load_env_vars, ApiEnvironment, ConnectOptions, ConnectionConfig, EnvVars};
pub use error::{AuthError, Result};
pub use types::{AuthHeaders, TokenResponse};
