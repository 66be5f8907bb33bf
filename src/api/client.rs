use crate::config::ConnectionConfig;
use crate::error::{AuthError, Result};
use crate::types::{AuthHeaders, TokenResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

const TOKEN_PATH: &str = "/connect/token";
const GRANT_TYPE: &str = "client_credentials";

/// Exchanges client credentials for access tokens.
///
/// Nothing is cached: every call performs its own round trip to the token
/// endpoint, and failures are returned as-is without retrying.
pub struct TokenClient {
    client: Client,
}

impl TokenClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(AuthError::Network)?;
        Ok(Self { client })
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AuthError::Network)?;
        Ok(Self { client })
    }

    pub async fn request_token(
        &self,
        auth_root: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        let url = format!("{}{}", auth_root.trim_end_matches('/'), TOKEN_PATH);
        debug!(%url, "Requesting auth token");

        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Error fetching auth token");
            return Err(AuthError::HttpStatus { status });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token)
    }

    pub async fn auth_token(&self, conn: &ConnectionConfig) -> Result<String> {
        let token = self
            .request_token(conn.auth_root(), conn.client_id(), conn.client_secret())
            .await?;
        Ok(token.access_token)
    }

    pub async fn auth_headers(&self, conn: &ConnectionConfig) -> Result<AuthHeaders> {
        let authorization = self.auth_token(conn).await?;
        Ok(AuthHeaders {
            authorization,
            app_key: conn.app_key().to_string(),
        })
    }
}
