use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::infrastructure::observability::sanitize_upstream_body;

use super::token_provider::{TokenCache, TokenError, TokenProvider};

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Exchanges a long-lived refresh token for short-lived access tokens.
pub struct GoogleTokenProvider {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    cache: TokenCache,
}

impl GoogleTokenProvider {
    pub fn new(
        client: reqwest::Client,
        token_url: Option<String>,
        client_id: String,
        client_secret: String,
        refresh_token: String,
    ) -> Self {
        Self {
            client,
            token_url: token_url.unwrap_or_else(|| GOOGLE_TOKEN_URL.to_string()),
            client_id,
            client_secret,
            refresh_token,
            cache: TokenCache::new(),
        }
    }

    async fn request_token(&self) -> Result<(String, Duration), TokenError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| TokenError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                body: sanitize_upstream_body(&body),
            });
        }

        let token: GoogleTokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        tracing::debug!(expires_in = token.expires_in, "Google Drive access token received");
        Ok((token.access_token, Duration::from_secs(token.expires_in)))
    }
}

#[async_trait]
impl TokenProvider for GoogleTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        self.cache.get_or_fetch(|| self.request_token()).await
    }
}
