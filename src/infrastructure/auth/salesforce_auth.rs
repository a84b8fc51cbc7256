use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::infrastructure::observability::sanitize_upstream_body;

use super::token_provider::{TokenCache, TokenError, TokenProvider};

/// Client-credentials tokens carry no expiry; reuse them for this long.
const SALESFORCE_TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

#[derive(Deserialize)]
struct SalesforceTokenResponse {
    access_token: String,
}

pub struct SalesforceTokenProvider {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cache: TokenCache,
}

impl SalesforceTokenProvider {
    pub fn new(
        client: reqwest::Client,
        instance_url: &str,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            client,
            token_url: format!("{}/services/oauth2/token", instance_url.trim_end_matches('/')),
            client_id,
            client_secret,
            cache: TokenCache::new(),
        }
    }

    async fn request_token(&self) -> Result<(String, Duration), TokenError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
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

        let token: SalesforceTokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Salesforce access token received");
        Ok((token.access_token, SALESFORCE_TOKEN_LIFETIME))
    }
}

#[async_trait]
impl TokenProvider for SalesforceTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        self.cache.get_or_fetch(|| self.request_token()).await
    }
}
