use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Supplies bearer tokens for a remote store.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, TokenError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token request failed: {0}")]
    RequestFailed(String),
    #[error("token endpoint rejected credentials ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("token response invalid: {0}")]
    InvalidResponse(String),
}

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// One cached token, shared by every caller of a provider.
pub(super) struct TokenCache {
    slot: Mutex<Option<(String, Instant)>>,
}

impl TokenCache {
    pub(super) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached token or runs `fetch` to obtain a new one. The lock
    /// is held across the fetch so concurrent callers share one request.
    pub(super) async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String, TokenError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, Duration), TokenError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some((token, expires_at)) = slot.as_ref() {
            if Instant::now() < *expires_at {
                return Ok(token.clone());
            }
        }

        let (token, lifetime) = fetch().await?;
        let expires_at = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);
        *slot = Some((token.clone(), expires_at));
        Ok(token)
    }
}
