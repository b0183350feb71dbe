//! Time-boxed bearer-token cache
//!
//! Keyed by provider/credential so multiple upstream identities can coexist.
//! The slot map is guarded by an async mutex held across the refresh, which
//! serializes concurrent callers hitting an expired window: exactly one
//! exchange runs, the rest reuse its result.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::AppResult;

struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Keyed store of short-lived bearer tokens
#[derive(Default)]
pub struct TokenCache {
    slots: Mutex<HashMap<String, CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token for `key` while unexpired; otherwise run
    /// `refresh`, cache its result for `ttl`, and return it.
    ///
    /// A failed refresh leaves the slot empty so the next caller retries.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        refresh: F,
    ) -> AppResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<String>>,
    {
        let mut slots = self.slots.lock().await;

        if let Some(cached) = slots.get(key) {
            if !cached.is_expired() {
                return Ok(cached.token.clone());
            }
            slots.remove(key);
        }

        debug!(key = %key, "Refreshing cached token");
        let token = refresh().await?;
        slots.insert(
            key.to_string(),
            CachedToken {
                token: token.clone(),
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(token)
    }
}
