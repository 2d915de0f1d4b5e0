//! HTTP cloud availability checker
//!
//! Live implementation of `CloudAvailabilityPort` against the Tidebook sync
//! service. Every request carries its own timeout and every failure
//! (transport, status, decode) is coerced to `false`; the gate must degrade
//! to local onboarding instead of surfacing a remote error.
//!
//! The account verdict is cached for the lifetime of the checker (or until
//! `invalidate_cache`), so the several features that consult it do not
//! re-query the service. The data-existence check is never cached; the gate
//! always re-verifies it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use tb_core::ports::CloudAvailabilityPort;

/// Endpoint configuration for the sync service.
#[derive(Debug, Clone)]
pub struct CloudEndpointConfig {
    /// Base URL, e.g. `https://sync.tidebook.app`.
    pub base_url: String,
    /// Bearer token for the account session, when one exists.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl CloudEndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            request_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountStatusResponse {
    available: bool,
}

#[derive(Debug, Deserialize)]
struct RecordsExistResponse {
    exists: bool,
}

pub struct HttpCloudAvailability {
    client: reqwest::Client,
    config: CloudEndpointConfig,
    cached_account: Mutex<Option<bool>>,
}

impl HttpCloudAvailability {
    pub fn new(config: CloudEndpointConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            cached_account: Mutex::new(None),
        })
    }

    /// Drops the cached account verdict so the next check re-queries the
    /// service (used when the account session changes).
    pub async fn invalidate_cache(&self) {
        *self.cached_account.lock().await = None;
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut req = self.client.get(url);
        if let Some(token) = &self.config.api_token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn fetch_account_status(&self) -> anyhow::Result<bool> {
        let response = self
            .request("/v1/account/status")
            .send()
            .await?
            .error_for_status()?;
        let status: AccountStatusResponse = response.json().await?;
        Ok(status.available)
    }

    async fn fetch_records_exist(&self) -> anyhow::Result<bool> {
        let response = self
            .request("/v1/records/exists")
            .send()
            .await?
            .error_for_status()?;
        let body: RecordsExistResponse = response.json().await?;
        Ok(body.exists)
    }
}

#[async_trait]
impl CloudAvailabilityPort for HttpCloudAvailability {
    async fn account_available(&self) -> bool {
        let mut cached = self.cached_account.lock().await;
        if let Some(available) = *cached {
            debug!(available, "account availability served from cache");
            return available;
        }

        let available = match self.fetch_account_status().await {
            Ok(available) => available,
            Err(err) => {
                warn!(error = %err, "account status check failed");
                false
            }
        };
        *cached = Some(available);
        available
    }

    async fn cloud_data_exists(&self) -> bool {
        match self.fetch_records_exist().await {
            Ok(exists) => exists,
            Err(err) => {
                warn!(error = %err, "remote data existence check failed");
                false
            }
        }
    }
}
