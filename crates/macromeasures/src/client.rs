//! Entry point for the Macromeasures enrichment API.
//!
//! [`Client`] owns the shared `reqwest` connection pool and hands out one
//! [`ProviderEndpoint`] per provider. Endpoints clone the pool handle, so a
//! single client serves any number of concurrent lookups.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use crate::config::{ClientConfig, Settings};
use crate::endpoint::ProviderEndpoint;
use crate::error::MacromeasuresError;
use crate::provider::Provider;
use crate::rate_limit::{RateLimit, Throttle};

#[derive(Clone)]
pub struct Client {
    api_key: String,
    requests_per_minute: u32,
    base_url: Url,
    twitter: ProviderEndpoint,
    instagram: ProviderEndpoint,
}

impl Client {
    /// Creates a client for the production API.
    ///
    /// `requests_per_minute` caps the combined request rate of both
    /// endpoints on top of their per-provider budgets; `0` leaves only the
    /// per-provider budgets in place. The budget is counted over
    /// [`ClientConfig::shared_limit_window`], one minute by default.
    ///
    /// # Errors
    ///
    /// Returns [`MacromeasuresError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(api_key: &str, requests_per_minute: u32) -> Result<Self, MacromeasuresError> {
        Self::with_config(api_key, requests_per_minute, ClientConfig::default())
    }

    /// Creates a client with explicit settings (for tests with wiremock, or
    /// a non-default poll bound).
    ///
    /// # Errors
    ///
    /// Returns [`MacromeasuresError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed, or
    /// [`MacromeasuresError::InvalidBaseUrl`] if `config.base_url` is not an
    /// absolute URL.
    pub fn with_config(
        api_key: &str,
        requests_per_minute: u32,
        config: ClientConfig,
    ) -> Result<Self, MacromeasuresError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent.as_str())
            .build()?;

        // Provider paths are joined onto the base, which therefore has to end
        // in exactly one slash.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            MacromeasuresError::InvalidBaseUrl(format!("'{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MacromeasuresError::InvalidBaseUrl(format!(
                "'{}' cannot carry a path",
                config.base_url
            )));
        }

        let shared_limit = RateLimit::new(requests_per_minute, config.shared_limit_window);
        let shared = Throttle::new("client", shared_limit).map(Arc::new);
        let endpoint = |provider| {
            ProviderEndpoint::new(
                provider,
                api_key,
                http.clone(),
                &base_url,
                &config,
                shared.clone(),
            )
        };
        let twitter = endpoint(Provider::Twitter)?;
        let instagram = endpoint(Provider::Instagram)?;

        tracing::debug!(
            base_url = %base_url,
            requests_per_minute,
            "Macromeasures client ready"
        );

        Ok(Self {
            api_key: api_key.to_owned(),
            requests_per_minute,
            base_url,
            twitter,
            instagram,
        })
    }

    /// Creates a client from [`Settings`], typically loaded with
    /// [`crate::load_settings_from_env`].
    ///
    /// # Errors
    ///
    /// Same as [`Client::with_config`].
    pub fn from_settings(settings: Settings) -> Result<Self, MacromeasuresError> {
        Self::with_config(&settings.api_key, settings.requests_per_minute, settings.client)
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lookups on the microblogging provider.
    #[must_use]
    pub fn twitter(&self) -> &ProviderEndpoint {
        &self.twitter
    }

    /// Lookups on the photo-sharing provider.
    #[must_use]
    pub fn instagram(&self) -> &ProviderEndpoint {
        &self.instagram
    }

    #[must_use]
    pub fn endpoint(&self, provider: Provider) -> &ProviderEndpoint {
        match provider {
            Provider::Twitter => &self.twitter,
            Provider::Instagram => &self.instagram,
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("requests_per_minute", &self.requests_per_minute)
            .field("twitter", &self.twitter)
            .field("instagram", &self.instagram)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
