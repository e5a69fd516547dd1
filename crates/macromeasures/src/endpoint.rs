//! Per-provider lookups against `/{provider}/users.json`.
//!
//! A lookup is a poll loop: the API answers immediately but keeps
//! `"complete": false` while inference is still running, so the same GET is
//! re-issued every [`PollPolicy::interval`] until the response completes.
//! Every GET passes through the endpoint's rate limiter first.

use std::fmt;
use std::sync::Arc;

use reqwest::{Client, Url};

use crate::config::{ClientConfig, PollPolicy};
use crate::error::MacromeasuresError;
use crate::provider::Provider;
use crate::rate_limit::Throttle;
use crate::types::UserResponse;

/// Which identifier a lookup is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
    Usernames,
    /// Numeric platform user IDs.
    Ids,
}

impl LookupKey {
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            LookupKey::Usernames => "usernames",
            LookupKey::Ids => "ids",
        }
    }
}

/// Lookups for one provider. Obtained from [`crate::Client`].
#[derive(Clone)]
pub struct ProviderEndpoint {
    provider: Provider,
    api_key: String,
    http: Client,
    users_url: Url,
    poll: PollPolicy,
    throttle: Option<Arc<Throttle>>,
    shared_throttle: Option<Arc<Throttle>>,
}

impl ProviderEndpoint {
    pub(crate) fn new(
        provider: Provider,
        api_key: &str,
        http: Client,
        base_url: &Url,
        config: &ClientConfig,
        shared_throttle: Option<Arc<Throttle>>,
    ) -> Result<Self, MacromeasuresError> {
        let users_url = base_url
            .join(&format!("{provider}/users.json"))
            .map_err(|e| MacromeasuresError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        Ok(Self {
            provider,
            api_key: api_key.to_owned(),
            http,
            users_url,
            poll: config.poll,
            throttle: Throttle::new(provider.as_str(), config.rate_limit(provider)).map(Arc::new),
            shared_throttle,
        })
    }

    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Looks up one account by its username.
    ///
    /// # Errors
    ///
    /// - [`MacromeasuresError::Http`] on network failure or timeout.
    /// - [`MacromeasuresError::UnexpectedStatus`] on a non-2xx status without
    ///   a provider error body.
    /// - [`MacromeasuresError::Deserialize`] if the body does not decode.
    /// - [`MacromeasuresError::PollLimitExceeded`] if a poll bound is
    ///   configured and runs out.
    pub async fn by_username(&self, username: &str) -> Result<UserResponse, MacromeasuresError> {
        self.lookup(LookupKey::Usernames, &[username]).await
    }

    /// Looks up one account by its numeric platform ID.
    ///
    /// A value that is not a valid ID comes back as a label with
    /// `valid == false`, not as an error.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderEndpoint::by_username`].
    pub async fn by_platform_id(&self, id: &str) -> Result<UserResponse, MacromeasuresError> {
        self.lookup(LookupKey::Ids, &[id]).await
    }

    /// Looks up several accounts by username in a single request.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderEndpoint::by_username`].
    pub async fn by_usernames(
        &self,
        usernames: &[&str],
    ) -> Result<UserResponse, MacromeasuresError> {
        self.lookup(LookupKey::Usernames, usernames).await
    }

    /// Looks up several accounts by platform ID in a single request.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderEndpoint::by_username`].
    pub async fn by_platform_ids(
        &self,
        ids: &[&str],
    ) -> Result<UserResponse, MacromeasuresError> {
        self.lookup(LookupKey::Ids, ids).await
    }

    /// Runs the poll loop until the API reports completion.
    ///
    /// A response carrying `"error": true` ends the loop as well; it will
    /// never complete and [`UserResponse::to_users`] surfaces its message.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderEndpoint::by_username`].
    pub async fn lookup(
        &self,
        key: LookupKey,
        values: &[&str],
    ) -> Result<UserResponse, MacromeasuresError> {
        let url = self.build_url(key, values);
        let context = format!(
            "{}/users.json({}={})",
            self.provider,
            key.param(),
            values.join(",")
        );

        let mut attempt = 0u32;
        loop {
            attempt = attempt.saturating_add(1);
            let response = self.fetch(&url, &context).await?;
            if response.complete || response.error {
                tracing::debug!(
                    provider = %self.provider,
                    attempt,
                    error = response.error,
                    labels = response.labels.len(),
                    "lookup finished"
                );
                return Ok(response);
            }
            if self.poll.max_attempts.is_some_and(|max| attempt >= max) {
                return Err(MacromeasuresError::PollLimitExceeded {
                    context,
                    attempts: attempt,
                });
            }
            tracing::debug!(
                provider = %self.provider,
                attempt,
                interval = ?self.poll.interval,
                "lookup incomplete, polling again"
            );
            tokio::time::sleep(self.poll.interval).await;
        }
    }

    /// Builds the lookup URL with percent-encoded query parameters. Multiple
    /// values are comma-joined into one parameter.
    fn build_url(&self, key: LookupKey, values: &[&str]) -> Url {
        let mut url = self.users_url.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair(key.param(), &values.join(","));
        url
    }

    /// Sends one rate-limited GET and decodes the body.
    ///
    /// Transport errors are stripped of the URL so the API key never ends up
    /// in an error message.
    async fn fetch(&self, url: &Url, context: &str) -> Result<UserResponse, MacromeasuresError> {
        if let Some(throttle) = &self.throttle {
            throttle.acquire().await;
        }
        if let Some(throttle) = &self.shared_throttle {
            throttle.acquire().await;
        }

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            // Key and quota failures still carry the JSON error envelope.
            if let Ok(parsed) = serde_json::from_str::<UserResponse>(&body) {
                if parsed.error {
                    tracing::warn!(
                        status = status.as_u16(),
                        context,
                        message = %parsed.error_message,
                        "Macromeasures reported an error"
                    );
                    return Ok(parsed);
                }
            }
            tracing::warn!(status = status.as_u16(), context, "unexpected HTTP status");
            return Err(MacromeasuresError::UnexpectedStatus {
                status: status.as_u16(),
                context: context.to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| MacromeasuresError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

impl fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("provider", &self.provider)
            .field("poll", &self.poll)
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod tests;
