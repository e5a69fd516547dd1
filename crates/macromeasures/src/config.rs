//! Client settings.
//!
//! [`ClientConfig`] carries every value the client needs beyond the API key
//! and the requests-per-minute hint. Its [`Default`] targets the production
//! API. [`load_settings_from_env`] is an opt-in helper for binaries; the
//! library never reads the environment by itself.

use std::time::Duration;

use crate::error::ConfigError;
use crate::provider::Provider;
use crate::rate_limit::RateLimit;

pub const DEFAULT_BASE_URL: &str = "http://api.macromeasures.com/";
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 60;
pub const MAX_IDLE_CONNECTIONS: usize = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const POLL_INTERVAL_MS: u64 = 100;
/// Requests admitted per provider window.
pub const PROVIDER_BURST: u32 = 100;

/// How a lookup waits for server-side inference to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Total GETs allowed per lookup. `None` polls until the API reports
    /// completion or a request fails.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(POLL_INTERVAL_MS),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_idle_per_host: usize,
    pub user_agent: String,
    pub poll: PollPolicy,
    /// Window for the client-wide budget set by the requests-per-minute hint.
    pub shared_limit_window: Duration,
    pub twitter_limit: RateLimit,
    pub instagram_limit: RateLimit,
}

impl ClientConfig {
    #[must_use]
    pub fn rate_limit(&self, provider: Provider) -> RateLimit {
        match provider {
            Provider::Twitter => self.twitter_limit,
            Provider::Instagram => self.instagram_limit,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(10),
            max_idle_per_host: MAX_IDLE_CONNECTIONS,
            user_agent: concat!("macromeasures-rs/", env!("CARGO_PKG_VERSION")).to_owned(),
            poll: PollPolicy::default(),
            shared_limit_window: Duration::from_secs(60),
            twitter_limit: RateLimit::new(PROVIDER_BURST, Provider::Twitter.default_window()),
            instagram_limit: RateLimit::new(PROVIDER_BURST, Provider::Instagram.default_window()),
        }
    }
}

/// Everything needed to build a [`crate::Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub requests_per_minute: u32,
    pub client: ClientConfig,
}

/// Load settings from environment variables already in the process.
///
/// Callers that want `.env` support should run `dotenvy::dotenv()` first.
///
/// # Errors
///
/// Returns `ConfigError` if `MACROMEASURES_API_KEY` is missing or a value
/// does not parse.
pub fn load_settings_from_env() -> Result<Settings, ConfigError> {
    build_settings(|key| std::env::var(key))
}

/// Build settings using the provided env-var lookup function.
fn build_settings<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    fn invalid(var: &str, reason: impl ToString) -> ConfigError {
        ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: reason.to_string(),
        }
    }

    let parse_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        lookup(var)
            .ok()
            .map(|raw| raw.trim().parse::<u64>().map_err(|e| invalid(var, e)))
            .transpose()
    };

    let api_key = lookup("MACROMEASURES_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar("MACROMEASURES_API_KEY".to_string()))?;

    let requests_per_minute = match parse_u64("MACROMEASURES_REQUESTS_PER_MINUTE")? {
        Some(n) => u32::try_from(n).map_err(|e| invalid("MACROMEASURES_REQUESTS_PER_MINUTE", e))?,
        None => DEFAULT_REQUESTS_PER_MINUTE,
    };

    let mut client = ClientConfig::default();
    if let Ok(base_url) = lookup("MACROMEASURES_BASE_URL") {
        client.base_url = base_url;
    }
    if let Some(secs) = parse_u64("MACROMEASURES_TIMEOUT_SECS")? {
        if secs == 0 {
            return Err(invalid("MACROMEASURES_TIMEOUT_SECS", "must be greater than zero"));
        }
        client.timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = parse_u64("MACROMEASURES_POLL_INTERVAL_MS")? {
        client.poll.interval = Duration::from_millis(ms);
    }
    if let Some(n) = parse_u64("MACROMEASURES_MAX_POLL_ATTEMPTS")? {
        let n = u32::try_from(n).map_err(|e| invalid("MACROMEASURES_MAX_POLL_ATTEMPTS", e))?;
        client.poll.max_attempts = (n > 0).then_some(n);
    }

    Ok(Settings {
        api_key,
        requests_per_minute,
        client,
    })
}
