//! Client for the Macromeasures social-profile enrichment API.
//!
//! Looks up accounts on the microblogging (`twitter`) and photo-sharing
//! (`instagram`) providers and returns the inferred gender, location,
//! languages, interests, posting devices and account type.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod provider;
pub mod rate_limit;
pub mod time;
pub mod types;
pub mod users;

pub use client::Client;
pub use config::{load_settings_from_env, ClientConfig, PollPolicy, Settings};
pub use endpoint::{LookupKey, ProviderEndpoint};
pub use error::{ConfigError, MacromeasuresError};
pub use provider::Provider;
pub use rate_limit::RateLimit;
pub use time::{parse_unix_timestamp, Timestamp};
pub use types::{
    AccountType, Device, Gender, Interest, InterestEntry, Interests, Language, Location,
    MacroUser, Place, Platform, Region, Tongue, User, UserResponse,
};
