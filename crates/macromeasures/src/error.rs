use thiserror::Error;

/// Errors returned by the Macromeasures API client.
#[derive(Debug, Error)]
pub enum MacromeasuresError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-2xx status whose body carried no provider error payload.
    #[error("unexpected HTTP status {status} from {context}")]
    UnexpectedStatus { status: u16, context: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with `"error": true` and a message.
    #[error("Macromeasures API error: {0}")]
    Provider(String),

    /// A well-formed response with an empty `labels` object.
    #[error("no users returned")]
    EmptyResult,

    /// A timestamp payload that is not a base-10 integer.
    #[error("malformed timestamp: {0}")]
    TimestampFormat(String),

    /// The configured poll bound ran out before the API reported completion.
    #[error("{context} still incomplete after {attempts} attempts")]
    PollLimitExceeded { context: String, attempts: u32 },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors raised while loading [`crate::ClientConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
