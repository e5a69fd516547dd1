use std::fmt;
use std::time::Duration;

/// The social platforms the enrichment API covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Microblogging platform.
    Twitter,
    /// Photo-sharing platform.
    Instagram,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Twitter, Provider::Instagram];

    /// Path segment used in `/{provider}/users.json`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Twitter => "twitter",
            Provider::Instagram => "instagram",
        }
    }

    /// Window over which the API admits one burst of requests for this
    /// provider.
    #[must_use]
    pub fn default_window(self) -> Duration {
        match self {
            Provider::Twitter => Duration::from_secs(10),
            Provider::Instagram => Duration::from_secs(20),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
