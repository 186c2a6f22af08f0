//! Client configuration

use std::time::Duration;

/// Connection settings for the workshop REST backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Load from environment variables (a `.env` file is honoured)
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | WORKSHOP_API_URL | http://localhost:5000/api |
    /// | WORKSHOP_API_TOKEN | - |
    /// | WORKSHOP_API_TIMEOUT_SECS | 30 |
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        let mut config = Self::new(
            std::env::var("WORKSHOP_API_URL").unwrap_or_else(|_| "http://localhost:5000/api".into()),
        );
        config.token = std::env::var("WORKSHOP_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        config.timeout = std::env::var("WORKSHOP_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}
