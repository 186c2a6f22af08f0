//! Payment configuration

use std::time::Duration;

/// Default wait for an external QR / transfer confirmation
pub const DEFAULT_VERIFICATION_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    /// Upper bound on how long a submission waits for the verifier
    pub verification_timeout: Duration,
}

impl PaymentConfig {
    /// Load from environment variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | PAYMENT_VERIFICATION_TIMEOUT_MS | 30000 |
    pub fn from_env() -> Self {
        Self {
            verification_timeout: Duration::from_millis(
                std::env::var("PAYMENT_VERIFICATION_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_VERIFICATION_TIMEOUT_MS),
            ),
        }
    }

    pub fn with_verification_timeout(mut self, timeout: Duration) -> Self {
        self.verification_timeout = timeout;
        self
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            verification_timeout: Duration::from_millis(DEFAULT_VERIFICATION_TIMEOUT_MS),
        }
    }
}
