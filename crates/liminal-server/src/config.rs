//! Application configuration

use std::env;

use liminal_core::{CoreError, DelayRange, TableVariant};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the responder listens on
    pub port: u16,

    /// Lower inclusive bound of the response delay in milliseconds
    pub delay_min_ms: u64,

    /// Upper inclusive bound of the response delay in milliseconds
    pub delay_max_ms: u64,

    /// Which status table the responder samples from
    pub variant: TableVariant,

    /// Attach permissive CORS headers and answer OPTIONS immediately
    pub cors_enabled: bool,

    /// Fixed RNG seed for reproducible runs; entropy-seeded when unset
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("LIMINAL_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),

            delay_min_ms: env::var("LIMINAL_DELAY_MIN_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DelayRange::DEFAULT_MIN_MS),

            delay_max_ms: env::var("LIMINAL_DELAY_MAX_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DelayRange::DEFAULT_MAX_MS),

            variant: env::var("LIMINAL_STATUS_VARIANT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(TableVariant::Canonical),

            cors_enabled: env::var("LIMINAL_CORS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),

            rng_seed: env::var("LIMINAL_RNG_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Validated delay range for the configured bounds
    pub fn delay_range(&self) -> Result<DelayRange, CoreError> {
        DelayRange::from_millis(self.delay_min_ms, self.delay_max_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
