//! Application configuration loaded from environment variables.
//!
//! All runtime knobs come in through the environment (12-factor style) and
//! are read once at process start. The webhook secret is the only value with
//! a readiness contract: an empty secret keeps `/health/ready` unhealthy so
//! orchestration never routes traffic to a verifier that rejects everything.

use envconfig::Envconfig;
use std::sync::LazyLock;

/// Environment-driven application configuration.
///
/// `WEBHOOK_SECRET` is sensitive: never log it, never echo it in responses.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// SQLite connection string, e.g. "sqlite:data/app.db"
    #[envconfig(default = "sqlite:data/app.db")]
    pub database_url: String,

    /// Shared secret for webhook HMAC verification. Empty means not configured.
    #[envconfig(default = "")]
    pub webhook_secret: String,

    /// Log verbosity: "error", "warn", "info", "debug" or "trace"
    #[envconfig(default = "info")]
    pub log_level: String,

    /// Host address for web server binding
    #[envconfig(default = "0.0.0.0")]
    pub http_host: String,

    /// Port for web server binding
    #[envconfig(default = "8080")]
    pub http_port: u16,
}

impl AppConfig {
    /// True when everything required to accept webhook traffic is present.
    pub fn secret_configured(&self) -> bool {
        !self.webhook_secret.is_empty()
    }
}

/// Global application configuration, validated on first access.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
