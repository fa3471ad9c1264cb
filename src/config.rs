//! Environment-driven configuration.
//!
//! API keys and the webhook URL come from the environment (optionally seeded
//! from a `.env` file by the binary). Timeouts can be tuned the same way.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Default timeout for AI completion requests.
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// Default timeout for webhook delivery.
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the AI request timeout (seconds).
pub const AI_TIMEOUT_ENV_VAR: &str = "CHANGELOG_AI_TIMEOUT";

/// Environment variable overriding the webhook timeout (seconds).
pub const WEBHOOK_TIMEOUT_ENV_VAR: &str = "CHANGELOG_AI_WEBHOOK_TIMEOUT";

/// Environment variable overriding the provider's default model.
pub const MODEL_ENV_VAR: &str = "CHANGELOG_AI_MODEL";

/// Environment variable holding the WeCom webhook URL.
pub const WEBHOOK_URL_ENV_VAR: &str = "WECOM_WEBHOOK_URL";

/// Read a timeout in seconds from `var`, falling back to `default_secs`.
///
/// Logs a warning if the variable is set but contains an invalid value
/// (non-numeric or negative). An empty value is treated as unset.
pub fn timeout_from_env(var: &str, default_secs: u64) -> Duration {
    match env::var(var) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    var, v, default_secs
                );
                Duration::from_secs(default_secs)
            }
        },
        _ => Duration::from_secs(default_secs),
    }
}

/// Timeout applied to AI completion requests.
pub fn ai_timeout() -> Duration {
    timeout_from_env(AI_TIMEOUT_ENV_VAR, DEFAULT_AI_TIMEOUT_SECS)
}

/// Timeout applied to webhook delivery.
pub fn webhook_timeout() -> Duration {
    timeout_from_env(WEBHOOK_TIMEOUT_ENV_VAR, DEFAULT_WEBHOOK_TIMEOUT_SECS)
}

/// Read a non-empty environment variable.
pub fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}
