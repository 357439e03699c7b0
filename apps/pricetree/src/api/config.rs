//! # Server Configuration
//!
//! Environment-driven settings for the HTTP server.
//!
//! - `PRICETREE_CORS_ORIGINS`: comma-separated allowed origins, or `*`
//! - `PRICETREE_RATE_LIMIT`: requests per second (default 100, 0 disables)
//! - `PRICETREE_API_KEY`: when set, requests need `Authorization: Bearer <key>`

/// Default rate limit in requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

/// Maximum accepted request body (2 MiB).
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Settings read once at router construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Raw `PRICETREE_CORS_ORIGINS` value; `None` means localhost only.
    pub cors_origins: Option<String>,
    /// Requests per second; `0` disables rate limiting.
    pub rate_limit: u32,
    /// Required bearer key; `None` disables authentication.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cors_origins: None,
            rate_limit: DEFAULT_RATE_LIMIT,
            api_key: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let rate_limit = match lookup("PRICETREE_RATE_LIMIT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "Invalid PRICETREE_RATE_LIMIT, using default of {}",
                    DEFAULT_RATE_LIMIT
                );
                DEFAULT_RATE_LIMIT
            }),
            None => DEFAULT_RATE_LIMIT,
        };

        Self {
            cors_origins: lookup("PRICETREE_CORS_ORIGINS"),
            rate_limit,
            api_key: lookup("PRICETREE_API_KEY").filter(|k| !k.is_empty()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), ServerConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = config_from(&[
            ("PRICETREE_CORS_ORIGINS", "*"),
            ("PRICETREE_RATE_LIMIT", "0"),
            ("PRICETREE_API_KEY", "secret"),
        ]);

        assert_eq!(config.cors_origins.as_deref(), Some("*"));
        assert_eq!(config.rate_limit, 0);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_api_key_disables_auth() {
        assert_eq!(config_from(&[("PRICETREE_API_KEY", "")]).api_key, None);
    }

    #[test]
    fn invalid_rate_limit_falls_back() {
        let config = config_from(&[("PRICETREE_RATE_LIMIT", "fast")]);
        assert_eq!(config.rate_limit, DEFAULT_RATE_LIMIT);
    }
}
