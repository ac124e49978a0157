//! JWT configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC secret used to sign tokens
//! - `JWT_ACCESS_EXPIRY`: token lifetime in seconds (default: 1800)

use crate::{env_lookup, parse_or};

const DEV_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            access_token_expiry: 1800, // 30 minutes
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            secret: lookup("JWT_SECRET").unwrap_or(defaults.secret),
            access_token_expiry: parse_or(
                &lookup,
                "JWT_ACCESS_EXPIRY",
                defaults.access_token_expiry,
            ),
        }
    }

    /// True when the secret is still the development placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lookup_from;

    #[test]
    fn test_defaults_when_unset() {
        let config = JwtConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, JwtConfig::default());
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_reads_values() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ACCESS_EXPIRY", "60"),
        ]));
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.access_token_expiry, 60);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn test_unparsable_expiry_falls_back() {
        let config = JwtConfig::from_lookup(lookup_from(&[("JWT_ACCESS_EXPIRY", "soon")]));
        assert_eq!(config.access_token_expiry, 1800);
    }
}
