//! Application settings read from the environment.
//!
//! Values come from process environment variables, usually populated from a `.env`
//! file by `dotenvy` in `main`. Every setting has a default so the service starts with
//! an empty environment.

use crate::{
    config::database::get_database_url,
    core::policy::{DEFAULT_MIN_PERCENTAGE, validate_threshold},
    errors::{Error, Result},
};
use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};
use tracing::{info, warn};

/// Address the HTTP API binds to by default
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
/// Seed file location by default
pub const DEFAULT_SEED_PATH: &str = "config.toml";

/// Runtime configuration for the API server and bot
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string
    pub database_url: String,
    /// Socket address for the HTTP API
    pub bind_address: SocketAddr,
    /// Threshold applied to users without stored settings
    pub default_min_percentage: u8,
    /// Path of the optional seed file
    pub seed_path: PathBuf,
    /// Discord token; the bot only starts when this is set
    pub discord_token: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let bind_address = try_load("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?;

        let raw_threshold: f64 =
            try_load("DEFAULT_MIN_PERCENTAGE", &DEFAULT_MIN_PERCENTAGE.to_string())?;
        let default_min_percentage =
            validate_threshold(raw_threshold).map_err(|e| Error::Config {
                message: format!("Invalid DEFAULT_MIN_PERCENTAGE: {e}"),
            })?;

        let seed_path = PathBuf::from(
            env::var("SEED_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_SEED_PATH.to_string()),
        );

        let discord_token = env::var("DISCORD_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        if discord_token.is_none() {
            info!("DISCORD_BOT_TOKEN not set, the Discord bot will not start");
        }

        Ok(Self {
            database_url: get_database_url(),
            bind_address,
            default_min_percentage,
            seed_path,
            discord_token,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        Error::Config {
            message: format!("Invalid {key} value '{raw}': {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_try_load_uses_default_when_unset() {
        let port: u16 = try_load("ATTENDANCE_BUDDY_TEST_UNSET_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_try_load_rejects_unparseable_default() {
        let result: Result<u16> = try_load("ATTENDANCE_BUDDY_TEST_UNSET_OTHER", "not-a-port");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_default_bind_address_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDRESS.parse().unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
