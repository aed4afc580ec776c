//! Runtime configuration.
//!
//! Defaults suit a local storefront API (`json-server` on port 3333). Each
//! field can be overridden from the environment:
//!
//! | Variable                    | Field             | Default                  |
//! |-----------------------------|-------------------|--------------------------|
//! | `CART_API_URL`              | `api_url`         | `http://localhost:3333`  |
//! | `CART_STORAGE_DIR`          | `storage_dir`     | `.cart`                  |
//! | `CART_STORAGE_KEY`          | `storage_key`     | `@RocketShoes:cart`      |
//! | `CART_MAILBOX_SIZE`         | `mailbox_size`    | `32`                     |
//! | `CART_REQUEST_TIMEOUT_SECS` | `request_timeout` | `10`                     |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::storage::CART_STORAGE_KEY;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Settings for a [`CartSystem`](super::CartSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Base URL of the catalog and stock API.
    pub api_url: String,
    /// Directory holding the persisted snapshot.
    pub storage_dir: PathBuf,
    /// Key of the persisted snapshot.
    pub storage_key: String,
    /// How many requests may queue up in the cart actor's mailbox.
    pub mailbox_size: usize,
    /// Timeout applied to every API request.
    pub request_timeout: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3333".to_string(),
            storage_dir: PathBuf::from(".cart"),
            storage_key: CART_STORAGE_KEY.to_string(),
            mailbox_size: 32,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl CartConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("CART_API_URL") {
            config.api_url = url;
        }
        if let Some(dir) = lookup("CART_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup("CART_STORAGE_KEY") {
            config.storage_key = key;
        }
        if let Some(size) = parse::<usize>(&lookup, "CART_MAILBOX_SIZE")? {
            if size == 0 {
                return Err(ConfigError::Invalid {
                    var: "CART_MAILBOX_SIZE",
                    value: size.to_string(),
                });
            }
            config.mailbox_size = size;
        }
        if let Some(secs) = parse::<u64>(&lookup, "CART_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value })
        })
        .transpose()
}
