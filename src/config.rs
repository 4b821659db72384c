use std::{net::SocketAddr, path::PathBuf};

const BIND_ADDR_KEY: &str = "REWARDS_BIND_ADDR";
const CUSTOMERS_FILE_KEY: &str = "REWARDS_CUSTOMERS_FILE";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// JSON file with the customers to serve
    ///
    /// The built-in sample customers are used when this is `None`.
    pub customers_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of a variable if set
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup(BIND_ADDR_KEY)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| Error::InvalidValue {
                key: BIND_ADDR_KEY,
                value: bind_addr.clone(),
                reason: err.to_string(),
            })?;

        let customers_file = lookup(CUSTOMERS_FILE_KEY)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            customers_file,
        })
    }
}
