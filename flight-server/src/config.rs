//! Process configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/flights.json";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable naming the dataset file.
pub const DATA_PATH_VAR: &str = "FLIGHTS_DATA_PATH";

/// Environment variable naming the listening port.
pub const PORT_VAR: &str = "PORT";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected a port number")]
    InvalidPort(String),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path to the dataset JSON file
    pub data_path: PathBuf,

    /// Address to bind
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    ///
    /// Unset and empty variables both fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let data_path = get(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let port = match get(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            data_path,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port,
        })
    }

    /// The socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}
