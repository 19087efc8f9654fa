//! Process configuration from command-line flags and environment.

use std::net::SocketAddr;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors found while validating [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Listen address is not `host:port` (or `:port`)
    #[error("invalid listen address {addr:?}: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// DSN does not name a SQLite database
    #[error("unsupported DSN {0:?}: expected sqlite://path or sqlite::memory:")]
    UnsupportedDsn(String),

    /// Pool must hold at least one connection
    #[error("max connections must be at least 1")]
    ZeroConnections,

    /// Log filter is not valid `RUST_LOG` syntax
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidLogFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
}

/// snippetbox: create and share short text snippets that expire.
#[derive(Debug, Clone, Parser)]
#[command(name = "snippetbox", version, about)]
pub struct Config {
    /// HTTP network address (`host:port`, or `:port` for all interfaces)
    #[arg(long, env = "SNIPPETBOX_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: String,

    /// SQLite data source name
    #[arg(long, env = "SNIPPETBOX_DSN", default_value = "sqlite://snippetbox.db")]
    pub dsn: String,

    /// Upper bound on pooled database connections
    #[arg(long, env = "SNIPPETBOX_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Log filter directives, `RUST_LOG` syntax
    #[arg(long, env = "RUST_LOG", default_value = "info,snippetbox=debug")]
    pub log_filter: String,
}

impl Config {
    /// Check the settings and resolve the listen address.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<SocketAddr, ConfigError> {
        if !self.dsn.starts_with("sqlite:") {
            return Err(ConfigError::UnsupportedDsn(self.dsn.clone()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        self.listen_addr()
    }

    /// Parse `log_filter` into a subscriber filter.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|source| ConfigError::InvalidLogFilter {
            filter: self.log_filter.clone(),
            source,
        })
    }

    fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        // `:3000` means every interface
        let addr = if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        };

        addr.parse().map_err(|source| ConfigError::InvalidAddr {
            addr: self.addr.clone(),
            source,
        })
    }
}
