use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ::config::{ConfigError, Environment};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub app_name: String,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs.max(1))
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Used when `RUST_LOG` is not set.
    pub level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mongo: MongoConfig,
    pub log: LogConfig,
}

impl Config {
    /// Reads `SERVER__*`, `MONGO__*` and `LOG__*` variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        ::config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("mongo.uri", "mongodb://localhost:27017")?
            .set_default("mongo.database", "customers")?
            .set_default("mongo.app_name", "customer-service")?
            .set_default("mongo.connect_timeout_secs", 10)?
            .set_default("mongo.server_selection_timeout_secs", 10)?
            .set_default("log.format", "compact")?
            .set_default("log.level", "info")?
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn server_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse::<SocketAddr>()
    }
}
