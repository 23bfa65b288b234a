use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

use crate::gateway::ServerConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    pub gateway: GatewayConfig,
    pub orders: OrdersConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "order_mesh.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the orders backend; only scheme/authority are used
    pub orders_url: String,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_pool_idle_timeout_secs")]
    pub pool_idle_timeout_secs: u64,
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_write_timeout_secs() -> u64 {
    90
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_pool_idle_timeout_secs() -> u64 {
    90
}

fn default_pool_max_idle_per_host() -> usize {
    32
}

impl GatewayConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Build the immutable forwarding config with a pooled outbound client.
    ///
    /// Redirects are not followed: a 3xx from the backend is relayed to the
    /// client like any other status. The write timeout bounds one whole
    /// backend exchange, body included.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.write_timeout())
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .pool_idle_timeout(Duration::from_secs(self.pool_idle_timeout_secs))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(ServerConfig::new(self.orders_url.clone(), client))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrdersConfig {
    pub host: String,
    pub port: u16,
    /// PostgreSQL DSN; the in-memory store is used when absent
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Webhook receiving order-created events; events are only logged when absent
    #[serde(default)]
    pub events_url: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub events_connect_timeout_secs: u64,
    #[serde(default = "default_events_timeout_secs")]
    pub events_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_events_timeout_secs() -> u64 {
    10
}

impl OrdersConfig {
    /// Client for event delivery. The total timeout bounds one publish, so a
    /// stalled receiver fails `create_order` instead of holding it.
    pub fn events_client(&self) -> Result<reqwest::Client, ConfigError> {
        Ok(reqwest::Client::builder()
            .timeout(Duration::from_secs(self.events_timeout_secs))
            .connect_timeout(Duration::from_secs(self.events_connect_timeout_secs))
            .build()?)
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
