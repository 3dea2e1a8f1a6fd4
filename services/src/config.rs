use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "prod")]
    Prod,
    #[serde(rename = "test")]
    Test,
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Prod => write!(f, "prod"),
            Env::Test => write!(f, "test"),
        }
    }
}

/// Key that lets local/test runs start without a real Polygon account.
/// Collection against the live API will fail with it; storage and the
/// HTTP surface still work.
const DEV_POLYGON_API_KEY: &str = "polygon-api-key-unset";

/// SQLite file in the working directory, created on first run.
const DEV_DATABASE_URL: &str = "sqlite://breadth_data.db?mode=rwc";

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    database_url: String,
    server_addr: String,
    port: u16,
    polygon_api_key: String,
    data_dir: String,
    collect_interval_secs: u64,
}

// An intermediate struct for deserializing environment variables where
// everything not strictly required may be absent.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    database_url: Option<String>,
    server_addr: Option<String>,
    port: Option<u16>,
    polygon_api_key: Option<String>,
    data_dir: Option<String>,
    collect_interval_secs: Option<u64>,
}

impl Config {
    /// Create a test configuration with default values, backed by an
    /// in-memory database. It should not be used in production code.
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Test,
            database_url: "sqlite::memory:".to_string(),
            server_addr: "127.0.0.1".to_string(),
            port: 8080,
            polygon_api_key: DEV_POLYGON_API_KEY.to_string(),
            data_dir: "data".to_string(),
            collect_interval_secs: 60,
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn polygon_api_key(&self) -> &str {
        &self.polygon_api_key
    }

    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    pub fn collect_interval(&self) -> Duration {
        Duration::from_secs(self.collect_interval_secs)
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.env, Env::Prod)
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            database_url,
            server_addr,
            port,
            polygon_api_key,
            data_dir,
            collect_interval_secs,
        } = raw_config;

        let database_url = match database_url {
            Some(url) => url,
            None if matches!(env, Env::Local | Env::Test) => {
                info!(
                    "DATABASE_URL not set, defaulting to {} for {} environment",
                    DEV_DATABASE_URL, env
                );
                DEV_DATABASE_URL.to_string()
            }
            None => anyhow::bail!("DATABASE_URL must be set for {} environment", env),
        };

        // Local binds loopback only; anything else must be reachable.
        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_string()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("PORT not set, defaulting to 8080 for {} environment", env);
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        // The Polygon key is required wherever collection is real.
        let polygon_api_key = match polygon_api_key {
            Some(key) => key,
            None if matches!(env, Env::Local | Env::Test) => {
                info!(
                    "POLYGON_API_KEY not set, using placeholder for {} environment",
                    env
                );
                DEV_POLYGON_API_KEY.to_string()
            }
            None => anyhow::bail!("POLYGON_API_KEY must be set for {} environment", env),
        };

        let data_dir = data_dir.unwrap_or_else(|| "data".to_string());
        let collect_interval_secs = collect_interval_secs.unwrap_or(60);

        Ok(Config {
            env,
            database_url,
            server_addr,
            port,
            polygon_api_key,
            data_dir,
            collect_interval_secs,
        })
    }
}
