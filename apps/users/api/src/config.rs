use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    /// Fails on the first missing or unparseable variable.
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DB_USER, DB_PASSWORD, DB_HOST, DB_PORT, DB_NAME
        let server = ServerConfig::from_env()?; // SRV_PORT required, HOST defaults to 0.0.0.0

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}
