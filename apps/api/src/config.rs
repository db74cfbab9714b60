use core_config::{jwt::JwtConfig, server::ServerConfig, FromEnv};
use database::PostgresConfig;
use events::BrokerConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application configuration, composed from the shared config components.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub broker: BrokerConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=3000
        let database = PostgresConfig::from_env()?; // Required - fails if DATABASE_URL not set
        let jwt = JwtConfig::from_env()?; // Required - fails if JWT_SECRET not set
        let broker = BrokerConfig::from_env()?; // Optional - publishing disabled if unset

        Ok(Self {
            environment,
            server,
            database,
            jwt,
            broker,
        })
    }
}
