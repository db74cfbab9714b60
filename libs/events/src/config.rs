use core_config::{ConfigError, FromEnv};

/// Message broker configuration.
///
/// Both settings are optional: a deployment without a broker simply
/// publishes nothing.
#[derive(Clone, Debug, Default)]
pub struct BrokerConfig {
    /// NATS server URL, e.g. `nats://localhost:4222`
    pub url: Option<String>,

    /// Subject for user-created events
    pub user_created_subject: Option<String>,
}

impl FromEnv for BrokerConfig {
    /// Environment variables:
    /// - `NATS_URL` (optional)
    /// - `NATS_USER_CREATED_SUBJECT` (optional)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: std::env::var("NATS_URL").ok(),
            user_created_subject: std::env::var("NATS_USER_CREATED_SUBJECT").ok(),
        })
    }
}
