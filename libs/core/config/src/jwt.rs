use crate::{env_or_default, env_required, ConfigError, FromEnv};

/// Default token lifetime: 30 minutes.
const DEFAULT_TTL_SECS: i64 = 1800;

/// Settings for the bearer-token capability.
///
/// The secret is shared between token issuance (login) and verification
/// (request auth); tokens are HS256-signed.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    pub fn with_ttl(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }
}

impl FromEnv for JwtConfig {
    /// Environment variables:
    /// - `JWT_SECRET` (required)
    /// - `JWT_TTL_SECS` (optional, default 1800)
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        let ttl_secs = env_or_default("JWT_TTL_SECS", &DEFAULT_TTL_SECS.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self { secret, ttl_secs })
    }
}
