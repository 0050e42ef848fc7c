use std::str::FromStr;

use crate::assistant::AssistantConfig;
use crate::auth::jwt::JwtConfig;

/// Error raised when an environment variable is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("REQUEST_TIMEOUT_SECS ({request}) must exceed AI_TIMEOUT_SECS ({assistant})")]
    TimeoutOrder { request: u64, assistant: u64 },
}

/// Runtime settings, read once at startup.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Front-end origins allowed by CORS (`CORS_ORIGINS`, comma separated).
    pub cors_origins: Vec<String>,
    /// Per-request timeout, in seconds. Always greater than the assistant
    /// timeout so a slow upstream surfaces as the fallback reply.
    pub request_timeout_secs: u64,
    /// JWT signing configuration.
    pub jwt: JwtConfig,
    /// Upstream conversational service.
    pub assistant: AssistantConfig,
}

impl ServerConfig {
    /// Read the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `45`                       |
    /// | `JWT_SECRET`           | required                   |
    /// | `JWT_EXPIRY_MINS`      | `480`                      |
    /// | `AI_SERVICE_URL`       | `http://ai-service:8000`   |
    /// | `AI_TIMEOUT_SECS`      | `30`                       |
    ///
    /// `REQUEST_TIMEOUT_SECS` must be strictly greater than `AI_TIMEOUT_SECS`.
    /// `DATABASE_URL` is read separately by the binaries.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 5000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 45u64)?;

        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let jwt = JwtConfig {
            secret,
            expiry_mins: parse_or(&lookup, "JWT_EXPIRY_MINS", 480i64)?,
        };

        let assistant = AssistantConfig {
            base_url: lookup("AI_SERVICE_URL").unwrap_or_else(|| "http://ai-service:8000".into()),
            timeout_secs: parse_or(&lookup, "AI_TIMEOUT_SECS", 30u64)?,
        };
        if request_timeout_secs <= assistant.timeout_secs {
            return Err(ConfigError::TimeoutOrder {
                request: request_timeout_secs,
                assistant: assistant.timeout_secs,
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            assistant,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
