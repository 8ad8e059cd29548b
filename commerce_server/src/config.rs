use std::env;

use chrono::Duration;
use cs_common::Secret;
use log::*;
use rand::{thread_rng, Rng};
use registry_tools::RegistryConfig;

use crate::errors::ServerError;

const DEFAULT_LJ_HOST: &str = "127.0.0.1";
const DEFAULT_LJ_PORT: u16 = 8000;
const DEFAULT_LJ_DATABASE_URL: &str = "sqlite://data/loja_store.db";
const DEFAULT_TOKEN_VALIDITY_HOURS: i64 = 24;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    /// Configuration for the external Brazilian registries (ReceitaWS and ViaCEP).
    pub registry: RegistryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_LJ_HOST.to_string(),
            port: DEFAULT_LJ_PORT,
            database_url: DEFAULT_LJ_DATABASE_URL.to_string(),
            auth: AuthConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("LJ_HOST").ok().unwrap_or_else(|| DEFAULT_LJ_HOST.into());
        let port = env::var("LJ_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for LJ_PORT. {e} Using the default, {DEFAULT_LJ_PORT}, instead."
                    );
                    DEFAULT_LJ_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_LJ_PORT);
        let database_url = env::var("LJ_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ LJ_DATABASE_URL is not set. Using the default, {DEFAULT_LJ_DATABASE_URL}, instead.");
            DEFAULT_LJ_DATABASE_URL.to_string()
        });
        let auth = AuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!(
                "🪛️ Could not load the authentication configuration from environment variables. {e}. Reverting to \
                 the default configuration."
            );
            AuthConfig::default()
        });
        let registry = RegistryConfig::new_from_env_or_default();
        Self { host, port, database_url, auth, registry }
    }
}

//-------------------------------------------------  AuthConfig  -------------------------------------------------------
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// The secret used to sign and verify access tokens.
    pub api_secret: Secret<String>,
    /// How long issued access tokens remain valid.
    pub token_validity: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ The access token signing secret has not been set. I'm using a random value for this session. \
             DO NOT operate on production like this, since every restart will log all of your users out. Set the \
             LJ_API_SECRET environment variable instead. 🚨️🚨️🚨️"
        );
        let mut rng = thread_rng();
        let api_secret = (0..32).map(|_| format!("{:02x}", rng.gen::<u8>())).collect::<String>();
        Self { api_secret: Secret::new(api_secret), token_validity: Duration::hours(DEFAULT_TOKEN_VALIDITY_HOURS) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let api_secret =
            env::var("LJ_API_SECRET").map_err(|e| ServerError::ConfigurationError(format!("{e} [LJ_API_SECRET]")))?;
        if api_secret.trim().is_empty() {
            return Err(ServerError::ConfigurationError("LJ_API_SECRET is empty".to_string()));
        }
        let token_validity = env::var("LJ_TOKEN_VALIDITY_HOURS")
            .ok()
            .and_then(|s| {
                s.parse::<i64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for LJ_TOKEN_VALIDITY_HOURS. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_TOKEN_VALIDITY_HOURS);
        let token_validity = Duration::hours(token_validity);
        Ok(Self { api_secret: Secret::new(api_secret), token_validity })
    }
}
