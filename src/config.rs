use crate::constants::{DEFAULT_PORT, DEFAULT_RELAY_URL, GEMINI_API_URL};
use crate::errors::{FynoraqError, FynoraqResult};
use std::env;

/// Configuration for the relay service, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub api_key: String,
    pub api_url: String,
    pub allowed_origin: Option<String>,
}

impl RelayConfig {
    pub fn from_env() -> FynoraqResult<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| FynoraqError::config_error(format!("invalid PORT value: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_API_URL.to_string());
        let allowed_origin = env::var("ALLOWED_ORIGIN").ok();

        let config = RelayConfig {
            port,
            api_key,
            api_url,
            allowed_origin,
        };
        validate_relay_config(&config)?;
        Ok(config)
    }
}

fn validate_relay_config(config: &RelayConfig) -> FynoraqResult<()> {
    if config.api_key.is_empty() {
        return Err(FynoraqError::config_error(
            "GEMINI_API_KEY is required and must not be empty",
        ));
    }

    if config.api_url.is_empty() {
        return Err(FynoraqError::config_error("GEMINI_API_URL must not be empty"));
    }

    if let Some(origin) = &config.allowed_origin {
        if origin.trim().is_empty() {
            return Err(FynoraqError::config_error(
                "ALLOWED_ORIGIN must not be blank when set",
            ));
        }
    }

    Ok(())
}

/// Configuration for the terminal view: where to find the relay.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub relay_url: String,
}

impl ViewConfig {
    pub fn from_env() -> Self {
        let relay_url =
            env::var("FYNORAQ_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
        ViewConfig {
            relay_url: normalize_relay_url(&relay_url),
        }
    }
}

fn normalize_relay_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
