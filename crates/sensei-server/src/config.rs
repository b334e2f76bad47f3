//! Server configuration.

use std::env;
use std::path::PathBuf;

use sensei_ai::AiConfig;
use sensei_ai::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub ai: AiConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("SENSEI_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .map_err(|e| anyhow::anyhow!("SENSEI_PORT is not a valid port: {}", e))?;

        // API_KEY is the name the hosted deployment used
        let api_key = env::var("SENSEI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();

        Ok(Self {
            host: env::var("SENSEI_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            db_path: PathBuf::from(env::var("SENSEI_DB_PATH").unwrap_or_else(|_| "sensei.db".into())),
            ai: AiConfig {
                api_key,
                model: env::var("SENSEI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
                base_url: env::var("SENSEI_MODEL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
