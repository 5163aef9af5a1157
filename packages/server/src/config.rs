use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub api_id: i32,
    pub api_hash: String,
    pub session_expiry_days: i64,
    pub sweep_interval_minutes: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            api_id: env::var("API_ID")
                .context("API_ID must be set")?
                .parse()
                .context("API_ID must be a valid number")?,
            api_hash: env::var("API_HASH").context("API_HASH must be set")?,
            session_expiry_days: env::var("SESSION_EXPIRY_DAYS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .context("SESSION_EXPIRY_DAYS must be a valid number")?,
            sweep_interval_minutes: env::var("SWEEP_INTERVAL_MINUTES")
                .unwrap_or_else(|_| "14".to_string())
                .parse()
                .context("SWEEP_INTERVAL_MINUTES must be a valid number")?,
        })
    }
}
