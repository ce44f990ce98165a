use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file replacing the built-in mock dataset.
    pub seed_path: Option<PathBuf>,
    pub autosave_delay_ms: u64,
    /// Artificial delay applied to bulk operations, mimicking a backend round-trip.
    pub simulated_latency_ms: u64,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            seed_path: None,
            autosave_delay_ms: 2000,
            simulated_latency_ms: 0,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            seed_path: std::env::var("SEED_PATH").ok().map(PathBuf::from),
            autosave_delay_ms: parse_env("AUTOSAVE_DELAY_MS", defaults.autosave_delay_ms)?,
            simulated_latency_ms: parse_env(
                "SIMULATED_LATENCY_MS",
                defaults.simulated_latency_ms,
            )?,
            default_page_size: parse_env("DEFAULT_PAGE_SIZE", defaults.default_page_size)?,
            max_page_size: parse_env("MAX_PAGE_SIZE", defaults.max_page_size)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
