use std::{env, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_QUOTE_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_QUOTE_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_QUOTE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub api_base: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_QUOTE_API_BASE.to_string(),
            model: DEFAULT_QUOTE_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_QUOTE_TIMEOUT_SECS),
        }
    }
}

impl QuoteConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: env::var("QUOTE_API_BASE").unwrap_or(defaults.api_base),
            model: env::var("QUOTE_MODEL").unwrap_or(defaults.model),
            api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("API_KEY"))
                .ok(),
            timeout: env::var("QUOTE_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub quote: QuoteConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            data_path: resolve_data_path(),
            quote: QuoteConfig::from_env(),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}
