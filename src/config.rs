use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::mindicador::MindicadorClient;

pub const DEFAULT_CHART_PATH: &str = "divisa_chart.png";
pub const DEFAULT_CHART_WIDTH: u32 = 800;
pub const DEFAULT_CHART_HEIGHT: u32 = 400;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub chart_path: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset or blank keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = get("MINDICADOR_API_URL")
            .unwrap_or_else(|| MindicadorClient::DEFAULT_BASE_URL.to_string());
        let chart_path = get("DIVISA_CHART_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_PATH));
        let chart_width = parse_dimension("DIVISA_CHART_WIDTH", get("DIVISA_CHART_WIDTH"), DEFAULT_CHART_WIDTH)?;
        let chart_height = parse_dimension("DIVISA_CHART_HEIGHT", get("DIVISA_CHART_HEIGHT"), DEFAULT_CHART_HEIGHT)?;

        let timeout_secs = match get("DIVISA_HTTP_TIMEOUT_SECS") {
            Some(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: "DIVISA_HTTP_TIMEOUT_SECS",
                value,
                expected: "a whole number of seconds",
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        // 0 disables the timeout
        let http_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            api_url,
            chart_path,
            chart_width,
            chart_height,
            http_timeout,
        })
    }
}

fn parse_dimension(key: &'static str, value: Option<String>, default: u32) -> Result<u32, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|&v| (16..=10_000).contains(&v))
            .ok_or(ConfigError::InvalidValue {
                key,
                value,
                expected: "a pixel size between 16 and 10000",
            }),
    }
}
