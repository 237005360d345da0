//! Configuration management for the NutriTrack application
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NT__)

use crate::error::AppResult;
use nutritrack_shared::{DEFAULT_TOP_N, RETENTION_DAYS};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub retention: RetentionConfig,
    pub clock: ClockConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
    pub recommendations: RecommendationConfig,
}

/// Local key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

/// History retention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    pub window_days: u32,
}

/// Day-rollover polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    pub check_interval_secs: u64,
}

impl ClockConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs.max(1))
    }
}

/// AI/LLM advice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceConfig {
    pub enabled: bool,
    pub ollama_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ollama_url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Recommendation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub top_n: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from("./data"),
            },
            retention: RetentionConfig {
                window_days: RETENTION_DAYS,
            },
            clock: ClockConfig {
                check_interval_secs: 60,
            },
            advice: AdviceConfig::default(),
            recommendations: RecommendationConfig {
                top_n: DEFAULT_TOP_N,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NT__ prefix
    pub fn load() -> AppResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (NT__ prefix)
            // e.g., NT__ADVICE__ENABLED=true sets advice.enabled
            .add_source(config::Environment::with_prefix("NT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.retention.window_days, 7);
        assert_eq!(config.clock.check_interval(), Duration::from_secs(60));
        assert_eq!(config.recommendations.top_n, 3);
        assert!(!config.advice.enabled);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let clock = ClockConfig {
            check_interval_secs: 0,
        };
        assert_eq!(clock.check_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
