//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config/pairs.toml.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::strategy::StrategyConfig;

/// Main configuration structure matching pairs.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub strategy: StrategySection,
    pub instruments: InstrumentsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Strategy configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct StrategySection {
    /// Rolling window length in trading days
    pub window_length: usize,
    /// Z-score magnitude that opens a position
    pub entry_threshold: f64,
    /// Z-score magnitude below which the position is closed
    pub exit_threshold: f64,
    /// Fraction of portfolio per leg
    pub allocation_fraction: f64,
    /// Minutes after session open the host schedules the daily check
    #[serde(default = "default_schedule_offset")]
    pub schedule_offset_minutes: u32,
}

fn default_schedule_offset() -> u32 {
    60
}

/// Instruments configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentsSection {
    /// Leg A symbol (shorted when the spread is rich)
    pub symbol_a: String,
    /// Leg B symbol
    pub symbol_b: String,
    /// Benchmark the host compares returns against (optional)
    #[serde(default)]
    pub benchmark: Option<String>,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigFileError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        // Strategy parameters share the strategy layer's rules
        StrategyConfig::from(self)
            .validate()
            .map_err(|e| ConfigFileError::Validation(e.to_string()))?;

        if self.instruments.symbol_a.is_empty() {
            return Err(ConfigFileError::Validation(
                "symbol_a cannot be empty".to_string(),
            ));
        }

        if self.instruments.symbol_b.is_empty() {
            return Err(ConfigFileError::Validation(
                "symbol_b cannot be empty".to_string(),
            ));
        }

        if self.instruments.symbol_a == self.instruments.symbol_b {
            return Err(ConfigFileError::Validation(format!(
                "legs must differ, both are {}",
                self.instruments.symbol_a
            )));
        }

        Ok(())
    }
}

impl From<&Config> for StrategyConfig {
    fn from(config: &Config) -> Self {
        Self {
            window_length: config.strategy.window_length,
            entry_threshold: config.strategy.entry_threshold,
            exit_threshold: config.strategy.exit_threshold,
            allocation_fraction: config.strategy.allocation_fraction,
            schedule_offset_minutes: config.strategy.schedule_offset_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID_TOML: &str = r#"
[strategy]
window_length = 50
entry_threshold = 1.8
exit_threshold = 1.0
allocation_fraction = 0.5
schedule_offset_minutes = 60

[instruments]
symbol_a = "BNO"
symbol_b = "USO"
benchmark = "XOP"

[logging]
level = "info"
"#;

    #[test]
    fn test_parse_valid_config() {
        let config: Config = toml::from_str(VALID_TOML).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.strategy.window_length, 50);
        assert_eq!(config.instruments.symbol_a, "BNO");
        assert_eq!(config.instruments.benchmark.as_deref(), Some("XOP"));

        let strategy = StrategyConfig::from(&config);
        assert_eq!(strategy.entry_threshold, 1.8);
        assert_eq!(strategy.schedule_offset_minutes, 60);
    }

    #[test]
    fn test_optional_sections_default() {
        let toml = r#"
[strategy]
window_length = 50
entry_threshold = 1.8
exit_threshold = 1.0
allocation_fraction = 0.5

[instruments]
symbol_a = "BNO"
symbol_b = "USO"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.strategy.schedule_offset_minutes, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.instruments.benchmark.is_none());
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let toml = VALID_TOML.replace("entry_threshold = 1.8", "entry_threshold = 0.5");
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_identical_legs() {
        let toml = VALID_TOML.replace("symbol_a = \"BNO\"", "symbol_a = \"USO\"");
        let config: Config = toml::from_str(&toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigFileError::Validation(_))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID_TOML.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.instruments.symbol_b, "USO");
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("does-not-exist.toml").unwrap_err();
        assert!(matches!(err, ConfigFileError::Io(_)));
    }
}
