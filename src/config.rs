//! Configuration for the `fortuna-gen` command-line tool.
//!
//! Loaded from a TOML file; every section and field is optional and falls
//! back to its default. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Generator seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Deterministic seed. When unset the generator is seeded from the OS.
    pub seed: Option<i64>,
    /// Bytes of OS entropy mixed in when no deterministic seed is given.
    pub os_seed_bytes: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            os_seed_bytes: crate::generator::OS_SEED_SIZE,
        }
    }
}

/// Encoding used when writing generated bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lowercase hexadecimal text.
    #[default]
    Hex,
    /// Raw binary.
    Raw,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Encoding for the `bytes` command.
    pub format: OutputFormat,
    /// Number of bytes (or integers for `int63`) to emit.
    pub count: usize,
    /// Hex characters per output line, 0 for a single line.
    pub line_width: usize,
    /// Bytes requested per generator call in `stream` mode.
    pub stream_chunk: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Hex,
            count: 32,
            line_width: 64,
            stream_chunk: 4096,
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Print Prometheus text exposition to stderr on exit.
    pub print: bool,
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("os_seed_bytes must be at least 1")]
    EmptyOsSeed,
    #[error("stream_chunk must be at least 1")]
    EmptyStreamChunk,
    #[error("line_width must be even (two hex characters per byte)")]
    OddLineWidth,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

impl FileConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.os_seed_bytes == 0 {
            return Err(ConfigError::EmptyOsSeed);
        }
        if self.output.stream_chunk == 0 {
            return Err(ConfigError::EmptyStreamChunk);
        }
        if self.output.line_width % 2 != 0 {
            return Err(ConfigError::OddLineWidth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generator.seed, None);
        assert_eq!(config.output.format, OutputFormat::Hex);
    }

    #[test]
    fn test_partial_file() {
        let config = FileConfig::from_toml(
            r#"
            [generator]
            seed = -7

            [output]
            format = "raw"
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.seed, Some(-7));
        assert_eq!(config.generator.os_seed_bytes, 32);
        assert_eq!(config.output.format, OutputFormat::Raw);
        assert_eq!(config.output.count, 32);
        assert!(!config.metrics.print);
    }

    #[test]
    fn test_zero_os_seed_invalid() {
        let result = FileConfig::from_toml("[generator]\nos_seed_bytes = 0\n");
        assert!(matches!(result, Err(ConfigError::EmptyOsSeed)));
    }

    #[test]
    fn test_zero_stream_chunk_invalid() {
        let result = FileConfig::from_toml("[output]\nstream_chunk = 0\n");
        assert!(matches!(result, Err(ConfigError::EmptyStreamChunk)));
    }

    #[test]
    fn test_odd_line_width_invalid() {
        let mut config = FileConfig::default();
        config.output.line_width = 3;
        assert!(matches!(config.validate(), Err(ConfigError::OddLineWidth)));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = FileConfig::from_toml("[output]\nformat = \"base64\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FileConfig::from_file("/nonexistent/fortuna.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
