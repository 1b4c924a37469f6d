use crate::constants::{DEFAULT_MAX_SIZE_MB, DEFAULT_MAX_WIDTH_OR_HEIGHT};
use crate::error::{CompressionError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// What happens to a second submission while one is still running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencyPolicy {
    /// Reject the second submission until the first one settles
    #[default]
    SingleFlight,
    /// Run both; whichever finishes last wins
    Concurrent,
}

/// Session settings, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub max_size_mb: f64,
    pub max_width_or_height: u32,
    pub concurrency: ConcurrencyPolicy,
    pub clear_progress_on_failure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_width_or_height: DEFAULT_MAX_WIDTH_OR_HEIGHT,
            concurrency: ConcurrencyPolicy::default(),
            clear_progress_on_failure: false,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CompressionError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.concurrency, ConcurrencyPolicy::SingleFlight);
        assert!(!config.clear_progress_on_failure);
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml_str(
            "max_size_mb = 0.5\nconcurrency = \"concurrent\"\n",
        )
        .unwrap();
        assert_eq!(config.max_size_mb, 0.5);
        assert_eq!(config.max_width_or_height, 1024);
        assert_eq!(config.concurrency, ConcurrencyPolicy::Concurrent);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = AppConfig::from_toml_str("quality = 80\n");
        assert!(matches!(result, Err(CompressionError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_width_or_height = 2048").unwrap();
        writeln!(file, "clear_progress_on_failure = true").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.max_width_or_height, 2048);
        assert!(config.clear_progress_on_failure);
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(CompressionError::FileNotFound(_))));
    }
}
