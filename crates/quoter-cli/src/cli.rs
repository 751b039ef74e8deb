//! CLI configuration and settings management

use crate::{CliError, Result};
use quoter_core::QuoterOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "quoter.toml";

/// CLI configuration loaded from config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Inputs longer than this many characters are refused
    pub max_input_length: usize,

    /// Quoting switches applied before command-line flags
    pub quoter: QuoterOptions,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            max_input_length: 2000,
            quoter: QuoterOptions::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try current directory
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            return Self::load_from_file(local);
        }

        // Try system config directory
        if let Some(path) = Self::default_config_path() {
            if path.is_file() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quoter").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quoter.toml");
        std::fs::write(
            &path,
            "max_input_length = 10\n\n[quoter]\nshorten_with_static_import = true\n",
        )?;
        let config = CliConfig::load(Some(&path))?;
        assert_eq!(
            config,
            CliConfig {
                max_input_length: 10,
                quoter: QuoterOptions {
                    shorten_with_static_import: true,
                    ..QuoterOptions::default()
                },
            }
        );
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_a_config_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("quoter.toml");
        std::fs::write(&path, "max_input_length = \"many\"")?;
        assert!(matches!(CliConfig::load(Some(&path)), Err(CliError::Config(_))));
        Ok(())
    }
}
