use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::errors::{SweepError, SweepResult};
use super::platform::Platform;

/// Global CleanSweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Delay between streamed clean events, in milliseconds
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Run OS maintenance actions (DNS flush etc.) after a clean pass
    #[serde(default = "default_maintenance")]
    pub maintenance: bool,

    /// Category names to leave out of scans and cleans
    #[serde(default)]
    pub exclude_categories: Vec<String>,

    /// Override the detected platform ("windows", "darwin", "linux")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

fn default_pacing_ms() -> u64 {
    50
}
fn default_maintenance() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
            maintenance: default_maintenance(),
            exclude_categories: Vec::new(),
            platform: None,
        }
    }
}

impl Config {
    /// Get the CleanSweep data directory (~/.cleansweep)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".cleansweep")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Get the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::data_dir().join("logs")
    }

    /// Load config from file, or fall back to defaults if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Ok(Self::parse(&contents, &path)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse config from TOML text read from `origin`
    pub fn parse(contents: &str, origin: &Path) -> SweepResult<Self> {
        toml::from_str(contents).map_err(|e| SweepError::Config {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        Self::init_dirs()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Initialize all CleanSweep directories
    pub fn init_dirs() -> Result<()> {
        for dir in [Self::data_dir(), Self::logs_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Delay inserted between streamed clean events
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Pick the platform: explicit override, then config, then the build target.
    pub fn resolve_platform(&self, cli_override: Option<&str>) -> Result<Platform> {
        match cli_override.or(self.platform.as_deref()) {
            Some(name) => Ok(name.parse()?),
            None => Ok(Platform::current()),
        }
    }

    /// Check if a category is excluded
    pub fn is_excluded(&self, category: &str) -> bool {
        self.exclude_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("maintenance = false\n", Path::new("config.toml")).unwrap();
        assert!(!config.maintenance);
        assert_eq!(config.pacing_ms, 50);
        assert!(config.exclude_categories.is_empty());
    }

    #[test]
    fn test_invalid_file_names_its_path() {
        let err = Config::parse("pacing_ms = \"fast\"\n", Path::new("/etc/cleansweep.toml"))
            .unwrap_err();
        match &err {
            SweepError::Config { path, .. } => {
                assert_eq!(path, Path::new("/etc/cleansweep.toml"));
            }
            other => panic!("expected config error, got {:?}", other),
        }
        assert!(err.to_string().contains("/etc/cleansweep.toml"));
    }

    #[test]
    fn test_resolve_platform_prefers_cli() {
        let config = Config {
            platform: Some("windows".into()),
            ..Config::default()
        };
        assert_eq!(config.resolve_platform(Some("linux")).unwrap(), Platform::Linux);
        assert_eq!(config.resolve_platform(None).unwrap(), Platform::Windows);
        assert!(config.resolve_platform(Some("amiga")).is_err());
    }
}
