use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::TilesheetConfig;

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: TilesheetConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse config text that was read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: TilesheetConfig = serde_json::from_str(content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    pub fn resolve_input_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.input_dir)
    }

    pub fn resolve_output_file(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_file)
    }

    pub fn resolve_metadata(&self) -> Option<PathBuf> {
        self.config
            .metadata
            .as_ref()
            .map(|path| self.config_dir.join(path))
    }
}
