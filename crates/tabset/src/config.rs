use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tabset_core::LogLevel;

/// Where the settings screen keeps its files
///
/// Read from `config.toml`; every field is optional and falls back to
/// the platform directories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding the settings values
    pub data_file: Option<PathBuf>,
    /// File receiving log output
    pub log_file: Option<PathBuf>,
    /// Level used until the persisted settings are loaded
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Loads `path`, or the default config path when `None`.
    ///
    /// A missing file is created with the defaults, so there is a file
    /// to edit after the first run.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            let config = Self::default();
            config.save(&path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&contents).wrap_err_with(|| format!("Failed to parse config from {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let contents = toml::to_string_pretty(self).wrap_err("Failed to serialize config")?;
        fs::write(path, contents).wrap_err_with(|| format!("Failed to write config to {:?}", path))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| eyre!("Failed to find config directory"))?;
        Ok(config_dir.join("tabset").join("config.toml"))
    }

    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => {
                let data_dir =
                    dirs::data_dir().ok_or_else(|| eyre!("Failed to find data directory"))?;
                Ok(data_dir.join("tabset").join("data.json"))
            }
        }
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => {
                let cache_dir =
                    dirs::cache_dir().ok_or_else(|| eyre!("Failed to find cache directory"))?;
                Ok(cache_dir.join("tabset").join("tabset.log"))
            }
        }
    }

    /// Applies command line overrides.
    pub fn update_from_cli(&mut self, data_file: Option<PathBuf>, verbose: bool) {
        if data_file.is_some() {
            self.data_file = data_file;
        }
        if verbose {
            self.log_level = LogLevel::Debug;
        }
    }
}
