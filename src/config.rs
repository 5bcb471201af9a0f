//! Runtime settings
//!
//! Loaded from a TOML file (explicit path, `$SELIC_CONFIG`, or
//! `<config dir>/selic/config.toml`), then overridden by `$SELIC_API_URL`.
//! A missing file means defaults.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::sources::DEFAULT_BCB_URL;
use crate::window::DEFAULT_WINDOW_LENGTH;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// BCB SGS endpoint, without query string
    pub api_url: String,
    /// Records per window in the best-window search
    pub window_length: usize,
    /// Where `solution.csv` and `df_raw.csv` are written
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BCB_URL.to_string(),
            window_length: DEFAULT_WINDOW_LENGTH,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Resolve and load settings. `explicit` wins over the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os("SELIC_CONFIG")
                .map(PathBuf::from)
                .or_else(|| default_config_path().ok()),
        };

        let mut settings = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            Some(p) if explicit.is_some() => {
                return Err(anyhow!("Config file not found: {}", p.display()));
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("SELIC_API_URL") {
            if !url.trim().is_empty() {
                settings.api_url = url.trim().to_string();
            }
        }

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        if settings.window_length == 0 {
            return Err(anyhow!("window_length must be greater than zero"));
        }
        Ok(settings)
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dir_spec::config_home)
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("selic"))
}

fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILENAME))
}
