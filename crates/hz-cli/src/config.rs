//! `hz.toml`: optional settings file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "hz.toml";

/// Settings read from the config file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Roster file, relative to the config file.
    pub roster: PathBuf,
    /// RNG seed for reproducible rolls.
    pub seed: Option<u64>,
    /// Colored terminal output.
    pub color: bool,
    /// Log filter used when `HZ_LOG` is not set.
    pub log: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("roster.json"),
            seed: None,
            color: true,
            log: "error".to_string(),
        }
    }
}

impl CliConfig {
    /// Load an explicit config file, or `hz.toml` if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
        let mut config = Self::parse(&contents)
            .map_err(|e| format!("failed to parse config {}: {e}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.roster = dir.join(&config.roster);
        }
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
