//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// File names probed when no explicit path is given
const CANDIDATES: [&str; 2] = ["bankkaro.toml", ".config/bankkaro.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from; `None` when defaults were used
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path, a probed location, or defaults
    ///
    /// An explicit path that does not exist is an error; a missing probed
    /// file is not.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Self {
            schema: toml::from_str(content)?,
            path: None,
        })
    }
}

fn find_config_file() -> Option<String> {
    CANDIDATES
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {path}"))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {path}"))
}
