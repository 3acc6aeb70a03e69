// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interfaces for parsing configuration files and working with the server
//! configuration

use dropshot::ConfigDropshot;
use dropshot::ConfigLogging;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration for the data seeded at startup
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PopulateConfig {
    /// Seed the demonstration dataset (predefined staff accounts, the seven
    /// Bahrain tunnels with their sensors, and a synthetic maintenance
    /// history) into the otherwise-empty store.
    #[serde(default)]
    pub seed_demo_data: bool,
}

/// Configuration for the tunnelguard server
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Dropshot configuration for the HTTP server
    pub dropshot: ConfigDropshot,
    /// Server-wide logging configuration
    pub log: ConfigLogging,
    #[serde(default)]
    pub populate: PopulateConfig,
}

impl Config {
    /// Load a `Config` from the given TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, LoadError> {
        let path = path.as_ref();
        let file_contents = std::fs::read_to_string(path)
            .map_err(|e| (path.to_path_buf(), e))?;
        let config_parsed: Config = toml::from_str(&file_contents)
            .map_err(|e| (path.to_path_buf(), e))?;
        Ok(config_parsed)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error reading \"{}\": {}", path.display(), err)]
    Io { path: PathBuf, err: std::io::Error },
    #[error("error parsing \"{}\": {}", path.display(), err)]
    Parse { path: PathBuf, err: toml::de::Error },
}

impl From<(PathBuf, std::io::Error)> for LoadError {
    fn from((path, err): (PathBuf, std::io::Error)) -> Self {
        LoadError::Io { path, err }
    }
}

impl From<(PathBuf, toml::de::Error)> for LoadError {
    fn from((path, err): (PathBuf, toml::de::Error)) -> Self {
        LoadError::Parse { path, err }
    }
}
