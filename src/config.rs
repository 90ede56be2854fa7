// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration module.
//!
//! Handles loading and saving application settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::baud::DEFAULT_BAUD;

const APP_DIR: &str = "serial-commands";
const CONFIG_FILE: &str = "config.toml";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data directory holding the preferences file.
    #[serde(skip)]
    pub data_dir: PathBuf,

    /// Export settings.
    pub export: ExportConfig,

    /// Bundled command lists.
    pub builtin: BuiltinConfig,

    /// Serial defaults.
    pub serial: SerialConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name used when exporting without an explicit path.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "common_commands.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinConfig {
    /// Directory scanned for `.txt`/`.json` command lists.
    pub dir: PathBuf,
}

impl Default for BuiltinConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets/common_commands"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Baud rate preselected when no connection has succeeded yet.
    pub default_baud: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            default_baud: DEFAULT_BAUD,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            export: ExportConfig::default(),
            builtin: BuiltinConfig::default(),
            serial: SerialConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user config directory, writing defaults if absent.
    ///
    /// `data_dir` replaces the default data directory; only the directory
    /// actually used is created.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        Self::load_with_dirs(&default_config_dir(), data_dir)
    }

    /// Load from `config_dir` and settle the data directory.
    pub fn load_with_dirs(config_dir: &Path, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load_from(config_dir)?;
        config.data_dir = data_dir.unwrap_or_else(default_data_dir);
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("Failed to create {:?}", config.data_dir))?;
        Ok(config)
    }

    /// Load `config.toml` from `config_dir`, writing defaults if absent.
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir)?;

        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", config_path))
        } else {
            let config = Self::default();
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&config_path, content)?;
            Ok(config)
        }
    }

    /// Save configuration to `config_dir`.
    pub fn save_to(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)?;
        let config_path = config_dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}
