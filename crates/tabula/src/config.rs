// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::aggregator::{ChartRequest, ChartType};
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "TABULA_CONFIG";
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "config/tabula.yml",
    "bin/tabula-viewer/config/tabula.yml",
    "tabula.yml",
];
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub logging: LoggingConfig,
    pub fetch: FetchConfig,
    pub chart: ChartDefaults,
    pub print: PrintConfig,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub row_height: f32,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartDefaults {
    pub default_type: ChartType,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintConfig {
    /// Heading used when the table has no file name.
    pub fallback_title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CSV Viewer".to_string(),
            width: 1200.0,
            height: 800.0,
            row_height: 22.0,
        }
    }
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("tabula/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
impl ChartDefaults {
    /// An empty chart request of the configured type.
    pub fn request(&self) -> ChartRequest {
        ChartRequest {
            chart_type: self.default_type,
            ..ChartRequest::default()
        }
    }
}
impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            fallback_title: "CSV Data".to_string(),
        }
    }
}
impl ViewerConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_yaml_string(&content)
    }
    pub fn from_yaml_string(yaml_content: &str) -> ConfigResult<Self> {
        let config: ViewerConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "window.width/height".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.window.row_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "window.row_height".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "fetch.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "logging.level".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
    /// Path named by [`CONFIG_ENV_VAR`], after loading any `.env` file.
    pub fn path_from_env() -> Option<PathBuf> {
        let _ = dotenvy::dotenv();
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
    /// Loads the first candidate that exists. An explicit path must load;
    /// without one, missing candidates fall back to defaults.
    pub fn load(explicit: Option<&Path>, candidates: &[&str]) -> ConfigResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::from_yaml_file(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }
        for candidate in candidates {
            let path = Path::new(candidate);
            if path.is_file() {
                debug!(path = %path.display(), "Loading viewer configuration");
                let config = Self::from_yaml_file(path)?;
                return Ok((config, Some(path.to_path_buf())));
            }
        }
        warn!("No configuration file found, using defaults");
        Ok((Self::default(), None))
    }
}
