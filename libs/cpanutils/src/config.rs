// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Configuration utilities

use crate::file::{ensure_dir, read_file_string, safe_write};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "RCPAN_CONFIG";

#[cfg(feature = "serde")]
pub trait ConfigFile: Sized + Default + for<'de> Deserialize<'de> + Serialize {
    fn config_path() -> PathBuf;

    #[cfg(feature = "serde_json")]
    fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`; a missing file yields the defaults.
    #[cfg(feature = "serde_json")]
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = read_file_string(path)?;

        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    #[cfg(feature = "serde_json")]
    fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    #[cfg(feature = "serde_json")]
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialize config")?;

        safe_write(path, content.as_bytes())
    }
}

/// Settings of the front end itself. CPAN.pm keeps its own configuration.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Perl interpreter used to load CPAN.pm.
    pub perl: String,
    /// Extra interpreter arguments, placed before `-MCPAN`.
    pub perl_args: Vec<String>,
    /// CPAN.pm config file to load, as with `-j`.
    pub cpan_config: Option<PathBuf>,
    /// Load local::lib, as with `-I`.
    pub local_lib: bool,
    /// Turn off CPAN.pm lock files, as with `-F`.
    pub no_lock: bool,
    /// Show CPAN.pm output while it is being recorded.
    pub echo: bool,
}

#[cfg(feature = "serde")]
impl Default for Config {
    fn default() -> Self {
        Self {
            perl: "perl".to_string(),
            perl_args: Vec::new(),
            cpan_config: None,
            local_lib: false,
            no_lock: false,
            echo: true,
        }
    }
}

#[cfg(feature = "serde")]
impl ConfigFile for Config {
    fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        get_config_dir().join("config.json")
    }
}

/// Get configuration directory
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("rcpan"))
        .unwrap_or_else(|| PathBuf::from("/etc/rcpan"))
}
