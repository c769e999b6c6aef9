//! @ai:module:intent Configuration structs for report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportConfig, ReportSettings, CatalogConfig, ScanConfig, CONFIG_FILE_NAME
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up at the package root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "srr.toml";

/// @ai:intent Main configuration for the report engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// @ai:intent Presentation settings for the rendered document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_standards_url")]
    pub standards_url: String,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
}

/// @ai:intent Where the canonical standards checklists come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Read checklists from this directory instead of over HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_dir: Option<PathBuf>,
}

/// @ai:intent Directory walking settings for the comment scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            standards_url: default_standards_url(),
            manifest_file: default_manifest_file(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            extension: default_extension(),
            local_dir: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
        }
    }
}

fn default_title() -> String {
    "srr report".to_string()
}

fn default_standards_url() -> String {
    "https://stats-devguide.ropensci.org/standards.html".to_string()
}

fn default_manifest_file() -> String {
    "DESCRIPTION".to_string()
}

fn default_base_url() -> String {
    "https://raw.githubusercontent.com/ropensci/statistical-software-review-book/main/standards"
        .to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_exclude() -> Vec<String> {
    ["target", "node_modules", "renv", "packrat"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ReportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Load the explicit config, else `srr.toml` under root, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("Using configuration {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
