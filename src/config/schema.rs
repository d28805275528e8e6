use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub installer: InstallerConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct HubConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    /// Overrides the Hugging Face cache directory
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub progress: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct FetchConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_true")]
    pub force_download: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct InstallerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub python: Option<PathBuf>,
    /// `package` or `package:module` when the import name differs
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
    #[serde(default)]
    pub upgrade: bool,
}

// Default value functions
fn default_endpoint() -> String {
    "https://huggingface.co".to_string()
}
fn default_revision() -> String {
    "main".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_extensions() -> Vec<String> {
    crate::models::manifest::RECOGNIZED_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}
fn default_packages() -> Vec<String> {
    crate::installer::REQUIRED_PACKAGES
        .iter()
        .map(|pkg| (*pkg).to_string())
        .collect()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            revision: default_revision(),
            cache_dir: None,
            timeout_secs: default_timeout_secs(),
            progress: default_true(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            force_download: default_true(),
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            python: None,
            packages: default_packages(),
            upgrade: false,
        }
    }
}
