//! Configuration module for model-fetch
//!
//! Loads config from `$XDG_CONFIG_HOME/model-fetch/config.toml` or `~/.config/model-fetch/config.toml`.
//! Falls back to built-in defaults if the file doesn't exist.
//! Partial configs are merged with defaults using serde's default attributes.
//!
//! # Example
//!
//! ```no_run
//! use model_fetch::config::Config;
//!
//! let config = Config::load().expect("Failed to load config");
//! println!("Hub endpoint: {}", config.hub.endpoint);
//! println!("Extensions: {:?}", config.fetch.extensions);
//! ```

pub mod schema;

pub use schema::Config;

use crate::error::{FetchError, Result};
use crate::models::manifest::is_valid_extension;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load config from an explicit path, or defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            FetchError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.hub.endpoint.trim().is_empty() {
            return Err(FetchError::Config("hub.endpoint must not be empty".to_string()));
        }
        if self.hub.revision.trim().is_empty() {
            return Err(FetchError::Config("hub.revision must not be empty".to_string()));
        }
        if self.fetch.extensions.is_empty() {
            return Err(FetchError::Config(
                "fetch.extensions must list at least one suffix".to_string(),
            ));
        }
        if let Some(bad) = self.fetch.extensions.iter().find(|ext| !is_valid_extension(ext)) {
            return Err(FetchError::Config(format!(
                "fetch.extensions entry '{bad}' must be a suffix starting with '.', e.g. \".json\""
            )));
        }
        Ok(())
    }
}

/// Get config file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config)
    } else {
        dirs::config_dir()
            .ok_or_else(|| FetchError::Config("Cannot determine config directory".to_string()))?
    };

    Ok(config_dir.join("model-fetch").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.hub.endpoint, "https://huggingface.co");
        assert_eq!(config.hub.revision, "main");
        assert!(config.hub.cache_dir.is_none());
        assert_eq!(
            config.fetch.extensions,
            vec![".json", ".model", ".safetensors", ".bin"]
        );
        assert!(config.fetch.force_download);
        assert!(config.installer.enabled);
        assert_eq!(
            config.installer.packages,
            vec!["torch", "transformers", "accelerate", "huggingface_hub"]
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.hub.revision, "main");
    }

    #[test]
    fn test_partial_config_merges_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[fetch]\nforce_download = false\n\n[installer]\nenabled = false\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.fetch.force_download);
        assert_eq!(config.fetch.extensions.len(), 4);
        assert!(!config.installer.enabled);
        assert_eq!(config.installer.packages.len(), 4);
        assert_eq!(config.hub.endpoint, "https://huggingface.co");
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[hub\nendpoint = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[fetch]\nextensions = []\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("fetch.extensions"));
    }

    #[test]
    fn test_blank_extension_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        for entries in [r#"[""]"#, r#"[".json", "  "]"#, r#"["json"]"#] {
            fs::write(&path, format!("[fetch]\nextensions = {entries}\n")).unwrap();
            let err = Config::load_from(&path).unwrap_err();
            assert!(matches!(err, FetchError::Config(_)), "accepted {entries}");
            assert!(err.to_string().contains("fetch.extensions"));
        }
    }

    #[test]
    #[serial]
    fn test_config_path_respects_xdg() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/model-fetch-xdg");

        let path = config_path().unwrap();
        assert_eq!(
            path,
            PathBuf::from("/tmp/model-fetch-xdg/model-fetch/config.toml")
        );

        match original {
            Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}
