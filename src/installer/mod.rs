//! Python dependency installer
//!
//! Probes each required package with an import and installs the missing
//! ones through pip. Any installer failure aborts the run.

pub mod pip;

use crate::config::schema::InstallerConfig;
use crate::error::{FetchError, Result};
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::time::Duration;

pub use pip::PipBackend;

/// Libraries needed to load the downloaded model with `transformers`
pub const REQUIRED_PACKAGES: &[&str] = &["torch", "transformers", "accelerate", "huggingface_hub"];

/// Characters that end the distribution name in a requirement like `torch>=2.1`
const VERSION_DELIMITERS: &[char] = &['<', '>', '=', '!', '~', '[', ';', ' '];

/// A pip requirement and the module name used to probe for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub package: String,
    pub module: String,
}

impl PackageSpec {
    /// Parse `package` or `package:module`
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let (package, module) = match spec.split_once(':') {
            Some((package, module)) => (package.trim(), module.trim().to_string()),
            None => {
                let name = spec.split(VERSION_DELIMITERS).next().unwrap_or(spec);
                (spec, name.replace('-', "_"))
            }
        };

        if package.is_empty() {
            return Err(FetchError::Config(format!("Invalid package entry '{spec}'")));
        }
        if module.is_empty()
            || !module
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(FetchError::Config(format!(
                "Invalid module name '{module}' for package '{package}'"
            )));
        }

        Ok(Self {
            package: package.to_string(),
            module,
        })
    }
}

/// Unified interface for package installers
#[async_trait]
pub trait PackageBackend: Send + Sync {
    /// Whether `module` can be imported in the target environment
    async fn is_installed(&self, module: &str) -> Result<bool>;

    /// Install (or upgrade) a package, suppressing installer output
    async fn install(&self, package: &str, upgrade: bool) -> Result<()>;

    /// Get backend name for logging/debugging
    fn backend_name(&self) -> &str;
}

/// What a call to [`DependencyInstaller::ensure_installed`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub already_present: Vec<String>,
    pub installed: Vec<String>,
}

/// Makes sure every required package is present, in order
pub struct DependencyInstaller<B: PackageBackend> {
    backend: B,
    packages: Vec<PackageSpec>,
    upgrade: bool,
}

impl<B: PackageBackend> DependencyInstaller<B> {
    pub fn new(backend: B, packages: Vec<PackageSpec>, upgrade: bool) -> Self {
        Self {
            backend,
            packages,
            upgrade,
        }
    }

    /// Create installer from config
    pub fn from_config(backend: B, config: &InstallerConfig) -> Result<Self> {
        let packages = config
            .packages
            .iter()
            .map(|spec| PackageSpec::parse(spec))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(backend, packages, config.upgrade))
    }

    #[must_use]
    pub fn packages(&self) -> &[PackageSpec] {
        &self.packages
    }

    /// Install every missing package, stopping at the first failure
    ///
    /// With `upgrade` set, every package is passed to the installer.
    pub async fn ensure_installed(&self) -> Result<InstallSummary> {
        let mut summary = InstallSummary::default();

        for spec in &self.packages {
            if !self.upgrade && self.backend.is_installed(&spec.module).await? {
                tracing::debug!("{} already importable as {}", spec.package, spec.module);
                summary.already_present.push(spec.package.clone());
                continue;
            }

            tracing::info!(
                "Installing {} via {}",
                spec.package,
                self.backend.backend_name()
            );

            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Installing {}...", spec.package));
            spinner.enable_steady_tick(Duration::from_millis(120));

            let result = self.backend.install(&spec.package, self.upgrade).await;
            spinner.finish_and_clear();
            result?;

            summary.installed.push(spec.package.clone());
        }

        Ok(summary)
    }
}
