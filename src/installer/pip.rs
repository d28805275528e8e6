use crate::error::{FetchError, Result};
use crate::installer::PackageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

#[cfg(target_os = "windows")]
const PYTHON_CANDIDATES: &[&str] = &["python"];

#[cfg(not(target_os = "windows"))]
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Installs packages with `python -m pip` into the interpreter's environment
#[derive(Debug, Clone)]
pub struct PipBackend {
    python: PathBuf,
}

impl PipBackend {
    /// Use the given interpreter, or the first Python found in PATH
    ///
    /// # Errors
    /// - Returns error if no interpreter is configured and none is in PATH
    /// - Returns error if the configured interpreter does not exist
    pub fn new(python: Option<&Path>) -> Result<Self> {
        let python = match python {
            Some(path) if path.exists() => path.to_path_buf(),
            Some(path) => which::which(path).map_err(|_| {
                FetchError::Installer(format!("Python interpreter not found: {}", path.display()))
            })?,
            None => find_python()?,
        };

        tracing::debug!("Using Python interpreter {}", python.display());
        Ok(Self { python })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.python);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// First of `python3`/`python` found in PATH
pub fn find_python() -> Result<PathBuf> {
    PYTHON_CANDIDATES
        .iter()
        .find_map(|candidate| which::which(candidate).ok())
        .ok_or_else(|| {
            FetchError::Installer(format!(
                "Python not found in PATH (tried: {})",
                PYTHON_CANDIDATES.join(", ")
            ))
        })
}

#[async_trait]
impl PackageBackend for PipBackend {
    async fn is_installed(&self, module: &str) -> Result<bool> {
        let status = self
            .command()
            .arg("-c")
            .arg(format!("import {module}"))
            .status()
            .await
            .map_err(|e| {
                FetchError::Installer(format!(
                    "Failed to run {}: {e}",
                    self.python.display()
                ))
            })?;

        Ok(status.success())
    }

    async fn install(&self, package: &str, upgrade: bool) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["-m", "pip", "install", "--quiet"]);
        if upgrade {
            cmd.arg("--upgrade");
        }
        cmd.arg(package);

        let status = cmd.status().await.map_err(|e| {
            FetchError::Installer(format!("Failed to run pip for {package}: {e}"))
        })?;

        if !status.success() {
            return Err(FetchError::Installer(format!(
                "pip install {package} exited with {status}"
            )));
        }

        Ok(())
    }

    fn backend_name(&self) -> &str {
        "pip"
    }
}
