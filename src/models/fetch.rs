use crate::error::{FetchError, HubError, Result};
use crate::hub::ModelHub;
use crate::models::manifest::FileManifest;
use crate::models::reference::ModelReference;
use std::fs;
use std::path::PathBuf;

/// Where a fetch run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Listing,
    Downloading,
    Done,
    Failed,
}

/// A file that reached local storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// A file whose download failed, with the error text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

/// Per-file outcome of a download batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: Vec<DownloadedFile>,
    pub failed: Vec<FailedFile>,
}

impl DownloadReport {
    /// Total bytes of the files that were downloaded
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.downloaded.iter().map(|f| f.size_bytes).sum()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// One-line summary, e.g. `3 downloaded (1.50 GB), 1 failed`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} downloaded ({})",
            self.downloaded.len(),
            format_bytes(self.total_bytes())
        );
        if self.has_failures() {
            summary.push_str(&format!(", {} failed", self.failed.len()));
        }
        summary
    }
}

/// Why a fetch stopped before downloading anything
#[derive(Debug)]
pub enum FetchFailure {
    /// The repository or revision does not exist for this credential
    NotFound(HubError),
    /// The listing had no file with a recognized suffix
    EmptyManifest,
}

/// Result of a complete list-then-download run
#[derive(Debug)]
pub enum FetchOutcome {
    Completed(DownloadReport),
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// True whenever listing succeeded, even if individual downloads failed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    #[must_use]
    pub const fn report(&self) -> Option<&DownloadReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Failed(_) => None,
        }
    }
}

/// Lists a model repository and downloads its recognized files, one at a time
pub struct ModelFetcher<H: ModelHub> {
    hub: H,
    extensions: Vec<String>,
    phase: FetchPhase,
}

impl<H: ModelHub> ModelFetcher<H> {
    /// Create a fetcher that keeps files ending with one of `extensions`
    pub fn new(hub: H, extensions: Vec<String>) -> Self {
        Self {
            hub,
            extensions,
            phase: FetchPhase::Idle,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    #[must_use]
    pub const fn hub(&self) -> &H {
        &self.hub
    }

    /// List the repository and filter it down to recognized files
    ///
    /// # Errors
    /// Returns the hub error unchanged. For not-found errors a diagnostic
    /// is printed first.
    pub async fn list_files(&self, model: &ModelReference) -> Result<FileManifest> {
        match self.hub.list_files(model).await {
            Ok(listing) => {
                let total = listing.len();
                let manifest = FileManifest::from_listing(listing, &self.extensions);
                tracing::info!(
                    "{}: {} of {total} files selected from {}",
                    model.id(),
                    manifest.len(),
                    self.hub.hub_name()
                );
                Ok(manifest)
            }
            Err(FetchError::Hub(e)) if e.is_not_found() => {
                tracing::debug!("Listing {} failed: {e}", model.id());
                println!("{}", not_found_message(model));
                Err(e.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Download every manifest entry, continuing past individual failures
    pub async fn download_all(
        &self,
        manifest: &FileManifest,
        model: &ModelReference,
    ) -> DownloadReport {
        let mut report = DownloadReport::default();

        for file in manifest.iter() {
            match self.hub.download_file(model, file).await {
                Ok(path) => {
                    let size_bytes = fs::metadata(&path).map_or(0, |m| m.len());
                    tracing::debug!("{file} -> {} ({size_bytes} bytes)", path.display());
                    println!("Downloaded: {file}");
                    report.downloaded.push(DownloadedFile {
                        file: file.to_string(),
                        path,
                        size_bytes,
                    });
                }
                Err(e) => {
                    let error = match e {
                        FetchError::Hub(HubError::Download { message, .. }) => message,
                        other => other.to_string(),
                    };
                    tracing::warn!("Download of {file} failed: {error}");
                    println!("Error downloading {file}: {error}");
                    report.failed.push(FailedFile {
                        file: file.to_string(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// List, then download
    ///
    /// Not-found and empty listings end in [`FetchOutcome::Failed`] with no
    /// download attempted. Any other listing error is returned as `Err`.
    /// Per-file failures do not change the outcome; they are in the report.
    pub async fn fetch(&mut self, model: &ModelReference) -> Result<FetchOutcome> {
        self.transition(FetchPhase::Listing);

        let manifest = match self.list_files(model).await {
            Ok(manifest) => manifest,
            Err(FetchError::Hub(e)) if e.is_not_found() => {
                self.transition(FetchPhase::Failed);
                return Ok(FetchOutcome::Failed(FetchFailure::NotFound(e)));
            }
            Err(e) => {
                self.transition(FetchPhase::Failed);
                return Err(e);
            }
        };

        if manifest.is_empty() {
            tracing::debug!(
                "No files ending in {} found for {}",
                self.extensions.join(", "),
                model.id()
            );
            println!("{}", not_found_message(model));
            self.transition(FetchPhase::Failed);
            return Ok(FetchOutcome::Failed(FetchFailure::EmptyManifest));
        }

        self.transition(FetchPhase::Downloading);
        let report = self.download_all(&manifest, model).await;
        tracing::info!("{}: {}", model.id(), report.summary());

        self.transition(FetchPhase::Done);
        Ok(FetchOutcome::Completed(report))
    }

    fn transition(&mut self, next: FetchPhase) {
        tracing::debug!("Fetch phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// Diagnostic printed when a model has nothing to download
#[must_use]
pub fn not_found_message(model: &ModelReference) -> String {
    format!("Error: Could not find repository or files for {}", model.id())
}

/// Format bytes as human-readable string
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(1_610_612_736), "1.50 GB");
    }

    #[test]
    fn test_not_found_message() {
        let model = ModelReference::new("does-not-exist/model", "tok").unwrap();
        assert_eq!(
            not_found_message(&model),
            "Error: Could not find repository or files for does-not-exist/model"
        );
    }

    #[test]
    fn test_report_summary() {
        let mut report = DownloadReport::default();
        assert_eq!(report.summary(), "0 downloaded (0 B)");

        report.downloaded.push(DownloadedFile {
            file: "config.json".to_string(),
            path: PathBuf::from("/tmp/config.json"),
            size_bytes: 2048,
        });
        report.failed.push(FailedFile {
            file: "model.safetensors".to_string(),
            error: "timed out".to_string(),
        });
        assert_eq!(report.total_bytes(), 2048);
        assert!(report.has_failures());
        assert_eq!(report.summary(), "1 downloaded (2.00 KB), 1 failed");
    }

    #[test]
    fn test_outcome_success_ignores_file_failures() {
        let report = DownloadReport {
            downloaded: Vec::new(),
            failed: vec![FailedFile {
                file: "model.bin".to_string(),
                error: "boom".to_string(),
            }],
        };
        let outcome = FetchOutcome::Completed(report);
        assert!(outcome.is_success());
        assert_eq!(outcome.report().map(|r| r.failed.len()), Some(1));

        let failed = FetchOutcome::Failed(FetchFailure::EmptyManifest);
        assert!(!failed.is_success());
        assert!(failed.report().is_none());
    }
}
