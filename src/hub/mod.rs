pub mod huggingface;

use crate::error::Result;
use crate::models::ModelReference;
use async_trait::async_trait;
use std::path::PathBuf;

pub use huggingface::HuggingFaceHub;

/// Unified interface for remote model repositories
#[async_trait]
pub trait ModelHub: Send + Sync {
    /// List every file path in the model repository, unfiltered
    ///
    /// # Errors
    /// Not-found conditions are reported as [`crate::error::HubError`]
    /// variants for which `is_not_found()` holds.
    async fn list_files(&self, model: &ModelReference) -> Result<Vec<String>>;

    /// Fetch one file into local storage and return its local path
    async fn download_file(&self, model: &ModelReference, file: &str) -> Result<PathBuf>;

    /// Get hub name for logging/debugging
    fn hub_name(&self) -> &str;
}
