pub mod fetch;
pub mod manifest;
pub mod reference;

pub use fetch::{DownloadReport, FetchFailure, FetchOutcome, FetchPhase, ModelFetcher};
pub use manifest::{FileManifest, RECOGNIZED_EXTENSIONS};
pub use reference::ModelReference;
