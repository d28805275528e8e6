use crate::config::schema::{FetchConfig, HubConfig};
use crate::error::{FetchError, HubError, Result};
use crate::hub::ModelHub;
use crate::models::ModelReference;
use async_trait::async_trait;
use hf_hub::api::tokio::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Header the hub uses to say why a request failed
const ERROR_CODE_HEADER: &str = "x-error-code";

#[derive(Debug, Deserialize)]
struct RepoInfoResponse {
    siblings: Vec<Sibling>,
}

#[derive(Debug, Deserialize)]
struct Sibling {
    rfilename: String,
}

/// Hugging Face Hub backend
///
/// Listing goes through the JSON model API directly so that not-found
/// responses can be told apart; file downloads go through `hf-hub`, which
/// lays files out in the shared Hugging Face cache.
pub struct HuggingFaceHub {
    client: reqwest::Client,
    endpoint: String,
    revision: String,
    cache_dir: Option<PathBuf>,
    timeout: Duration,
    progress: bool,
    force_download: bool,
}

impl std::fmt::Debug for HuggingFaceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceHub")
            .field("client", &"Client { ... }")
            .field("endpoint", &self.endpoint)
            .field("revision", &self.revision)
            .field("cache_dir", &self.cache_dir)
            .field("timeout", &self.timeout)
            .field("force_download", &self.force_download)
            .finish_non_exhaustive()
    }
}

impl HuggingFaceHub {
    /// Create new hub backend from config
    #[must_use]
    pub fn new(hub: &HubConfig, fetch: &FetchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: hub.endpoint.trim_end_matches('/').to_string(),
            revision: hub.revision.clone(),
            cache_dir: hub.cache_dir.clone(),
            timeout: Duration::from_secs(hub.timeout_secs),
            progress: hub.progress,
            force_download: fetch.force_download,
        }
    }

    /// Model info URL for the configured revision
    #[must_use]
    pub fn info_url(&self, repo_id: &str) -> String {
        format!(
            "{}/api/models/{}/revision/{}",
            self.endpoint,
            repo_id,
            self.revision.replace('/', "%2F")
        )
    }

    fn classify_failure(
        &self,
        status: StatusCode,
        error_code: Option<&str>,
        repo_id: &str,
        url: &str,
    ) -> HubError {
        match error_code {
            Some("RevisionNotFound") => HubError::RevisionNotFound {
                repo_id: repo_id.to_string(),
                revision: self.revision.clone(),
            },
            Some("GatedRepo") => HubError::GatedRepo {
                repo_id: repo_id.to_string(),
            },
            Some("RepoNotFound") => HubError::RepoNotFound {
                repo_id: repo_id.to_string(),
            },
            // The hub answers 401 for private or missing repos alike
            _ if status == StatusCode::NOT_FOUND || status == StatusCode::UNAUTHORIZED => {
                HubError::RepoNotFound {
                    repo_id: repo_id.to_string(),
                }
            }
            _ => HubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
        }
    }

    fn api(&self, model: &ModelReference) -> Result<Api> {
        let mut builder = ApiBuilder::new()
            .with_token(Some(model.token().to_string()))
            .with_endpoint(self.endpoint.clone())
            .with_progress(self.progress);

        if let Some(cache_dir) = &self.cache_dir {
            builder = builder.with_cache_dir(cache_dir.clone());
        }

        builder
            .build()
            .map_err(|e| FetchError::Other(format!("Failed to initialize HuggingFace API: {e}")))
    }
}

#[async_trait]
impl ModelHub for HuggingFaceHub {
    async fn list_files(&self, model: &ModelReference) -> Result<Vec<String>> {
        let url = self.info_url(model.id());
        tracing::debug!("Listing files: GET {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(model.token())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HubError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_code = response
                .headers()
                .get(ERROR_CODE_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let err = self.classify_failure(status, error_code.as_deref(), model.id(), &url);
            tracing::debug!("Listing {} failed with {status}: {err}", model.id());
            return Err(err.into());
        }

        let info: RepoInfoResponse = response
            .json()
            .await
            .map_err(|e| HubError::InvalidResponse(e.to_string()))?;

        Ok(info.siblings.into_iter().map(|s| s.rfilename).collect())
    }

    async fn download_file(&self, model: &ModelReference, file: &str) -> Result<PathBuf> {
        let api = self.api(model)?;
        let repo = api.repo(Repo::with_revision(
            model.id().to_string(),
            RepoType::Model,
            self.revision.clone(),
        ));

        let downloaded = if self.force_download {
            repo.download(file).await
        } else {
            repo.get(file).await
        };

        let path = downloaded.map_err(|e| HubError::Download {
            file: file.to_string(),
            message: e.to_string(),
        })?;

        Ok(path)
    }

    fn hub_name(&self) -> &str {
        "huggingface"
    }
}
