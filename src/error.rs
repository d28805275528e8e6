use thiserror::Error;

/// Main error type for model-fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/model-fetch/config.toml\n- Remove the file to fall back to defaults\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("Dependency installation failed: {0}\n\nTroubleshooting:\n- Is python3 installed and in PATH?\n- Set installer.python in config to pick an interpreter\n- Try installing manually: python3 -m pip install <package>\n- Set installer.enabled = false to skip this step")]
    Installer(String),

    #[error("Hub error: {0}")]
    Hub(#[from] HubError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors reported by the remote model hub
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Repository '{repo_id}' not found\n\nTroubleshooting:\n- Check the model identifier (owner/name)\n- Private repositories need a token with read access")]
    RepoNotFound { repo_id: String },

    #[error("Revision '{revision}' not found in repository '{repo_id}'")]
    RevisionNotFound { repo_id: String, revision: String },

    #[error("Repository '{repo_id}' is gated\n\nTroubleshooting:\n- Accept the model license on its Hugging Face page\n- Make sure the token belongs to the account that was granted access")]
    GatedRepo { repo_id: String },

    #[error("Hub request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Network error: {0}\n\nTroubleshooting:\n- Check internet connection\n- Verify hub.endpoint in config\n- Try increasing hub.timeout_secs in config")]
    Network(String),

    #[error("Invalid response from hub: {0}")]
    InvalidResponse(String),

    #[error("{file}: {message}")]
    Download { file: String, message: String },
}

impl HubError {
    /// Whether the repository (or the requested revision) does not exist
    /// from the point of view of the supplied credential.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RepoNotFound { .. } | Self::RevisionNotFound { .. } | Self::GatedRepo { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
