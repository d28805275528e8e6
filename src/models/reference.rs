use crate::error::{FetchError, Result};

/// A remote model repository plus the credential used to reach it
#[derive(Clone, PartialEq, Eq)]
pub struct ModelReference {
    id: String,
    token: String,
}

impl std::fmt::Debug for ModelReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelReference")
            .field("id", &self.id)
            .field("token", &"***")
            .finish()
    }
}

impl ModelReference {
    /// Create a new reference, rejecting blank identifiers and tokens
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let id = id.into().trim().to_string();
        let token = token.into().trim().to_string();

        if id.is_empty() {
            return Err(FetchError::Other("Model identifier must not be empty".to_string()));
        }
        if token.is_empty() {
            return Err(FetchError::Other("Access token must not be empty".to_string()));
        }

        Ok(Self { id, token })
    }

    /// Repository identifier, e.g. `meta-llama/Meta-Llama-3-8B`
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Display for ModelReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_token() {
        let model = ModelReference::new("meta-llama/Meta-Llama-3-8B", "hf_secret").unwrap();
        let debug = format!("{model:?}");
        assert!(debug.contains("meta-llama/Meta-Llama-3-8B"));
        assert!(!debug.contains("hf_secret"));
    }

    #[test]
    fn test_display_is_id() {
        let model = ModelReference::new("org/model", "tok").unwrap();
        assert_eq!(model.to_string(), "org/model");
        assert_eq!(model.token(), "tok");
    }

    #[test]
    fn test_rejects_blank_values() {
        assert!(ModelReference::new("  ", "tok").is_err());
        assert!(ModelReference::new("org/model", "").is_err());
    }

    #[test]
    fn test_trims_whitespace() {
        let model = ModelReference::new(" org/model\n", " tok ").unwrap();
        assert_eq!(model.id(), "org/model");
        assert_eq!(model.token(), "tok");
    }
}
