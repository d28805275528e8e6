/// File suffixes selected for download by default
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[".json", ".model", ".safetensors", ".bin"];

/// Remote files selected for download, in listing order
///
/// Every entry ends with one of the suffixes the manifest was filtered with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileManifest {
    files: Vec<String>,
}

impl FileManifest {
    /// Build a manifest from a raw listing, keeping only recognized files
    #[must_use]
    pub fn from_listing<S: AsRef<str>>(listing: Vec<String>, extensions: &[S]) -> Self {
        let mut files = listing;
        files.retain(|file| has_recognized_extension(file, extensions));
        Self { files }
    }

    /// Build a manifest using [`RECOGNIZED_EXTENSIONS`]
    #[must_use]
    pub fn with_default_extensions(listing: Vec<String>) -> Self {
        Self::from_listing(listing, RECOGNIZED_EXTENSIONS)
    }

    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }
}

/// Check a remote path against a suffix set (case-sensitive, like the hub)
///
/// Blank suffixes never match.
#[must_use]
pub fn has_recognized_extension<S: AsRef<str>>(file: &str, extensions: &[S]) -> bool {
    extensions.iter().any(|ext| {
        let ext = ext.as_ref().trim();
        !ext.is_empty() && file.ends_with(ext)
    })
}

/// Whether a configured suffix is usable for filtering, e.g. `.safetensors`
#[must_use]
pub fn is_valid_extension(ext: &str) -> bool {
    let ext = ext.trim();
    ext.len() > 1 && ext.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| (*f).to_string()).collect()
    }

    #[test]
    fn test_filters_readme() {
        let manifest = FileManifest::with_default_extensions(listing(&[
            "config.json",
            "model.safetensors",
            "tokenizer.model",
            "README.md",
        ]));
        assert_eq!(
            manifest.files(),
            &["config.json", "model.safetensors", "tokenizer.model"]
        );
    }

    #[test]
    fn test_keeps_listing_order_and_nested_paths() {
        let manifest = FileManifest::with_default_extensions(listing(&[
            ".gitattributes",
            "original/params.json",
            "pytorch_model-00002-of-00002.bin",
            "LICENSE",
            "pytorch_model-00001-of-00002.bin",
            "original/consolidated.00.pth",
        ]));
        assert_eq!(
            manifest.files(),
            &[
                "original/params.json",
                "pytorch_model-00002-of-00002.bin",
                "pytorch_model-00001-of-00002.bin",
            ]
        );
    }

    #[test]
    fn test_suffix_not_substring() {
        assert!(!has_recognized_extension("model.safetensors.index", RECOGNIZED_EXTENSIONS));
        assert!(!has_recognized_extension("json", RECOGNIZED_EXTENSIONS));
        assert!(!has_recognized_extension("weights.BIN", RECOGNIZED_EXTENSIONS));
        assert!(has_recognized_extension(
            "model.safetensors.index.json",
            RECOGNIZED_EXTENSIONS
        ));
    }

    #[test]
    fn test_custom_extensions() {
        let manifest = FileManifest::from_listing(
            listing(&["model.gguf", "config.json", "README.md"]),
            &[".gguf"],
        );
        assert_eq!(manifest.files(), &["model.gguf"]);
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_blank_extension_matches_nothing() {
        let manifest =
            FileManifest::from_listing(listing(&["README.md", "LICENSE"]), &["", "  "]);
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_is_valid_extension() {
        assert!(is_valid_extension(".json"));
        assert!(is_valid_extension(" .bin "));
        assert!(!is_valid_extension(""));
        assert!(!is_valid_extension("   "));
        assert!(!is_valid_extension("."));
        assert!(!is_valid_extension("json"));
    }

    #[test]
    fn test_empty_listing() {
        let manifest = FileManifest::with_default_extensions(Vec::new());
        assert!(manifest.is_empty());
        assert_eq!(manifest.iter().count(), 0);
    }
}
