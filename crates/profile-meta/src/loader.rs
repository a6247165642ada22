//! Loading profile documents from disk
//!
//! Documents may be TOML, JSON or YAML; the format is detected from the file
//! extension. A directory of documents is loaded in file-name order:
//!
//! ```text
//! profiles/
//!   00-global.toml
//!   10-payment.yaml
//!   20-payment-staging.json
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use profile_core::{Profile, ScopeRegistry};

use crate::config::LoaderConfig;
use crate::schema::ProfileSetDocument;
use crate::{Error, Result};

/// Serialization format of a profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Toml,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "toml" => Some(DocumentFormat::Toml),
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Toml => write!(f, "TOML"),
            DocumentFormat::Json => write!(f, "JSON"),
            DocumentFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Loads profiles from documents, building scopes through a [`ScopeRegistry`].
#[derive(Debug, Clone)]
pub struct ProfileLoader {
    registry: ScopeRegistry,
    config: LoaderConfig,
}

impl Default for ProfileLoader {
    fn default() -> Self {
        Self::new(ScopeRegistry::with_builtins())
    }
}

impl ProfileLoader {
    /// Create a loader with default settings.
    pub fn new(registry: ScopeRegistry) -> Self {
        Self::with_config(registry, LoaderConfig::default())
    }

    /// Create a loader with custom settings.
    pub fn with_config(registry: ScopeRegistry, config: LoaderConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ScopeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Parse profiles from an in-memory document.
    pub fn parse_str(&self, content: &str, format: DocumentFormat) -> Result<Vec<Profile>> {
        self.parse_document(content, format, Path::new("<inline>"))?
            .build(&self.registry)
    }

    /// Load every profile from one document.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] for unknown extensions
    /// - [`Error::ConfigTooLarge`] when the file exceeds
    ///   [`LoaderConfig::max_file_size`]
    /// - [`Error::Parse`] for malformed documents
    /// - [`Error::Document`] wrapping the reason a well-formed document holds
    ///   invalid scopes, keys or values
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<Profile>> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;

        let size = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
        if size > self.config.max_file_size {
            return Err(Error::ConfigTooLarge {
                path: path.to_path_buf(),
                size,
                max: self.config.max_file_size,
            });
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let profiles = self
            .parse_document(&content, format, path)?
            .build(&self.registry)
            .map_err(|source| Error::Document {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;
        tracing::debug!(path = %path.display(), %format, profiles = profiles.len(), "Loaded profile document");
        Ok(profiles)
    }

    /// Load every supported document in a directory, in file-name order.
    ///
    /// Files with other extensions and subdirectories are skipped. A missing
    /// directory yields no profiles.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<Profile>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "No profile directory found, skipping");
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let path = entry.map_err(|e| Error::io(dir, e))?.path();
            let supported = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(DocumentFormat::from_extension)
                    .is_some();
            if supported {
                paths.push(path);
            } else {
                tracing::debug!(path = %path.display(), "Skipping non-profile entry");
            }
        }
        paths.sort();

        let mut profiles = Vec::new();
        for path in &paths {
            profiles.extend(self.load_file(path)?);
        }
        Ok(profiles)
    }

    fn parse_document(
        &self,
        content: &str,
        format: DocumentFormat,
        origin: &Path,
    ) -> Result<ProfileSetDocument> {
        let parse_error = |message: String| Error::Parse {
            path: origin.to_path_buf(),
            format: format.to_string(),
            message,
        };

        match format {
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
            DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("TOML"), Some(DocumentFormat::Toml));
        assert_eq!(DocumentFormat::from_extension("yml"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_parse_str_json() {
        let loader = ProfileLoader::default();
        let profiles = loader
            .parse_str(
                r#"{"profiles": [{"scope": {"type": "api", "value": "payment"}, "values": {"retries": 3}}]}"#,
                DocumentFormat::Json,
            )
            .unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].scope().to_string(), "api:payment");
    }

    #[test]
    fn test_parse_error_names_format() {
        let loader = ProfileLoader::default();
        let err = loader.parse_str("profiles = [", DocumentFormat::Toml).unwrap_err();
        assert!(matches!(err, Error::Parse { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_load_dir_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ProfileLoader::default();
        let profiles = loader.load_dir(temp_dir.path().join("absent")).unwrap();
        assert!(profiles.is_empty());
    }

    #[test]
    fn test_load_file_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.ini");
        fs::write(&path, "").unwrap();

        let err = ProfileLoader::default().load_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
    }
}
