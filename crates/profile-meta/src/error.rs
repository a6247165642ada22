//! Error types for profile-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} profile document at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported profile document format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Profile document too large: {path} is {size} bytes (max {max})")]
    ConfigTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Invalid profile document: {message}")]
    InvalidDocument { message: String },

    #[error("Invalid {profile}: {source}")]
    InvalidProfile {
        profile: String,
        #[source]
        source: profile_core::Error,
    },

    #[error("In profile document {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid duration literal: {literal:?}")]
    InvalidDuration { literal: String },

    #[error("Invalid scope selector: {selector:?}")]
    InvalidSelector { selector: String },

    #[error(transparent)]
    Core(#[from] profile_core::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, looking through [`Error::Document`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Document { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}
