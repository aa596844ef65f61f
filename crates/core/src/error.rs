use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Cannot classify path {path:?}: {reason}")]
    Classification { path: String, reason: String },
    #[error("Package not found: {0}")]
    PackageNotFound(String),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Cannot read archive {path:?}: {source}")]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("Cannot decode {path} as {encoding}")]
    Encoding { path: String, encoding: &'static str },
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResourceError {
    pub(crate) fn classification(path: &str, reason: impl Into<String>) -> Self {
        ResourceError::Classification {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResourceError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        ResourceError::ArchiveRead {
            path: path.into(),
            source,
        }
    }

    /// True for the absence variants (`PackageNotFound`, `FileNotFound`).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResourceError::PackageNotFound(_) | ResourceError::FileNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
