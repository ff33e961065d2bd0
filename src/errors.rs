use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid pattern for rule '{id}': {source}")]
    InvalidPattern {
        id: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl PatchError {
    /// Underlying I/O error kind, if this error came from the filesystem.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            PatchError::Read { source, .. } | PatchError::Write { source, .. } => {
                Some(source.kind())
            }
            PatchError::Decode { .. } | PatchError::InvalidPattern { .. } => None,
        }
    }
}
