use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings file {}: {reason}", .path.display())]
    Settings { path: PathBuf, reason: String },

    #[error("invalid authorization header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("path has no file name: {}", .0.display())]
    InvalidFileName(PathBuf),
}
