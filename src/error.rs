use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported image url {0:?}")]
    UnsupportedUrl(String),

    #[error("blob {0} has been revoked")]
    RevokedBlob(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("invalid labels file {path}: {reason}")]
    Labels { path: PathBuf, reason: String },

    #[error("unexpected model output shape {0:?}")]
    OutputShape(Vec<usize>),

    #[error("model is not available")]
    ModelUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
