/// Error types for the gallery
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// Non-success HTTP status for a fetched resource
    #[error("Failed to load {resource} ({status})")]
    Status { resource: String, status: u16 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid asset url: {0}")]
    Url(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("window error: {0}")]
    Gui(#[from] iced::Error),
}

impl GalleryError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        GalleryError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
