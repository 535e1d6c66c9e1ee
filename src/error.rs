use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem failures from the writer, passed through as-is.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to serialize schema: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid settings file ({}) at JSON path {path}: {message}", .source_path.display())]
    Settings {
        source_path: PathBuf,
        path: String,
        message: String,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
