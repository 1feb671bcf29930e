use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("{backend} backend error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("{backend} cannot open {}: {message}", .path.display())]
    Open {
        backend: &'static str,
        path: PathBuf,
        message: String,
    },
}

impl IoError {
    pub fn from_backend<E: std::error::Error>(backend: &'static str, err: E) -> Self {
        IoError::Backend {
            backend,
            message: err.to_string(),
        }
    }

    pub fn open<E: std::error::Error>(
        backend: &'static str,
        path: impl Into<PathBuf>,
        err: E,
    ) -> Self {
        IoError::Open {
            backend,
            path: path.into(),
            message: err.to_string(),
        }
    }
}
