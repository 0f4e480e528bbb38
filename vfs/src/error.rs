/// Errors that can occur while reading assets through a provider.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// The requested path was not found in the provider.
    #[error("not found: {0}")]
    NotFound(String),
    /// An IO error occurred while accessing a provider.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// The path is invalid (empty, escapes the provider root, or other
    /// normalization failure).
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            VfsError::NotFound(err.to_string())
        } else {
            VfsError::Io(err)
        }
    }
}

impl VfsError {
    /// Whether this error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }
}
