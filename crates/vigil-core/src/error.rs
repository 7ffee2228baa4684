use std::path::PathBuf;

/// Errors that can occur across the Vigil pipeline.
///
/// Each variant wraps a specific failure domain. Library crates use this
/// type directly; the binary crate converts to a `miette` diagnostic at the
/// boundary. The three backend-facing variants keep "input malformed",
/// "backend rejected the request", and "backend unreachable" distinct so a
/// caller can judge retry-worthiness, even though this pipeline never
/// retries.
///
/// # Examples
///
/// ```
/// use vigil_core::VigilError;
///
/// let err = VigilError::Config("GEMINI_API_KEY is not set".into());
/// assert!(err.to_string().contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The scan report file does not exist.
    #[error("report file not found: {} (run the scanner first)", .0.display())]
    FileNotFound(PathBuf),

    /// The scan report exists but its content cannot be used.
    #[error("malformed report: {0}")]
    MalformedReport(String),

    /// The model backend received the request and refused it
    /// (bad key, exhausted quota, unusable response body).
    #[error("model backend rejected request: {0}")]
    BackendRejected(String),

    /// The model backend could not be reached at all.
    #[error("model backend unreachable: {0}")]
    BackendUnreachable(String),

    /// GitHub comment API failure.
    #[error("GitHub error: {0}")]
    GitHub(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VigilError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Transport-level failures are retryable; everything else either needs
    /// operator intervention or a different input.
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_core::VigilError;
    ///
    /// assert!(VigilError::BackendUnreachable("timed out".into()).retryable());
    /// assert!(!VigilError::BackendRejected("invalid key".into()).retryable());
    /// ```
    pub fn retryable(&self) -> bool {
        matches!(self, VigilError::BackendUnreachable(_))
    }
}
