//! Error types for the SF20K core library.

/// Errors that can occur while loading, validating, or fetching SF20K data.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Record validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// I/O error (file operations, process spawning, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP error talking to the dataset host
    #[error("HTTP error: {message}")]
    Http {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A single video could not be downloaded
    #[error("Download of {video_id} failed: {message}")]
    Download {
        /// Video that failed
        video_id: String,
        /// Downloader diagnostic
        message: String,
    },

    /// External tool is not installed or not on PATH
    #[error("Required tool not found: {tool}")]
    ToolNotFound {
        /// Program name or path that could not be executed
        tool: String,
    },

    /// Operation timeout
    #[error("Operation timed out after {seconds}s")]
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },
}

/// Convenience `Result` type alias for SF20K operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Network failures, transient I/O problems, and individual download
    /// failures may succeed on a later attempt. Bad records and bad
    /// configuration will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http { .. } => true,
            Error::Io(_) => true,
            Error::Download { .. } => true,
            Error::Timeout { .. } => true,
            Error::Validation { .. } => false,
            Error::Serialization(_) => false,
            Error::Csv(_) => false,
            Error::Config { .. } => false,
            Error::ToolNotFound { .. } => false,
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new HTTP error with a message.
    pub fn http<S: Into<String>>(message: S) -> Self {
        Error::Http {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new HTTP error with a message and source error.
    pub fn http_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Http {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new download error for a video.
    pub fn download<V, M>(video_id: V, message: M) -> Self
    where
        V: Into<String>,
        M: Into<String>,
    {
        Error::Download {
            video_id: video_id.into(),
            message: message.into(),
        }
    }
}
