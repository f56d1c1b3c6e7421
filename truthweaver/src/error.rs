use thiserror::Error;

#[derive(Error, Debug)]
pub enum TruthWeaverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Transcription unavailable: {0}")]
    TranscriptionUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TruthWeaverError {
    /// Whether a transcription attempt that failed this way is worth repeating.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transcription(msg) => msg.starts_with("Server error") || msg.contains("timeout"),
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TruthWeaverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TruthWeaverError::Transcription("boom".to_string());
        assert_eq!(err.to_string(), "Transcription error: boom");

        let err = TruthWeaverError::Validation("bad input".to_string());
        assert_eq!(err.to_string(), "Validation error: bad input");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TruthWeaverError = io.into();
        assert!(matches!(err, TruthWeaverError::Io(_)));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(TruthWeaverError::Transcription("Server error (502): oops".to_string()).is_retryable());
        assert!(TruthWeaverError::Transcription("Request timeout".to_string()).is_retryable());
        assert!(!TruthWeaverError::Transcription("Authentication failed (401)".to_string())
            .is_retryable());
        assert!(!TruthWeaverError::Validation("x".to_string()).is_retryable());
    }
}
