use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Upstream API request failed: {status}")]
    UpstreamHttp { status: u16 },

    #[error("Upstream API request timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream network error: {0}")]
    UpstreamNetwork(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Analysis service error: {0}")]
    AnalysisService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Timeouts and transport failures are worth another attempt; everything
    /// else (HTTP status errors included) is final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::UpstreamTimeout(_) | Error::UpstreamNetwork(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_errors_are_retryable() {
        assert!(Error::UpstreamTimeout("10s".to_string()).is_retryable());
        assert!(Error::UpstreamNetwork("connection refused".to_string()).is_retryable());
        assert!(!Error::UpstreamHttp { status: 503 }.is_retryable());
        assert!(!Error::Parse("bad json".to_string()).is_retryable());
        assert!(!Error::Validation("missing".to_string()).is_retryable());
    }

    #[test]
    fn test_http_error_display_carries_status() {
        let err = Error::UpstreamHttp { status: 404 };
        assert_eq!(err.to_string(), "Upstream API request failed: 404");
    }
}
