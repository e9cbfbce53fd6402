use std::fmt;

#[derive(Debug)]
pub enum AIServiceError {
    ApiError(String),
    ParseError(String),
}

impl fmt::Display for AIServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AIServiceError::ApiError(msg) => write!(f, "API error: {}", msg),
            AIServiceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AIServiceError {}

impl From<AIServiceError> for shared::Error {
    fn from(err: AIServiceError) -> Self {
        shared::Error::AnalysisService(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AIServiceError>;
