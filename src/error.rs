/// Error types for the terminology-controlled translation pipeline
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TcError {
    /// Unresolvable domain/language pair or an unconfigured terminology store.
    /// Fatal to the call; never worth retrying.
    Configuration(String),
    /// The external engine call exceeded its time bound. Reported separately
    /// from transport failures so callers can decide to retry.
    EngineTimeout(Duration),
    /// Network/transport failure while calling the external engine.
    EngineCommunication(String),
    /// The engine answered, but the payload was malformed or empty.
    EngineResponse(String),
}

impl std::fmt::Display for TcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TcError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            TcError::EngineTimeout(limit) if limit.is_zero() => {
                // reqwest-side timeout, whose bound is not visible here
                write!(f, "Translation engine timed out")
            }
            TcError::EngineTimeout(limit) => {
                write!(f, "Translation engine timed out after {:?}", limit)
            }
            TcError::EngineCommunication(msg) => {
                write!(f, "Translation engine communication error: {}", msg)
            }
            TcError::EngineResponse(msg) => {
                write!(f, "Translation engine response error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TcError {}

impl From<reqwest::Error> for TcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest's own per-request timeout; the bridge applies its bound separately
            TcError::EngineTimeout(Duration::ZERO)
        } else if err.is_decode() {
            TcError::EngineResponse(err.to_string())
        } else {
            TcError::EngineCommunication(err.to_string())
        }
    }
}

/// Result type for pipeline operations
pub type TcResult<T> = Result<T, TcError>;
