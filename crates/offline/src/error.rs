use std::fmt;

/// Failures of the service-worker lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwError {
    /// A precache asset could not be fetched; install is abandoned.
    Precache { url: String, reason: String },
    /// The network request failed and nothing was cached.
    Network { url: String, reason: String },
    /// A lifecycle step was called out of order.
    InvalidPhase { expected: &'static str, actual: &'static str },
}

impl fmt::Display for SwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwError::Precache { url, reason } => write!(f, "precache of {url} failed: {reason}"),
            SwError::Network { url, reason } => write!(f, "fetch of {url} failed: {reason}"),
            SwError::InvalidPhase { expected, actual } => {
                write!(f, "expected phase {expected}, found {actual}")
            }
        }
    }
}

impl std::error::Error for SwError {}
