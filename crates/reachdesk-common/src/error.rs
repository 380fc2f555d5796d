use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReachdeskError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by the backend through the response envelope.
    #[error("{0}")]
    Api(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Client-side validation failure, raised before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReachdeskError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReachdeskError::Cancelled)
    }

    /// Message suitable for showing to the operator.
    ///
    /// Server and validation messages are shown verbatim; everything else
    /// collapses to the generic fallback so internals never leak into the UI.
    pub fn user_message(&self) -> String {
        match self {
            ReachdeskError::Api(msg) | ReachdeskError::Validation(msg) => msg.clone(),
            _ => crate::envelope::GENERIC_FAILURE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReachdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_is_verbatim() {
        let err = ReachdeskError::Api("Brand is archived".to_string());
        assert_eq!(err.user_message(), "Brand is archived");
        assert_eq!(err.to_string(), "Brand is archived");
    }

    #[test]
    fn test_unexpected_errors_use_fallback() {
        let err = ReachdeskError::Status { status: 502, message: "bad gateway".into() };
        assert_eq!(err.user_message(), crate::envelope::GENERIC_FAILURE);

        let err = ReachdeskError::Other(anyhow::anyhow!("socket closed"));
        assert_eq!(err.user_message(), crate::envelope::GENERIC_FAILURE);
    }
}
