//! The uniform response envelope returned by every backend endpoint:
//! `{ "success": true, "data": T }` or `{ "success": false, "error": "..." }`.

use serde::{Deserialize, Serialize};

use crate::error::{ReachdeskError, Result};

/// Shown when the backend fails without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }

    /// Unwrap the payload. A success without data counts as a failure.
    pub fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ReachdeskError::Api(GENERIC_FAILURE.to_string())),
            (false, _) => Err(failure_error(self.error)),
        }
    }

    /// Acknowledge a call whose payload is irrelevant.
    pub fn into_ack(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(failure_error(self.error))
        }
    }
}

fn failure_error(message: Option<String>) -> ReachdeskError {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    ReachdeskError::Api(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_data() {
        let env: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(env.into_data().unwrap(), 7);
    }

    #[test]
    fn test_failure_keeps_server_message() {
        let env: ApiEnvelope<u32> =
            serde_json::from_str(r#"{"success":false,"error":"Title already used"}"#).unwrap();
        let err = env.into_data().unwrap_err();
        assert_eq!(err.user_message(), "Title already used");
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let env: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(env.into_data().unwrap_err().user_message(), GENERIC_FAILURE);

        let env: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":false,"error":""}"#).unwrap();
        assert_eq!(env.into_ack().unwrap_err().user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_success_without_data() {
        let env: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.clone().into_data().is_err());
        assert!(env.into_ack().is_ok());
    }
}
