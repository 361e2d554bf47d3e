// ── Uniform result of every network-facing operation ──
//
// Callers get exactly one of two shapes and never see a raw transport
// error. Serialized with a `status` tag so `--output json` prints the
// same envelope the dashboard works with internally.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Outcome of a call to the link service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The payload, discarding any error.
    pub fn data(self) -> Option<T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if this is the error variant.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success { data } => ApiResponse::Success { data: f(data) },
            Self::Error { message } => ApiResponse::Error { message },
        }
    }

    /// Back into `Result` land, for callers that want `?`.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Error { message } => Err(message),
        }
    }
}

impl<T> From<Result<T, linkdeck_api::Error>> for ApiResponse<T> {
    fn from(result: Result<T, linkdeck_api::Error>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(e) => Self::Error {
                message: e.user_message(),
            },
        }
    }
}

impl<T> From<Result<T, CoreError>> for ApiResponse<T> {
    fn from(result: Result<T, CoreError>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(e) => Self::Error {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_status_tag() {
        let ok: ApiResponse<u32> = ApiResponse::success(7);
        let err: ApiResponse<u32> = ApiResponse::error("Request failed");

        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "status": "success", "data": 7 })
        );
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "status": "error", "message": "Request failed" })
        );
    }

    #[test]
    fn api_errors_carry_user_message() {
        let result: Result<(), _> = Err(linkdeck_api::Error::Http {
            status: 400,
            message: "Slug already taken".into(),
        });
        let response = ApiResponse::from(result);
        assert_eq!(response.error_message(), Some("Slug already taken"));
        assert!(!response.is_success());
    }

    #[test]
    fn map_and_into_result() {
        let response = ApiResponse::success(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(response.into_result(), Ok(3));

        let failed: ApiResponse<u8> = ApiResponse::error("nope");
        assert_eq!(failed.map(u32::from).into_result(), Err("nope".to_string()));
    }
}
