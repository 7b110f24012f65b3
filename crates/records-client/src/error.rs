//! Failures surfaced by [`RecordsClient`](crate::RecordsClient) calls.

use serde::Deserialize;
use serde_json::Value;

/// Error envelope returned by the API for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Stable snake_case error identifier, e.g. `not_found`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[serde(default)]
    pub trace_id: Option<String>,
    /// Structured context such as the offending field.
    #[serde(default)]
    pub details: Option<Value>,
}

impl ApiErrorBody {
    /// Field named by a validation failure, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str)
    }
}

/// Errors raised while talking to the API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid API URL `{url}`: {message}")]
    InvalidUrl {
        /// URL as supplied.
        url: String,
        /// Parser message.
        message: String,
    },
    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        /// Transport error text.
        message: String,
    },
    /// The API answered with an error status.
    #[error("{status}: {}", .body.message)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Decoded error envelope.
        body: ApiErrorBody,
    },
    /// A response body did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
}

impl ClientError {
    pub(crate) fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    pub(crate) fn transport(error: &reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Text shown to a person: the API message when there is one.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { body, .. } => body.message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn envelope_exposes_the_field() {
        let body: ApiErrorBody = serde_json::from_value(json!({
            "code": "invalid_request",
            "message": "Invalid or missing name",
            "traceId": "00000000-0000-0000-0000-000000000000",
            "details": {"field": "name", "code": "invalid_type"},
        }))
        .expect("envelope");

        assert_eq!(body.field(), Some("name"));
        assert_eq!(
            body.trace_id.as_deref(),
            Some("00000000-0000-0000-0000-000000000000")
        );
    }

    #[rstest]
    fn api_errors_show_the_server_message() {
        let err = ClientError::Api {
            status: 404,
            body: ApiErrorBody {
                code: "not_found".to_owned(),
                message: "Student 1 not found".to_owned(),
                trace_id: None,
                details: None,
            },
        };

        assert_eq!(err.user_message(), "Student 1 not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "404: Student 1 not found");
    }
}
