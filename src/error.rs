use serde::Serialize;

/// Crate-wide error type. Every fallible function returns `Result<T, AppError>`.
/// Serializes cleanly so the rendering layer gets structured error messages.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Non-2xx response from the backend, with the response body text.
    #[error("API {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure before any HTTP status was received.
    #[error("Network error: {0}")]
    Network(String),

    /// A capture payload whose root is not a JSON object. Distinct from a
    /// well-formed capture with zero pages, which is not an error at all.
    #[error("Invalid capture payload: {0}")]
    InvalidCapture(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

/// The rendering layer wants `{ error: "...", kind: "..." }` for toasts and
/// section-level error states.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("AppError", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field(
            "kind",
            match self {
                AppError::Api { .. } => "api",
                AppError::Network(_) => "network",
                AppError::InvalidCapture(_) => "invalid_capture",
                AppError::Serde(_) => "serde",
                AppError::Validation(_) => "validation",
                AppError::Config(_) => "config",
            },
        )?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status_and_body() {
        let err = AppError::Api {
            status: 502,
            body: "upstream unavailable".into(),
        };
        assert_eq!(err.to_string(), "API 502: upstream unavailable");
    }

    #[test]
    fn test_serializes_with_kind() {
        let err = AppError::InvalidCapture("root is null".into());
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["kind"], "invalid_capture");
        assert!(v["error"].as_str().unwrap().contains("root is null"));
    }
}
