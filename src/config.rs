use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_CAPTURED_SERVICE_URL: &str = "http://localhost:8124/sse";

/// Explicit configuration handed to `ApiClient::new` — no process-wide
/// mutable default.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the backend REST API.
    pub base_url: String,
    /// MCP endpoint of the capture/replay service, forwarded in start/replay
    /// request bodies.
    pub captured_service_url: String,
}

impl DashboardConfig {
    pub fn new(base_url: impl Into<String>, captured_service_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            captured_service_url: captured_service_url.into(),
        }
    }

    /// Load from the environment (`.env` honored via dotenvy).
    ///
    /// `FLOWDECK_API_BASE_URL` and `FLOWDECK_CAPTURED_SERVICE_URL`, falling
    /// back to the local-dev defaults.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("FLOWDECK_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let captured_service_url = std::env::var("FLOWDECK_CAPTURED_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_CAPTURED_SERVICE_URL.to_string());

        url::Url::parse(&base_url)
            .map_err(|e| AppError::Config(format!("invalid FLOWDECK_API_BASE_URL: {e}")))?;

        Ok(Self::new(base_url, captured_service_url))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_CAPTURED_SERVICE_URL)
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}
