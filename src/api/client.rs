use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::types::*;
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::validation;

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client wrapping the QA-agent backend REST endpoints.
///
/// Every call is all-or-nothing: a non-2xx response becomes
/// `AppError::Api { status, body }` and no partial result is produced.
/// No retries; responses are always fetched fresh (no-store).
pub struct ApiClient {
    http: reqwest::Client,
    config: DashboardConfig,
}

impl ApiClient {
    /// Create a new `ApiClient` for the configured backend.
    ///
    /// The underlying `reqwest::Client` is configured with a 30-second
    /// timeout and no-store cache semantics on every request.
    pub fn new(config: DashboardConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .expect("failed to build reqwest client");

        Self { http, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // --------------------------------------------------------------------
    // Private HTTP helpers
    // --------------------------------------------------------------------

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{}", self.config.base_url, path))
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{}", self.config.base_url, path))
            .json(body)
    }

    /// Send a request, check the status code, and deserialize the JSON
    /// response. Failures carry the status and response body text.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }

    // --------------------------------------------------------------------
    // Flows
    // --------------------------------------------------------------------

    /// `GET /api/flows` — all recorded flows.
    pub async fn list_flows(&self) -> Result<Vec<FlowRow>, AppError> {
        self.send_json(self.get("/api/flows")).await
    }

    /// `GET /api/flows/{flow_id_ext}?project_id=` — the raw capture payload
    /// for one flow. Returned untyped; feed it to
    /// `capture::normalize_capture`.
    pub async fn get_flow_capture(
        &self,
        project_id: &str,
        flow_id_ext: &str,
    ) -> Result<serde_json::Value, AppError> {
        let path = flow_capture_path(project_id, flow_id_ext);
        self.send_json(self.get(&path)).await
    }

    /// `POST /api/flows` — create a flow definition.
    pub async fn create_flow(&self, body: &CreateFlowBody) -> Result<FlowRow, AppError> {
        validation::require_valid_id("project_id", &body.project_id)?;
        validation::require_non_empty("feature_name", &body.feature_name)?;
        validation::require_valid_url("start_url", &body.start_url)?;
        self.send_json(self.post("/api/flows", body)).await
    }

    /// `POST /api/flows/start` — queue a capture job.
    pub async fn start_capture(&self, body: &StartCaptureBody) -> Result<WriteAck, AppError> {
        if body.url.is_none() && (body.project_id.is_none() || body.flow_id.is_none()) {
            return Err(AppError::Validation(
                "start capture needs a URL or a project/flow id pair".into(),
            ));
        }
        if let Some(url) = &body.url {
            validation::require_valid_url("url", url)?;
        }
        self.send_json(self.post("/api/flows/start", body)).await
    }

    /// Quick-action capture of an ad hoc URL, using the configured capture
    /// service endpoint.
    pub async fn start_quick_capture(
        &self,
        url: &str,
        project: &str,
    ) -> Result<WriteAck, AppError> {
        let body = StartCaptureBody::quick(url, project, self.config.captured_service_url.clone());
        self.start_capture(&body).await
    }

    /// `POST /api/flows/{flow_id_ext}/replay` — queue a replay job.
    pub async fn replay_flow(
        &self,
        flow_id_ext: &str,
        project_id: Option<&str>,
    ) -> Result<WriteAck, AppError> {
        validation::require_valid_id("flow_id_ext", flow_id_ext)?;
        let body = ReplayBody {
            project_id: project_id.map(String::from),
            server: Some(self.config.captured_service_url.clone()),
        };
        let path = format!("/api/flows/{}/replay", urlencoding::encode(flow_id_ext));
        self.send_json(self.post(&path, &body)).await
    }

    // --------------------------------------------------------------------
    // Runs / reports
    // --------------------------------------------------------------------

    /// `GET /api/reports` — paged run list.
    pub async fn list_runs(&self, query: &RunsQuery) -> Result<RunsResponse, AppError> {
        self.send_json(self.get(&reports_path(query))).await
    }

    /// `GET /api/reports/{project_id}/{run_id_ext}/summary`.
    pub async fn run_summary(
        &self,
        project_id: &str,
        run_id_ext: &str,
    ) -> Result<RunSummaryRow, AppError> {
        let path = format!(
            "/api/reports/{}/{}/summary",
            urlencoding::encode(project_id),
            urlencoding::encode(run_id_ext)
        );
        self.send_json(self.get(&path)).await
    }

    /// `GET /api/reports/{project_id}/{run_id_ext}` — full report with steps.
    pub async fn full_report(
        &self,
        project_id: &str,
        run_id_ext: &str,
    ) -> Result<RunReport, AppError> {
        let path = format!(
            "/api/reports/{}/{}",
            urlencoding::encode(project_id),
            urlencoding::encode(run_id_ext)
        );
        self.send_json(self.get(&path)).await
    }

    /// `GET /api/projects/{project_id}/latest` — most recent run.
    pub async fn latest_run(&self, project_id: &str) -> Result<RunRow, AppError> {
        let path = format!("/api/projects/{}/latest", urlencoding::encode(project_id));
        self.send_json(self.get(&path)).await
    }

    // --------------------------------------------------------------------
    // Projects
    // --------------------------------------------------------------------

    /// `GET /api/projects`, optionally filtered by exact label.
    pub async fn list_projects(
        &self,
        label_filter: Option<&str>,
    ) -> Result<Vec<ProjectRow>, AppError> {
        let path = match label_filter {
            Some(label) => format!("/api/projects?project_label={}", urlencoding::encode(label)),
            None => "/api/projects".to_string(),
        };
        self.send_json(self.get(&path)).await
    }

    /// Uniqueness probe backing the create-project form: true when no
    /// existing project carries the label.
    pub async fn project_label_available(&self, label: &str) -> Result<bool, AppError> {
        validation::require_non_empty("project_label", label)?;
        let rows = self.list_projects(Some(label)).await?;
        Ok(!rows.iter().any(|p| p.project_label == label))
    }

    /// `POST /api/projects` — create a project.
    pub async fn create_project(&self, body: &CreateProjectBody) -> Result<ProjectRow, AppError> {
        validation::require_valid_project_label(&body.project_label)?;
        self.send_json(self.post("/api/projects", body)).await
    }
}

// ============================================================================
// Path builders
// ============================================================================

fn flow_capture_path(project_id: &str, flow_id_ext: &str) -> String {
    format!(
        "/api/flows/{}?project_id={}",
        urlencoding::encode(flow_id_ext),
        urlencoding::encode(project_id)
    )
}

fn reports_path(query: &RunsQuery) -> String {
    let mut qs = url::form_urlencoded::Serializer::new(String::new());
    if let Some(project_id) = &query.project_id {
        qs.append_pair("project_id", project_id);
    }
    if let Some(status) = query.status {
        qs.append_pair("status", &status.to_string());
    }
    qs.append_pair("limit", &query.limit.to_string());
    qs.append_pair("offset", &query.offset.to_string());
    format!("/api/reports?{}", qs.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_path_includes_filters() {
        let q = RunsQuery::for_project("default.project")
            .status(RunStatus::Failed)
            .limit(5);
        assert_eq!(
            reports_path(&q),
            "/api/reports?project_id=default.project&status=failed&limit=5&offset=0"
        );
    }

    #[test]
    fn test_reports_path_omits_absent_filters() {
        assert_eq!(reports_path(&RunsQuery::default()), "/api/reports?limit=20&offset=0");
    }

    #[test]
    fn test_flow_capture_path_encodes_segments() {
        assert_eq!(
            flow_capture_path("default.project", "flow one"),
            "/api/flows/flow%20one?project_id=default.project"
        );
    }

    #[tokio::test]
    async fn test_create_flow_validates_before_any_request() {
        let client = ApiClient::new(DashboardConfig::default());
        let body = CreateFlowBody {
            project_id: "p1".into(),
            feature_name: "checkout".into(),
            start_url: "not a url".into(),
            description: String::new(),
        };
        match client.create_flow(&body).await {
            Err(AppError::Validation(msg)) => assert!(msg.contains("start_url")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_start_capture_requires_target() {
        let client = ApiClient::new(DashboardConfig::default());
        match client.start_capture(&StartCaptureBody::default()).await {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
