use serde::{Deserialize, Serialize};

use crate::capture::raw::RawStep;

// ============================================================================
// Run status
// ============================================================================

/// Backend run status. `Unknown` absorbs any future value the backend grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Passed,
    Failed,
    Mixed,
    #[serde(other)]
    #[default]
    Unknown,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RunStatus::Passed => "passed",
            RunStatus::Failed => "failed",
            RunStatus::Mixed => "mixed",
            RunStatus::Unknown => "unknown",
        })
    }
}

// ============================================================================
// Read rows
// ============================================================================

/// One row from `GET /api/flows`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlowRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub flow_id_ext: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub feature_name: Option<String>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default, rename = "flow_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
}

/// One row from the run list / latest-run endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub run_uid: Option<String>,
    #[serde(default)]
    pub run_id_ext: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub mcp_server: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RunRow {
    /// Rounded pass percentage; 0 when the run has no steps.
    pub fn pass_pct(&self) -> u32 {
        pass_pct(self.passed, self.total)
    }
}

pub(crate) fn pass_pct(passed: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        ((passed as f64 / total as f64) * 100.0).round() as u32
    }
}

/// `GET /api/reports` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunsResponse {
    #[serde(default)]
    pub items: Vec<RunRow>,
    #[serde(default)]
    pub count: u64,
}

/// One row from `GET /api/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectRow {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub project_label: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ============================================================================
// Run summary / full report
// ============================================================================

/// `GET /api/reports/{project_id}/{run_id_ext}/summary` — every field
/// optional, the endpoint returns partials for in-flight runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunSummaryRow {
    #[serde(default)]
    pub run_id_ext: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub status: Option<RunStatus>,
    #[serde(default)]
    pub passed: Option<u32>,
    #[serde(default)]
    pub failed: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub mcp_server: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A list row carries everything the summary endpoint does, so it can stand
/// in when the summary fetch fails.
impl From<&RunRow> for RunSummaryRow {
    fn from(r: &RunRow) -> Self {
        RunSummaryRow {
            run_id_ext: Some(r.run_id_ext.clone()),
            project_id: Some(r.project_id.clone()),
            status: Some(r.status),
            passed: Some(r.passed),
            failed: Some(r.failed),
            total: Some(r.total),
            duration_ms: Some(r.duration_ms),
            start_url: r.start_url.clone(),
            mcp_server: r.mcp_server.clone(),
            created_at: r.created_at.clone(),
        }
    }
}

/// Nested summary block inside a full report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    #[serde(default)]
    pub status: Option<RunStatus>,
    #[serde(default)]
    pub passed: Option<u32>,
    #[serde(default)]
    pub failed: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub start_url: Option<String>,
    #[serde(default)]
    pub mcp_server: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /api/reports/{project_id}/{run_id_ext}` — full report with steps.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunReport {
    #[serde(default)]
    pub run_id_ext: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub steps: Vec<RawStep>,
    #[serde(default)]
    pub summary: Option<ReportSummary>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectBody {
    pub project_label: String,
    pub project_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateFlowBody {
    pub project_id: String,
    pub feature_name: String,
    pub start_url: String,
    #[serde(rename = "flow_description")]
    pub description: String,
}

/// `POST /api/flows/start` accepts two historical call shapes: the
/// quick-action form (ad hoc URL) and the per-flow form (existing flow ids).
/// Absent fields are omitted from the body.
#[derive(Debug, Clone, Serialize, Default)]
pub struct StartCaptureBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    pub screenshots: bool,
    pub ask_descriptions: bool,
}

impl StartCaptureBody {
    /// Quick-action shape: capture an ad hoc URL into the given project.
    pub fn quick(url: impl Into<String>, project: impl Into<String>, server: impl Into<String>) -> Self {
        StartCaptureBody {
            url: Some(url.into()),
            out: Some("ui_capture.json".into()),
            project: Some(project.into()),
            server: Some(server.into()),
            ..Default::default()
        }
    }

    /// Per-flow shape: re-capture an existing flow.
    pub fn for_flow(project_id: impl Into<String>, flow_id: impl Into<String>) -> Self {
        StartCaptureBody {
            project_id: Some(project_id.into()),
            flow_id: Some(flow_id.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ReplayBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
}

/// Write endpoints acknowledge with `{ ok, queued }`; both default to false
/// when the backend omits them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct WriteAck {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub queued: bool,
}

// ============================================================================
// Run list query
// ============================================================================

/// Filter for `GET /api/reports`.
#[derive(Debug, Clone)]
pub struct RunsQuery {
    pub project_id: Option<String>,
    pub status: Option<RunStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for RunsQuery {
    fn default() -> Self {
        RunsQuery {
            project_id: None,
            status: None,
            limit: 20,
            offset: 0,
        }
    }
}

impl RunsQuery {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        RunsQuery {
            project_id: Some(project_id.into()),
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn status(mut self, status: RunStatus) -> Self {
        self.status = Some(status);
        self
    }
}
