//! Per-page view-model assembly.
//!
//! Each assembler issues its page's fetch sequence and degrades every fetch
//! site independently: a failed section renders empty while the rest of the
//! page stays populated. Assemblers never fail; write actions propagate
//! their error to the caller for a user-visible message.

use serde::Serialize;

use crate::api::types::{FlowRow, ProjectRow, RunRow, RunsQuery, RunsResponse};
use crate::api::ApiClient;
use crate::capture::normalize::normalize_capture;
use crate::capture::types::{Capture, Step};
use crate::error::AppError;
use crate::views::rows::{flatten_elements, ElementRow};
use crate::views::steps::{capture_steps, report_steps};
use crate::views::summary::{run_header, RunHeader};

/// Unwrap a section fetch, logging and degrading to `None` on failure.
fn section<T>(name: &str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(section = name, error = %e, "section fetch failed, rendering empty");
            None
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct TrendPoint {
    pub run_id_ext: String,
    pub created_at: Option<String>,
    pub pass_pct: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct DashboardView {
    pub latest: Option<RunRow>,
    pub recent_runs: Vec<RunRow>,
    pub trend: Vec<TrendPoint>,
}

/// Pass-rate points for the trend chart, in list order.
pub fn trend_points(runs: &[RunRow]) -> Vec<TrendPoint> {
    runs.iter()
        .map(|r| TrendPoint {
            run_id_ext: r.run_id_ext.clone(),
            created_at: r.created_at.clone(),
            pass_pct: r.pass_pct(),
        })
        .collect()
}

pub async fn dashboard(client: &ApiClient, project_id: &str) -> DashboardView {
    let latest = section("latest_run", client.latest_run(project_id).await);
    let recent = section(
        "recent_runs",
        client
            .list_runs(&RunsQuery::for_project(project_id).limit(5))
            .await,
    )
    .unwrap_or_default();

    let trend = trend_points(&recent.items);
    DashboardView {
        latest,
        recent_runs: recent.items,
        trend,
    }
}

// ============================================================================
// Flows
// ============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct FlowsView {
    pub flows: Vec<FlowRow>,
}

pub async fn flows_overview(client: &ApiClient) -> FlowsView {
    FlowsView {
        flows: section("flows", client.list_flows().await).unwrap_or_default(),
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct FlowDetailView {
    pub flow_id_ext: String,
    /// `None` when the flow is not in the list; the page shows a
    /// "metadata not found" note but still renders the rest.
    pub flow: Option<FlowRow>,
    pub recent_runs: Vec<RunRow>,
    pub capture: Option<Capture>,
    pub elements: Vec<ElementRow>,
    pub steps: Vec<Step>,
}

/// Flow detail: metadata from the flow list, recent runs for its project,
/// and the capture-driven element/step tabs. The project id is resolved
/// from the flow list before any dependent fetch.
pub async fn flow_detail(client: &ApiClient, flow_id_ext: &str) -> FlowDetailView {
    let flows = section("flows", client.list_flows().await).unwrap_or_default();
    let flow = flows.into_iter().find(|f| f.flow_id_ext == flow_id_ext);
    let project_id = flow.as_ref().and_then(|f| f.project_id.clone());

    let mut view = FlowDetailView {
        flow_id_ext: flow_id_ext.to_string(),
        flow,
        ..Default::default()
    };

    let Some(project_id) = project_id else {
        return view;
    };

    view.recent_runs = section(
        "recent_runs",
        client
            .list_runs(&RunsQuery::for_project(&project_id).limit(5))
            .await,
    )
    .map(|r| r.items)
    .unwrap_or_default();

    if let Some(raw) = section(
        "capture",
        client.get_flow_capture(&project_id, flow_id_ext).await,
    ) {
        match normalize_capture(raw) {
            Ok(capture) => {
                view.elements = flatten_elements(&capture);
                view.steps = capture_steps(&capture);
                view.capture = Some(capture);
            }
            Err(e) => {
                // Malformed response, not merely an empty capture.
                tracing::warn!(flow_id_ext, error = %e, "capture payload malformed");
            }
        }
    }

    view
}

// ============================================================================
// Replays
// ============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct ReplaysView {
    pub items: Vec<RunRow>,
    pub count: u64,
}

pub async fn replays(client: &ApiClient, query: &RunsQuery) -> ReplaysView {
    let RunsResponse { items, count } =
        section("runs", client.list_runs(query).await).unwrap_or_default();
    ReplaysView { items, count }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct RunDetailView {
    pub run_id_ext: String,
    pub project_id: String,
    pub header: RunHeader,
    pub steps: Vec<Step>,
}

/// Run detail: header merged from the summary endpoint and the full report,
/// steps from the report. Either source may be down; the header is still
/// fully populated with defaults.
pub async fn run_detail(client: &ApiClient, project_id: &str, run_id_ext: &str) -> RunDetailView {
    let summary = section(
        "run_summary",
        client.run_summary(project_id, run_id_ext).await,
    );
    let report = section(
        "full_report",
        client.full_report(project_id, run_id_ext).await,
    );

    RunDetailView {
        run_id_ext: run_id_ext.to_string(),
        project_id: project_id.to_string(),
        header: run_header(summary.as_ref(), report.as_ref()),
        steps: report.as_ref().map(report_steps).unwrap_or_default(),
    }
}

// ============================================================================
// Projects / elements DB
// ============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct ProjectsView {
    pub projects: Vec<ProjectRow>,
}

pub async fn projects_overview(client: &ApiClient) -> ProjectsView {
    ProjectsView {
        projects: section("projects", client.list_projects(None).await).unwrap_or_default(),
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ElementsView {
    pub rows: Vec<ElementRow>,
}

/// All elements across all pages of one flow's capture.
pub async fn elements_db(client: &ApiClient, project_id: &str, flow_id_ext: &str) -> ElementsView {
    let Some(raw) = section(
        "capture",
        client.get_flow_capture(project_id, flow_id_ext).await,
    ) else {
        return ElementsView::default();
    };

    match normalize_capture(raw) {
        Ok(capture) => ElementsView {
            rows: flatten_elements(&capture),
        },
        Err(e) => {
            tracing::warn!(flow_id_ext, error = %e, "capture payload malformed");
            ElementsView::default()
        }
    }
}
