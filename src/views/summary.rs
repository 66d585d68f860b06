//! Header view-model for a single run, merged from up to two sources.

use serde::Serialize;

use crate::api::types::{pass_pct, RunReport, RunStatus, RunSummaryRow};

/// Fully-defaulted header the run detail page can always render.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct RunHeader {
    pub run_id_ext: Option<String>,
    pub project_id: Option<String>,
    pub status: RunStatus,
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
    pub duration_ms: u64,
    pub created_at: Option<String>,
    pub start_url: Option<String>,
    pub mcp_server: Option<String>,
}

impl RunHeader {
    pub fn pass_pct(&self) -> u32 {
        pass_pct(self.passed, self.total)
    }
}

/// Merge a summary-endpoint row and a full report into one header.
///
/// Precedence is applied independently per field: explicit summary field,
/// then the report's nested summary, then a hard default. Both sources
/// absent still yields a usable (all-default) header — this never fails.
pub fn run_header(summary: Option<&RunSummaryRow>, report: Option<&RunReport>) -> RunHeader {
    let nested = report.and_then(|r| r.summary.as_ref());

    RunHeader {
        run_id_ext: summary
            .and_then(|s| s.run_id_ext.clone())
            .or_else(|| report.and_then(|r| r.run_id_ext.clone())),
        project_id: summary
            .and_then(|s| s.project_id.clone())
            .or_else(|| report.and_then(|r| r.project_id.clone())),
        status: summary
            .and_then(|s| s.status)
            .or_else(|| nested.and_then(|n| n.status))
            .unwrap_or_default(),
        passed: summary
            .and_then(|s| s.passed)
            .or_else(|| nested.and_then(|n| n.passed))
            .unwrap_or(0),
        failed: summary
            .and_then(|s| s.failed)
            .or_else(|| nested.and_then(|n| n.failed))
            .unwrap_or(0),
        total: summary
            .and_then(|s| s.total)
            .or_else(|| nested.and_then(|n| n.total))
            .unwrap_or(0),
        duration_ms: summary
            .and_then(|s| s.duration_ms)
            .or_else(|| nested.and_then(|n| n.duration_ms))
            .unwrap_or(0),
        created_at: summary
            .and_then(|s| s.created_at.clone())
            .or_else(|| nested.and_then(|n| n.created_at.clone())),
        start_url: summary
            .and_then(|s| s.start_url.clone())
            .or_else(|| nested.and_then(|n| n.start_url.clone())),
        mcp_server: summary
            .and_then(|s| s.mcp_server.clone())
            .or_else(|| nested.and_then(|n| n.mcp_server.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ReportSummary, RunRow};

    #[test]
    fn test_fields_fall_back_independently() {
        let summary = RunSummaryRow {
            status: Some(RunStatus::Mixed),
            start_url: None,
            ..Default::default()
        };
        let report = RunReport {
            summary: Some(ReportSummary {
                status: None,
                start_url: Some("https://shop.example".into()),
                passed: Some(4),
                ..Default::default()
            }),
            ..Default::default()
        };
        let header = run_header(Some(&summary), Some(&report));
        assert_eq!(header.status, RunStatus::Mixed);
        assert_eq!(header.start_url.as_deref(), Some("https://shop.example"));
        assert_eq!(header.passed, 4);
    }

    #[test]
    fn test_summary_wins_over_report() {
        let summary = RunSummaryRow {
            passed: Some(9),
            ..Default::default()
        };
        let report = RunReport {
            summary: Some(ReportSummary {
                passed: Some(1),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(run_header(Some(&summary), Some(&report)).passed, 9);
    }

    #[test]
    fn test_both_sources_absent_yields_defaults() {
        let header = run_header(None, None);
        assert_eq!(header.status, RunStatus::Unknown);
        assert_eq!(header.passed, 0);
        assert_eq!(header.total, 0);
        assert!(header.start_url.is_none());
        assert_eq!(header.pass_pct(), 0);
    }

    #[test]
    fn test_list_row_stands_in_for_summary() {
        let row = RunRow {
            run_id_ext: "r1".into(),
            project_id: "p1".into(),
            status: RunStatus::Passed,
            passed: 3,
            total: 3,
            ..Default::default()
        };
        let header = run_header(Some(&RunSummaryRow::from(&row)), None);
        assert_eq!(header.run_id_ext.as_deref(), Some("r1"));
        assert_eq!(header.status, RunStatus::Passed);
        assert_eq!(header.pass_pct(), 100);
    }
}
