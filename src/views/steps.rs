//! Step rows for the steps tab: backend-supplied when available, derived
//! from per-element interaction arrays otherwise.

use crate::api::types::RunReport;
use crate::capture::normalize::adapt_step;
use crate::capture::types::{Capture, Step, STEP_FAILED, STEP_PASSED};

/// Steps for a capture. An explicit steps array — even an empty one —
/// suppresses derivation.
pub fn capture_steps(capture: &Capture) -> Vec<Step> {
    match &capture.steps {
        Some(steps) => steps.clone(),
        None => derive_steps(capture),
    }
}

/// Synthesize one step per interaction entry, in page → element → entry
/// order. Deliberately NOT re-sorted by timestamp: derived steps reflect
/// authoring order, while the interaction-history timeline sorts by time.
pub fn derive_steps(capture: &Capture) -> Vec<Step> {
    capture
        .pages
        .iter()
        .flat_map(|page| {
            page.elements.iter().flat_map(|(key, element)| {
                element.interactions.iter().map(|ev| Step {
                    page_url: Some(page.url.clone()),
                    element_key: Some(key.clone()),
                    action: ev.action.clone(),
                    value: ev.value.clone(),
                    when: ev.when.clone(),
                    status: if ev.ok == Some(false) {
                        STEP_FAILED.to_string()
                    } else {
                        STEP_PASSED.to_string()
                    },
                })
            })
        })
        .collect()
}

/// Steps of a full report, adapted to the canonical step shape.
pub fn report_steps(report: &RunReport) -> Vec<Step> {
    report.steps.iter().cloned().map(adapt_step).collect()
}
