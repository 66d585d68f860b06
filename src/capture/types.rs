use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical capture record for one flow: the shape every downstream
/// consumer works with, regardless of which backend schema variant
/// delivered it. Timestamps stay ISO-8601 strings; the rendering layer
/// owns formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Capture {
    #[serde(default)]
    pub project: CaptureProject,
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Explicit steps when the backend supplied them. `None` means the view
    /// layer derives steps from per-element interaction arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CaptureProject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub flow_id: String,
    pub started_at: Option<String>,
    pub start_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Page {
    #[serde(default)]
    pub url: String,
    pub title: Option<String>,
    pub tab_id: Option<String>,
    pub first_seen_at: Option<String>,
    pub last_seen_at: Option<String>,
    /// Keyed by element key, iterating in backend insertion order.
    #[serde(default)]
    pub elements: IndexMap<String, Element>,
}

/// A captured interactive DOM node with accumulated interaction counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Element {
    /// Authoritative id when the backend supplied one; the mapping key is
    /// the fallback identity at flatten time.
    pub element_id: Option<String>,
    pub page_url: Option<String>,
    pub semantic_role: Option<String>,
    pub aria_role: Option<String>,
    pub html_tag: Option<String>,
    pub text: Option<String>,
    /// Single resolved selector string (see `normalize::resolve_selector`
    /// for the precedence over historical payload locations).
    pub selector: Option<String>,
    #[serde(default)]
    pub clicks: u32,
    #[serde(default)]
    pub inputs: u32,
    #[serde(default)]
    pub submits: u32,
    #[serde(default)]
    pub keys: u32,
    #[serde(default)]
    pub interaction_history: Vec<InteractionEvent>,
    /// Interaction-like entries feeding step derivation; distinct from
    /// `interaction_history`, which drives the timeline table.
    #[serde(default)]
    pub interactions: Vec<StepEvent>,
    pub first_seen_at: Option<String>,
    pub last_seen_at: Option<String>,
}

/// One entry of an element's interaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InteractionEvent {
    #[serde(default)]
    pub action: String,
    /// Nullable; redacted inputs arrive as null with `input_redacted` set.
    pub input_value: Option<String>,
    #[serde(default)]
    pub input_redacted: bool,
    pub screenshot_path: Option<String>,
    pub admin_note: Option<String>,
    pub at: Option<String>,
}

/// One entry of an element's step-derivation array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StepEvent {
    pub action: Option<String>,
    pub value: Option<String>,
    pub when: Option<String>,
    /// Explicit failure flag; anything but `Some(false)` counts as passed.
    pub ok: Option<bool>,
}

/// One step of a run, either backend-supplied or derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Step {
    pub page_url: Option<String>,
    pub element_key: Option<String>,
    pub action: Option<String>,
    pub value: Option<String>,
    pub when: Option<String>,
    #[serde(default)]
    pub status: String,
}

pub const STEP_PASSED: &str = "passed";
pub const STEP_FAILED: &str = "failed";
