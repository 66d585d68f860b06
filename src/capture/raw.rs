//! Historical backend payload shapes for flow captures.
//!
//! The capture endpoint has shipped several field-naming variants over time
//! (dictionary-of-elements vs array, `selectors` vs `selectors_json`,
//! `text` vs `text_content`). Each variant is an explicit serde union here,
//! mapped through `normalize` into the canonical `capture::types` entities.
//! Every field is optional or defaulted: deserializing any JSON object
//! succeeds, and missing data degrades to empty downstream.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCapture {
    #[serde(default)]
    pub project: Option<RawProject>,
    #[serde(default)]
    pub pages: Vec<RawPage>,
    #[serde(default)]
    pub steps: Option<Vec<RawStep>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawProject {
    pub id: Option<String>,
    pub flow_id: Option<String>,
    pub started_at: Option<String>,
    pub start_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPage {
    #[serde(default)]
    pub url: String,
    pub title: Option<String>,
    pub tab_id: Option<String>,
    pub first_seen_at: Option<String>,
    pub last_seen_at: Option<String>,
    #[serde(default)]
    pub elements: Option<ElementsPayload>,
}

/// Elements container: newer backends key elements by element key, older
/// ones send a bare array. Arrays are re-keyed during normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ElementsPayload {
    Keyed(IndexMap<String, RawElement>),
    Listed(Vec<RawElement>),
    /// Anything else (e.g. a null element value inside the mapping) renders
    /// as an element-less page rather than failing the capture.
    Other(serde_json::Value),
}

impl Default for ElementsPayload {
    fn default() -> Self {
        ElementsPayload::Keyed(IndexMap::new())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawElement {
    pub element_id: Option<String>,
    pub element_key: Option<String>,
    pub page_url: Option<String>,
    pub semantic_role: Option<String>,
    pub aria_role: Option<String>,
    pub html_tag: Option<String>,
    pub text: Option<String>,
    pub text_content: Option<String>,
    /// Canonical flat spelling; wins over the container variants below.
    pub selector: Option<String>,
    pub selectors: Option<SelectorsField>,
    pub selectors_json: Option<SelectorsField>,
    pub clicks: Option<u32>,
    pub inputs: Option<u32>,
    pub submits: Option<u32>,
    pub keys: Option<u32>,
    #[serde(default)]
    pub interaction_history: Vec<RawEvent>,
    pub interactions: Option<Vec<RawStepEvent>>,
    pub element_interactions: Option<Vec<RawStepEvent>>,
    pub first_seen_at: Option<String>,
    pub last_seen_at: Option<String>,
}

/// `selectors` / `selectors_json` container. `Other` absorbs shapes we have
/// never seen so one odd element cannot fail the whole capture.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectorsField {
    Known {
        preferred: Option<PreferredSelector>,
    },
    Other(serde_json::Value),
}

/// `preferred` is either `{ "value": "..." }` or a plain selector string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PreferredSelector {
    Detailed { value: Option<String> },
    Plain(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawEvent {
    pub action: Option<String>,
    pub input_value: Option<String>,
    pub input_redacted: Option<bool>,
    pub screenshot_path: Option<String>,
    pub admin_note: Option<String>,
    pub at: Option<String>,
}

/// Entry of an `interactions` / `element_interactions` array.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStepEvent {
    pub action: Option<String>,
    pub value: Option<serde_json::Value>,
    pub input_value: Option<String>,
    pub at: Option<String>,
    pub when: Option<String>,
    pub ok: Option<bool>,
}

/// Backend-supplied step, as found in a capture or a full report.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawStep {
    pub page_url: Option<String>,
    pub element_key: Option<String>,
    pub action: Option<String>,
    pub value: Option<serde_json::Value>,
    pub when: Option<String>,
    pub at: Option<String>,
    pub status: Option<String>,
    pub ok: Option<bool>,
}
