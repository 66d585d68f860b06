//! Adapters from the raw backend schema variants to the canonical capture
//! entities. Missing optional fields never fail here; the only error is a
//! root payload that is not a JSON object.

use serde_json::Value;

use crate::capture::raw::{
    ElementsPayload, PreferredSelector, RawCapture, RawElement, RawEvent, RawStep, RawStepEvent,
    SelectorsField,
};
use crate::capture::types::{
    Capture, CaptureProject, Element, InteractionEvent, Page, Step, StepEvent, STEP_FAILED,
    STEP_PASSED,
};
use crate::error::AppError;

/// Normalize a raw capture payload into the canonical shape.
///
/// A non-object root is a malformed response and reported as
/// `AppError::InvalidCapture` — deliberately distinct from a well-formed
/// capture with zero pages.
pub fn normalize_capture(raw: Value) -> Result<Capture, AppError> {
    if !raw.is_object() {
        return Err(AppError::InvalidCapture(format!(
            "expected a JSON object at the root, got {}",
            json_type_name(&raw)
        )));
    }

    let raw: RawCapture = serde_json::from_value(raw)
        .map_err(|e| AppError::InvalidCapture(format!("unreadable capture: {e}")))?;

    let project = raw.project.map(adapt_project).unwrap_or_default();
    let pages = raw.pages.into_iter().map(adapt_page).collect();
    let steps = raw
        .steps
        .map(|steps| steps.into_iter().map(adapt_step).collect());

    Ok(Capture {
        project,
        pages,
        steps,
    })
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn adapt_project(raw: crate::capture::raw::RawProject) -> CaptureProject {
    CaptureProject {
        id: raw.id.unwrap_or_default(),
        flow_id: raw.flow_id.unwrap_or_default(),
        started_at: raw.started_at,
        start_url: raw.start_url,
    }
}

fn adapt_page(raw: crate::capture::raw::RawPage) -> Page {
    let elements = match raw.elements.unwrap_or_default() {
        ElementsPayload::Keyed(map) => map
            .into_iter()
            .map(|(key, el)| {
                let el = adapt_element(el);
                (key, el)
            })
            .collect(),
        // Older backends send a bare array; re-key by element id, element
        // key, or position as a last resort.
        ElementsPayload::Listed(list) => list
            .into_iter()
            .enumerate()
            .map(|(i, el)| {
                let key = el
                    .element_id
                    .clone()
                    .or_else(|| el.element_key.clone())
                    .unwrap_or_else(|| format!("el{i}"));
                (key, adapt_element(el))
            })
            .collect(),
        ElementsPayload::Other(_) => Default::default(),
    };

    Page {
        url: raw.url,
        title: raw.title,
        tab_id: raw.tab_id,
        first_seen_at: raw.first_seen_at,
        last_seen_at: raw.last_seen_at,
        elements,
    }
}

fn adapt_element(raw: RawElement) -> Element {
    let selector = resolve_selector(&raw);
    let text = non_empty(raw.text).or_else(|| non_empty(raw.text_content));
    let step_events = raw
        .interactions
        .or(raw.element_interactions)
        .unwrap_or_default()
        .into_iter()
        .map(adapt_step_event)
        .collect();

    Element {
        element_id: raw.element_id.or(raw.element_key),
        page_url: raw.page_url,
        semantic_role: raw.semantic_role,
        aria_role: raw.aria_role,
        html_tag: raw.html_tag,
        text,
        selector,
        clicks: raw.clicks.unwrap_or(0),
        inputs: raw.inputs.unwrap_or(0),
        submits: raw.submits.unwrap_or(0),
        keys: raw.keys.unwrap_or(0),
        interaction_history: raw
            .interaction_history
            .into_iter()
            .map(adapt_event)
            .collect(),
        interactions: step_events,
        first_seen_at: raw.first_seen_at,
        last_seen_at: raw.last_seen_at,
    }
}

fn adapt_event(raw: RawEvent) -> InteractionEvent {
    InteractionEvent {
        action: raw.action.unwrap_or_default(),
        input_value: raw.input_value,
        input_redacted: raw.input_redacted.unwrap_or(false),
        screenshot_path: raw.screenshot_path,
        admin_note: raw.admin_note,
        at: raw.at,
    }
}

fn adapt_step_event(raw: RawStepEvent) -> StepEvent {
    StepEvent {
        action: raw.action,
        value: raw.value.and_then(stringify).or(raw.input_value),
        when: raw.when.or(raw.at),
        ok: raw.ok,
    }
}

/// Adapt a backend-supplied step. Status falls back to the `ok` flag when
/// the backend sent no status of its own.
pub(crate) fn adapt_step(raw: RawStep) -> Step {
    let status = raw.status.unwrap_or_else(|| {
        if raw.ok == Some(false) {
            STEP_FAILED.to_string()
        } else {
            STEP_PASSED.to_string()
        }
    });

    Step {
        page_url: raw.page_url,
        element_key: raw.element_key,
        action: raw.action,
        value: raw.value.and_then(stringify),
        when: raw.when.or(raw.at),
        status,
    }
}

/// Resolve the single display selector. First non-empty wins:
/// canonical `selector`, then `selectors.preferred.value`, then
/// `selectors_json.preferred.value`, then `selectors_json.preferred` as a
/// plain string, then `selectors.preferred` as a plain string.
fn resolve_selector(raw: &RawElement) -> Option<String> {
    non_empty(raw.selector.clone())
        .or_else(|| preferred_value(&raw.selectors))
        .or_else(|| preferred_value(&raw.selectors_json))
        .or_else(|| preferred_plain(&raw.selectors_json))
        .or_else(|| preferred_plain(&raw.selectors))
}

fn preferred_value(field: &Option<SelectorsField>) -> Option<String> {
    match field {
        Some(SelectorsField::Known {
            preferred: Some(PreferredSelector::Detailed { value }),
        }) => non_empty(value.clone()),
        _ => None,
    }
}

fn preferred_plain(field: &Option<SelectorsField>) -> Option<String> {
    match field {
        Some(SelectorsField::Known {
            preferred: Some(PreferredSelector::Plain(s)),
        }) => non_empty(Some(s.clone())),
        _ => None,
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn stringify(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Display role for an element row: semantic role, else ARIA role, with the
/// HTML tag appended in parentheses. `None` when all three are absent.
pub fn display_role(element: &Element) -> Option<String> {
    let role = element
        .semantic_role
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            element
                .aria_role
                .as_deref()
                .filter(|s| !s.trim().is_empty())
        });
    let tag = element
        .html_tag
        .as_deref()
        .filter(|s| !s.trim().is_empty());

    match (role, tag) {
        (Some(role), Some(tag)) => Some(format!("{role} ({tag})")),
        (Some(role), None) => Some(role.to_string()),
        (None, Some(tag)) => Some(format!("({tag})")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_with_element(element_json: &str) -> Capture {
        let raw: Value = serde_json::from_str(&format!(
            r#"{{
                "project": {{ "id": "default.project", "flow_id": "flow-1" }},
                "pages": [{{ "url": "https://shop.example/cart", "elements": {{ "k1": {element_json} }} }}]
            }}"#
        ))
        .unwrap();
        normalize_capture(raw).unwrap()
    }

    fn first_element(capture: &Capture) -> &Element {
        capture.pages[0].elements.get("k1").unwrap()
    }

    #[test]
    fn test_selector_prefers_selectors_value_over_selectors_json() {
        let capture = capture_with_element(
            r#"{
                "selectors": { "preferred": { "value": "A" } },
                "selectors_json": { "preferred": { "value": "B" } }
            }"#,
        );
        assert_eq!(first_element(&capture).selector.as_deref(), Some("A"));
    }

    #[test]
    fn test_selector_accepts_plain_string_preferred() {
        let capture =
            capture_with_element(r#"{ "selectors_json": { "preferred": "C" } }"#);
        assert_eq!(first_element(&capture).selector.as_deref(), Some("C"));
    }

    #[test]
    fn test_selector_skips_empty_candidates() {
        let capture = capture_with_element(
            r##"{
                "selectors": { "preferred": { "value": "" } },
                "selectors_json": { "preferred": "#submit" }
            }"##,
        );
        assert_eq!(first_element(&capture).selector.as_deref(), Some("#submit"));
    }

    #[test]
    fn test_text_falls_back_to_text_content() {
        let capture = capture_with_element(r#"{ "text_content": "Add to cart" }"#);
        assert_eq!(first_element(&capture).text.as_deref(), Some("Add to cart"));

        let capture = capture_with_element(r#"{ "text": "Buy", "text_content": "ignored" }"#);
        assert_eq!(first_element(&capture).text.as_deref(), Some("Buy"));
    }

    #[test]
    fn test_elements_array_rekeyed_by_id_then_key_then_position() {
        let raw: Value = serde_json::from_str(
            r#"{
                "pages": [{
                    "url": "https://shop.example",
                    "elements": [
                        { "element_id": "btn-1" },
                        { "element_key": "input-2" },
                        {}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let capture = normalize_capture(raw).unwrap();
        let keys: Vec<&str> = capture.pages[0].elements.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["btn-1", "input-2", "el2"]);
    }

    #[test]
    fn test_non_object_root_is_invalid_capture() {
        for payload in [Value::Null, serde_json::json!([1, 2]), serde_json::json!("nope")] {
            match normalize_capture(payload) {
                Err(AppError::InvalidCapture(_)) => {}
                other => panic!("expected InvalidCapture, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_pages_is_not_invalid() {
        let capture = normalize_capture(serde_json::json!({})).unwrap();
        assert!(capture.pages.is_empty());
        assert!(capture.steps.is_none());
    }

    #[test]
    fn test_normalizing_canonical_capture_is_identity() {
        let capture = capture_with_element(
            r##"{
                "element_id": "btn-1",
                "semantic_role": "button",
                "html_tag": "button",
                "text": "Buy",
                "selectors": { "preferred": { "value": "#buy" } },
                "clicks": 2,
                "interaction_history": [{ "action": "click", "at": "2026-08-01T10:00:00Z" }]
            }"##,
        );
        let round_tripped =
            normalize_capture(serde_json::to_value(&capture).unwrap()).unwrap();
        assert_eq!(round_tripped, capture);
    }

    #[test]
    fn test_display_role_composition() {
        let mut el = Element {
            semantic_role: Some("button".into()),
            aria_role: Some("link".into()),
            html_tag: Some("a".into()),
            ..Default::default()
        };
        assert_eq!(display_role(&el).as_deref(), Some("button (a)"));

        el.semantic_role = None;
        assert_eq!(display_role(&el).as_deref(), Some("link (a)"));

        el.aria_role = None;
        assert_eq!(display_role(&el).as_deref(), Some("(a)"));

        el.html_tag = None;
        assert_eq!(display_role(&el), None);
    }

    #[test]
    fn test_step_events_coalesce_both_array_spellings() {
        let capture = capture_with_element(
            r#"{ "element_interactions": [{ "action": "input", "value": 42, "at": "t1" }] }"#,
        );
        let el = first_element(&capture);
        assert_eq!(el.interactions.len(), 1);
        assert_eq!(el.interactions[0].action.as_deref(), Some("input"));
        assert_eq!(el.interactions[0].value.as_deref(), Some("42"));
        assert_eq!(el.interactions[0].when.as_deref(), Some("t1"));
    }

    #[test]
    fn test_element_id_falls_back_to_element_key_field() {
        let capture = capture_with_element(r#"{ "element_key": "k-9" }"#);
        assert_eq!(first_element(&capture).element_id.as_deref(), Some("k-9"));
    }
}
