//! Flat, display-ready row-lists for the element and interaction tables.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::capture::normalize::display_role;
use crate::capture::types::{Capture, Element, InteractionEvent, Page};

/// Back-reference to the page a flattened row came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRef {
    pub url: String,
    pub title: Option<String>,
}

/// One row of the all-elements table.
#[derive(Debug, Clone, Serialize)]
pub struct ElementRow {
    pub page: PageRef,
    /// Mapping key within the owning page.
    pub key: String,
    /// `element_id` when the backend supplied one, else the mapping key.
    pub element_id: String,
    pub role: Option<String>,
    pub selector: Option<String>,
    pub text: Option<String>,
    pub clicks: u32,
    pub inputs: u32,
    pub submits: u32,
    pub keys: u32,
    /// `"3 clicks · 1 submits"`-style label; `None` when all counters are
    /// zero so the renderer shows its placeholder instead of a blank cell.
    pub counts: Option<String>,
    pub first_seen_at: Option<String>,
    pub last_seen_at: Option<String>,
}

/// One row of a page's interaction timeline.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRow {
    pub element_id: String,
    pub event: InteractionEvent,
}

/// Flatten every element of every page into table rows.
///
/// Order is page order, then mapping-entry order within each page. Rows are
/// not re-sorted.
pub fn flatten_elements(capture: &Capture) -> Vec<ElementRow> {
    capture
        .pages
        .iter()
        .flat_map(|page| {
            let page_ref = PageRef {
                url: page.url.clone(),
                title: page.title.clone(),
            };
            page.elements.iter().map(move |(key, element)| ElementRow {
                page: page_ref.clone(),
                key: key.clone(),
                element_id: effective_id(key, element),
                role: display_role(element),
                selector: element.selector.clone(),
                text: element.text.clone(),
                clicks: element.clicks,
                inputs: element.inputs,
                submits: element.submits,
                keys: element.keys,
                counts: counts_label(element.clicks, element.inputs, element.submits, element.keys),
                first_seen_at: element.first_seen_at.clone(),
                last_seen_at: element.last_seen_at.clone(),
            })
        })
        .collect()
}

/// Expand a page's per-element interaction histories into one timeline,
/// sorted by event timestamp ascending. The sort is stable: events with
/// equal (or missing) timestamps keep their per-element emission order.
/// Unparsable or missing timestamps sort first.
pub fn page_interactions(page: &Page) -> Vec<InteractionRow> {
    let mut keyed: Vec<(Option<DateTime<FixedOffset>>, InteractionRow)> = page
        .elements
        .iter()
        .flat_map(|(key, element)| {
            let element_id = effective_id(key, element);
            element.interaction_history.iter().map(move |event| {
                (
                    parse_ts(event.at.as_deref()),
                    InteractionRow {
                        element_id: element_id.clone(),
                        event: event.clone(),
                    },
                )
            })
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, row)| row).collect()
}

fn effective_id(key: &str, element: &Element) -> String {
    element
        .element_id
        .clone()
        .unwrap_or_else(|| key.to_string())
}

fn parse_ts(at: Option<&str>) -> Option<DateTime<FixedOffset>> {
    at.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

/// Join the non-zero interaction counters into a display label, omitting
/// zero-valued members. `None` when all four are zero.
pub fn counts_label(clicks: u32, inputs: u32, submits: u32, keys: u32) -> Option<String> {
    let mut parts = Vec::new();
    for (n, word) in [
        (clicks, "clicks"),
        (inputs, "inputs"),
        (submits, "submits"),
        (keys, "keys"),
    ] {
        if n > 0 {
            parts.push(format!("{n} {word}"));
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::normalize::normalize_capture;

    fn capture(json: &str) -> Capture {
        normalize_capture(serde_json::from_str(json).unwrap()).unwrap()
    }

    #[test]
    fn test_flatten_preserves_page_then_entry_order() {
        let capture = capture(
            r#"{
                "pages": [
                    { "url": "https://a.example", "title": "A",
                      "elements": { "e1": {}, "e2": {} } },
                    { "url": "https://b.example",
                      "elements": { "e3": {} } }
                ]
            }"#,
        );
        let rows = flatten_elements(&capture);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["e1", "e2", "e3"]);
        assert_eq!(rows[0].page.url, "https://a.example");
        assert_eq!(rows[1].page.url, "https://a.example");
        assert_eq!(rows[1].page.title.as_deref(), Some("A"));
        assert_eq!(rows[2].page.url, "https://b.example");
    }

    #[test]
    fn test_flatten_uses_element_id_over_mapping_key() {
        let capture = capture(
            r#"{ "pages": [{ "url": "u", "elements": {
                "k1": { "element_id": "real-id" },
                "k2": {}
            } }] }"#,
        );
        let rows = flatten_elements(&capture);
        assert_eq!(rows[0].element_id, "real-id");
        assert_eq!(rows[1].element_id, "k2");
    }

    #[test]
    fn test_interactions_sorted_by_timestamp_across_elements() {
        let capture = capture(
            r#"{ "pages": [{ "url": "u", "elements": {
                "a": { "interaction_history": [
                    { "action": "click", "at": "2026-08-01T10:00:02Z" } ] },
                "b": { "interaction_history": [
                    { "action": "input", "at": "2026-08-01T10:00:01Z" } ] }
            } }] }"#,
        );
        let rows = page_interactions(&capture.pages[0]);
        assert_eq!(rows[0].element_id, "b");
        assert_eq!(rows[1].element_id, "a");
    }

    #[test]
    fn test_interaction_sort_is_stable_on_ties() {
        let capture = capture(
            r#"{ "pages": [{ "url": "u", "elements": {
                "a": { "interaction_history": [
                    { "action": "first", "at": "2026-08-01T10:00:00Z" },
                    { "action": "second", "at": "2026-08-01T10:00:00Z" } ] },
                "b": { "interaction_history": [
                    { "action": "third", "at": "2026-08-01T10:00:00Z" } ] }
            } }] }"#,
        );
        let actions: Vec<String> = page_interactions(&capture.pages[0])
            .into_iter()
            .map(|r| r.event.action)
            .collect();
        assert_eq!(actions, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_timestamps_sort_first() {
        let capture = capture(
            r#"{ "pages": [{ "url": "u", "elements": {
                "a": { "interaction_history": [
                    { "action": "timed", "at": "2026-08-01T10:00:00Z" } ] },
                "b": { "interaction_history": [ { "action": "untimed" } ] }
            } }] }"#,
        );
        let rows = page_interactions(&capture.pages[0]);
        assert_eq!(rows[0].event.action, "untimed");
    }

    #[test]
    fn test_counts_label_skips_zero_members() {
        assert_eq!(
            counts_label(3, 0, 1, 0).as_deref(),
            Some("3 clicks · 1 submits")
        );
        assert_eq!(counts_label(0, 0, 0, 0), None);
        assert_eq!(counts_label(0, 0, 0, 2).as_deref(), Some("2 keys"));
    }

    #[test]
    fn test_empty_capture_yields_empty_lists() {
        let capture = Capture::default();
        assert!(flatten_elements(&capture).is_empty());
        let page = Page::default();
        assert!(page_interactions(&page).is_empty());
    }
}
