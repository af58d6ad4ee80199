//! Small helpers for reading uncontrolled form inputs through `NodeRef`s.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::NodeRef;

/// Trimmed value of an `<input>`, `<select>` or `<textarea>`; empty when unmounted.
pub fn field_value(node: &NodeRef) -> String {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        return input.value().trim().to_string();
    }
    if let Some(select) = node.cast::<HtmlSelectElement>() {
        return select.value().trim().to_string();
    }
    if let Some(area) = node.cast::<HtmlTextAreaElement>() {
        return area.value().trim().to_string();
    }
    String::new()
}

/// `None` for an empty field.
pub fn optional_value(node: &NodeRef) -> Option<String> {
    Some(field_value(node)).filter(|value| !value.is_empty())
}

/// Splits a comma separated field into its non-empty entries.
pub fn list_value(node: &NodeRef) -> Vec<String> {
    field_value(node)
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn reset(node: &NodeRef) {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        input.set_value("");
    } else if let Some(area) = node.cast::<HtmlTextAreaElement>() {
        area.set_value("");
    }
}
