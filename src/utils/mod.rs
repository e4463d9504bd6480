//! Utility functions and helpers.

pub mod http;
pub mod log;

/// Percent-encode a string for use as a single URL component.
///
/// Spaces become `%20` rather than `+`.
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Distinct values in first-seen order.
pub fn dedup_in_order<T: PartialEq + Clone>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
