//! URL query strings.
//!
//! Parsing and stringifying follow the router's query-string conventions:
//! a leading `?` is ignored, `+` decodes to a space, a key without `=`
//! has no value, repeated keys collect every value, and stringified keys
//! come out in ascending order with values percent-encoded strictly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed query string. Each key keeps every value it was given, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<Option<String>>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches(['?', '#', '&']);
        let mut params: BTreeMap<String, Vec<Option<String>>> = BTreeMap::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(decode_component(value))),
                None => (pair, None),
            };
            params.entry(decode_component(key)).or_default().push(value);
        }
        QueryParams { params }
    }

    /// The value of a key given exactly once with a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.params.get(key).map(Vec::as_slice) {
            Some([Some(value)]) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Replace every value of a key with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![Some(value.into())]);
    }

    pub fn remove(&mut self, key: &str) {
        self.params.remove(key);
    }

    /// Serialize with keys in ascending order.
    pub fn stringify(&self) -> String {
        let mut parts = Vec::new();
        for (key, values) in &self.params {
            for value in values {
                match value {
                    Some(value) => {
                        parts.push(format!("{}={}", encode_component(key), encode_component(value)))
                    }
                    None => parts.push(encode_component(key)),
                }
            }
        }
        parts.join("&")
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.stringify())
    }
}

/// Percent-encode everything except unreserved characters.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Decode `+` and `%XX` escapes. Malformed escapes are kept literally.
pub fn decode_component(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Overview display flags carried in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewParams {
    /// Cards are expanded unless `card=false`.
    pub show_card: bool,
    /// Selected tab of the table below the cards.
    pub tab_index: usize,
    /// Tab toggle is shown unless `toggle=false`.
    pub show_toggle: bool,
    /// Row to highlight, empty for none.
    pub highlight_name: String,
    /// Side panel is open only with `side=true`.
    pub show_side_panel: bool,
}

impl Default for ViewParams {
    fn default() -> Self {
        ViewParams::from_query(&QueryParams::new())
    }
}

impl ViewParams {
    pub fn parse(query: &str) -> Self {
        Self::from_query(&QueryParams::parse(query))
    }

    pub fn from_query(query: &QueryParams) -> Self {
        ViewParams {
            show_card: query.get("card") != Some("false"),
            tab_index: query.get("index").map_or(0, parse_tab_index),
            show_toggle: query.get("toggle") != Some("false"),
            highlight_name: query.get("name").unwrap_or_default().to_string(),
            show_side_panel: query.get("side") == Some("true"),
        }
    }
}

/// Numeric tab index: integral values such as `1`, `1.0` or `1e0` select
/// that tab. Fractions, negatives and non-numbers select the first tab.
fn parse_tab_index(raw: &str) -> usize {
    let raw = raw.trim();
    if let Ok(index) = raw.parse::<usize>() {
        return index;
    }
    match raw.parse::<f64>() {
        Ok(index) if index.is_finite() && index >= 0.0 && index.fract() == 0.0 => index as usize,
        _ => 0,
    }
}

/// Flip the card collapse flag. No `card` parameter means expanded, so the
/// first toggle collapses; `card=false` expands; anything else collapses.
pub fn toggle_card_collapse(query: &str) -> String {
    let mut params = QueryParams::parse(query);
    let next = if params.get("card") == Some("false") {
        "true"
    } else {
        "false"
    };
    params.set("card", next);
    params.stringify()
}
