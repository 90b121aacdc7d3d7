//! Query-string construction.
//!
//! Parameters are kept as an ordered list so the emitted URL is
//! deterministic and matches the order in which fields were pushed.

use std::fmt::Display;

/// Ordered set of `key=value` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Push `value` if present; `None` emits nothing at all.
    pub fn push_opt<V: Display>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Push a list as a single comma-joined value. An empty list emits nothing.
    pub fn push_list<V: Display>(&mut self, key: &'static str, values: &[V]) -> &mut Self {
        if values.is_empty() {
            return self;
        }

        let joined = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        self.push(key, joined)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Append `params` to `base` after a single `?`.
///
/// An empty parameter set still yields `base?`.
pub fn build_url(base: &str, params: &QueryParams) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{query}")
}

/// Percent-encode a query component.
///
/// `,` `:` and `/` are left alone so variable lists, times and IANA
/// timezone names stay readable.
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'~' | b',' | b':' | b'/' => out.push(byte as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
