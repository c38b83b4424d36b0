//! Caller-facing filters and wire query values.
//!
//! A `Filter` speaks in semantic field names (`"name"`, `"email"`). Each
//! resource owns a field table translating those names to its own query
//! parameters. Names missing from the table are dropped.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Semantic field name to wire parameter name.
pub type FieldMap = [(&'static str, &'static str)];

/// Multi-valued filter keyed by semantic field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(BTreeMap<String, Vec<String>>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under `key`, keeping earlier values.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Translates this filter through `fields`. Every value of a mapped key
    /// becomes its own query entry.
    pub fn values(&self, fields: &FieldMap) -> QueryValues {
        let mut out = QueryValues::new();
        for (key, values) in &self.0 {
            let Some(wire) = lookup(fields, key) else {
                continue;
            };
            for value in values {
                out.append(wire, value.as_str());
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for (key, value) in iter {
            filter.insert(key, value);
        }
        filter
    }
}

/// `filter.values(fields)`, treating an absent filter as empty.
pub fn query_values(filter: Option<&Filter>, fields: &FieldMap) -> QueryValues {
    filter.map(|f| f.values(fields)).unwrap_or_default()
}

fn lookup(fields: &FieldMap, key: &str) -> Option<&'static str> {
    fields
        .iter()
        .find_map(|(semantic, wire)| (*semantic == key).then_some(*wire))
}

/// Wire query parameters, encoded sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues(BTreeMap<String, Vec<String>>);

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces every value under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `application/x-www-form-urlencoded` string.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}
