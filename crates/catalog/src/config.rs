//! Shared loading for the JSON/TOML configuration documents (procedure
//! catalogs and scoring profiles).
//!
//! A document is parsed as JSON first and as TOML when that fails; either way
//! the result is a [`serde_json::Value`] so one unknown-key walk covers both
//! formats before the typed deserialization runs.

use serde_json::{Map, Value};

/// Parse `bytes` as JSON, falling back to TOML.
///
/// `kind` names the document in error messages ("catalog", "profile").
pub fn parse_document(bytes: &[u8], kind: &str) -> std::result::Result<Value, String> {
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            let utf8 = std::str::from_utf8(bytes).map_err(|err| format!("{json_err}; {err}"))?;
            let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                format!("{kind} is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}")
            })?;
            serde_json::to_value(toml_value)
                .map_err(|err| format!("failed to convert TOML {kind} to JSON: {err}"))
        }
    }
}

#[must_use]
pub const fn object_at(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(obj) => Some(obj),
        _ => None,
    }
}

#[must_use]
pub const fn array_at(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(arr) => Some(arr.as_slice()),
        _ => None,
    }
}

/// Collects keys a schema does not allow, as dotted paths
/// (`venues.family.steps[2].owner`).
///
/// Sections that are absent or not objects are skipped; typed
/// deserialization reports those.
#[derive(Debug, Default)]
pub struct UnknownKeys {
    paths: Vec<String>,
}

impl UnknownKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the keys of `obj`, which lives at `base` (empty for the root)
    pub fn check_object(&mut self, obj: &Map<String, Value>, base: &str, allowed: &[&str]) {
        for key in obj.keys() {
            if !allowed.contains(&key.as_str()) {
                if base.is_empty() {
                    self.paths.push(key.clone());
                } else {
                    self.paths.push(format!("{base}.{key}"));
                }
            }
        }
    }

    /// Check `value` when it is an object
    pub fn check_section(&mut self, value: Option<&Value>, base: &str, allowed: &[&str]) {
        if let Some(obj) = value.and_then(object_at) {
            self.check_object(obj, base, allowed);
        }
    }

    /// Check every object in the map `value`, keyed by name (`base.<name>`)
    pub fn check_map_values(&mut self, value: Option<&Value>, base: &str, allowed: &[&str]) {
        let Some(map) = value.and_then(object_at) else {
            return;
        };
        for (name, item) in map {
            if let Some(obj) = object_at(item) {
                self.check_object(obj, &format!("{base}.{name}"), allowed);
            }
        }
    }

    /// Check every object in the array `value` (`base[idx]`)
    pub fn check_array_items(&mut self, value: Option<&Value>, base: &str, allowed: &[&str]) {
        let Some(items) = value.and_then(array_at) else {
            return;
        };
        for (idx, item) in items.iter().enumerate() {
            if let Some(obj) = object_at(item) {
                self.check_object(obj, &format!("{base}[{idx}]"), allowed);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}
