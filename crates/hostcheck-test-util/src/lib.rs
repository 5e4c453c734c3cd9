//! Shared test utilities for the hostcheck workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `hostcheck-types` would not suffice.

use serde_json::Value;

/// Placeholder that replaces the fixture root in normalized reports.
pub const FIXTURES_PLACEHOLDER: &str = "__FIXTURES__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only**: `tool.version` is replaced with `"__VERSION__"` only
///    when the *root* object looks like a report envelope (has all five keys:
///    `schema`, `tool`, `run`, `verdict`, `hosts`).
///
/// 2. **Recursive**: timestamp keys (`started_at`, `ended_at`) and
///    `duration_ms` are normalized at any depth because their placeholder
///    values are fixed and cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "verdict", "hosts"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// Replace every occurrence of `root` inside string values with [`FIXTURES_PLACEHOLDER`].
///
/// Snapshot targets embed absolute paths (`snapshot:///.../host.toml`) in host
/// targets and error messages; this makes them checkout-independent.
pub fn normalize_fixture_root(mut value: Value, root: &str) -> Value {
    replace_in_strings(&mut value, root);
    value
}

fn replace_in_strings(value: &mut Value, root: &str) {
    match value {
        Value::String(s) if s.contains(root) => {
            *s = s.replace(root, FIXTURES_PLACEHOLDER);
        }
        Value::Object(map) => {
            for val in map.values_mut() {
                replace_in_strings(val, root);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                replace_in_strings(val, root);
            }
        }
        _ => {}
    }
}
