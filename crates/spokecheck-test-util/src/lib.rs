//! Shared test utilities for the spokecheck workspace.
//!
//! Lives in its own crate because `xtask` needs `normalize_nondeterministic` at
//! runtime, not only behind `#[cfg(test)]`.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize the fields of a report envelope that change from run to run.
///
/// Only the root envelope is touched (`tool.version`, `run.started_at`, `run.ended_at`,
/// `run.duration_ms`). Finding payloads are left alone even if they contain look-alike keys.
/// Values that are not envelopes are returned unchanged.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    let is_envelope = ["schema", "tool", "run", "target", "verdict", "findings"]
        .iter()
        .all(|k| obj.contains_key(*k));
    if !is_envelope {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }

    if let Some(run) = obj.get_mut("run").and_then(Value::as_object_mut) {
        for key in ["started_at", "ended_at"] {
            if run.contains_key(key) {
                run.insert(
                    key.to_string(),
                    Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                );
            }
        }
        if run.contains_key("duration_ms") {
            run.insert("duration_ms".to_string(), Value::Number(0.into()));
        }
    }

    value
}
