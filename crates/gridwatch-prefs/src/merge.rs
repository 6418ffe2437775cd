// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lenient overlay of stored JSON onto the JSON form of a default object.
//!
//! Restoring never trusts the decoded shape. The defaults are encoded first,
//! then the stored document is laid over them key by key. A stored leaf only
//! replaces a default leaf of the same JSON kind, so a single bad field costs
//! that field and nothing else. The typed decode at the end is the final gate.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Overlay `stored` onto `base` in place. Keys missing from `base` are dropped.
pub fn overlay(base: &mut Value, stored: Value) {
    match (base, stored) {
        (Value::Object(fields), Value::Object(stored)) => {
            for (key, value) in stored {
                if let Some(field) = fields.get_mut(&key) {
                    overlay(field, value);
                }
            }
        }
        (base, stored) => {
            // A null default (optional value) accepts whatever was stored;
            // the typed decode decides whether it fits.
            if base.is_null() || same_kind(base, &stored) {
                *base = stored;
            }
        }
    }
}

/// Encode `defaults`, overlay `stored`, and decode the result as `T`.
///
/// Top-level fields named in `open_maps` are restored whole: a stored object
/// replaces the default map entirely instead of being merged into it, so
/// entries removed before saving stay removed.
pub fn restore_over<T>(
    defaults: &T,
    mut stored: Value,
    open_maps: &[&str],
) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(defaults)?;
    if let (Value::Object(fields), Value::Object(stored)) = (&mut merged, &mut stored) {
        for key in open_maps {
            if let (Some(field), Some(Value::Object(map))) =
                (fields.get_mut(*key), stored.remove(*key))
            {
                *field = Value::Object(scrub(map));
            }
        }
    }
    overlay(&mut merged, stored);
    serde_json::from_value(merged)
}

fn same_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
    )
}

// Configuration values are primitives or nested maps; nulls and arrays
// inside an open map are dropped.
fn scrub(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null | Value::Array(_) => None,
            Value::Object(inner) => Some((key, Value::Object(scrub(inner)))),
            other => Some((key, other)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_fields_replace_defaults() {
        let mut base = json!({"a": true, "b": 1, "c": "x"});
        overlay(&mut base, json!({"a": false, "c": "y"}));
        assert_eq!(base, json!({"a": false, "b": 1, "c": "y"}));
    }

    #[test]
    fn mismatched_kinds_keep_default() {
        let mut base = json!({"a": true, "b": 1});
        overlay(&mut base, json!({"a": "yes", "b": null}));
        assert_eq!(base, json!({"a": true, "b": 1}));
    }

    #[test]
    fn nested_objects_merge_per_key() {
        let mut base = json!({"outer": {"x": 1, "y": 2}});
        overlay(&mut base, json!({"outer": {"y": 5}}));
        assert_eq!(base, json!({"outer": {"x": 1, "y": 5}}));
    }

    #[test]
    fn object_over_scalar_is_ignored() {
        let mut base = json!({"a": 1});
        overlay(&mut base, json!({"a": {"nested": 2}}));
        assert_eq!(base, json!({"a": 1}));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let mut base = json!({"a": 1, "inner": {"b": 2}});
        overlay(&mut base, json!({"extra": 2, "inner": {"c": 3}}));
        assert_eq!(base, json!({"a": 1, "inner": {"b": 2}}));
    }

    #[test]
    fn null_default_accepts_stored_value() {
        let mut base = Value::Null;
        overlay(&mut base, json!("acme"));
        assert_eq!(base, json!("acme"));
    }

    #[test]
    fn scalar_root_is_replaced_only_by_same_kind() {
        let mut base = json!("general");
        overlay(&mut base, json!(3));
        assert_eq!(base, json!("general"));
        overlay(&mut base, json!("display"));
        assert_eq!(base, json!("display"));
    }

    #[test]
    fn open_map_is_restored_whole() {
        let defaults = json!({"rates": {"a": 1, "b": 2}, "flag": true});
        let stored = json!({"rates": {"c": 3, "gone": null, "list": [1]}, "flag": false});
        let restored: Value = restore_over(&defaults, stored, &["rates"]).unwrap();
        assert_eq!(restored, json!({"rates": {"c": 3}, "flag": false}));
    }

    #[test]
    fn open_map_of_wrong_kind_keeps_default() {
        let defaults = json!({"rates": {"a": 1}});
        let restored: Value = restore_over(&defaults, json!({"rates": 7}), &["rates"]).unwrap();
        assert_eq!(restored, defaults);
    }

    #[test]
    fn empty_open_map_is_restored_empty() {
        let defaults = json!({"rates": {"a": 1}});
        let restored: Value = restore_over(&defaults, json!({"rates": {}}), &["rates"]).unwrap();
        assert_eq!(restored, json!({"rates": {}}));
    }
}
