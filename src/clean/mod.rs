//! Deep-prune of extracted results
//!
//! Extractors return whatever they find, which routinely includes nothing:
//! a missing node becomes `Null`, absent text becomes `""`, an unmatched
//! selector list becomes `[]`. Pruning runs once per page so the ledger
//! only carries fields that actually had content.

use serde_json::{Map, Value};

/// Prunes one value.
///
/// Returns `None` when the value should be dropped entirely: `Null`,
/// `false`, an empty string, or a container that is (or becomes) empty
/// after its own entries are pruned. Numbers survive regardless of value,
/// zero included.
pub fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(prune).collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::Array(kept))
            }
        }
        Value::Object(map) => {
            let kept = prune_map(map);
            if kept.is_empty() {
                None
            } else {
                Some(Value::Object(kept))
            }
        }
        other => Some(other),
    }
}

/// Prunes every entry of a result mapping.
///
/// The mapping itself is kept even when all of its entries are dropped, so
/// a page that extracted nothing is an empty result rather than no result.
pub fn prune_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| prune(value).map(|value| (key, value)))
        .collect()
}
