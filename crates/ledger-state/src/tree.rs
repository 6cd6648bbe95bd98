//! Generic get/set at a path over a JSON tree.
//!
//! Paths are slices of object keys. Reads walk objects only; any non-object
//! node on the way reads as "not present". Writes create (or replace) the
//! intermediate objects they need, so `set_in` is total over any input shape.

use serde_json::{Map, Value};

/// Value at `path` under `root`, if every step is an object holding the key.
pub fn get_in<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |node, key| node.as_object()?.get(*key))
}

/// Return `root` with `value` stored at `path`.
///
/// An empty path replaces the root. Missing or non-object intermediate nodes
/// become empty objects.
pub fn set_in(root: Value, path: &[&str], value: Value) -> Value {
    let Some((head, rest)) = path.split_first() else {
        return value;
    };

    let mut map = match root {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let slot = map.entry(*head).or_insert(Value::Null);
    *slot = set_in(std::mem::take(slot), rest, value);
    Value::Object(map)
}

/// Owned copy of the object at `node`, or an empty map for anything else.
pub fn object_or_empty(node: Option<&Value>) -> Map<String, Value> {
    node.and_then(Value::as_object).cloned().unwrap_or_default()
}

/// `true` when `node` is a non-empty object.
pub fn is_populated_object(node: Option<&Value>) -> bool {
    node.and_then(Value::as_object)
        .is_some_and(|map| !map.is_empty())
}

/// Deep merge: objects merge key by key, anything else is replaced by `b`.
pub fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(a_map), Value::Object(b_map)) => Value::Object(deep_merge_maps(a_map, b_map)),
        (_, b_other) => b_other,
    }
}

/// Map form of [`deep_merge`]: `b` wins per key, nested objects merge.
pub fn deep_merge_maps(mut a: Map<String, Value>, b: Map<String, Value>) -> Map<String, Value> {
    for (k, b_val) in b {
        let a_val = a.remove(&k).unwrap_or(Value::Null);
        a.insert(k, deep_merge(a_val, b_val));
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_in_walks_objects_only() {
        let doc = json!({"ledger": {"info": {"balance": 10}, "list": [1, 2]}});
        assert_eq!(get_in(&doc, &["ledger", "info", "balance"]), Some(&json!(10)));
        assert_eq!(get_in(&doc, &["ledger", "list", "0"]), None);
        assert_eq!(get_in(&doc, &["ledger", "missing"]), None);
        assert_eq!(get_in(&doc, &[]), Some(&doc));
    }

    #[test]
    fn set_in_creates_intermediate_objects() {
        let doc = set_in(json!({"ledger": {}}), &["ledger", "promotion", "promotionId"], json!("1"));
        assert_eq!(doc, json!({"ledger": {"promotion": {"promotionId": "1"}}}));
    }

    #[test]
    fn set_in_replaces_scalar_intermediate() {
        let doc = set_in(json!({"ledger": 5}), &["ledger", "info"], json!({}));
        assert_eq!(doc, json!({"ledger": {"info": {}}}));
    }

    #[test]
    fn set_in_leaves_siblings_untouched() {
        let doc = json!({"ledger": {"publisherTime": 1, "info": {"balance": 3}}});
        let doc = set_in(doc, &["ledger", "info", "address"], json!("abc"));
        assert_eq!(
            doc,
            json!({"ledger": {"publisherTime": 1, "info": {"balance": 3, "address": "abc"}}})
        );
    }

    #[test]
    fn deep_merge_nested_objects() {
        let a = json!({"x": {"y": 1, "z": {"m": "old", "k": true}}, "keep": 1});
        let b = json!({"x": {"z": {"m": "new"}}, "add": 2});
        assert_eq!(
            deep_merge(a, b),
            json!({"x": {"y": 1, "z": {"m": "new", "k": true}}, "keep": 1, "add": 2})
        );
    }

    #[test]
    fn deep_merge_replaces_non_objects() {
        assert_eq!(deep_merge(json!({"a": [1, 2]}), json!({"a": [3]})), json!({"a": [3]}));
        assert_eq!(deep_merge(json!(1), json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn object_helpers() {
        assert!(object_or_empty(None).is_empty());
        assert!(object_or_empty(Some(&json!("str"))).is_empty());
        assert!(!is_populated_object(Some(&json!({}))));
        assert!(is_populated_object(Some(&json!({"a": 1}))));
    }
}
