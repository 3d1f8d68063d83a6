// SPDX-License-Identifier: MPL-2.0
//! Local mirror of the streamed subtree.
//!
//! `put` replaces the value at a path, `patch` merges children into it.
//! Writing `null` deletes. Objects left empty by a delete are removed, so an
//! empty subtree reads back as absent.

use serde_json::{Map, Value};

/// Client-side copy of the value at the subscribed path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mirror {
    root: Option<Value>,
}

impl Mirror {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, `None` when the subtree is empty.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Replaces the value at `path` (relative to the subscribed root).
    pub fn apply_put(&mut self, path: &str, data: Value) {
        let segments = split(path);
        let root = self.root.take().unwrap_or(Value::Null);
        self.root = normalize(set_at(root, &segments, data));
    }

    /// Merges the children of `data` into the value at `path`.
    ///
    /// A non-object `data` behaves like a put.
    pub fn apply_patch(&mut self, path: &str, data: Value) {
        let Value::Object(children) = data else {
            self.apply_put(path, data);
            return;
        };

        let base = split(path);
        let mut root = self.root.take().unwrap_or(Value::Null);
        for (key, child) in children {
            let mut segments = base.clone();
            segments.extend(split(&key));
            root = set_at(root, &segments, child);
        }
        self.root = normalize(root);
    }
}

fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(ref map) if map.is_empty() => None,
        other => Some(other),
    }
}

fn set_at(current: Value, segments: &[String], data: Value) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return data;
    };

    let mut map = into_object(current);
    let child = map.get_mut(head).map(std::mem::take).unwrap_or_default();
    match normalize(set_at(child, rest, data)) {
        Some(updated) => {
            // Replaces in place for existing keys, appends new ones.
            map.insert(head.clone(), updated);
        }
        None => {
            map.shift_remove(head);
        }
    }
    Value::Object(map)
}

/// Views a node as a keyed map. Arrays become index-keyed objects; scalars
/// are overwritten.
fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_put_replaces_everything() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!({ "a": { "id": "a", "url": "u1" } }));
        mirror.apply_put("/", json!({ "b": { "id": "b", "url": "u2" } }));

        assert_eq!(mirror.value(), Some(&json!({ "b": { "id": "b", "url": "u2" } })));
    }

    #[test]
    fn root_put_null_empties_mirror() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!({ "a": 1 }));
        mirror.apply_put("/", Value::Null);

        assert_eq!(mirror.value(), None);
    }

    #[test]
    fn nested_put_creates_parents() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/k1/url", json!("https://img/1.jpg"));

        assert_eq!(mirror.value(), Some(&json!({ "k1": { "url": "https://img/1.jpg" } })));
    }

    #[test]
    fn nested_put_null_deletes_and_prunes() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!({ "k1": { "id": "k1" }, "k2": { "id": "k2" } }));

        mirror.apply_put("/k1/id", Value::Null);
        assert_eq!(mirror.value(), Some(&json!({ "k2": { "id": "k2" } })));

        mirror.apply_put("/k2", Value::Null);
        assert_eq!(mirror.value(), None);
    }

    #[test]
    fn new_keys_append_in_arrival_order() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!({ "b": 1, "a": 2 }));
        mirror.apply_put("/c", json!(3));

        let keys: Vec<_> = mirror
            .value()
            .and_then(Value::as_object)
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn patch_merges_children() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!({ "k1": { "id": "k1", "url": "old" } }));
        mirror.apply_patch("/k1", json!({ "url": "new", "title": "Murti" }));

        assert_eq!(
            mirror.value(),
            Some(&json!({ "k1": { "id": "k1", "url": "new", "title": "Murti" } }))
        );
    }

    #[test]
    fn patch_null_child_deletes_it() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!({ "k1": 1, "k2": 2 }));
        mirror.apply_patch("/", json!({ "k1": null }));

        assert_eq!(mirror.value(), Some(&json!({ "k2": 2 })));
    }

    #[test]
    fn put_into_array_converts_to_keyed_map() {
        let mut mirror = Mirror::new();
        mirror.apply_put("/", json!([null, { "id": 1 }]));
        mirror.apply_put("/2", json!({ "id": 2 }));

        assert_eq!(
            mirror.value(),
            Some(&json!({ "1": { "id": 1 }, "2": { "id": 2 } }))
        );
    }
}
