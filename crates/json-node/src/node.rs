//! [`Node`] — a copy-on-write view over one JSON object.
//!
//! A node never changes after construction. Every `with_*` method builds a
//! new top-level map (untouched values are shared, not cloned) and returns a
//! new node; the receiver stays valid and observably unchanged.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;

use crate::json::{hash_map, map_eq, Json, Map};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// An immutable JSON object with field accessors and copy-on-write updates.
#[derive(Debug, Clone, Default)]
pub struct Node {
    delegate: Arc<Map>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a node from `(key, value)` pairs in emission order.
    ///
    /// `None` values are skipped, so callers can pass optional fields
    /// without pre-filtering.
    pub fn from_fields<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Option<Json>)>,
    {
        let map: Map = fields
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.into(), v)))
            .collect();
        Node {
            delegate: Arc::new(map),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.delegate.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.delegate.contains_key(key)
    }

    /// String field, or `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Json::as_str)
    }

    /// Array field, or an empty slice when absent or not an array.
    pub fn get_array(&self, key: &str) -> &[Json] {
        self.get(key).and_then(Json::as_array).unwrap_or(&[])
    }

    /// Object field as its own node, or `None` when absent or not an object.
    pub fn get_node(&self, key: &str) -> Option<Node> {
        match self.get(key) {
            Some(Json::Object(map)) => Some(Node {
                delegate: Arc::clone(map),
            }),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.delegate.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Json)> {
        self.delegate.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.delegate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }

    /// The node as a JSON object value. Shares storage with the node, which
    /// is safe because neither can change.
    pub fn as_json(&self) -> Json {
        Json::Object(Arc::clone(&self.delegate))
    }

    /// Copy with `key` set to `value`. An existing key keeps its position; a
    /// new key is appended.
    pub fn with_field(&self, key: impl Into<String>, value: Json) -> Node {
        let mut map = Map::clone(&self.delegate);
        map.insert(key.into(), value);
        Node {
            delegate: Arc::new(map),
        }
    }

    /// Copy with `key` removed. Returns a clone of `self` when the key is
    /// absent.
    pub fn without_field(&self, key: &str) -> Node {
        if !self.contains_key(key) {
            return self.clone();
        }
        let mut map = Map::clone(&self.delegate);
        map.shift_remove(key);
        Node {
            delegate: Arc::new(map),
        }
    }

    /// Copy with `key` set (or removed when `value` is `None`), laying the
    /// result out in `order`. Keys not named in `order` keep their relative
    /// position after the ordered ones.
    pub fn with_field_ordered(&self, key: &str, value: Option<Json>, order: &[&str]) -> Node {
        let mut map = Map::with_capacity(self.len() + 1);
        for name in order {
            if *name == key {
                if let Some(v) = &value {
                    map.insert(key.to_string(), v.clone());
                }
            } else if let Some(v) = self.delegate.get(*name) {
                map.insert(name.to_string(), v.clone());
            }
        }
        for (k, v) in self.delegate.iter() {
            if k != key && !order.contains(&k.as_str()) {
                map.insert(k.clone(), v.clone());
            }
        }
        if !order.contains(&key) {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        }
        Node {
            delegate: Arc::new(map),
        }
    }

    /// True when both nodes share the same storage.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.delegate, &other.delegate)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || map_eq(&self.delegate, &other.delegate)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_map(&self.delegate, state);
    }
}

impl TryFrom<Json> for Node {
    type Error = NodeError;

    fn try_from(value: Json) -> Result<Self, Self::Error> {
        match value {
            Json::Object(map) => Ok(Node { delegate: map }),
            other => Err(NodeError::NotAnObject(other.type_name())),
        }
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node {
            delegate: Arc::new(map),
        }
    }
}

impl From<Node> for Json {
    fn from(node: Node) -> Self {
        Json::Object(node.delegate)
    }
}
