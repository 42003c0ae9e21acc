//! [`Property`] — a named value attached to an item, query or template.
//!
//! On the wire a property is `{"name", "value"?, "array"?, "object"?,
//! "prompt"?}` with at most one of `value`, `array` and `object`. In memory
//! the payload is the tagged [`PropertyPayload`]; match on it instead of
//! probing accessors.

use std::hash::{Hash, Hasher};

use collection_json_node::{Json, Node};
use indexmap::IndexMap;

use crate::entity::{encode_str, Entity, Wrap};
use crate::errors::ValidationError;
use crate::validate;
use crate::value::Value;

/// What a property holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPayload {
    /// A single value. `None` marks a form field still awaiting input.
    Scalar(Option<Value>),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

/// Equality and hashing look at name, prompt and payload only, so the field
/// order a property was written in does not matter.
#[derive(Debug, Clone)]
pub struct Property {
    node: Node,
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.node.ptr_eq(&other.node)
            || (self.name() == other.name()
                && self.prompt() == other.prompt()
                && self.payload() == other.payload())
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.prompt().hash(state);
        match self.payload() {
            PropertyPayload::Scalar(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            PropertyPayload::Array(values) => {
                1u8.hash(state);
                values.hash(state);
            }
            PropertyPayload::Object(map) => {
                // map equality ignores entry order
                2u8.hash(state);
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                entries.hash(state);
            }
        }
    }
}

impl Property {
    pub fn new(name: impl Into<String>, prompt: Option<&str>, payload: PropertyPayload) -> Self {
        let (value, array, object) = match payload {
            PropertyPayload::Scalar(value) => (value.map(|v| v.to_json()), None, None),
            PropertyPayload::Array(values) => (
                None,
                Some(Json::array(values.iter().map(Value::to_json))),
                None,
            ),
            PropertyPayload::Object(entries) => (
                None,
                None,
                Some(Json::object(
                    entries.iter().map(|(k, v)| (k.as_str(), v.to_json())),
                )),
            ),
        };
        let name: String = name.into();
        Property {
            node: Node::from_fields([
                ("name", Some(Json::from(name))),
                ("value", value),
                ("array", array),
                ("object", object),
                ("prompt", encode_str(prompt)),
            ]),
        }
    }

    pub fn scalar(name: impl Into<String>, value: impl Into<Value>, prompt: Option<&str>) -> Self {
        Self::new(name, prompt, PropertyPayload::Scalar(Some(value.into())))
    }

    pub fn array<V: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
        prompt: Option<&str>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(name, prompt, PropertyPayload::Array(values))
    }

    pub fn object<K: Into<String>, V: Into<Value>>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
        prompt: Option<&str>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(name, prompt, PropertyPayload::Object(entries))
    }

    /// A field with no current value.
    pub fn placeholder(name: impl Into<String>, prompt: Option<&str>) -> Self {
        Self::new(name, prompt, PropertyPayload::Scalar(None))
    }

    pub fn name(&self) -> &str {
        self.node.get_str("name").unwrap_or_default()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.node.get_str("prompt")
    }

    pub fn payload(&self) -> PropertyPayload {
        if self.has_array() {
            PropertyPayload::Array(self.get_array())
        } else if self.has_object() {
            PropertyPayload::Object(self.get_object())
        } else {
            PropertyPayload::Scalar(self.value())
        }
    }

    pub fn has_value(&self) -> bool {
        self.node.contains_key("value")
    }

    pub fn has_array(&self) -> bool {
        self.node.contains_key("array")
    }

    pub fn has_object(&self) -> bool {
        self.node.contains_key("object")
    }

    /// The scalar payload; `None` for placeholders and non-scalar payloads.
    pub fn value(&self) -> Option<Value> {
        self.node.get("value").and_then(Value::from_json)
    }

    /// The array payload; empty for other payload kinds.
    pub fn get_array(&self) -> Vec<Value> {
        self.node
            .get_array("array")
            .iter()
            .filter_map(Value::from_json)
            .collect()
    }

    /// The object payload; empty for other payload kinds.
    pub fn get_object(&self) -> IndexMap<String, Value> {
        self.node
            .get("object")
            .and_then(Json::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Copy with the payload replaced, keeping name and prompt.
    pub fn with_payload(&self, payload: PropertyPayload) -> Property {
        Property::new(self.name(), self.prompt(), payload)
    }

    pub fn with_value(&self, value: impl Into<Value>) -> Property {
        self.with_payload(PropertyPayload::Scalar(Some(value.into())))
    }

    pub fn with_array<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Property {
        self.with_payload(PropertyPayload::Array(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn with_object<K: Into<String>, V: Into<Value>>(
        &self,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Property {
        self.with_payload(PropertyPayload::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn with_prompt(&self, prompt: Option<&str>) -> Property {
        self.with_field("prompt", encode_str(prompt))
    }
}

impl Wrap for Property {
    fn wrap(node: Node) -> Self {
        Property { node }
    }
}

impl Entity for Property {
    const KIND: &'static str = "property";
    const FIELDS: &'static [&'static str] = &["name", "value", "array", "object", "prompt"];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::property(&self.node)
    }
}
