//! The [`Entity`] trait shared by every document type.
//!
//! An entity is a typed view over a [`Node`]. Entities are only obtained
//! through validating paths (factories, [`Entity::from_node`], parsing), so
//! accessors can read fields without re-checking them.

use collection_json_node::{Json, Node, NodeError};

use crate::errors::ValidationError;

mod sealed {
    use collection_json_node::{Json, Node};

    use super::Entity;

    /// Unchecked construction, reachable only from inside the crate.
    pub trait Wrap {
        /// Wrap `node` without validating it.
        fn wrap(node: Node) -> Self;

        /// Copy with `key` replaced (or removed), keeping
        /// [`Entity::FIELDS`] order.
        ///
        /// The copy is not re-validated; callers pass values built from
        /// already-valid parts, or validate the result themselves.
        fn with_field(&self, key: &str, value: Option<Json>) -> Self
        where
            Self: Entity,
        {
            Self::wrap(self.node().with_field_ordered(key, value, Self::FIELDS))
        }
    }
}

pub(crate) use sealed::Wrap;

/// Shared surface of every document type.
///
/// Field-level updates are not part of the public surface; each entity
/// exposes its own `with_*` methods, which keep it valid.
///
/// ```compile_fail
/// use collection_json::{Entity, Link, Uri};
///
/// let link = Link::simple(Uri::parse("/a").unwrap(), "self").unwrap();
/// let _ = link.with_field("rel", None);
/// ```
pub trait Entity: Wrap + Sized {
    /// Human readable kind, used in validation messages.
    const KIND: &'static str;

    /// Field emission order.
    const FIELDS: &'static [&'static str];

    fn node(&self) -> &Node;

    /// Check required fields and nested entities.
    fn validate(&self) -> Result<(), ValidationError>;

    /// The backing JSON object. Shares storage with the entity.
    fn as_json(&self) -> Json {
        self.node().as_json()
    }

    /// Wrap and validate a node.
    fn from_node(node: Node) -> Result<Self, ValidationError> {
        let entity = Self::wrap(node);
        entity.validate()?;
        Ok(entity)
    }

    /// Wrap and validate a JSON value, which must be an object.
    fn from_json(json: Json) -> Result<Self, ValidationError> {
        match Node::try_from(json) {
            Ok(node) => Self::from_node(node),
            Err(NodeError::NotAnObject(found)) => Err(ValidationError::NotAnObject {
                entity: Self::KIND,
                found,
            }),
        }
    }
}

/// Decode the entities stored in the array field `key`.
pub(crate) fn decode_list<T: Entity>(node: &Node, key: &str) -> Vec<T> {
    node.get_array(key)
        .iter()
        .filter_map(|json| Node::try_from(json.clone()).ok())
        .map(T::wrap)
        .collect()
}

/// Decode the entity stored in the object field `key`.
pub(crate) fn decode_one<T: Entity>(node: &Node, key: &str) -> Option<T> {
    node.get_node(key).map(T::wrap)
}

/// Encode a list for emission; empty lists are not emitted.
pub(crate) fn encode_list<T: Entity>(items: &[T]) -> Option<Json> {
    if items.is_empty() {
        None
    } else {
        Some(Json::array(items.iter().map(Entity::as_json)))
    }
}

pub(crate) fn encode_str(value: Option<&str>) -> Option<Json> {
    value.map(Json::from)
}
