//! collection-json-node — immutable JSON values and copy-on-write nodes.
//!
//! [`Json`] is a recursive JSON tree with reference-counted children and
//! ordered, key-unique objects. [`Node`] wraps one JSON object and offers
//! read accessors plus `with_*` updates that return new nodes instead of
//! mutating. Document entities are built on top of [`Node`].
//!
//! # Example
//!
//! ```
//! use collection_json_node::{Json, Node};
//!
//! let a = Node::new().with_field("href", Json::from("http://example.com/"));
//! let b = a.with_field("rel", Json::from("self"));
//!
//! assert_eq!(a.len(), 1);
//! assert_eq!(b.get_str("rel"), Some("self"));
//! assert_eq!(b.as_json().to_json_string(), r#"{"href":"http://example.com/","rel":"self"}"#);
//! ```

pub mod json;
pub mod node;

pub use json::{Json, Map};
pub use node::{Node, NodeError};
pub use serde_json::Number;
