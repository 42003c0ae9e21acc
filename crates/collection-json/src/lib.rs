//! collection-json — an immutable, validated document model for the
//! Collection+JSON hypermedia type (`application/vnd.collection+json`).
//!
//! Documents are trees of entities ([`Collection`], [`Item`], [`Link`],
//! [`Query`], [`Template`], [`Error`], [`Property`]), each a typed view over
//! a copy-on-write JSON node. Every entity is validated when it is created
//! or parsed; every update returns a new value and leaves the receiver
//! untouched, so values can be shared freely across threads.
//!
//! Queries point at a [`Target`]: a literal URI whose query string receives
//! the properties as form-encoded pairs, or an RFC 6570 URI Template.
//!
//! # Example
//!
//! ```
//! use collection_json::{parse_collection, Property};
//!
//! let collection = parse_collection(r#"{
//!   "collection": {
//!     "version": "1.0",
//!     "href": "http://example.org/friends/",
//!     "queries": [{
//!       "href": "http://example.org/friends/search",
//!       "rel": "search",
//!       "data": [{"name": "search", "value": ""}]
//!     }]
//!   }
//! }"#).unwrap();
//!
//! let search = collection.query_by_rel("search").unwrap();
//! let uri = search.resolve(&[Property::scalar("search", "jdoe", None)]).unwrap();
//! assert_eq!(uri.as_str(), "http://example.org/friends/search?search=jdoe");
//!
//! let again = collection.add_item(
//!     collection_json::Item::create(None, vec![Property::scalar("full-name", "J. Doe", None)], vec![])
//!         .unwrap(),
//! ).unwrap();
//! assert_eq!(collection.items().len(), 0);
//! assert_eq!(again.items().len(), 1);
//! ```

pub mod builder;
pub mod cli;
pub mod collection;
pub mod data;
pub mod entity;
pub mod error;
pub mod errors;
pub mod item;
pub mod link;
pub mod parser;
pub mod property;
pub mod query;
pub mod target;
pub mod template;
pub mod uri;
pub mod validate;
pub mod value;
pub mod writer;

/// Registered media type of Collection+JSON documents.
pub const MEDIA_TYPE: &str = "application/vnd.collection+json";

pub use builder::CollectionBuilder;
pub use collection::{Collection, VERSION};
pub use data::Data;
pub use entity::Entity;
pub use error::Error;
pub use errors::{CollectionJsonError, TargetError, ValidationError};
pub use item::Item;
pub use link::{Link, Render};
pub use parser::{
    parse_collection, parse_collection_reader, parse_collection_slice, parse_template, Document,
    ParseOptions, Parser,
};
pub use property::{Property, PropertyPayload};
pub use query::Query;
pub use target::{Target, UriTemplate, URI_TEMPLATE_ENCODING};
pub use template::Template;
pub use uri::Uri;
pub use value::Value;

pub use collection_json_node::{Json, Node};
