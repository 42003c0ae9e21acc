use collection_json_node::{Json, Node};

use crate::data::Data;
use crate::entity::{encode_str, Entity, Wrap};
use crate::errors::{TargetError, ValidationError};
use crate::property::Property;
use crate::target::Target;
use crate::uri::Uri;
use crate::validate;

/// A parameterised request the client may issue:
/// `{"href", "encoding"?, "rel", "name"?, "prompt"?, "data"?}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    node: Node,
}

impl Query {
    pub fn create(
        target: Target,
        rel: &str,
        name: Option<&str>,
        prompt: Option<&str>,
        data: impl Into<Data>,
    ) -> Result<Query, ValidationError> {
        let data: Data = data.into();
        Query::from_node(Node::from_fields([
            ("href", Some(Json::from(target.as_str()))),
            ("encoding", encode_str(target.encoding())),
            ("rel", Some(Json::from(rel))),
            ("name", encode_str(name)),
            ("prompt", encode_str(prompt)),
            ("data", data.to_json()),
        ]))
    }

    pub fn target(&self) -> Target {
        Target::from_validated_wire(
            self.node.get_str("href").unwrap_or_default(),
            self.node.get_str("encoding"),
        )
    }

    pub fn rel(&self) -> &str {
        self.node.get_str("rel").unwrap_or_default()
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel().split_whitespace().any(|r| r == rel)
    }

    pub fn name(&self) -> Option<&str> {
        self.node.get_str("name")
    }

    pub fn prompt(&self) -> Option<&str> {
        self.node.get_str("prompt")
    }

    pub fn data(&self) -> Data {
        Data::from_node(&self.node)
    }

    /// Expand the target against `properties`.
    pub fn expand(&self, properties: &[Property]) -> Result<Uri, TargetError> {
        self.target().expand(properties)
    }

    /// Expand the target against this query's data with `properties`
    /// substituted by name, so declared defaults fill in what the caller
    /// leaves out. Names the query does not declare are ignored.
    pub fn resolve(&self, properties: &[Property]) -> Result<Uri, TargetError> {
        let data = self.data().replace(properties);
        self.target().expand(data.as_slice())
    }

    pub fn to_uri(&self) -> Result<Uri, TargetError> {
        self.target().to_uri()
    }

    pub fn with_data(&self, data: impl Into<Data>) -> Query {
        let data: Data = data.into();
        self.with_field("data", data.to_json())
    }
}

impl Wrap for Query {
    fn wrap(node: Node) -> Self {
        Query { node }
    }
}

impl Entity for Query {
    const KIND: &'static str = "query";
    const FIELDS: &'static [&'static str] = &["href", "encoding", "rel", "name", "prompt", "data"];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::query(&self.node)
    }
}
