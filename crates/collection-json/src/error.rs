use collection_json_node::Node;

use crate::entity::{encode_str, Entity, Wrap};
use crate::errors::ValidationError;
use crate::validate;

/// A server-reported problem: `{"title"?, "code"?, "message"?}`.
///
/// This is document content, not a Rust failure; see
/// [`crate::CollectionJsonError`] for those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Error {
    node: Node,
}

impl Error {
    pub fn create(title: Option<&str>, code: Option<&str>, message: Option<&str>) -> Error {
        Error {
            node: Node::from_fields([
                ("title", encode_str(title)),
                ("code", encode_str(code)),
                ("message", encode_str(message)),
            ]),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.node.get_str("title")
    }

    pub fn code(&self) -> Option<&str> {
        self.node.get_str("code")
    }

    pub fn message(&self) -> Option<&str> {
        self.node.get_str("message")
    }
}

impl Wrap for Error {
    fn wrap(node: Node) -> Self {
        Error { node }
    }
}

impl Entity for Error {
    const KIND: &'static str = "error";
    const FIELDS: &'static [&'static str] = &["title", "code", "message"];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::error(&self.node)
    }
}
