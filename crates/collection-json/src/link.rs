use std::fmt;

use collection_json_node::{Json, Node};

use crate::entity::{encode_str, Entity, Wrap};
use crate::errors::ValidationError;
use crate::uri::Uri;
use crate::validate;

/// Rendering hint of a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Render {
    Link,
    Image,
    Other(String),
}

impl Render {
    pub fn as_str(&self) -> &str {
        match self {
            Render::Link => "link",
            Render::Image => "image",
            Render::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for Render {
    fn from(s: &str) -> Self {
        match s {
            "link" => Render::Link,
            "image" => Render::Image,
            other => Render::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hyperlink: `{"href", "rel", "name"?, "prompt"?, "render"?}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    node: Node,
}

impl Link {
    pub fn create(
        href: Uri,
        rel: &str,
        name: Option<&str>,
        prompt: Option<&str>,
        render: Option<Render>,
    ) -> Result<Link, ValidationError> {
        Link::from_node(Node::from_fields([
            ("href", Some(Json::from(href.as_str()))),
            ("rel", Some(Json::from(rel))),
            ("name", encode_str(name)),
            ("prompt", encode_str(prompt)),
            ("render", render.map(|r| Json::from(r.as_str()))),
        ]))
    }

    /// A link with only `href` and `rel`.
    pub fn simple(href: Uri, rel: &str) -> Result<Link, ValidationError> {
        Link::create(href, rel, None, None, None)
    }

    pub fn href(&self) -> Uri {
        Uri::from_validated(self.node.get_str("href").unwrap_or_default())
    }

    /// The raw relation list, possibly several space separated tokens.
    pub fn rel(&self) -> &str {
        self.node.get_str("rel").unwrap_or_default()
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.rel().split_whitespace()
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels().any(|r| r == rel)
    }

    pub fn name(&self) -> Option<&str> {
        self.node.get_str("name")
    }

    pub fn prompt(&self) -> Option<&str> {
        self.node.get_str("prompt")
    }

    pub fn render(&self) -> Option<Render> {
        self.node.get_str("render").map(Render::from)
    }

    pub fn with_href(&self, href: Uri) -> Link {
        self.with_field("href", Some(Json::from(href.as_str())))
    }

    pub fn with_prompt(&self, prompt: Option<&str>) -> Link {
        self.with_field("prompt", encode_str(prompt))
    }
}

impl Wrap for Link {
    fn wrap(node: Node) -> Self {
        Link { node }
    }
}

impl Entity for Link {
    const KIND: &'static str = "link";
    const FIELDS: &'static [&'static str] = &["href", "rel", "name", "prompt", "render"];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::link(&self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    #[test]
    fn create_emits_fields_in_order() {
        let link = Link::create(
            uri("http://example.org/friends/rss"),
            "feed",
            Some("rss"),
            Some("Feed"),
            Some(Render::Link),
        )
        .unwrap();
        assert_eq!(
            link.as_json().to_json_string(),
            r#"{"href":"http://example.org/friends/rss","rel":"feed","name":"rss","prompt":"Feed","render":"link"}"#
        );
        assert_eq!(link.render(), Some(Render::Link));
    }

    #[test]
    fn rel_tokens() {
        let link = Link::simple(uri("/a"), "alternate  nofollow").unwrap();
        assert_eq!(link.rels().collect::<Vec<_>>(), vec!["alternate", "nofollow"]);
        assert!(link.has_rel("nofollow"));
        assert!(!link.has_rel("follow"));
    }

    #[test]
    fn unknown_render_is_kept() {
        let link = Link::from_json(Json::from(json!({"href": "/a", "rel": "x", "render": "video"})))
            .unwrap();
        assert_eq!(link.render(), Some(Render::Other("video".to_string())));
    }

    #[test]
    fn rel_is_required() {
        let err = Link::from_json(Json::from(json!({"href": "/a"}))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                entity: "link",
                field: "rel"
            }
        );
    }

    #[test]
    fn blank_rel_counts_as_missing() {
        let missing = ValidationError::MissingField {
            entity: "link",
            field: "rel",
        };
        assert_eq!(Link::simple(uri("/a"), "").unwrap_err(), missing);
        assert_eq!(Link::simple(uri("/a"), " \t ").unwrap_err(), missing);
        assert_eq!(
            Link::from_json(Json::from(json!({"href": "/a", "rel": ""}))).unwrap_err(),
            missing
        );
    }

    #[test]
    fn non_object_is_reported_with_kind() {
        let err = Link::from_json(Json::from(json!([1]))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAnObject {
                entity: "link",
                found: "array"
            }
        );
        assert_eq!(err.to_string(), "link must be an object, found array");
    }

    #[test]
    fn href_must_be_a_uri() {
        let err = Link::from_json(Json::from(json!({"href": "/a b", "rel": "x"}))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTarget { field: "href", .. }));
    }

    #[test]
    fn with_prompt_does_not_touch_original() {
        let link = Link::simple(uri("/a"), "self").unwrap();
        let prompted = link.with_prompt(Some("Me"));
        assert_eq!(link.prompt(), None);
        assert_eq!(prompted.prompt(), Some("Me"));
        assert_eq!(
            prompted.as_json().to_json_string(),
            r#"{"href":"/a","rel":"self","prompt":"Me"}"#
        );
    }
}
