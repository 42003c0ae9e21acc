//! Reading documents from JSON text.
//!
//! A collection document is `{"collection": {...}}`; a standalone template
//! is `{"template": {...}}`. The wrapped object is validated before a typed
//! value is returned, so a failed parse never yields a partial collection.
//!
//! # Example
//!
//! ```
//! use collection_json::parse_collection;
//!
//! let c = parse_collection(r#"{"collection": {"version": "1.0", "href": "/friends/"}}"#).unwrap();
//! assert_eq!(c.href().unwrap().as_str(), "/friends/");
//! assert!(parse_collection(r#"{"template": {}}"#).is_err());
//! ```

use std::io::Read;

use collection_json_node::{Json, Node};

use crate::collection::{Collection, VERSION};
use crate::entity::Entity;
use crate::errors::CollectionJsonError;
use crate::template::Template;

/// Wrapper key of a collection document.
pub const COLLECTION_KEY: &str = "collection";
/// Wrapper key of a standalone template document.
pub const TEMPLATE_KEY: &str = "template";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject a `version` other than `"1.0"`. When off, any string version
    /// is read as `"1.0"`. A missing version is always accepted.
    pub strict_version: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_version: true,
        }
    }
}

/// Either kind of top-level document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Collection(Collection),
    Template(Template),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    // ── Collection ────────────────────────────────────────────────────────

    pub fn parse_collection(&self, input: &str) -> Result<Collection, CollectionJsonError> {
        self.collection_from_json(read_str(input)?)
    }

    pub fn parse_collection_slice(&self, input: &[u8]) -> Result<Collection, CollectionJsonError> {
        self.collection_from_json(read_slice(input)?)
    }

    pub fn parse_collection_reader(
        &self,
        input: impl Read,
    ) -> Result<Collection, CollectionJsonError> {
        self.collection_from_json(read_reader(input)?)
    }

    /// Unwrap and validate an already parsed `{"collection": ...}` document.
    pub fn collection_from_json(&self, document: Json) -> Result<Collection, CollectionJsonError> {
        let body = unwrap_document(document, COLLECTION_KEY)?;
        self.collection_from_body(body)
    }

    fn collection_from_body(&self, body: Json) -> Result<Collection, CollectionJsonError> {
        let body = if self.options.strict_version {
            body
        } else {
            relax_version(body)
        };
        let collection = Collection::from_json(body).map_err(|e| {
            tracing::debug!(error = %e, "collection rejected");
            e
        })?;
        tracing::debug!(
            links = collection.links().len(),
            items = collection.items().len(),
            queries = collection.queries().len(),
            "parsed collection"
        );
        Ok(collection)
    }

    // ── Template ──────────────────────────────────────────────────────────

    pub fn parse_template(&self, input: &str) -> Result<Template, CollectionJsonError> {
        self.template_from_json(read_str(input)?)
    }

    pub fn parse_template_slice(&self, input: &[u8]) -> Result<Template, CollectionJsonError> {
        self.template_from_json(read_slice(input)?)
    }

    pub fn parse_template_reader(&self, input: impl Read) -> Result<Template, CollectionJsonError> {
        self.template_from_json(read_reader(input)?)
    }

    /// Unwrap and validate an already parsed `{"template": ...}` document.
    pub fn template_from_json(&self, document: Json) -> Result<Template, CollectionJsonError> {
        let body = unwrap_document(document, TEMPLATE_KEY)?;
        template_from_body(body)
    }

    // ── Either ────────────────────────────────────────────────────────────

    /// Parse a document wrapped in either `collection` or `template`. When
    /// both keys are present the collection wins.
    pub fn parse_document(&self, input: &str) -> Result<Document, CollectionJsonError> {
        self.document_from_json(read_str(input)?)
    }

    pub fn parse_document_slice(&self, input: &[u8]) -> Result<Document, CollectionJsonError> {
        self.document_from_json(read_slice(input)?)
    }

    pub fn document_from_json(&self, document: Json) -> Result<Document, CollectionJsonError> {
        let root = top_level(document)?;
        if let Some(body) = root.get(COLLECTION_KEY) {
            return self.collection_from_body(body.clone()).map(Document::Collection);
        }
        if let Some(body) = root.get(TEMPLATE_KEY) {
            return template_from_body(body.clone()).map(Document::Template);
        }
        Err(CollectionJsonError::MissingWrapper(COLLECTION_KEY))
    }
}

/// Rewrite any string `version` to the supported one. Other shapes are left
/// for validation to report.
fn relax_version(body: Json) -> Json {
    let Ok(node) = Node::try_from(body.clone()) else {
        return body;
    };
    match node.get_str("version") {
        Some(version) if version != VERSION => {
            tracing::debug!(version, "normalizing collection version");
            node.with_field("version", Json::from(VERSION)).into()
        }
        _ => body,
    }
}

fn template_from_body(body: Json) -> Result<Template, CollectionJsonError> {
    let template = Template::from_json(body).map_err(|e| {
        tracing::debug!(error = %e, "template rejected");
        e
    })?;
    tracing::debug!(properties = template.data().len(), "parsed template");
    Ok(template)
}

fn read_str(input: &str) -> Result<Json, CollectionJsonError> {
    tracing::debug!(bytes = input.len(), "parsing document");
    serde_json::from_str(input).map_err(CollectionJsonError::Malformed)
}

fn read_slice(input: &[u8]) -> Result<Json, CollectionJsonError> {
    tracing::debug!(bytes = input.len(), "parsing document");
    serde_json::from_slice(input).map_err(CollectionJsonError::Malformed)
}

fn read_reader(input: impl Read) -> Result<Json, CollectionJsonError> {
    tracing::debug!("parsing document from reader");
    serde_json::from_reader(input).map_err(CollectionJsonError::Malformed)
}

fn top_level(document: Json) -> Result<Node, CollectionJsonError> {
    let found = document.type_name();
    Node::try_from(document).map_err(|_| CollectionJsonError::NotAnObject(found))
}

fn unwrap_document(document: Json, key: &'static str) -> Result<Json, CollectionJsonError> {
    top_level(document)?
        .get(key)
        .cloned()
        .ok_or(CollectionJsonError::MissingWrapper(key))
}

/// Parse a collection document with default options.
pub fn parse_collection(input: &str) -> Result<Collection, CollectionJsonError> {
    Parser::default().parse_collection(input)
}

pub fn parse_collection_slice(input: &[u8]) -> Result<Collection, CollectionJsonError> {
    Parser::default().parse_collection_slice(input)
}

pub fn parse_collection_reader(input: impl Read) -> Result<Collection, CollectionJsonError> {
    Parser::default().parse_collection_reader(input)
}

/// Parse a standalone template document with default options.
pub fn parse_template(input: &str) -> Result<Template, CollectionJsonError> {
    Parser::default().parse_template(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use serde_json::json;

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            parse_collection("{\"collection\": "),
            Err(CollectionJsonError::Malformed(_))
        ));
        assert!(matches!(
            parse_collection("[1, 2]"),
            Err(CollectionJsonError::NotAnObject("array"))
        ));
    }

    #[test]
    fn wrapper_key_is_required() {
        assert!(matches!(
            parse_collection(r#"{"version": "1.0"}"#),
            Err(CollectionJsonError::MissingWrapper("collection"))
        ));
        assert!(matches!(
            parse_template(r#"{"collection": {}}"#),
            Err(CollectionJsonError::MissingWrapper("template"))
        ));
    }

    #[test]
    fn version_check_follows_options() {
        let doc = r#"{"collection": {"version": "2.0"}}"#;
        assert!(matches!(
            parse_collection(doc),
            Err(CollectionJsonError::Validation(ValidationError::UnsupportedVersion(v))) if v == "2.0"
        ));

        let lenient = Parser::new(ParseOptions {
            strict_version: false,
        });
        let relaxed = lenient.parse_collection(doc).unwrap();
        assert_eq!(relaxed.version(), "1.0");
        assert_eq!(relaxed.to_json_string(), r#"{"collection":{"version":"1.0"}}"#);
        assert_eq!(parse_collection(&relaxed.to_json_string()).unwrap(), relaxed);
    }

    #[test]
    fn lenient_mode_still_checks_version_type() {
        let lenient = Parser::new(ParseOptions {
            strict_version: false,
        });
        assert!(matches!(
            lenient.parse_collection(r#"{"collection": {"version": 1}}"#),
            Err(CollectionJsonError::Validation(ValidationError::WrongType { field: "version", .. }))
        ));
    }

    #[test]
    fn missing_version_reads_as_default() {
        let c = parse_collection(r#"{"collection": {}}"#).unwrap();
        assert_eq!(c.version(), "1.0");
    }

    #[test]
    fn invalid_nested_entity_fails_whole_parse() {
        let doc = json!({"collection": {"version": "1.0", "queries": [{"href": "/q"}]}});
        let err = parse_collection(&doc.to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid document: queries[0]: query is missing required field \"rel\""
        );
    }

    #[test]
    fn slice_and_reader_agree_with_str() {
        let text = r#"{"collection": {"version": "1.0", "href": "http://example.org/"}}"#;
        let a = parse_collection(text).unwrap();
        let b = parse_collection_slice(text.as_bytes()).unwrap();
        let c = parse_collection_reader(text.as_bytes()).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn parse_document_detects_kind() {
        let parser = Parser::default();
        assert!(matches!(
            parser.parse_document(r#"{"template": {"data": [{"name": "a"}]}}"#),
            Ok(Document::Template(_))
        ));
        assert!(matches!(
            parser.parse_document(r#"{"collection": {"version": "1.0"}}"#),
            Ok(Document::Collection(_))
        ));
        assert!(matches!(
            parser.parse_document(r#"{"other": {}}"#),
            Err(CollectionJsonError::MissingWrapper(_))
        ));
    }

    #[test]
    fn document_slice_rejects_invalid_utf8() {
        let bytes = b"{\"collection\": {\"href\": \"\xff\"}}";
        assert!(matches!(
            Parser::default().parse_document_slice(bytes),
            Err(CollectionJsonError::Malformed(_))
        ));
        assert!(matches!(
            Parser::default().parse_document_slice(br#"{"template": {}}"#),
            Ok(Document::Template(_))
        ));
    }
}
