//! Structural validation of document nodes.
//!
//! Works on the raw [`Node`] before it is trusted as a typed entity, so the
//! same checks cover factories and parsed input. Nested failures carry the
//! path to the offending entity, e.g. `items[1].data[0]`.

use collection_json_node::{Json, Node};

use crate::collection::VERSION;
use crate::errors::ValidationError;
use crate::target::Target;
use crate::uri::Uri;

fn wrong_type(
    entity: &'static str,
    field: &'static str,
    expected: &'static str,
    found: &Json,
) -> ValidationError {
    ValidationError::WrongType {
        entity,
        field,
        expected,
        found: found.type_name(),
    }
}

fn optional_str<'a>(
    node: &'a Node,
    entity: &'static str,
    field: &'static str,
) -> Result<Option<&'a str>, ValidationError> {
    match node.get(field) {
        None => Ok(None),
        Some(Json::String(s)) => Ok(Some(&**s)),
        Some(other) => Err(wrong_type(entity, field, "a string", other)),
    }
}

fn required_str<'a>(
    node: &'a Node,
    entity: &'static str,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    optional_str(node, entity, field)?.ok_or(ValidationError::MissingField { entity, field })
}

/// `rel` must hold at least one relation token; a blank string counts as
/// missing.
fn required_rel(node: &Node, entity: &'static str) -> Result<(), ValidationError> {
    let rel = required_str(node, entity, "rel")?;
    if rel.split_whitespace().next().is_none() {
        return Err(ValidationError::MissingField { entity, field: "rel" });
    }
    Ok(())
}

fn check_uri(entity: &'static str, field: &'static str, uri: &str) -> Result<(), ValidationError> {
    Uri::parse(uri)
        .map(|_| ())
        .map_err(|source| ValidationError::InvalidTarget {
            entity,
            field,
            source,
        })
}

/// Validate every element of the array field `key` with `check`.
fn list(
    node: &Node,
    entity: &'static str,
    key: &'static str,
    check: fn(&Node) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    let items = match node.get(key) {
        None => return Ok(()),
        Some(Json::Array(items)) => items,
        Some(other) => return Err(wrong_type(entity, key, "an array", other)),
    };
    for (i, item) in items.iter().enumerate() {
        let at = || format!("{key}[{i}]");
        let child = Node::try_from(item.clone())
            .map_err(|_| wrong_type(entity, key, "an array of objects", item).at(at()))?;
        check(&child).map_err(|e| e.at(at()))?;
    }
    Ok(())
}

/// Validate the optional object field `key` with `check`.
fn optional_object(
    node: &Node,
    entity: &'static str,
    key: &'static str,
    check: fn(&Node) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    match node.get(key) {
        None => Ok(()),
        Some(json) => match node.get_node(key) {
            Some(child) => check(&child).map_err(|e| e.at(key)),
            None => Err(wrong_type(entity, key, "an object", json)),
        },
    }
}

pub fn property(node: &Node) -> Result<(), ValidationError> {
    const ENTITY: &str = "property";
    let name = required_str(node, ENTITY, "name")?;
    optional_str(node, ENTITY, "prompt")?;

    let kinds = ["value", "array", "object"]
        .into_iter()
        .filter(|k| node.contains_key(k))
        .count();
    if kinds > 1 {
        return Err(ValidationError::AmbiguousPayload {
            name: name.to_string(),
        });
    }

    if let Some(value) = node.get("value") {
        if !value.is_scalar() {
            return Err(wrong_type(ENTITY, "value", "a scalar", value));
        }
    }
    if let Some(array) = node.get("array") {
        match array.as_array() {
            Some(values) => {
                if let Some(bad) = values.iter().find(|v| !v.is_scalar()) {
                    return Err(wrong_type(ENTITY, "array", "an array of scalars", bad));
                }
            }
            None => return Err(wrong_type(ENTITY, "array", "an array", array)),
        }
    }
    if let Some(object) = node.get("object") {
        match object.as_object() {
            Some(entries) => {
                if let Some(bad) = entries.values().find(|v| !v.is_scalar()) {
                    return Err(wrong_type(ENTITY, "object", "an object of scalars", bad));
                }
            }
            None => return Err(wrong_type(ENTITY, "object", "an object", object)),
        }
    }
    Ok(())
}

pub fn link(node: &Node) -> Result<(), ValidationError> {
    const ENTITY: &str = "link";
    let href = required_str(node, ENTITY, "href")?;
    check_uri(ENTITY, "href", href)?;
    required_rel(node, ENTITY)?;
    for field in ["name", "prompt", "render"] {
        optional_str(node, ENTITY, field)?;
    }
    Ok(())
}

pub fn item(node: &Node) -> Result<(), ValidationError> {
    const ENTITY: &str = "item";
    if let Some(href) = optional_str(node, ENTITY, "href")? {
        check_uri(ENTITY, "href", href)?;
    }
    list(node, ENTITY, "data", property)?;
    list(node, ENTITY, "links", link)
}

pub fn query(node: &Node) -> Result<(), ValidationError> {
    const ENTITY: &str = "query";
    let href = required_str(node, ENTITY, "href")?;
    let encoding = optional_str(node, ENTITY, "encoding")?;
    if let Some(encoding) = encoding {
        if encoding != crate::target::URI_TEMPLATE_ENCODING {
            return Err(ValidationError::UnsupportedEncoding(encoding.to_string()));
        }
    }
    Target::from_wire(href, encoding).map_err(|source| ValidationError::InvalidTarget {
        entity: ENTITY,
        field: "href",
        source,
    })?;
    required_rel(node, ENTITY)?;
    optional_str(node, ENTITY, "name")?;
    optional_str(node, ENTITY, "prompt")?;
    list(node, ENTITY, "data", property)
}

pub fn template(node: &Node) -> Result<(), ValidationError> {
    list(node, "template", "data", property)
}

pub fn error(node: &Node) -> Result<(), ValidationError> {
    for field in ["title", "code", "message"] {
        optional_str(node, "error", field)?;
    }
    Ok(())
}

/// Collection checks. A missing version is accepted; a present one must be
/// `"1.0"`.
pub fn collection(node: &Node) -> Result<(), ValidationError> {
    const ENTITY: &str = "collection";
    if let Some(version) = optional_str(node, ENTITY, "version")? {
        if version != VERSION {
            return Err(ValidationError::UnsupportedVersion(version.to_string()));
        }
    }
    if let Some(href) = optional_str(node, ENTITY, "href")? {
        check_uri(ENTITY, "href", href)?;
    }
    list(node, ENTITY, "links", link)?;
    list(node, ENTITY, "items", item)?;
    list(node, ENTITY, "queries", query)?;
    optional_object(node, ENTITY, "template", template)?;
    optional_object(node, ENTITY, "error", error)
}
