//! Writing documents as JSON text.
//!
//! Output is compact and keeps field order as stored, which for values built
//! through this crate is the canonical emission order of each entity.

use std::fmt;
use std::io;

use collection_json_node::Json;

use crate::collection::Collection;
use crate::entity::Entity;
use crate::errors::CollectionJsonError;
use crate::parser::{Document, COLLECTION_KEY, TEMPLATE_KEY};
use crate::template::Template;

fn wrapped(key: &str, body: Json) -> Json {
    Json::object([(key, body)])
}

fn write_json(json: &Json, writer: impl io::Write) -> Result<(), CollectionJsonError> {
    serde_json::to_writer(writer, json).map_err(CollectionJsonError::Write)
}

impl Collection {
    /// The full document, `{"collection": ...}`.
    pub fn to_document(&self) -> Json {
        wrapped(COLLECTION_KEY, self.as_json())
    }

    pub fn write_to(&self, writer: impl io::Write) -> Result<(), CollectionJsonError> {
        write_json(&self.to_document(), writer)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.to_json_string().into_bytes()
    }

    pub fn to_json_string(&self) -> String {
        self.to_document().to_json_string()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_document(), f)
    }
}

impl Template {
    /// The full document, `{"template": ...}`.
    pub fn to_document(&self) -> Json {
        wrapped(TEMPLATE_KEY, self.as_json())
    }

    pub fn write_to(&self, writer: impl io::Write) -> Result<(), CollectionJsonError> {
        write_json(&self.to_document(), writer)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.to_json_string().into_bytes()
    }

    pub fn to_json_string(&self) -> String {
        self.to_document().to_json_string()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_document(), f)
    }
}

impl Document {
    pub fn write_to(&self, writer: impl io::Write) -> Result<(), CollectionJsonError> {
        match self {
            Document::Collection(c) => c.write_to(writer),
            Document::Template(t) => t.write_to(writer),
        }
    }

    pub fn to_json_string(&self) -> String {
        match self {
            Document::Collection(c) => c.to_json_string(),
            Document::Template(t) => t.to_json_string(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Collection(c) => fmt::Display::fmt(c, f),
            Document::Template(t) => fmt::Display::fmt(t, f),
        }
    }
}
