//! Logic behind the `collection-json` binary.
//!
//! The binary reads one document, validates it and prints it back as compact
//! JSON. Everything except process handling lives here so it can
//! be tested without spawning a process.

use std::io::Read;

use crate::errors::CollectionJsonError;
use crate::parser::{ParseOptions, Parser};

/// Parse `input` as a collection or template document and re-serialize it.
/// Field order is kept as written.
pub fn normalize(input: &str, options: ParseOptions) -> Result<String, CollectionJsonError> {
    let document = Parser::new(options).parse_document(input)?;
    Ok(document.to_json_string())
}

/// Read the whole of `source` as bytes and [`normalize`] it. Input that is
/// not UTF-8 is reported as malformed JSON.
pub fn normalize_reader(
    mut source: impl Read,
    options: ParseOptions,
) -> Result<String, CollectionJsonError> {
    let mut buf = Vec::new();
    source.read_to_end(&mut buf)?;
    let document = Parser::new(options).parse_document_slice(&buf)?;
    Ok(document.to_json_string())
}
