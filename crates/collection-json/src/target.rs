//! [`Target`] — where a query points: a literal URI or a URI Template.
//!
//! Both kinds expand against a property list, with different rules:
//!
//! - **Literal**: every property becomes `name=value` pairs (form encoded,
//!   space as `+`) appended to the URI's query string, in property order.
//!   Array properties add one pair per element. Object properties cannot be
//!   expressed and fail the expansion.
//! - **Template**: properties become RFC 6570 variables (scalar, list or
//!   associative) and the template is expanded.
//!
//! In both modes null values and placeholders contribute nothing.
//!
//! # Example
//!
//! ```
//! use collection_json::{Property, Target};
//!
//! let target = Target::literal("http://example.com/foo?baa=foo").unwrap();
//! let uri = target.expand(&[Property::scalar("per", "big brother", None)]).unwrap();
//! assert_eq!(uri.as_str(), "http://example.com/foo?baa=foo&per=big+brother");
//!
//! let target = Target::template("http://example.com{/foo}").unwrap();
//! assert_eq!(target.to_uri().unwrap().as_str(), "http://example.com");
//! ```

use std::fmt;

use iri_string::spec::UriSpec;
use iri_string::template::simple_context::{SimpleContext, Value as TemplateValue};
use iri_string::template::UriTemplateStr;
use url::form_urlencoded::byte_serialize;

use crate::errors::TargetError;
use crate::property::{Property, PropertyPayload};
use crate::uri::Uri;
use crate::value::Value;

/// Wire marker for template targets (`"encoding": "uri-template"`).
pub const URI_TEMPLATE_ENCODING: &str = "uri-template";

/// A syntactically valid RFC 6570 URI Template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriTemplate(String);

impl UriTemplate {
    pub fn parse(template: impl Into<String>) -> Result<UriTemplate, TargetError> {
        let template = template.into();
        let checked = UriTemplateStr::new(&template)
            .map(|_| ())
            .map_err(|e| e.to_string());
        match checked {
            Ok(()) => Ok(UriTemplate(template)),
            Err(reason) => Err(TargetError::InvalidTemplate { template, reason }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand against `context`, then check the result is a URI reference.
    fn expand_with(&self, context: &SimpleContext) -> Result<Uri, TargetError> {
        let failed = |reason: String| TargetError::Expansion {
            template: self.0.clone(),
            reason,
        };
        let template = UriTemplateStr::new(&self.0).map_err(|e| failed(e.to_string()))?;
        let expanded = template
            .expand::<UriSpec, _>(context)
            .map_err(|e| failed(e.to_string()))?
            .to_string();
        Uri::parse(expanded).map_err(|e| failed(e.to_string()))
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Literal(Uri),
    Template(UriTemplate),
}

impl Target {
    pub fn literal(uri: impl Into<String>) -> Result<Target, TargetError> {
        Ok(Target::Literal(Uri::parse(uri)?))
    }

    pub fn template(template: impl Into<String>) -> Result<Target, TargetError> {
        Ok(Target::Template(UriTemplate::parse(template)?))
    }

    /// Decode a wire `href` with its optional `encoding` marker.
    pub(crate) fn from_wire(href: &str, encoding: Option<&str>) -> Result<Target, TargetError> {
        match encoding {
            Some(URI_TEMPLATE_ENCODING) => Target::template(href),
            _ => Target::literal(href),
        }
    }

    /// Decode a wire `href` that validation has already accepted.
    pub(crate) fn from_validated_wire(href: &str, encoding: Option<&str>) -> Target {
        match encoding {
            Some(URI_TEMPLATE_ENCODING) => Target::Template(UriTemplate(href.to_string())),
            _ => Target::Literal(Uri::from_validated(href)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Target::Literal(uri) => uri.as_str(),
            Target::Template(template) => template.as_str(),
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Target::Template(_))
    }

    /// The `encoding` marker emitted next to `href`.
    pub fn encoding(&self) -> Option<&'static str> {
        match self {
            Target::Literal(_) => None,
            Target::Template(_) => Some(URI_TEMPLATE_ENCODING),
        }
    }

    /// Resolve with no properties. A literal URI is returned as-is; a
    /// template has every variable left undefined.
    pub fn to_uri(&self) -> Result<Uri, TargetError> {
        match self {
            Target::Literal(uri) => Ok(uri.clone()),
            Target::Template(template) => template.expand_with(&SimpleContext::new()),
        }
    }

    pub fn expand(&self, properties: &[Property]) -> Result<Uri, TargetError> {
        tracing::trace!(href = %self, properties = properties.len(), "expanding target");
        match self {
            Target::Literal(uri) => uri.with_query_appended(&query_pairs(properties)?),
            Target::Template(template) => template.expand_with(&template_context(properties)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn defined(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.as_string()),
    }
}

fn push_pair(out: &mut String, name: &str, value: &str) {
    if !out.is_empty() {
        out.push('&');
    }
    out.extend(byte_serialize(name.as_bytes()));
    out.push('=');
    out.extend(byte_serialize(value.as_bytes()));
}

/// Form-encoded `name=value` pairs for literal expansion.
fn query_pairs(properties: &[Property]) -> Result<String, TargetError> {
    let mut out = String::new();
    for property in properties {
        match property.payload() {
            PropertyPayload::Scalar(value) => {
                if let Some(value) = value.as_ref().and_then(defined) {
                    push_pair(&mut out, property.name(), &value);
                }
            }
            PropertyPayload::Array(values) => {
                for value in values.iter().filter_map(defined) {
                    push_pair(&mut out, property.name(), &value);
                }
            }
            PropertyPayload::Object(_) => {
                return Err(TargetError::ObjectProperty(property.name().to_string()));
            }
        }
    }
    Ok(out)
}

/// RFC 6570 variables for template expansion.
fn template_context(properties: &[Property]) -> SimpleContext {
    let mut context = SimpleContext::new();
    for property in properties {
        let value = match property.payload() {
            PropertyPayload::Scalar(value) => match value.as_ref().and_then(defined) {
                Some(s) => TemplateValue::String(s),
                None => continue,
            },
            PropertyPayload::Array(values) => {
                TemplateValue::List(values.iter().filter_map(defined).collect())
            }
            PropertyPayload::Object(entries) => TemplateValue::Assoc(
                entries
                    .iter()
                    .filter_map(|(k, v)| defined(v).map(|v| (k.clone(), v)))
                    .collect(),
            ),
        };
        context.insert(property.name(), value);
    }
    context
}
