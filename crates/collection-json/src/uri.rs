//! [`Uri`] — a validated URI reference (absolute or relative).

use std::fmt;

use iri_string::types::UriReferenceString;

use crate::errors::TargetError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(UriReferenceString);

impl Uri {
    /// Validate `uri` as an RFC 3986 URI reference.
    pub fn parse(uri: impl Into<String>) -> Result<Uri, TargetError> {
        UriReferenceString::try_from(uri.into())
            .map(Uri)
            .map_err(|e| TargetError::InvalidUri {
                reason: e.validation_error().to_string(),
                uri: e.into_source(),
            })
    }

    /// Re-read an href stored in an entity node. Nodes only reach an entity
    /// after `validate` accepted their hrefs.
    pub(crate) fn from_validated(uri: &str) -> Uri {
        Uri::parse(uri).expect("href checked by entity validation")
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Everything before the query and fragment.
    pub fn base(&self) -> &str {
        let s = self.as_str();
        let suffix = self.query().map_or(0, |q| q.len() + 1)
            + self.fragment().map_or(0, |f| f.len() + 1);
        &s[..s.len() - suffix]
    }

    /// Query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.0.query_str()
    }

    /// Fragment without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.0.fragment_str()
    }

    /// Copy with `pairs` appended to the query string, separated from an
    /// existing query by `&`. Path, authority and fragment are kept.
    pub fn with_query_appended(&self, pairs: &str) -> Result<Uri, TargetError> {
        if pairs.is_empty() {
            return Ok(self.clone());
        }
        let mut out = String::with_capacity(self.as_str().len() + pairs.len() + 2);
        out.push_str(self.base());
        out.push('?');
        match self.query() {
            Some(q) if !q.is_empty() => {
                out.push_str(q);
                out.push('&');
            }
            _ => {}
        }
        out.push_str(pairs);
        if let Some(fragment) = self.fragment() {
            out.push('#');
            out.push_str(fragment);
        }
        Uri::parse(out)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Uri {
    type Error = TargetError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri {
    type Error = TargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uri::parse(value)
    }
}
