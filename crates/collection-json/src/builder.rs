//! Incremental construction of a [`Collection`].
//!
//! # Example
//!
//! ```
//! use collection_json::{Collection, Item, Link, Property, Uri};
//!
//! let mut builder = Collection::builder();
//! builder
//!     .href(Some(Uri::parse("http://example.org/friends/").unwrap()))
//!     .add_link(Link::simple(Uri::parse("/rss").unwrap(), "feed").unwrap())
//!     .add_item(
//!         Item::create(None, vec![Property::scalar("full-name", "J. Doe", None)], vec![])
//!             .unwrap(),
//!     );
//! let collection = builder.build().unwrap();
//! assert_eq!(collection.items().len(), 1);
//! ```

use crate::collection::Collection;
use crate::error::Error;
use crate::errors::ValidationError;
use crate::item::Item;
use crate::link::Link;
use crate::query::Query;
use crate::template::Template;
use crate::uri::Uri;

#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    href: Option<Uri>,
    links: Vec<Link>,
    items: Vec<Item>,
    queries: Vec<Query>,
    template: Option<Template>,
    error: Option<Error>,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn href(&mut self, href: Option<Uri>) -> &mut Self {
        self.href = href;
        self
    }

    pub fn add_link(&mut self, link: Link) -> &mut Self {
        self.links.push(link);
        self
    }

    pub fn add_links(&mut self, links: impl IntoIterator<Item = Link>) -> &mut Self {
        self.links.extend(links);
        self
    }

    pub fn add_item(&mut self, item: Item) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) -> &mut Self {
        self.items.extend(items);
        self
    }

    pub fn add_query(&mut self, query: Query) -> &mut Self {
        self.queries.push(query);
        self
    }

    pub fn add_queries(&mut self, queries: impl IntoIterator<Item = Query>) -> &mut Self {
        self.queries.extend(queries);
        self
    }

    /// Set the template; a later call replaces an earlier one.
    pub fn template(&mut self, template: Template) -> &mut Self {
        self.template = Some(template);
        self
    }

    /// Set the error; a later call replaces an earlier one.
    pub fn error(&mut self, error: Error) -> &mut Self {
        self.error = Some(error);
        self
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Snapshot the accumulated parts into a validated collection. The
    /// builder stays usable afterwards.
    pub fn build(&self) -> Result<Collection, ValidationError> {
        Collection::create(
            self.href.clone(),
            self.links.clone(),
            self.items.clone(),
            self.queries.clone(),
            self.template.clone(),
            self.error.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::property::Property;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    #[test]
    fn empty_builder_yields_bare_collection() {
        let c = CollectionBuilder::new().build().unwrap();
        assert_eq!(c.as_json().to_json_string(), r#"{"version":"1.0"}"#);
    }

    #[test]
    fn appends_keep_insertion_order() {
        let mut b = CollectionBuilder::new();
        b.add_link(Link::simple(uri("/a"), "a").unwrap())
            .add_links([
                Link::simple(uri("/b"), "b").unwrap(),
                Link::simple(uri("/c"), "c").unwrap(),
            ]);
        let rels: Vec<String> = b
            .build()
            .unwrap()
            .links()
            .iter()
            .map(|l| l.rel().to_string())
            .collect();
        assert_eq!(rels, vec!["a", "b", "c"]);
    }

    #[test]
    fn build_snapshots_and_builder_stays_usable() {
        let mut b = CollectionBuilder::new();
        b.add_item(Item::create(None, vec![Property::placeholder("x", None)], vec![]).unwrap());
        let first = b.build().unwrap();
        b.add_item(Item::create(Some(uri("/2")), Vec::<Property>::new(), vec![]).unwrap());
        let second = b.build().unwrap();

        assert_eq!(first.items().len(), 1);
        assert_eq!(second.items().len(), 2);
        assert_eq!(b.items().len(), 2);
    }

    #[test]
    fn template_and_error_are_last_write_wins() {
        let mut b = CollectionBuilder::new();
        b.error(Error::create(Some("first"), None, None))
            .error(Error::create(Some("second"), None, None))
            .template(Template::default());
        let c = b.build().unwrap();
        assert_eq!(c.error().and_then(|e| e.title().map(str::to_string)), Some("second".into()));
        assert!(c.has_template());
    }
}
