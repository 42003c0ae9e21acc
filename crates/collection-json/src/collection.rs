//! [`Collection`] — the aggregate root of a document.
//!
//! A collection owns its links, items, queries, optional template and
//! optional error. Every `with_*`/`add_*` method returns a new, re-validated
//! collection; the receiver is left as it was.
//!
//! Lookups decode the underlying node on each call; nothing is cached.

use collection_json_node::{Json, Node};

use crate::builder::CollectionBuilder;
use crate::entity::{decode_list, decode_one, encode_list, Entity, Wrap};
use crate::error::Error;
use crate::errors::ValidationError;
use crate::item::Item;
use crate::link::Link;
use crate::query::Query;
use crate::template::Template;
use crate::uri::Uri;
use crate::validate;

/// The only version this model reads and writes.
pub const VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection {
    node: Node,
}

impl Collection {
    /// Assemble and validate a collection. Empty lists and absent parts are
    /// not emitted; `version` always is.
    pub fn create(
        href: Option<Uri>,
        links: Vec<Link>,
        items: Vec<Item>,
        queries: Vec<Query>,
        template: Option<Template>,
        error: Option<Error>,
    ) -> Result<Collection, ValidationError> {
        Collection::from_node(Node::from_fields([
            ("version", Some(Json::from(VERSION))),
            ("href", href.map(|h| Json::from(h.as_str()))),
            ("links", encode_list(&links)),
            ("items", encode_list(&items)),
            ("queries", encode_list(&queries)),
            ("template", template.map(|t| t.as_json())),
            ("error", error.map(|e| e.as_json())),
        ]))
    }

    /// A collection with only a version and an optional href.
    pub fn empty(href: Option<Uri>) -> Result<Collection, ValidationError> {
        Collection::create(href, vec![], vec![], vec![], None, None)
    }

    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::new()
    }

    /// A builder holding this collection's parts.
    pub fn to_builder(&self) -> CollectionBuilder {
        let mut builder = CollectionBuilder::new();
        builder
            .href(self.href())
            .add_links(self.links())
            .add_items(self.items())
            .add_queries(self.queries());
        if let Some(template) = self.template() {
            builder.template(template);
        }
        if let Some(error) = self.error() {
            builder.error(error);
        }
        builder
    }

    pub fn version(&self) -> &str {
        self.node.get_str("version").unwrap_or(VERSION)
    }

    pub fn href(&self) -> Option<Uri> {
        self.node.get_str("href").map(Uri::from_validated)
    }

    pub fn links(&self) -> Vec<Link> {
        decode_list(&self.node, "links")
    }

    pub fn items(&self) -> Vec<Item> {
        decode_list(&self.node, "items")
    }

    pub fn queries(&self) -> Vec<Query> {
        decode_list(&self.node, "queries")
    }

    pub fn template(&self) -> Option<Template> {
        decode_one(&self.node, "template")
    }

    pub fn error(&self) -> Option<Error> {
        decode_one(&self.node, "error")
    }

    pub fn has_template(&self) -> bool {
        self.node.contains_key("template")
    }

    pub fn has_error(&self) -> bool {
        self.node.contains_key("error")
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn first_item(&self) -> Option<Item> {
        self.items().into_iter().next()
    }

    pub fn find_item(&self, predicate: impl Fn(&Item) -> bool) -> Option<Item> {
        self.items().into_iter().find(|i| predicate(i))
    }

    pub fn find_link(&self, predicate: impl Fn(&Link) -> bool) -> Option<Link> {
        self.links().into_iter().find(|l| predicate(l))
    }

    pub fn filter_links(&self, predicate: impl Fn(&Link) -> bool) -> Vec<Link> {
        self.links().into_iter().filter(|l| predicate(l)).collect()
    }

    pub fn link_by_rel(&self, rel: &str) -> Option<Link> {
        self.find_link(|l| l.has_rel(rel))
    }

    pub fn link_by_name(&self, name: &str) -> Option<Link> {
        self.find_link(|l| l.name() == Some(name))
    }

    pub fn link_by_rel_and_name(&self, rel: &str, name: &str) -> Option<Link> {
        self.find_link(|l| l.has_rel(rel) && l.name() == Some(name))
    }

    pub fn find_query(&self, predicate: impl Fn(&Query) -> bool) -> Option<Query> {
        self.queries().into_iter().find(|q| predicate(q))
    }

    pub fn filter_queries(&self, predicate: impl Fn(&Query) -> bool) -> Vec<Query> {
        self.queries().into_iter().filter(|q| predicate(q)).collect()
    }

    pub fn query_by_rel(&self, rel: &str) -> Option<Query> {
        self.find_query(|q| q.has_rel(rel))
    }

    pub fn query_by_name(&self, name: &str) -> Option<Query> {
        self.find_query(|q| q.name() == Some(name))
    }

    pub fn query_by_rel_and_name(&self, rel: &str, name: &str) -> Option<Query> {
        self.find_query(|q| q.has_rel(rel) && q.name() == Some(name))
    }

    // ── Copy-on-write updates ─────────────────────────────────────────────

    fn revalidated(&self, key: &str, value: Option<Json>) -> Result<Collection, ValidationError> {
        let copy = self.with_field(key, value);
        copy.validate()?;
        Ok(copy)
    }

    pub fn with_href(&self, href: Option<Uri>) -> Result<Collection, ValidationError> {
        self.revalidated("href", href.map(|h| Json::from(h.as_str())))
    }

    pub fn with_links(&self, links: Vec<Link>) -> Result<Collection, ValidationError> {
        self.revalidated("links", encode_list(&links))
    }

    pub fn add_link(&self, link: Link) -> Result<Collection, ValidationError> {
        let mut links = self.links();
        links.push(link);
        self.with_links(links)
    }

    pub fn with_items(&self, items: Vec<Item>) -> Result<Collection, ValidationError> {
        self.revalidated("items", encode_list(&items))
    }

    pub fn add_item(&self, item: Item) -> Result<Collection, ValidationError> {
        let mut items = self.items();
        items.push(item);
        self.with_items(items)
    }

    pub fn add_items(&self, items: Vec<Item>) -> Result<Collection, ValidationError> {
        if items.is_empty() {
            return Ok(self.clone());
        }
        let mut all = self.items();
        all.extend(items);
        self.with_items(all)
    }

    pub fn with_queries(&self, queries: Vec<Query>) -> Result<Collection, ValidationError> {
        self.revalidated("queries", encode_list(&queries))
    }

    pub fn add_query(&self, query: Query) -> Result<Collection, ValidationError> {
        let mut queries = self.queries();
        queries.push(query);
        self.with_queries(queries)
    }

    pub fn with_template(&self, template: Template) -> Result<Collection, ValidationError> {
        self.revalidated("template", Some(template.as_json()))
    }

    pub fn without_template(&self) -> Result<Collection, ValidationError> {
        self.revalidated("template", None)
    }

    pub fn with_error(&self, error: Error) -> Result<Collection, ValidationError> {
        self.revalidated("error", Some(error.as_json()))
    }

    pub fn without_error(&self) -> Result<Collection, ValidationError> {
        self.revalidated("error", None)
    }
}

impl Wrap for Collection {
    fn wrap(node: Node) -> Self {
        Collection { node }
    }
}

impl Entity for Collection {
    const KIND: &'static str = "collection";
    const FIELDS: &'static [&'static str] = &[
        "version", "href", "links", "items", "queries", "template", "error",
    ];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::collection(&self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use crate::target::Target;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    fn friend(name: &str) -> Item {
        Item::create(
            Some(uri(&format!("http://example.org/friends/{name}"))),
            vec![Property::scalar("full-name", name, None)],
            vec![],
        )
        .unwrap()
    }

    fn filter_query() -> Query {
        Query::create(
            Target::literal("http://example.org/friends/search").unwrap(),
            "filter",
            Some("by-name"),
            None,
            vec![Property::placeholder("q", None)],
        )
        .unwrap()
    }

    #[test]
    fn empty_collection_emits_version_only() {
        let c = Collection::empty(None).unwrap();
        assert_eq!(c.as_json().to_json_string(), r#"{"version":"1.0"}"#);
        assert!(!c.has_template());
        assert!(!c.has_error());
        assert!(c.first_item().is_none());
    }

    #[test]
    fn add_item_leaves_original_unchanged() {
        let c1 = Collection::create(None, vec![], vec![friend("jdoe")], vec![], None, None).unwrap();
        let c2 = c1.add_item(friend("msmith")).unwrap();

        assert_eq!(c1.items(), vec![friend("jdoe")]);
        assert_eq!(c2.items().len(), 2);
        assert_eq!(c2.items().last(), Some(&friend("msmith")));
    }

    #[test]
    fn updates_keep_emission_order() {
        let c = Collection::empty(Some(uri("http://example.org/friends/")))
            .unwrap()
            .with_error(Error::create(Some("oops"), None, None))
            .unwrap()
            .add_item(friend("jdoe"))
            .unwrap()
            .add_link(Link::simple(uri("/feed"), "feed").unwrap())
            .unwrap();
        assert_eq!(
            c.node().keys().collect::<Vec<_>>(),
            vec!["version", "href", "links", "items", "error"]
        );
        assert!(!c.without_error().unwrap().has_error());
    }

    #[test]
    fn query_lookup_by_rel_and_name() {
        let c = Collection::create(None, vec![], vec![], vec![filter_query()], None, None).unwrap();
        assert!(c.query_by_rel("filter").is_some());
        assert!(c.query_by_rel("other").is_none());
        assert!(c.query_by_name("by-name").is_some());
        assert!(c.query_by_rel_and_name("filter", "by-name").is_some());
        assert!(c.query_by_rel_and_name("filter", "nope").is_none());
        assert_eq!(c.filter_queries(|q| q.prompt().is_none()).len(), 1);
    }

    #[test]
    fn link_lookups() {
        let c = Collection::create(
            None,
            vec![
                Link::create(uri("/feed"), "feed alternate", Some("rss"), None, None).unwrap(),
                Link::create(uri("/atom"), "feed", Some("atom"), None, None).unwrap(),
            ],
            vec![],
            vec![],
            None,
            None,
        )
        .unwrap();
        assert_eq!(c.link_by_rel("feed").unwrap().name(), Some("rss"));
        assert_eq!(c.link_by_name("atom").unwrap().href().as_str(), "/atom");
        assert_eq!(c.link_by_rel_and_name("feed", "atom").unwrap().name(), Some("atom"));
        assert_eq!(c.filter_links(|l| l.has_rel("feed")).len(), 2);
        assert!(c.link_by_rel("alternate").is_some());
    }

    #[test]
    fn template_roundtrip_through_updates() {
        let template = Template::create(vec![Property::placeholder("full-name", None)]);
        let c = Collection::empty(None).unwrap().with_template(template.clone()).unwrap();
        assert_eq!(c.template(), Some(template));
        assert!(c.without_template().unwrap().template().is_none());
    }

    #[test]
    fn to_builder_rebuilds_equal_collection() {
        let c = Collection::create(
            Some(uri("/friends/")),
            vec![Link::simple(uri("/feed"), "feed").unwrap()],
            vec![friend("jdoe")],
            vec![filter_query()],
            Some(Template::create(vec![Property::placeholder("x", None)])),
            Some(Error::create(Some("t"), Some("c"), Some("m"))),
        )
        .unwrap();
        assert_eq!(c.to_builder().build().unwrap(), c);
    }

    #[test]
    fn find_item_by_predicate() {
        let c = Collection::create(None, vec![], vec![friend("a"), friend("b")], vec![], None, None)
            .unwrap();
        let found = c
            .find_item(|i| i.href().is_some_and(|h| h.as_str().ends_with("/b")))
            .unwrap();
        assert_eq!(found, friend("b"));
    }
}
