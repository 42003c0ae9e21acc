use collection_json_node::{Json, Node};

use crate::data::Data;
use crate::entity::{decode_list, encode_list, Entity, Wrap};
use crate::errors::ValidationError;
use crate::link::Link;
use crate::property::Property;
use crate::template::Template;
use crate::uri::Uri;
use crate::validate;

/// One member of a collection: `{"href"?, "data"?, "links"?}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    node: Node,
}

impl Item {
    pub fn create(
        href: Option<Uri>,
        data: impl Into<Data>,
        links: Vec<Link>,
    ) -> Result<Item, ValidationError> {
        let data: Data = data.into();
        Item::from_node(Node::from_fields([
            ("href", href.map(|h| Json::from(h.as_str()))),
            ("data", data.to_json()),
            ("links", encode_list(&links)),
        ]))
    }

    pub fn href(&self) -> Option<Uri> {
        self.node.get_str("href").map(Uri::from_validated)
    }

    pub fn data(&self) -> Data {
        Data::from_node(&self.node)
    }

    pub fn links(&self) -> Vec<Link> {
        decode_list(&self.node, "links")
    }

    /// First property named `name`.
    pub fn property(&self, name: &str) -> Option<Property> {
        self.data().get(name).cloned()
    }

    pub fn find_link(&self, predicate: impl Fn(&Link) -> bool) -> Option<Link> {
        self.links().into_iter().find(|l| predicate(l))
    }

    pub fn link_by_rel(&self, rel: &str) -> Option<Link> {
        self.find_link(|l| l.has_rel(rel))
    }

    pub fn link_by_name(&self, name: &str) -> Option<Link> {
        self.find_link(|l| l.name() == Some(name))
    }

    pub fn with_href(&self, href: Option<Uri>) -> Item {
        self.with_field("href", href.map(|h| Json::from(h.as_str())))
    }

    pub fn with_data(&self, data: impl Into<Data>) -> Item {
        let data: Data = data.into();
        self.with_field("data", data.to_json())
    }

    pub fn with_links(&self, links: Vec<Link>) -> Item {
        self.with_field("links", encode_list(&links))
    }

    pub fn add_link(&self, link: Link) -> Item {
        let mut links = self.links();
        links.push(link);
        self.with_links(links)
    }

    /// An editable form pre-filled with this item's data.
    pub fn to_template(&self) -> Template {
        Template::create(self.data())
    }
}

impl Wrap for Item {
    fn wrap(node: Node) -> Self {
        Item { node }
    }
}

impl Entity for Item {
    const KIND: &'static str = "item";
    const FIELDS: &'static [&'static str] = &["href", "data", "links"];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::item(&self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn uri(s: &str) -> Uri {
        Uri::parse(s).unwrap()
    }

    fn jdoe() -> Item {
        Item::create(
            Some(uri("http://example.org/friends/jdoe")),
            vec![
                Property::scalar("full-name", "J. Doe", Some("Full Name")),
                Property::scalar("email", "jdoe@example.org", Some("Email")),
            ],
            vec![Link::create(
                uri("http://examples.org/blogs/jdoe"),
                "blog",
                None,
                Some("Blog"),
                None,
            )
            .unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn accessors_decode_fields() {
        let item = jdoe();
        assert_eq!(item.href().unwrap().as_str(), "http://example.org/friends/jdoe");
        assert_eq!(item.data().len(), 2);
        assert_eq!(
            item.property("email").and_then(|p| p.value()),
            Some(Value::from("jdoe@example.org"))
        );
        assert_eq!(item.link_by_rel("blog").unwrap().prompt(), Some("Blog"));
        assert!(item.link_by_rel("avatar").is_none());
    }

    #[test]
    fn empty_parts_are_not_emitted() {
        let item = Item::create(None, Data::new(), vec![]).unwrap();
        assert_eq!(item.as_json().to_json_string(), "{}");
    }

    #[test]
    fn with_data_is_copy_on_write() {
        let item = jdoe();
        let updated = item.with_data(item.data().replace(&[Property::scalar("email", "new@x", None)]));
        assert_eq!(
            item.property("email").and_then(|p| p.value()),
            Some(Value::from("jdoe@example.org"))
        );
        assert_eq!(
            updated.property("email").and_then(|p| p.value()),
            Some(Value::from("new@x"))
        );
        assert_eq!(
            updated.node().keys().collect::<Vec<_>>(),
            vec!["href", "data", "links"]
        );
    }

    #[test]
    fn add_link_appends() {
        let item = jdoe();
        let more = item.add_link(Link::simple(uri("/avatar.png"), "avatar").unwrap());
        assert_eq!(item.links().len(), 1);
        assert_eq!(more.links().len(), 2);
        assert_eq!(more.links()[1].rel(), "avatar");
    }

    #[test]
    fn to_template_carries_data() {
        let template = jdoe().to_template();
        assert_eq!(template.data(), jdoe().data());
    }

    #[test]
    fn removing_href() {
        let item = jdoe().with_href(None);
        assert!(item.href().is_none());
        assert_eq!(item.node().keys().collect::<Vec<_>>(), vec!["data", "links"]);
    }
}
