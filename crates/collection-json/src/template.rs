use collection_json_node::Node;

use crate::data::Data;
use crate::entity::{Entity, Wrap};
use crate::errors::ValidationError;
use crate::property::Property;
use crate::validate;

/// An editable form: `{"data"?}`. Clients fill in the properties and send
/// the template back to create or update an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Template {
    node: Node,
}

impl Template {
    pub fn create(data: impl Into<Data>) -> Template {
        let data: Data = data.into();
        Template {
            node: Node::from_fields([("data", data.to_json())]),
        }
    }

    pub fn data(&self) -> Data {
        Data::from_node(&self.node)
    }

    pub fn property(&self, name: &str) -> Option<Property> {
        self.data().get(name).cloned()
    }

    pub fn with_data(&self, data: impl Into<Data>) -> Template {
        let data: Data = data.into();
        self.with_field("data", data.to_json())
    }

    /// See [`Data::replace`].
    pub fn replace(&self, props: &[Property]) -> Template {
        if props.is_empty() {
            return self.clone();
        }
        self.with_data(self.data().replace(props))
    }

    pub fn add(&self, prop: Property) -> Template {
        self.with_data(self.data().add(prop))
    }

    pub fn add_all(&self, props: &[Property]) -> Template {
        if props.is_empty() {
            return self.clone();
        }
        self.with_data(self.data().add_all(props))
    }

    /// See [`Data::set`]; an empty `props` leaves the template unchanged.
    pub fn set(&self, props: &[Property]) -> Template {
        if props.is_empty() {
            return self.clone();
        }
        self.with_data(self.data().set(props))
    }
}

impl Wrap for Template {
    fn wrap(node: Node) -> Self {
        Template { node }
    }
}

impl Entity for Template {
    const KIND: &'static str = "template";
    const FIELDS: &'static [&'static str] = &["data"];

    fn node(&self) -> &Node {
        &self.node
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate::template(&self.node)
    }
}
