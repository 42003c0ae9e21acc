//! [`Data`] — the ordered property list of an item, query or template.
//!
//! All operations are pure and return a new list. Names are not required to
//! be unique; lookups return the first match.

use collection_json_node::{Json, Node};
use indexmap::IndexMap;

use crate::entity::{decode_list, encode_list};
use crate::property::Property;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Data(Vec<Property>);

impl Data {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_node(node: &Node) -> Self {
        Data(decode_list(node, "data"))
    }

    pub(crate) fn to_json(&self) -> Option<Json> {
        encode_list(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Property] {
        &self.0
    }

    /// First property named `name`.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.0.iter().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn find(&self, predicate: impl Fn(&Property) -> bool) -> Option<&Property> {
        self.0.iter().find(|p| predicate(p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Property::name)
    }

    /// Properties keyed by name; the first property of a name wins.
    pub fn to_map(&self) -> IndexMap<String, Property> {
        let mut map = IndexMap::with_capacity(self.0.len());
        for p in &self.0 {
            map.entry(p.name().to_string()).or_insert_with(|| p.clone());
        }
        map
    }

    /// Substitute each property that has a same-named replacement in
    /// `props`. Properties only present in `props` are not added.
    pub fn replace(&self, props: &[Property]) -> Data {
        if props.is_empty() {
            return self.clone();
        }
        Data(
            self.0
                .iter()
                .map(|p| {
                    props
                        .iter()
                        .find(|r| r.name() == p.name())
                        .unwrap_or(p)
                        .clone()
                })
                .collect(),
        )
    }

    pub fn add(&self, prop: Property) -> Data {
        let mut props = self.0.clone();
        props.push(prop);
        Data(props)
    }

    pub fn add_all(&self, props: &[Property]) -> Data {
        if props.is_empty() {
            return self.clone();
        }
        let mut all = self.0.clone();
        all.extend_from_slice(props);
        Data(all)
    }

    /// Replace the whole list. An empty `props` leaves the list unchanged.
    pub fn set(&self, props: &[Property]) -> Data {
        if props.is_empty() {
            return self.clone();
        }
        Data(props.to_vec())
    }
}

impl From<Vec<Property>> for Data {
    fn from(props: Vec<Property>) -> Self {
        Data(props)
    }
}

impl From<Data> for Vec<Property> {
    fn from(data: Data) -> Self {
        data.0
    }
}

impl FromIterator<Property> for Data {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Data(iter.into_iter().collect())
    }
}

impl IntoIterator for Data {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Data {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use proptest::prelude::*;

    fn p(name: &str, value: &str) -> Property {
        Property::scalar(name, value, None)
    }

    #[test]
    fn replace_substitutes_without_appending() {
        let data = Data::from(vec![p("A", "x"), p("B", "y")]);
        let out = data.replace(&[p("B", "z"), p("C", "w")]);

        assert_eq!(out, Data::from(vec![p("A", "x"), p("B", "z")]));
        assert!(!out.contains("C"));
        assert_eq!(data.get("B").and_then(Property::value), Some(Value::from("y")));
    }

    #[test]
    fn replace_swaps_payload_kind() {
        let data = Data::from(vec![p("tags", "one")]);
        let out = data.replace(&[Property::array("tags", ["one", "two"], None)]);
        assert!(out.get("tags").unwrap().has_array());
    }

    #[test]
    fn empty_inputs_are_no_ops() {
        let data = Data::from(vec![p("A", "x")]);
        assert_eq!(data.add_all(&[]), data);
        assert_eq!(data.replace(&[]), data);
        assert_eq!(data.set(&[]), data);
    }

    #[test]
    fn add_and_set() {
        let data = Data::from(vec![p("A", "x")]);
        let added = data.add(p("A", "again"));
        assert_eq!(added.len(), 2);
        assert_eq!(added.get("A").and_then(Property::value), Some(Value::from("x")));

        let set = added.set(&[p("Z", "z")]);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["Z"]);
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn to_map_first_match_wins() {
        let data = Data::from(vec![p("A", "1"), p("B", "2"), p("A", "3")]);
        let map = data.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["A"].value(), Some(Value::from("1")));
    }

    proptest! {
        #[test]
        fn replace_keeps_length_and_names(
            names in proptest::collection::vec("[a-d]", 0..8),
            repl in proptest::collection::vec("[a-f]", 0..8),
        ) {
            let data: Data = names.iter().map(|n| p(n, "old")).collect();
            let props: Vec<Property> = repl.iter().map(|n| p(n, "new")).collect();
            let out = data.replace(&props);

            prop_assert_eq!(out.len(), data.len());
            prop_assert_eq!(out.names().collect::<Vec<_>>(), data.names().collect::<Vec<_>>());
            for prop in out.iter() {
                let expected = if repl.iter().any(|r| r == prop.name()) { "new" } else { "old" };
                prop_assert_eq!(prop.value(), Some(Value::from(expected)));
            }
        }
    }
}
