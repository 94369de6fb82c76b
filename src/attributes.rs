use derive_more::{Deref, Into};
use std::collections::BTreeMap;

#[derive(Deref, Into, Clone, PartialEq, Eq, Default, Debug)]
/// Attribute names and values of a single xml element, kept sorted by name.
///
/// Encoders only ever add to a set of attributes. Setting a name a second time replaces the
/// previous value.
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// set `name` to `value`, replacing any previous value
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.0.insert(name.into(), value.into());
    }

    /// value of an attribute as a string slice
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// add every attribute of `other`, with `other` taking precedence
    pub fn extend(&mut self, other: Attributes) {
        self.0.extend(other.0);
    }

    /// iterate `(name, value)` pairs in name order, ready to be handed to an xml writer
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        iter.into_iter().for_each(|(k, v)| attributes.set(k, v));
        attributes
    }
}
