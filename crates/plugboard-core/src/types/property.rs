use derive_more::Deref;
use serde::{Deserialize, Serialize};

///
/// Property
///
/// One name/value configuration pair carried by a sourced entity and handed
/// to its factory at compile time. Values are uninterpreted text.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    /// Build a property from name/value text.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

///
/// PropertyList
///
/// Ordered property collection; order is author-controlled and preserved
/// verbatim through load and store (properties are not name-sorted).
///
/// Mutation is explicit; `PropertyList` does not expose `DerefMut` so
/// replacement stays whole-list (the change layer swaps entire lists).
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyList(Vec<Property>);

impl PropertyList {
    /// Create an empty property list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a property list from an existing vector.
    #[must_use]
    pub const fn from_vec(values: Vec<Property>) -> Self {
        Self(values)
    }

    /// Return the number of properties.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return an iterator over the properties.
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }

    /// Return the value for `name`, if present.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }

    /// Append a property.
    pub fn push(&mut self, property: Property) {
        self.0.push(property);
    }
}

impl From<Vec<Property>> for PropertyList {
    fn from(values: Vec<Property>) -> Self {
        Self(values)
    }
}

impl From<PropertyList> for Vec<Property> {
    fn from(values: PropertyList) -> Self {
        values.0
    }
}

impl IntoIterator for PropertyList {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

///
/// TESTS
///
