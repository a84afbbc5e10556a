use crate::{
    macros::{impl_entity, impl_path},
    model::ManagedFunctionLink,
    types::{Id, PropertyList},
};

///
/// Namespace
///
/// A sourced function namespace: the unit a factory class contributes to
/// the board. Owns its managed functions; removing the namespace cascades
/// over them and over every function bound to them.
///

#[derive(Clone, Debug)]
pub struct Namespace {
    pub name: String,
    /// Factory path handed to the compiler stage when the board is built.
    pub source: String,
    pub properties: PropertyList,
    /// Owned managed functions, kept name-sorted by the change layer.
    pub managed_functions: Vec<Id<ManagedFunction>>,
}

impl Namespace {
    /// Build a namespace with no managed functions yet.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        properties: PropertyList,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            properties,
            managed_functions: Vec::new(),
        }
    }
}

impl_path!(Namespace, "model::Namespace");
impl_entity!(Namespace);

///
/// ManagedFunction
///
/// A function a namespace makes available for binding. Leaf naming unit:
/// functions bind to it through the compound-keyed
/// `(namespace name, managed function name)` link.
///

#[derive(Clone, Debug)]
pub struct ManagedFunction {
    pub owner: Id<Namespace>,
    pub name: String,
    /// Functions currently bound to this managed function.
    pub inbound_function_links: Vec<Id<ManagedFunctionLink>>,
}

impl ManagedFunction {
    /// Build a managed function owned by `owner`.
    #[must_use]
    pub fn new(owner: Id<Namespace>, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            inbound_function_links: Vec::new(),
        }
    }
}

impl_path!(ManagedFunction, "model::ManagedFunction");
impl_entity!(ManagedFunction);
