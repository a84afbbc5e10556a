use crate::macros::{impl_entity, impl_path};
use std::fmt;

///
/// ObjectScope
///
/// Lifecycle scope of a managed object. Record text outside this set is a
/// contract violation: the loader records an issue and falls back to the
/// default rather than failing the load.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ObjectScope {
    Function,
    #[default]
    Process,
    Thread,
}

impl ObjectScope {
    /// Parse persisted scope text.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "function" => Some(Self::Function),
            "process" => Some(Self::Process),
            "thread" => Some(Self::Thread),
            _ => None,
        }
    }

    /// Persisted scope text.
    #[must_use]
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Process => "process",
            Self::Thread => "thread",
        }
    }
}

impl fmt::Display for ObjectScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

///
/// ManagedObject
///
/// A pooled object managed for the board, with a sourcing timeout in
/// milliseconds. Managed objects take part in no links, so removal never
/// cascades.
///

#[derive(Clone, Debug)]
pub struct ManagedObject {
    pub name: String,
    pub scope: ObjectScope,
    pub timeout: u64,
}

impl ManagedObject {
    /// Build a managed object.
    #[must_use]
    pub fn new(name: impl Into<String>, scope: ObjectScope, timeout: u64) -> Self {
        Self {
            name: name.into(),
            scope,
            timeout,
        }
    }
}

impl_path!(ManagedObject, "model::ManagedObject");
impl_entity!(ManagedObject);

///
/// TESTS
///
