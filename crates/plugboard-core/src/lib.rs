//! Core model for Plugboard: the wiring-board graph, planned and
//! reversible changes over it, and the name-keyed repository that moves
//! boards in and out of host storage.
#![warn(unreachable_pub)]

pub(crate) mod macros;

// public exports are one module level down
pub mod change;
pub mod error;
pub mod graph;
pub mod issues;
pub mod model;
pub mod obs;
pub mod repository;
pub mod traits;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, issue collectors, sinks, or repositories are re-exported here.
///

pub mod prelude {
    pub use crate::{
        change::{Change, ChangeLog},
        model::{
            Board, ExternalFlow, ExternalObject, Function, FunctionEscalation, FunctionFlow,
            FunctionObject, ManagedFunction, ManagedObject, Namespace, ObjectScope,
        },
        types::{Id, Property, PropertyList},
    };
}
