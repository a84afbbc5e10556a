//! The board data model.
//!
//! Entities live in per-kind arenas on [`Board`]; relationships are typed
//! edges (see `links`) driven by the connection protocol in
//! [`crate::graph`]. Every entity that can point at another one carries
//! two parallel representations of that intent: a persisted name field
//! (what the stored record said) and a live slot (what actually resolved).
//! The loader fills slots best-effort; the storer refreshes name fields
//! from live slots before flattening.

mod board;
mod external;
mod function;
mod links;
mod namespace;
mod object;

pub use board::Board;
pub use external::{ExternalFlow, ExternalObject};
pub use function::{FlowTarget, Function, FunctionEscalation, FunctionFlow, FunctionObject};
pub use links::{
    EscalationToExternalLink, EscalationToFunctionLink, FlowToExternalLink, FlowToFunctionLink,
    ManagedFunctionLink, ObjectToExternalLink,
};
pub use namespace::{ManagedFunction, Namespace};
pub use object::{ManagedObject, ObjectScope};
