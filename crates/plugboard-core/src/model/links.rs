//! The six edge kinds of the board graph.
//!
//! Each edge is a plain pair of endpoint ids living in its own arena;
//! liveness is decided by the back-pointers on the endpoints, never by the
//! edge itself. `connection_kind!` wires each kind into the connection
//! protocol in [`crate::graph`].

use crate::{
    graph::connection_kind,
    model::{
        ExternalFlow, ExternalObject, Function, FunctionEscalation, FunctionFlow, FunctionObject,
        ManagedFunction,
    },
    types::Id,
};

///
/// ManagedFunctionLink
///
/// Binds a function to the managed function it implements. The one edge
/// kind keyed by a compound name on the source side
/// (namespace name + managed function name).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ManagedFunctionLink {
    pub source: Id<Function>,
    pub target: Id<ManagedFunction>,
}

connection_kind!(ManagedFunctionLink => "model::ManagedFunctionLink" {
    arena: managed_function_links,
    source: Function { arena: function_arena, slot: managed_function_link },
    target: ManagedFunction { arena: managed_function_arena, inbound: inbound_function_links },
});

///
/// FlowToFunctionLink
///
/// A flow targeting another function on the board.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlowToFunctionLink {
    pub source: Id<FunctionFlow>,
    pub target: Id<Function>,
}

connection_kind!(FlowToFunctionLink => "model::FlowToFunctionLink" {
    arena: flow_function_links,
    source: FunctionFlow { arena: flow_arena, slot: function_link },
    target: Function { arena: function_arena, inbound: inbound_flow_links },
});

///
/// FlowToExternalLink
///
/// A flow targeting an external flow.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlowToExternalLink {
    pub source: Id<FunctionFlow>,
    pub target: Id<ExternalFlow>,
}

connection_kind!(FlowToExternalLink => "model::FlowToExternalLink" {
    arena: flow_external_links,
    source: FunctionFlow { arena: flow_arena, slot: external_flow_link },
    target: ExternalFlow { arena: external_flow_arena, inbound: inbound_flow_links },
});

///
/// EscalationToFunctionLink
///
/// An escalation targeting another function on the board.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EscalationToFunctionLink {
    pub source: Id<FunctionEscalation>,
    pub target: Id<Function>,
}

connection_kind!(EscalationToFunctionLink => "model::EscalationToFunctionLink" {
    arena: escalation_function_links,
    source: FunctionEscalation { arena: escalation_arena, slot: function_link },
    target: Function { arena: function_arena, inbound: inbound_escalation_links },
});

///
/// EscalationToExternalLink
///
/// An escalation targeting an external flow.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EscalationToExternalLink {
    pub source: Id<FunctionEscalation>,
    pub target: Id<ExternalFlow>,
}

connection_kind!(EscalationToExternalLink => "model::EscalationToExternalLink" {
    arena: escalation_external_links,
    source: FunctionEscalation { arena: escalation_arena, slot: external_flow_link },
    target: ExternalFlow { arena: external_flow_arena, inbound: inbound_escalation_links },
});

///
/// ObjectToExternalLink
///
/// A function object drawing on an external object.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObjectToExternalLink {
    pub source: Id<FunctionObject>,
    pub target: Id<ExternalObject>,
}

connection_kind!(ObjectToExternalLink => "model::ObjectToExternalLink" {
    arena: object_external_links,
    source: FunctionObject { arena: object_arena, slot: external_object_link },
    target: ExternalObject { arena: external_object_arena, inbound: inbound_object_links },
});
