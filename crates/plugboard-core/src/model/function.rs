use crate::{
    macros::{impl_entity, impl_path},
    model::{
        EscalationToExternalLink, EscalationToFunctionLink, ExternalFlow, FlowToExternalLink,
        FlowToFunctionLink, ManagedFunctionLink, ObjectToExternalLink,
    },
    types::Id,
};

///
/// Function
///
/// A wired function on the board. At most one managed-function binding
/// (compound-keyed by namespace and managed function name); three owned
/// child collections, each kept name-sorted by the change layer.
///
/// The `bound_*` name fields are the persisted foreign keys of the binding.
/// They are refreshed from the live link on every store and left untouched
/// when the link never formed, so broken references survive a round trip.
///

#[derive(Clone, Debug)]
pub struct Function {
    pub name: String,
    pub is_public: bool,

    // persisted binding keys
    pub bound_namespace_name: Option<String>,
    pub bound_function_name: Option<String>,

    // live binding slot
    pub managed_function_link: Option<Id<ManagedFunctionLink>>,

    // owned children
    pub objects: Vec<Id<FunctionObject>>,
    pub flows: Vec<Id<FunctionFlow>>,
    pub escalations: Vec<Id<FunctionEscalation>>,

    // inbound links from other functions' flows and escalations
    pub inbound_flow_links: Vec<Id<FlowToFunctionLink>>,
    pub inbound_escalation_links: Vec<Id<EscalationToFunctionLink>>,
}

impl Function {
    /// Build an unbound function with no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_public: false,
            bound_namespace_name: None,
            bound_function_name: None,
            managed_function_link: None,
            objects: Vec::new(),
            flows: Vec::new(),
            escalations: Vec::new(),
            inbound_flow_links: Vec::new(),
            inbound_escalation_links: Vec::new(),
        }
    }
}

impl_path!(Function, "model::Function");
impl_entity!(Function);

///
/// FunctionObject
///
/// A parameter of a function, optionally satisfied by an external object.
///

#[derive(Clone, Debug)]
pub struct FunctionObject {
    pub owner: Id<Function>,
    pub name: String,
    pub object_type: String,

    // persisted foreign key + live slot
    pub external_object_name: Option<String>,
    pub external_object_link: Option<Id<ObjectToExternalLink>>,
}

impl FunctionObject {
    /// Build an unlinked parameter owned by `owner`.
    #[must_use]
    pub fn new(
        owner: Id<Function>,
        name: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            object_type: object_type.into(),
            external_object_name: None,
            external_object_link: None,
        }
    }
}

impl_path!(FunctionObject, "model::FunctionObject");
impl_entity!(FunctionObject);

///
/// FunctionFlow
///
/// An outgoing flow of a function. The flow has one conceptual target
/// realized as two typed slots: to another function on the board, or to an
/// external flow. Link factories keep the pair mutually exclusive; the raw
/// protocol does not.
///

#[derive(Clone, Debug)]
pub struct FunctionFlow {
    pub owner: Id<Function>,
    pub name: String,
    pub argument_type: Option<String>,

    // persisted foreign keys
    pub target_function_name: Option<String>,
    pub target_external_flow_name: Option<String>,

    // live slots
    pub function_link: Option<Id<FlowToFunctionLink>>,
    pub external_flow_link: Option<Id<FlowToExternalLink>>,
}

impl FunctionFlow {
    /// Build an unlinked flow owned by `owner`.
    #[must_use]
    pub fn new(
        owner: Id<Function>,
        name: impl Into<String>,
        argument_type: Option<String>,
    ) -> Self {
        Self {
            owner,
            name: name.into(),
            argument_type,
            target_function_name: None,
            target_external_flow_name: None,
            function_link: None,
            external_flow_link: None,
        }
    }
}

impl_path!(FunctionFlow, "model::FunctionFlow");
impl_entity!(FunctionFlow);

///
/// FunctionEscalation
///
/// An escalation a function may raise; the escalation type doubles as the
/// entity name. Same dual target slots as a flow.
///

#[derive(Clone, Debug)]
pub struct FunctionEscalation {
    pub owner: Id<Function>,
    pub escalation_type: String,

    // persisted foreign keys
    pub target_function_name: Option<String>,
    pub target_external_flow_name: Option<String>,

    // live slots
    pub function_link: Option<Id<EscalationToFunctionLink>>,
    pub external_flow_link: Option<Id<EscalationToExternalLink>>,
}

impl FunctionEscalation {
    /// Build an unlinked escalation owned by `owner`.
    #[must_use]
    pub fn new(owner: Id<Function>, escalation_type: impl Into<String>) -> Self {
        Self {
            owner,
            escalation_type: escalation_type.into(),
            target_function_name: None,
            target_external_flow_name: None,
            function_link: None,
            external_flow_link: None,
        }
    }
}

impl_path!(FunctionEscalation, "model::FunctionEscalation");
impl_entity!(FunctionEscalation, escalation_type);

///
/// FlowTarget
///
/// Resolved target of a flow or escalation, for the compile-stage walk.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FlowTarget {
    Function(Id<Function>),
    External(Id<ExternalFlow>),
}
