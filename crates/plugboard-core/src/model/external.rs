use crate::{
    macros::{impl_entity, impl_path},
    model::{EscalationToExternalLink, FlowToExternalLink, ObjectToExternalLink},
    types::Id,
};

///
/// ExternalFlow
///
/// A flow continuation the board hands off to its surrounding office;
/// flows and escalations may target it instead of an on-board function.
///

#[derive(Clone, Debug)]
pub struct ExternalFlow {
    pub name: String,
    pub argument_type: Option<String>,

    pub inbound_flow_links: Vec<Id<FlowToExternalLink>>,
    pub inbound_escalation_links: Vec<Id<EscalationToExternalLink>>,
}

impl ExternalFlow {
    /// Build an external flow no one targets yet.
    #[must_use]
    pub fn new(name: impl Into<String>, argument_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            argument_type,
            inbound_flow_links: Vec::new(),
            inbound_escalation_links: Vec::new(),
        }
    }
}

impl_path!(ExternalFlow, "model::ExternalFlow");
impl_entity!(ExternalFlow);

///
/// ExternalObject
///
/// An object supplied from outside the board that function parameters may
/// draw on.
///

#[derive(Clone, Debug)]
pub struct ExternalObject {
    pub name: String,
    pub object_type: String,

    pub inbound_object_links: Vec<Id<ObjectToExternalLink>>,
}

impl ExternalObject {
    /// Build an external object no parameter draws on yet.
    #[must_use]
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_type: object_type.into(),
            inbound_object_links: Vec::new(),
        }
    }
}

impl_path!(ExternalObject, "model::ExternalObject");
impl_entity!(ExternalObject);
