//! Target edits: pointing flows, escalations, and objects at things.
//!
//! A link change owns the whole slot transition: it removes whatever
//! currently occupies the source's slot(s), forms the new edge, and
//! rewrites the intent names. The displaced edges are recorded so revert
//! can restore exactly the prior occupant, dangling or not.

use crate::{
    change::{
        child::{escalation_attached, flow_attached, object_attached},
        Change, ChangeKind, ConnRef,
    },
    graph,
    model::{
        Board, EscalationToExternalLink, EscalationToFunctionLink, ExternalFlow, ExternalObject,
        FlowToExternalLink, FlowToFunctionLink, Function, FunctionEscalation, FunctionFlow,
        FunctionObject, ObjectToExternalLink,
    },
    types::Id,
};

impl Change {
    #[must_use]
    pub fn link_flow_to_function(
        board: &Board,
        flow: Id<FunctionFlow>,
        target: Id<Function>,
    ) -> Self {
        if !flow_attached(board, flow) {
            return Self::no_change("flow is not on the board");
        }
        if !board.functions.contains(&target) {
            return Self::no_change("target function is not on the board");
        }
        let node = board.flow(flow);
        if let Some(conn) = node.function_link {
            if board.flow_function_links[conn].target == target {
                return Self::no_change(format!(
                    "flow '{}' already targets function '{}'",
                    node.name,
                    board.function(target).name
                ));
            }
        }

        let target_name = board.function(target).name.clone();
        let description = format!("Link flow {} to function {target_name}", node.name);
        Self::new(
            ChangeKind::LinkFlow(LinkFlow {
                flow,
                target: TargetSpec::Function(target, target_name),
                displaced: flow_slot_edges(node),
                old_names: (
                    node.target_function_name.clone(),
                    node.target_external_flow_name.clone(),
                ),
                created: None,
            }),
            description,
        )
    }

    #[must_use]
    pub fn link_flow_to_external_flow(
        board: &Board,
        flow: Id<FunctionFlow>,
        target: Id<ExternalFlow>,
    ) -> Self {
        if !flow_attached(board, flow) {
            return Self::no_change("flow is not on the board");
        }
        if !board.external_flows.contains(&target) {
            return Self::no_change("target external flow is not on the board");
        }
        let node = board.flow(flow);
        if let Some(conn) = node.external_flow_link {
            if board.flow_external_links[conn].target == target {
                return Self::no_change(format!(
                    "flow '{}' already targets external flow '{}'",
                    node.name,
                    board.external_flow(target).name
                ));
            }
        }

        let target_name = board.external_flow(target).name.clone();
        let description = format!("Link flow {} to external flow {target_name}", node.name);
        Self::new(
            ChangeKind::LinkFlow(LinkFlow {
                flow,
                target: TargetSpec::External(target, target_name),
                displaced: flow_slot_edges(node),
                old_names: (
                    node.target_function_name.clone(),
                    node.target_external_flow_name.clone(),
                ),
                created: None,
            }),
            description,
        )
    }

    /// Clear a flow's target: both slots and both intent names.
    #[must_use]
    pub fn unlink_flow(board: &Board, flow: Id<FunctionFlow>) -> Self {
        if !flow_attached(board, flow) {
            return Self::no_change("flow is not on the board");
        }
        let node = board.flow(flow);
        let removed = flow_slot_edges(node);
        if removed.is_empty()
            && node.target_function_name.is_none()
            && node.target_external_flow_name.is_none()
        {
            return Self::no_change(format!("flow '{}' has no target", node.name));
        }

        let description = format!("Unlink flow {}", node.name);
        Self::new(
            ChangeKind::UnlinkFlow(UnlinkFlow {
                flow,
                removed,
                old_names: (
                    node.target_function_name.clone(),
                    node.target_external_flow_name.clone(),
                ),
            }),
            description,
        )
    }

    #[must_use]
    pub fn link_escalation_to_function(
        board: &Board,
        escalation: Id<FunctionEscalation>,
        target: Id<Function>,
    ) -> Self {
        if !escalation_attached(board, escalation) {
            return Self::no_change("escalation is not on the board");
        }
        if !board.functions.contains(&target) {
            return Self::no_change("target function is not on the board");
        }
        let node = board.escalation(escalation);
        if let Some(conn) = node.function_link {
            if board.escalation_function_links[conn].target == target {
                return Self::no_change(format!(
                    "escalation '{}' already targets function '{}'",
                    node.escalation_type,
                    board.function(target).name
                ));
            }
        }

        let target_name = board.function(target).name.clone();
        let description = format!(
            "Link escalation {} to function {target_name}",
            node.escalation_type
        );
        Self::new(
            ChangeKind::LinkEscalation(LinkEscalation {
                escalation,
                target: TargetSpec::Function(target, target_name),
                displaced: escalation_slot_edges(node),
                old_names: (
                    node.target_function_name.clone(),
                    node.target_external_flow_name.clone(),
                ),
                created: None,
            }),
            description,
        )
    }

    #[must_use]
    pub fn link_escalation_to_external_flow(
        board: &Board,
        escalation: Id<FunctionEscalation>,
        target: Id<ExternalFlow>,
    ) -> Self {
        if !escalation_attached(board, escalation) {
            return Self::no_change("escalation is not on the board");
        }
        if !board.external_flows.contains(&target) {
            return Self::no_change("target external flow is not on the board");
        }
        let node = board.escalation(escalation);
        if let Some(conn) = node.external_flow_link {
            if board.escalation_external_links[conn].target == target {
                return Self::no_change(format!(
                    "escalation '{}' already targets external flow '{}'",
                    node.escalation_type,
                    board.external_flow(target).name
                ));
            }
        }

        let target_name = board.external_flow(target).name.clone();
        let description = format!(
            "Link escalation {} to external flow {target_name}",
            node.escalation_type
        );
        Self::new(
            ChangeKind::LinkEscalation(LinkEscalation {
                escalation,
                target: TargetSpec::External(target, target_name),
                displaced: escalation_slot_edges(node),
                old_names: (
                    node.target_function_name.clone(),
                    node.target_external_flow_name.clone(),
                ),
                created: None,
            }),
            description,
        )
    }

    /// Clear an escalation's target: both slots and both intent names.
    #[must_use]
    pub fn unlink_escalation(board: &Board, escalation: Id<FunctionEscalation>) -> Self {
        if !escalation_attached(board, escalation) {
            return Self::no_change("escalation is not on the board");
        }
        let node = board.escalation(escalation);
        let removed = escalation_slot_edges(node);
        if removed.is_empty()
            && node.target_function_name.is_none()
            && node.target_external_flow_name.is_none()
        {
            return Self::no_change(format!(
                "escalation '{}' has no target",
                node.escalation_type
            ));
        }

        let description = format!("Unlink escalation {}", node.escalation_type);
        Self::new(
            ChangeKind::UnlinkEscalation(UnlinkEscalation {
                escalation,
                removed,
                old_names: (
                    node.target_function_name.clone(),
                    node.target_external_flow_name.clone(),
                ),
            }),
            description,
        )
    }

    #[must_use]
    pub fn link_object_to_external_object(
        board: &Board,
        object: Id<FunctionObject>,
        target: Id<ExternalObject>,
    ) -> Self {
        if !object_attached(board, object) {
            return Self::no_change("object is not on the board");
        }
        if !board.external_objects.contains(&target) {
            return Self::no_change("target external object is not on the board");
        }
        let node = board.function_object(object);
        if let Some(conn) = node.external_object_link {
            if board.object_external_links[conn].target == target {
                return Self::no_change(format!(
                    "object '{}' already draws on external object '{}'",
                    node.name,
                    board.external_object(target).name
                ));
            }
        }

        let target_name = board.external_object(target).name.clone();
        let description = format!(
            "Link object {} to external object {target_name}",
            node.name
        );
        Self::new(
            ChangeKind::LinkObject(LinkObject {
                object,
                target,
                target_name,
                displaced: node
                    .external_object_link
                    .map(ConnRef::ObjectToExternal)
                    .into_iter()
                    .collect(),
                old_name: node.external_object_name.clone(),
                created: None,
            }),
            description,
        )
    }

    /// Clear an object's external source: slot and intent name.
    #[must_use]
    pub fn unlink_object(board: &Board, object: Id<FunctionObject>) -> Self {
        if !object_attached(board, object) {
            return Self::no_change("object is not on the board");
        }
        let node = board.function_object(object);
        let removed: Vec<ConnRef> = node
            .external_object_link
            .map(ConnRef::ObjectToExternal)
            .into_iter()
            .collect();
        if removed.is_empty() && node.external_object_name.is_none() {
            return Self::no_change(format!("object '{}' has no external source", node.name));
        }

        let description = format!("Unlink object {}", node.name);
        Self::new(
            ChangeKind::UnlinkObject(UnlinkObject {
                object,
                removed,
                old_name: node.external_object_name.clone(),
            }),
            description,
        )
    }
}

/// Live edges on a flow's two slots, function side first.
pub(super) fn flow_slot_edges(node: &FunctionFlow) -> Vec<ConnRef> {
    let mut edges = Vec::new();
    if let Some(conn) = node.function_link {
        edges.push(ConnRef::FlowToFunction(conn));
    }
    if let Some(conn) = node.external_flow_link {
        edges.push(ConnRef::FlowToExternal(conn));
    }

    edges
}

/// Live edges on an escalation's two slots, function side first.
pub(super) fn escalation_slot_edges(node: &FunctionEscalation) -> Vec<ConnRef> {
    let mut edges = Vec::new();
    if let Some(conn) = node.function_link {
        edges.push(ConnRef::EscalationToFunction(conn));
    }
    if let Some(conn) = node.external_flow_link {
        edges.push(ConnRef::EscalationToExternal(conn));
    }

    edges
}

///
/// TargetSpec
///
/// A link target pinned at plan time: the id to connect to and the name
/// to write into the intent field. Shared by flows and escalations, whose
/// targets live in the same two namespaces.
///

#[derive(Clone, Debug)]
enum TargetSpec {
    Function(Id<Function>, String),
    External(Id<ExternalFlow>, String),
}

///
/// LinkFlow
///

#[derive(Clone, Debug)]
pub(crate) struct LinkFlow {
    flow: Id<FunctionFlow>,
    target: TargetSpec,
    displaced: Vec<ConnRef>,
    old_names: (Option<String>, Option<String>),
    created: Option<ConnRef>,
}

impl LinkFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.displaced {
            conn.remove(board);
        }
        match self.created {
            Some(conn) => conn.connect(board),
            None => {
                let conn = match &self.target {
                    TargetSpec::Function(target, _) => {
                        ConnRef::FlowToFunction(graph::form(
                            board,
                            FlowToFunctionLink {
                                source: self.flow,
                                target: *target,
                            },
                        ))
                    }
                    TargetSpec::External(target, _) => ConnRef::FlowToExternal(graph::form(
                        board,
                        FlowToExternalLink {
                            source: self.flow,
                            target: *target,
                        },
                    )),
                };
                self.created = Some(conn);
            }
        }

        let node = board.flow_mut(self.flow);
        match &self.target {
            TargetSpec::Function(_, name) => {
                node.target_function_name = Some(name.clone());
                node.target_external_flow_name = None;
            }
            TargetSpec::External(_, name) => {
                node.target_external_flow_name = Some(name.clone());
                node.target_function_name = None;
            }
        }
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(conn) = self.created {
            conn.remove(board);
        }
        let node = board.flow_mut(self.flow);
        node.target_function_name = self.old_names.0.clone();
        node.target_external_flow_name = self.old_names.1.clone();
        for conn in self.displaced.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// UnlinkFlow
///

#[derive(Clone, Debug)]
pub(crate) struct UnlinkFlow {
    flow: Id<FunctionFlow>,
    removed: Vec<ConnRef>,
    old_names: (Option<String>, Option<String>),
}

impl UnlinkFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed {
            conn.remove(board);
        }
        let node = board.flow_mut(self.flow);
        node.target_function_name = None;
        node.target_external_flow_name = None;
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let node = board.flow_mut(self.flow);
        node.target_function_name = self.old_names.0.clone();
        node.target_external_flow_name = self.old_names.1.clone();
        for conn in self.removed.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// LinkEscalation
///

#[derive(Clone, Debug)]
pub(crate) struct LinkEscalation {
    escalation: Id<FunctionEscalation>,
    target: TargetSpec,
    displaced: Vec<ConnRef>,
    old_names: (Option<String>, Option<String>),
    created: Option<ConnRef>,
}

impl LinkEscalation {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.displaced {
            conn.remove(board);
        }
        match self.created {
            Some(conn) => conn.connect(board),
            None => {
                let conn = match &self.target {
                    TargetSpec::Function(target, _) => {
                        ConnRef::EscalationToFunction(graph::form(
                            board,
                            EscalationToFunctionLink {
                                source: self.escalation,
                                target: *target,
                            },
                        ))
                    }
                    TargetSpec::External(target, _) => {
                        ConnRef::EscalationToExternal(graph::form(
                            board,
                            EscalationToExternalLink {
                                source: self.escalation,
                                target: *target,
                            },
                        ))
                    }
                };
                self.created = Some(conn);
            }
        }

        let node = board.escalation_mut(self.escalation);
        match &self.target {
            TargetSpec::Function(_, name) => {
                node.target_function_name = Some(name.clone());
                node.target_external_flow_name = None;
            }
            TargetSpec::External(_, name) => {
                node.target_external_flow_name = Some(name.clone());
                node.target_function_name = None;
            }
        }
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(conn) = self.created {
            conn.remove(board);
        }
        let node = board.escalation_mut(self.escalation);
        node.target_function_name = self.old_names.0.clone();
        node.target_external_flow_name = self.old_names.1.clone();
        for conn in self.displaced.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// UnlinkEscalation
///

#[derive(Clone, Debug)]
pub(crate) struct UnlinkEscalation {
    escalation: Id<FunctionEscalation>,
    removed: Vec<ConnRef>,
    old_names: (Option<String>, Option<String>),
}

impl UnlinkEscalation {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed {
            conn.remove(board);
        }
        let node = board.escalation_mut(self.escalation);
        node.target_function_name = None;
        node.target_external_flow_name = None;
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let node = board.escalation_mut(self.escalation);
        node.target_function_name = self.old_names.0.clone();
        node.target_external_flow_name = self.old_names.1.clone();
        for conn in self.removed.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// LinkObject
///

#[derive(Clone, Debug)]
pub(crate) struct LinkObject {
    object: Id<FunctionObject>,
    target: Id<ExternalObject>,
    target_name: String,
    displaced: Vec<ConnRef>,
    old_name: Option<String>,
    created: Option<ConnRef>,
}

impl LinkObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.displaced {
            conn.remove(board);
        }
        match self.created {
            Some(conn) => conn.connect(board),
            None => {
                let conn = ConnRef::ObjectToExternal(graph::form(
                    board,
                    ObjectToExternalLink {
                        source: self.object,
                        target: self.target,
                    },
                ));
                self.created = Some(conn);
            }
        }

        board.function_object_mut(self.object).external_object_name =
            Some(self.target_name.clone());
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(conn) = self.created {
            conn.remove(board);
        }
        board.function_object_mut(self.object).external_object_name = self.old_name.clone();
        for conn in self.displaced.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// UnlinkObject
///

#[derive(Clone, Debug)]
pub(crate) struct UnlinkObject {
    object: Id<FunctionObject>,
    removed: Vec<ConnRef>,
    old_name: Option<String>,
}

impl UnlinkObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed {
            conn.remove(board);
        }
        board.function_object_mut(self.object).external_object_name = None;
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.function_object_mut(self.object).external_object_name = self.old_name.clone();
        for conn in self.removed.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlowTarget;

    fn two_functions_and_a_flow() -> (Board, Id<FunctionFlow>, Id<Function>, Id<Function>) {
        let mut board = Board::new();
        board.edit(Change::add_function_unbound(&board, "alpha"));
        board.edit(Change::add_function_unbound(&board, "beta"));
        board.edit(Change::add_function_unbound(&board, "gamma"));
        let alpha = board.function_named("alpha").expect("alpha should exist");
        let beta = board.function_named("beta").expect("beta should exist");
        let gamma = board.function_named("gamma").expect("gamma should exist");
        board.edit(Change::add_flow(&board, alpha, "done", None));
        let flow = board.function(alpha).flows[0];

        (board, flow, beta, gamma)
    }

    #[test]
    fn relink_displaces_and_revert_restores_prior_target() {
        let (mut board, flow, beta, gamma) = two_functions_and_a_flow();

        board.edit(Change::link_flow_to_function(&board, flow, beta));
        let first = board.flow(flow).function_link.expect("edge should be live");

        let mut relink = board.edit(Change::link_flow_to_function(&board, flow, gamma));
        assert_eq!(board.flow_target(flow), Some(FlowTarget::Function(gamma)));
        assert!(!graph::formed(&board, first));
        assert_eq!(
            board.flow(flow).target_function_name.as_deref(),
            Some("gamma")
        );

        relink.revert(&mut board);
        assert_eq!(board.flow_target(flow), Some(FlowTarget::Function(beta)));
        assert_eq!(board.flow(flow).function_link, Some(first));
        assert_eq!(
            board.flow(flow).target_function_name.as_deref(),
            Some("beta")
        );
        assert!(board.verify().is_empty());
    }

    #[test]
    fn crossing_target_namespaces_clears_the_other_intent() {
        let (mut board, flow, beta, _) = two_functions_and_a_flow();
        board.edit(Change::add_external_flow(&board, "shutdown", None));
        let shutdown = board
            .external_flow_named("shutdown")
            .expect("external flow should exist");

        board.edit(Change::link_flow_to_function(&board, flow, beta));
        let mut cross = board.edit(Change::link_flow_to_external_flow(&board, flow, shutdown));

        assert_eq!(board.flow_target(flow), Some(FlowTarget::External(shutdown)));
        let node = board.flow(flow);
        assert_eq!(node.target_function_name, None);
        assert_eq!(node.target_external_flow_name.as_deref(), Some("shutdown"));
        assert!(board.verify().is_empty());

        cross.revert(&mut board);
        assert_eq!(board.flow_target(flow), Some(FlowTarget::Function(beta)));
        let node = board.flow(flow);
        assert_eq!(node.target_function_name.as_deref(), Some("beta"));
        assert_eq!(node.target_external_flow_name, None);
    }

    #[test]
    fn link_to_current_target_is_no_change() {
        let (mut board, flow, beta, _) = two_functions_and_a_flow();
        board.edit(Change::link_flow_to_function(&board, flow, beta));

        let again = Change::link_flow_to_function(&board, flow, beta);
        assert!(!again.can_apply());
        assert_eq!(
            again.conflicts()[0].description(),
            "flow 'done' already targets function 'beta'"
        );
    }

    #[test]
    fn unlink_clears_dangling_intent_and_restores_it() {
        let (mut board, flow, _, _) = two_functions_and_a_flow();
        // Dangling name, no live edge.
        board.flow_mut(flow).target_function_name = Some("vanished".to_string());

        let mut unlink = board.edit(Change::unlink_flow(&board, flow));
        assert_eq!(board.flow(flow).target_function_name, None);

        unlink.revert(&mut board);
        assert_eq!(
            board.flow(flow).target_function_name.as_deref(),
            Some("vanished")
        );

        board.flow_mut(flow).target_function_name = None;
        assert!(!Change::unlink_flow(&board, flow).can_apply());
    }

    #[test]
    fn escalation_links_mirror_flow_links() {
        let (mut board, _, beta, _) = two_functions_and_a_flow();
        let alpha = board.function_named("alpha").expect("alpha should exist");
        board.edit(Change::add_escalation(&board, alpha, "error"));
        let esc = board.function(alpha).escalations[0];

        let mut link = board.edit(Change::link_escalation_to_function(&board, esc, beta));
        assert_eq!(
            board.escalation_target(esc),
            Some(FlowTarget::Function(beta))
        );

        link.revert(&mut board);
        assert_eq!(board.escalation_target(esc), None);
        assert!(board.function(beta).inbound_escalation_links.is_empty());
    }

    #[test]
    fn object_link_round_trips() {
        let (mut board, _, _, _) = two_functions_and_a_flow();
        let alpha = board.function_named("alpha").expect("alpha should exist");
        board.edit(Change::add_object(&board, alpha, "cfg", "Settings"));
        board.edit(Change::add_external_object(&board, "settings", "Settings"));
        let obj = board.function(alpha).objects[0];
        let settings = board
            .external_object_named("settings")
            .expect("external object should exist");

        let mut link = board.edit(Change::link_object_to_external_object(&board, obj, settings));
        assert_eq!(board.object_target(obj), Some(settings));
        assert_eq!(
            board.function_object(obj).external_object_name.as_deref(),
            Some("settings")
        );

        let mut unlink = board.edit(Change::unlink_object(&board, obj));
        assert_eq!(board.object_target(obj), None);
        assert_eq!(board.function_object(obj).external_object_name, None);

        unlink.revert(&mut board);
        assert_eq!(board.object_target(obj), Some(settings));
        link.revert(&mut board);
        assert_eq!(board.object_target(obj), None);
        assert!(board.verify().is_empty());
    }
}
