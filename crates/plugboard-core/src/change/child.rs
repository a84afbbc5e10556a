//! Child edits: flows, escalations, and objects under a function, and
//! managed functions under a namespace.
//!
//! A child is addressable only while its owner is attached. Removing a
//! child cascades over the live edges on its slots; the owner and its
//! other children are untouched.

use crate::{
    change::{
        link::{escalation_slot_edges, flow_slot_edges},
        Change, ChangeKind, ConnRef,
    },
    graph,
    model::{
        Board, Function, FunctionEscalation, FunctionFlow, FunctionObject, ManagedFunction,
        Namespace,
    },
    types::Id,
};

impl Change {
    #[must_use]
    pub fn add_flow(
        board: &Board,
        function: Id<Function>,
        name: impl Into<String>,
        argument_type: Option<&str>,
    ) -> Self {
        let name = name.into();
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }
        let node = board.function(function);
        if node
            .flows
            .iter()
            .any(|id| board.flow(*id).name == name)
        {
            return Self::no_change(format!(
                "function '{}' already has a flow named '{name}'",
                node.name
            ));
        }

        let description = format!("Add flow {name}");
        Self::new(
            ChangeKind::AddFlow(AddFlow {
                function,
                name,
                argument_type: argument_type.map(String::from),
                created: None,
            }),
            description,
        )
    }

    /// Remove a flow, cascading over whatever its slots hold.
    #[must_use]
    pub fn remove_flow(board: &Board, flow: Id<FunctionFlow>) -> Self {
        if !flow_attached(board, flow) {
            return Self::no_change("flow is not on the board");
        }
        let node = board.flow(flow);

        let description = format!("Remove flow {}", node.name);
        Self::new(
            ChangeKind::RemoveFlow(RemoveFlow {
                flow,
                removed_connections: flow_slot_edges(node),
            }),
            description,
        )
    }

    /// Rewrite a flow's name and argument type. Links are untouched.
    #[must_use]
    pub fn revise_flow(
        board: &Board,
        flow: Id<FunctionFlow>,
        name: impl Into<String>,
        argument_type: Option<&str>,
    ) -> Self {
        let name = name.into();
        let argument_type = argument_type.map(String::from);
        if !flow_attached(board, flow) {
            return Self::no_change("flow is not on the board");
        }
        let node = board.flow(flow);
        if node.name == name && node.argument_type == argument_type {
            return Self::no_change(format!("flow '{name}' is unchanged"));
        }
        if node.name != name {
            let owner = board.function(node.owner);
            if owner
                .flows
                .iter()
                .any(|id| *id != flow && board.flow(*id).name == name)
            {
                return Self::no_change(format!(
                    "function '{}' already has a flow named '{name}'",
                    owner.name
                ));
            }
        }

        let description = format!("Revise flow {}", node.name);
        Self::new(
            ChangeKind::ReviseFlow(ReviseFlow {
                flow,
                from: (node.name.clone(), node.argument_type.clone()),
                to: (name, argument_type),
            }),
            description,
        )
    }

    #[must_use]
    pub fn add_escalation(
        board: &Board,
        function: Id<Function>,
        escalation_type: impl Into<String>,
    ) -> Self {
        let escalation_type = escalation_type.into();
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }
        let node = board.function(function);
        if node
            .escalations
            .iter()
            .any(|id| board.escalation(*id).escalation_type == escalation_type)
        {
            return Self::no_change(format!(
                "function '{}' already escalates '{escalation_type}'",
                node.name
            ));
        }

        let description = format!("Add escalation {escalation_type}");
        Self::new(
            ChangeKind::AddEscalation(AddEscalation {
                function,
                escalation_type,
                created: None,
            }),
            description,
        )
    }

    /// Remove an escalation, cascading over whatever its slots hold.
    #[must_use]
    pub fn remove_escalation(board: &Board, escalation: Id<FunctionEscalation>) -> Self {
        if !escalation_attached(board, escalation) {
            return Self::no_change("escalation is not on the board");
        }
        let node = board.escalation(escalation);

        let description = format!("Remove escalation {}", node.escalation_type);
        Self::new(
            ChangeKind::RemoveEscalation(RemoveEscalation {
                escalation,
                removed_connections: escalation_slot_edges(node),
            }),
            description,
        )
    }

    /// Rewrite an escalation's type. Links are untouched.
    #[must_use]
    pub fn revise_escalation(
        board: &Board,
        escalation: Id<FunctionEscalation>,
        escalation_type: impl Into<String>,
    ) -> Self {
        let escalation_type = escalation_type.into();
        if !escalation_attached(board, escalation) {
            return Self::no_change("escalation is not on the board");
        }
        let node = board.escalation(escalation);
        if node.escalation_type == escalation_type {
            return Self::no_change(format!("escalation '{escalation_type}' is unchanged"));
        }
        let owner = board.function(node.owner);
        if owner
            .escalations
            .iter()
            .any(|id| *id != escalation && board.escalation(*id).escalation_type == escalation_type)
        {
            return Self::no_change(format!(
                "function '{}' already escalates '{escalation_type}'",
                owner.name
            ));
        }

        let description = format!("Revise escalation {}", node.escalation_type);
        Self::new(
            ChangeKind::ReviseEscalation(ReviseEscalation {
                escalation,
                from: node.escalation_type.clone(),
                to: escalation_type,
            }),
            description,
        )
    }

    #[must_use]
    pub fn add_object(
        board: &Board,
        function: Id<Function>,
        name: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }
        let node = board.function(function);
        if node
            .objects
            .iter()
            .any(|id| board.function_object(*id).name == name)
        {
            return Self::no_change(format!(
                "function '{}' already has an object named '{name}'",
                node.name
            ));
        }

        let description = format!("Add object {name}");
        Self::new(
            ChangeKind::AddObject(AddObject {
                function,
                name,
                object_type: object_type.into(),
                created: None,
            }),
            description,
        )
    }

    /// Remove an object, cascading over its external link if live.
    #[must_use]
    pub fn remove_object(board: &Board, object: Id<FunctionObject>) -> Self {
        if !object_attached(board, object) {
            return Self::no_change("object is not on the board");
        }
        let node = board.function_object(object);

        let description = format!("Remove object {}", node.name);
        Self::new(
            ChangeKind::RemoveObject(RemoveObject {
                object,
                removed_connections: node
                    .external_object_link
                    .map(ConnRef::ObjectToExternal)
                    .into_iter()
                    .collect(),
            }),
            description,
        )
    }

    /// Rewrite an object's name and type. Links are untouched.
    #[must_use]
    pub fn revise_object(
        board: &Board,
        object: Id<FunctionObject>,
        name: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let object_type = object_type.into();
        if !object_attached(board, object) {
            return Self::no_change("object is not on the board");
        }
        let node = board.function_object(object);
        if node.name == name && node.object_type == object_type {
            return Self::no_change(format!("object '{name}' is unchanged"));
        }
        if node.name != name {
            let owner = board.function(node.owner);
            if owner
                .objects
                .iter()
                .any(|id| *id != object && board.function_object(*id).name == name)
            {
                return Self::no_change(format!(
                    "function '{}' already has an object named '{name}'",
                    owner.name
                ));
            }
        }

        let description = format!("Revise object {}", node.name);
        Self::new(
            ChangeKind::ReviseObject(ReviseObject {
                object,
                from: (node.name.clone(), node.object_type.clone()),
                to: (name, object_type),
            }),
            description,
        )
    }

    #[must_use]
    pub fn add_managed_function(
        board: &Board,
        namespace: Id<Namespace>,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        if !board.namespaces.contains(&namespace) {
            return Self::no_change("namespace is not on the board");
        }
        let node = board.namespace(namespace);
        if node
            .managed_functions
            .iter()
            .any(|id| board.managed_function(*id).name == name)
        {
            return Self::no_change(format!(
                "namespace '{}' already declares '{name}'",
                node.name
            ));
        }

        let description = format!("Add managed function {name}");
        Self::new(
            ChangeKind::AddManagedFunction(AddManagedFunction {
                namespace,
                name,
                created: None,
            }),
            description,
        )
    }

    /// Remove a managed function, unforming every function binding that
    /// lands on it. The bound functions stay on the board; their intent
    /// names are kept as dangling text.
    #[must_use]
    pub fn remove_managed_function(
        board: &Board,
        managed_function: Id<ManagedFunction>,
    ) -> Self {
        if !managed_function_attached(board, managed_function) {
            return Self::no_change("managed function is not on the board");
        }
        let node = board.managed_function(managed_function);

        let mut removed_connections = Vec::new();
        for conn in node.inbound_function_links.iter().copied() {
            if graph::formed(board, conn) {
                removed_connections.push(ConnRef::Binding(conn));
            }
        }

        let description = format!("Remove managed function {}", node.name);
        Self::new(
            ChangeKind::RemoveManagedFunction(RemoveManagedFunction {
                managed_function,
                removed_connections,
            }),
            description,
        )
    }

    #[must_use]
    pub fn rename_managed_function(
        board: &Board,
        managed_function: Id<ManagedFunction>,
        new_name: impl Into<String>,
    ) -> Self {
        let new_name = new_name.into();
        if !managed_function_attached(board, managed_function) {
            return Self::no_change("managed function is not on the board");
        }
        let node = board.managed_function(managed_function);
        if node.name == new_name {
            return Self::no_change(format!(
                "managed function is already named '{new_name}'"
            ));
        }
        let owner = board.namespace(node.owner);
        if owner
            .managed_functions
            .iter()
            .any(|id| *id != managed_function && board.managed_function(*id).name == new_name)
        {
            return Self::no_change(format!(
                "namespace '{}' already declares '{new_name}'",
                owner.name
            ));
        }

        let description = format!("Rename managed function {} to {new_name}", node.name);
        Self::new(
            ChangeKind::RenameManagedFunction(RenameManagedFunction {
                managed_function,
                from: node.name.clone(),
                to: new_name,
            }),
            description,
        )
    }
}

//
// attachment checks
//
// A child is on the board only if its owner is attached and the owner's
// list carries it. Changes aimed anywhere else are planning errors
// surfaced as NoChange.
//

pub(super) fn flow_attached(board: &Board, flow: Id<FunctionFlow>) -> bool {
    let owner = board.flow(flow).owner;

    board.functions.contains(&owner) && board.function(owner).flows.contains(&flow)
}

pub(super) fn escalation_attached(board: &Board, escalation: Id<FunctionEscalation>) -> bool {
    let owner = board.escalation(escalation).owner;

    board.functions.contains(&owner) && board.function(owner).escalations.contains(&escalation)
}

pub(super) fn object_attached(board: &Board, object: Id<FunctionObject>) -> bool {
    let owner = board.function_object(object).owner;

    board.functions.contains(&owner) && board.function(owner).objects.contains(&object)
}

pub(super) fn managed_function_attached(
    board: &Board,
    managed_function: Id<ManagedFunction>,
) -> bool {
    let owner = board.managed_function(managed_function).owner;

    board.namespaces.contains(&owner)
        && board
            .namespace(owner)
            .managed_functions
            .contains(&managed_function)
}

///
/// AddFlow
///

#[derive(Clone, Debug)]
pub(crate) struct AddFlow {
    function: Id<Function>,
    name: String,
    argument_type: Option<String>,
    created: Option<Id<FunctionFlow>>,
}

impl AddFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(flow) => flow,
            None => {
                let flow = board.flow_arena.alloc(FunctionFlow::new(
                    self.function,
                    &self.name,
                    self.argument_type.clone(),
                ));
                self.created = Some(flow);
                flow
            }
        };

        board.function_mut(self.function).flows.push(created);
        board.sort_function_children(self.function);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(flow) = self.created {
            board.function_mut(self.function).flows.retain(|id| *id != flow);
        }
    }
}

///
/// RemoveFlow
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveFlow {
    flow: Id<FunctionFlow>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        let owner = board.flow(self.flow).owner;
        board.function_mut(owner).flows.retain(|id| *id != self.flow);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let owner = board.flow(self.flow).owner;
        board.function_mut(owner).flows.push(self.flow);
        board.sort_function_children(owner);
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// ReviseFlow
///

#[derive(Clone, Debug)]
pub(crate) struct ReviseFlow {
    flow: Id<FunctionFlow>,
    from: (String, Option<String>),
    to: (String, Option<String>),
}

impl ReviseFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let node = board.flow_mut(self.flow);
        node.name = self.to.0.clone();
        node.argument_type = self.to.1.clone();
        let owner = node.owner;
        board.sort_function_children(owner);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let node = board.flow_mut(self.flow);
        node.name = self.from.0.clone();
        node.argument_type = self.from.1.clone();
        let owner = node.owner;
        board.sort_function_children(owner);
    }
}

///
/// AddEscalation
///

#[derive(Clone, Debug)]
pub(crate) struct AddEscalation {
    function: Id<Function>,
    escalation_type: String,
    created: Option<Id<FunctionEscalation>>,
}

impl AddEscalation {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(escalation) => escalation,
            None => {
                let escalation = board
                    .escalation_arena
                    .alloc(FunctionEscalation::new(self.function, &self.escalation_type));
                self.created = Some(escalation);
                escalation
            }
        };

        board.function_mut(self.function).escalations.push(created);
        board.sort_function_children(self.function);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(escalation) = self.created {
            board
                .function_mut(self.function)
                .escalations
                .retain(|id| *id != escalation);
        }
    }
}

///
/// RemoveEscalation
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveEscalation {
    escalation: Id<FunctionEscalation>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveEscalation {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        let owner = board.escalation(self.escalation).owner;
        board
            .function_mut(owner)
            .escalations
            .retain(|id| *id != self.escalation);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let owner = board.escalation(self.escalation).owner;
        board.function_mut(owner).escalations.push(self.escalation);
        board.sort_function_children(owner);
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// ReviseEscalation
///

#[derive(Clone, Debug)]
pub(crate) struct ReviseEscalation {
    escalation: Id<FunctionEscalation>,
    from: String,
    to: String,
}

impl ReviseEscalation {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let node = board.escalation_mut(self.escalation);
        node.escalation_type = self.to.clone();
        let owner = node.owner;
        board.sort_function_children(owner);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let node = board.escalation_mut(self.escalation);
        node.escalation_type = self.from.clone();
        let owner = node.owner;
        board.sort_function_children(owner);
    }
}

///
/// AddObject
///

#[derive(Clone, Debug)]
pub(crate) struct AddObject {
    function: Id<Function>,
    name: String,
    object_type: String,
    created: Option<Id<FunctionObject>>,
}

impl AddObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(object) => object,
            None => {
                let object = board.object_arena.alloc(FunctionObject::new(
                    self.function,
                    &self.name,
                    &self.object_type,
                ));
                self.created = Some(object);
                object
            }
        };

        board.function_mut(self.function).objects.push(created);
        board.sort_function_children(self.function);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(object) = self.created {
            board
                .function_mut(self.function)
                .objects
                .retain(|id| *id != object);
        }
    }
}

///
/// RemoveObject
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveObject {
    object: Id<FunctionObject>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        let owner = board.function_object(self.object).owner;
        board
            .function_mut(owner)
            .objects
            .retain(|id| *id != self.object);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let owner = board.function_object(self.object).owner;
        board.function_mut(owner).objects.push(self.object);
        board.sort_function_children(owner);
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// ReviseObject
///

#[derive(Clone, Debug)]
pub(crate) struct ReviseObject {
    object: Id<FunctionObject>,
    from: (String, String),
    to: (String, String),
}

impl ReviseObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let node = board.function_object_mut(self.object);
        node.name = self.to.0.clone();
        node.object_type = self.to.1.clone();
        let owner = node.owner;
        board.sort_function_children(owner);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let node = board.function_object_mut(self.object);
        node.name = self.from.0.clone();
        node.object_type = self.from.1.clone();
        let owner = node.owner;
        board.sort_function_children(owner);
    }
}

///
/// AddManagedFunction
///

#[derive(Clone, Debug)]
pub(crate) struct AddManagedFunction {
    namespace: Id<Namespace>,
    name: String,
    created: Option<Id<ManagedFunction>>,
}

impl AddManagedFunction {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(managed_function) => managed_function,
            None => {
                let managed_function = board
                    .managed_function_arena
                    .alloc(ManagedFunction::new(self.namespace, &self.name));
                self.created = Some(managed_function);
                managed_function
            }
        };

        board
            .namespace_mut(self.namespace)
            .managed_functions
            .push(created);
        board.sort_managed_functions(self.namespace);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(managed_function) = self.created {
            board
                .namespace_mut(self.namespace)
                .managed_functions
                .retain(|id| *id != managed_function);
        }
    }
}

///
/// RemoveManagedFunction
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveManagedFunction {
    managed_function: Id<ManagedFunction>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveManagedFunction {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        let owner = board.managed_function(self.managed_function).owner;
        board
            .namespace_mut(owner)
            .managed_functions
            .retain(|id| *id != self.managed_function);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let owner = board.managed_function(self.managed_function).owner;
        board
            .namespace_mut(owner)
            .managed_functions
            .push(self.managed_function);
        board.sort_managed_functions(owner);
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// RenameManagedFunction
///

#[derive(Clone, Debug)]
pub(crate) struct RenameManagedFunction {
    managed_function: Id<ManagedFunction>,
    from: String,
    to: String,
}

impl RenameManagedFunction {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let node = board.managed_function_mut(self.managed_function);
        node.name = self.to.clone();
        let owner = node.owner;
        board.sort_managed_functions(owner);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        let node = board.managed_function_mut(self.managed_function);
        node.name = self.from.clone();
        let owner = node.owner;
        board.sort_managed_functions(owner);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::FlowTarget, types::PropertyList};

    fn board_with_function() -> (Board, Id<Function>) {
        let mut board = Board::new();
        board.edit(Change::add_function_unbound(&board, "alpha"));
        let alpha = board.function_named("alpha").expect("alpha should exist");

        (board, alpha)
    }

    #[test]
    fn added_children_keep_sibling_order() {
        let (mut board, alpha) = board_with_function();

        board.edit(Change::add_flow(&board, alpha, "rejected", None));
        board.edit(Change::add_flow(&board, alpha, "done", Some("OrderId")));
        board.edit(Change::add_flow(&board, alpha, "paused", None));

        let names: Vec<&str> = board
            .function(alpha)
            .flows
            .iter()
            .map(|id| board.flow(*id).name.as_str())
            .collect();
        assert_eq!(names, ["done", "paused", "rejected"]);
        assert_eq!(
            board.flow(board.function(alpha).flows[0]).argument_type.as_deref(),
            Some("OrderId")
        );
    }

    #[test]
    fn duplicate_sibling_names_are_conflicts() {
        let (mut board, alpha) = board_with_function();
        board.edit(Change::add_flow(&board, alpha, "done", None));

        let dup = Change::add_flow(&board, alpha, "done", None);
        assert!(!dup.can_apply());
        assert_eq!(
            dup.conflicts()[0].description(),
            "function 'alpha' already has a flow named 'done'"
        );

        // Escalations are keyed by type, objects by name.
        board.edit(Change::add_escalation(&board, alpha, "error"));
        assert!(!Change::add_escalation(&board, alpha, "error").can_apply());
        board.edit(Change::add_object(&board, alpha, "cfg", "Settings"));
        assert!(!Change::add_object(&board, alpha, "cfg", "Limits").can_apply());
    }

    #[test]
    fn remove_flow_cascades_over_its_edge_and_redo_reuses_the_id() {
        let (mut board, alpha) = board_with_function();
        board.edit(Change::add_function_unbound(&board, "beta"));
        let beta = board.function_named("beta").expect("beta should exist");
        board.edit(Change::add_flow(&board, alpha, "done", None));
        let flow = board.function(alpha).flows[0];
        board.edit(Change::link_flow_to_function(&board, flow, beta));

        let mut remove = board.edit(Change::remove_flow(&board, flow));
        assert!(board.function(alpha).flows.is_empty());
        assert_eq!(board.flow_target(flow), None);

        remove.revert(&mut board);
        assert_eq!(board.function(alpha).flows, vec![flow]);
        assert_eq!(board.flow_target(flow), Some(FlowTarget::Function(beta)));

        remove.apply(&mut board);
        assert!(board.function(alpha).flows.is_empty());
        assert!(board.verify().is_empty());
    }

    #[test]
    fn revise_flow_renames_resorts_and_reverts() {
        let (mut board, alpha) = board_with_function();
        board.edit(Change::add_flow(&board, alpha, "done", None));
        board.edit(Change::add_flow(&board, alpha, "paused", None));
        let done = board.function(alpha).flows[0];

        let mut revise = board.edit(Change::revise_flow(&board, done, "zipped", Some("Zip")));
        let names: Vec<&str> = board
            .function(alpha)
            .flows
            .iter()
            .map(|id| board.flow(*id).name.as_str())
            .collect();
        assert_eq!(names, ["paused", "zipped"]);

        revise.revert(&mut board);
        assert_eq!(board.flow(done).name, "done");
        assert_eq!(board.flow(done).argument_type, None);
        assert_eq!(board.function(alpha).flows[0], done);

        assert!(!Change::revise_flow(&board, done, "done", None).can_apply());
        assert!(!Change::revise_flow(&board, done, "paused", None).can_apply());
    }

    #[test]
    fn remove_managed_function_unforms_bindings_but_keeps_intent() {
        let mut board = Board::new();
        board.edit(Change::add_namespace(
            &board,
            "orders",
            "orders.toml",
            PropertyList::new(),
            vec!["submit".to_string()],
        ));
        let orders = board.namespace_named("orders").expect("orders should exist");
        let submit = board
            .managed_function_named(orders, "submit")
            .expect("submit should exist");
        board.edit(Change::add_function(&board, "alpha", submit));
        let alpha = board.function_named("alpha").expect("alpha should exist");
        assert_eq!(board.bound_managed_function(alpha), Some(submit));

        let mut remove = board.edit(Change::remove_managed_function(&board, submit));
        assert!(board.namespace(orders).managed_functions.is_empty());
        assert_eq!(board.bound_managed_function(alpha), None);
        // The function keeps its textual intent.
        assert_eq!(
            board.function(alpha).bound_function_name.as_deref(),
            Some("submit")
        );

        remove.revert(&mut board);
        assert_eq!(board.bound_managed_function(alpha), Some(submit));
        assert!(board.verify().is_empty());
    }

    #[test]
    fn rename_managed_function_keeps_declarations_sorted() {
        let mut board = Board::new();
        board.edit(Change::add_namespace(
            &board,
            "orders",
            "orders.toml",
            PropertyList::new(),
            vec!["cancel".to_string(), "submit".to_string()],
        ));
        let orders = board.namespace_named("orders").expect("orders should exist");
        let cancel = board
            .managed_function_named(orders, "cancel")
            .expect("cancel should exist");

        board.edit(Change::rename_managed_function(&board, cancel, "void"));
        let names: Vec<&str> = board
            .namespace(orders)
            .managed_functions
            .iter()
            .map(|id| board.managed_function(*id).name.as_str())
            .collect();
        assert_eq!(names, ["submit", "void"]);

        assert!(!Change::rename_managed_function(&board, cancel, "submit").can_apply());
    }
}
