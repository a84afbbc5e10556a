//! External endpoint edits.
//!
//! Externals are top-level entities with no children. Removing one
//! cascades over its live inbound edges; the flows and objects that
//! pointed at it keep their intent names as dangling text.

use crate::{
    change::{Change, ChangeKind, ConnRef},
    graph,
    model::{Board, ExternalFlow, ExternalObject},
    types::Id,
};

impl Change {
    #[must_use]
    pub fn add_external_flow(
        board: &Board,
        name: impl Into<String>,
        argument_type: Option<&str>,
    ) -> Self {
        let name = name.into();
        if board.external_flow_named(&name).is_some() {
            return Self::no_change(format!("external flow '{name}' already exists"));
        }

        let description = format!("Add external flow {name}");
        Self::new(
            ChangeKind::AddExternalFlow(AddExternalFlow {
                name,
                argument_type: argument_type.map(String::from),
                created: None,
            }),
            description,
        )
    }

    /// Remove an external flow, unforming every live edge that lands on it.
    #[must_use]
    pub fn remove_external_flow(board: &Board, external_flow: Id<ExternalFlow>) -> Self {
        if !board.external_flows.contains(&external_flow) {
            return Self::no_change("external flow is not on the board");
        }
        let node = board.external_flow(external_flow);

        let mut removed_connections = Vec::new();
        for conn in node.inbound_flow_links.iter().copied() {
            if graph::formed(board, conn) {
                removed_connections.push(ConnRef::FlowToExternal(conn));
            }
        }
        for conn in node.inbound_escalation_links.iter().copied() {
            if graph::formed(board, conn) {
                removed_connections.push(ConnRef::EscalationToExternal(conn));
            }
        }

        let description = format!("Remove external flow {}", node.name);
        Self::new(
            ChangeKind::RemoveExternalFlow(RemoveExternalFlow {
                external_flow,
                removed_connections,
            }),
            description,
        )
    }

    #[must_use]
    pub fn add_external_object(
        board: &Board,
        name: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        if board.external_object_named(&name).is_some() {
            return Self::no_change(format!("external object '{name}' already exists"));
        }

        let description = format!("Add external object {name}");
        Self::new(
            ChangeKind::AddExternalObject(AddExternalObject {
                name,
                object_type: object_type.into(),
                created: None,
            }),
            description,
        )
    }

    /// Remove an external object, unforming every live edge that draws on it.
    #[must_use]
    pub fn remove_external_object(board: &Board, external_object: Id<ExternalObject>) -> Self {
        if !board.external_objects.contains(&external_object) {
            return Self::no_change("external object is not on the board");
        }
        let node = board.external_object(external_object);

        let mut removed_connections = Vec::new();
        for conn in node.inbound_object_links.iter().copied() {
            if graph::formed(board, conn) {
                removed_connections.push(ConnRef::ObjectToExternal(conn));
            }
        }

        let description = format!("Remove external object {}", node.name);
        Self::new(
            ChangeKind::RemoveExternalObject(RemoveExternalObject {
                external_object,
                removed_connections,
            }),
            description,
        )
    }
}

///
/// AddExternalFlow
///

#[derive(Clone, Debug)]
pub(crate) struct AddExternalFlow {
    name: String,
    argument_type: Option<String>,
    created: Option<Id<ExternalFlow>>,
}

impl AddExternalFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(external_flow) => external_flow,
            None => {
                let external_flow = board
                    .external_flow_arena
                    .alloc(ExternalFlow::new(&self.name, self.argument_type.clone()));
                self.created = Some(external_flow);
                external_flow
            }
        };

        board.external_flows.push(created);
        board.sort_external_flows();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(external_flow) = self.created {
            board.external_flows.retain(|id| *id != external_flow);
        }
    }
}

///
/// RemoveExternalFlow
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveExternalFlow {
    external_flow: Id<ExternalFlow>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveExternalFlow {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        board.external_flows.retain(|id| *id != self.external_flow);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.external_flows.push(self.external_flow);
        board.sort_external_flows();
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// AddExternalObject
///

#[derive(Clone, Debug)]
pub(crate) struct AddExternalObject {
    name: String,
    object_type: String,
    created: Option<Id<ExternalObject>>,
}

impl AddExternalObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(external_object) => external_object,
            None => {
                let external_object = board
                    .external_object_arena
                    .alloc(ExternalObject::new(&self.name, &self.object_type));
                self.created = Some(external_object);
                external_object
            }
        };

        board.external_objects.push(created);
        board.sort_external_objects();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(external_object) = self.created {
            board.external_objects.retain(|id| *id != external_object);
        }
    }
}

///
/// RemoveExternalObject
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveExternalObject {
    external_object: Id<ExternalObject>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveExternalObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        board
            .external_objects
            .retain(|id| *id != self.external_object);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.external_objects.push(self.external_object);
        board.sort_external_objects();
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// TESTS
///
