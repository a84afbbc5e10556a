//! Function edits.

use crate::{
    change::{Change, ChangeKind, ConnRef},
    graph,
    model::{Board, Function, ManagedFunction, ManagedFunctionLink},
    types::Id,
};

impl Change {
    /// Add a function bound to a managed function. The binding edge is
    /// created together with the function.
    #[must_use]
    pub fn add_function(
        board: &Board,
        name: impl Into<String>,
        managed_function: Id<ManagedFunction>,
    ) -> Self {
        let name = name.into();
        if board.function_named(&name).is_some() {
            return Self::no_change(format!("function '{name}' already exists"));
        }
        let owner = board.managed_function(managed_function).owner;
        if !board.namespaces.contains(&owner) {
            return Self::no_change("managed function is not on the board");
        }

        let binding = Binding {
            target: managed_function,
            namespace_name: board.namespace(owner).name.clone(),
            function_name: board.managed_function(managed_function).name.clone(),
        };
        let description = format!("Add function {name}");
        Self::new(
            ChangeKind::AddFunction(AddFunction {
                name,
                binding: Some(binding),
                created: None,
            }),
            description,
        )
    }

    /// Add a function with no managed-function binding.
    #[must_use]
    pub fn add_function_unbound(board: &Board, name: impl Into<String>) -> Self {
        let name = name.into();
        if board.function_named(&name).is_some() {
            return Self::no_change(format!("function '{name}' already exists"));
        }

        let description = format!("Add function {name}");
        Self::new(
            ChangeKind::AddFunction(AddFunction {
                name,
                binding: None,
                created: None,
            }),
            description,
        )
    }

    /// Remove a function, cascading over every live edge that touches it
    /// or one of its children.
    #[must_use]
    pub fn remove_function(board: &Board, function: Id<Function>) -> Self {
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }

        let mut removed_connections = Vec::new();
        collect_function_connections(board, function, &mut removed_connections);

        let description = format!("Remove function {}", board.function(function).name);
        Self::new(
            ChangeKind::RemoveFunction(RemoveFunction {
                function,
                removed_connections,
            }),
            description,
        )
    }

    #[must_use]
    pub fn rename_function(
        board: &Board,
        function: Id<Function>,
        new_name: impl Into<String>,
    ) -> Self {
        let new_name = new_name.into();
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }
        let old_name = board.function(function).name.clone();
        if old_name == new_name {
            return Self::no_change(format!("function is already named '{new_name}'"));
        }
        if board.function_named(&new_name).is_some() {
            return Self::no_change(format!("function '{new_name}' already exists"));
        }

        let description = format!("Rename function {old_name} to {new_name}");
        Self::new(
            ChangeKind::RenameFunction(RenameFunction {
                function,
                from: old_name,
                to: new_name,
            }),
            description,
        )
    }

    #[must_use]
    pub fn set_function_public(board: &Board, function: Id<Function>, public: bool) -> Self {
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }
        let node = board.function(function);
        if node.is_public == public {
            let state = if public { "public" } else { "private" };
            return Self::no_change(format!("function '{}' is already {state}", node.name));
        }

        let description = if public {
            format!("Set function {} public", node.name)
        } else {
            format!("Set function {} private", node.name)
        };
        Self::new(
            ChangeKind::SetFunctionPublic(SetFunctionPublic { function, public }),
            description,
        )
    }
}

/// Record every live edge touching `function` or one of its children, in
/// a stable order: binding, outbound by child list, then inbound. Shared
/// by the function and namespace cascades; the namespace cascade calls it
/// per dependent, so edges between two dependents are deduplicated.
pub(super) fn collect_function_connections(
    board: &Board,
    function: Id<Function>,
    out: &mut Vec<ConnRef>,
) {
    fn push(out: &mut Vec<ConnRef>, conn: ConnRef) {
        if !out.contains(&conn) {
            out.push(conn);
        }
    }

    let node = board.function(function);

    if let Some(conn) = node.managed_function_link {
        push(out, ConnRef::Binding(conn));
    }
    for flow in node.flows.iter().copied() {
        let flow = board.flow(flow);
        if let Some(conn) = flow.function_link {
            push(out, ConnRef::FlowToFunction(conn));
        }
        if let Some(conn) = flow.external_flow_link {
            push(out, ConnRef::FlowToExternal(conn));
        }
    }
    for esc in node.escalations.iter().copied() {
        let esc = board.escalation(esc);
        if let Some(conn) = esc.function_link {
            push(out, ConnRef::EscalationToFunction(conn));
        }
        if let Some(conn) = esc.external_flow_link {
            push(out, ConnRef::EscalationToExternal(conn));
        }
    }
    for obj in node.objects.iter().copied() {
        if let Some(conn) = board.function_object(obj).external_object_link {
            push(out, ConnRef::ObjectToExternal(conn));
        }
    }

    // Inbound lists hold displaced edges too; only live ones are part of
    // the cascade.
    for conn in node.inbound_flow_links.iter().copied() {
        if graph::formed(board, conn) {
            push(out, ConnRef::FlowToFunction(conn));
        }
    }
    for conn in node.inbound_escalation_links.iter().copied() {
        if graph::formed(board, conn) {
            push(out, ConnRef::EscalationToFunction(conn));
        }
    }
}

///
/// AddFunction
///

#[derive(Clone, Debug)]
struct Binding {
    target: Id<ManagedFunction>,
    namespace_name: String,
    function_name: String,
}

#[derive(Clone, Debug)]
struct Created {
    function: Id<Function>,
    link: Option<Id<ManagedFunctionLink>>,
}

#[derive(Clone, Debug)]
pub(crate) struct AddFunction {
    name: String,
    binding: Option<Binding>,
    created: Option<Created>,
}

impl AddFunction {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match &self.created {
            Some(created) => {
                if let Some(link) = created.link {
                    graph::connect(board, link);
                }
                created.function
            }
            None => {
                let function = board.function_arena.alloc(Function::new(&self.name));
                let link = self.binding.as_ref().map(|binding| {
                    let node = &mut board.function_arena[function];
                    node.bound_namespace_name = Some(binding.namespace_name.clone());
                    node.bound_function_name = Some(binding.function_name.clone());
                    graph::form(
                        board,
                        ManagedFunctionLink {
                            source: function,
                            target: binding.target,
                        },
                    )
                });
                self.created = Some(Created { function, link });
                function
            }
        };

        board.functions.push(created);
        board.sort_functions();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(created) = &self.created {
            if let Some(link) = created.link {
                graph::remove(board, link);
            }
            board.functions.retain(|id| *id != created.function);
        }
    }
}

///
/// RemoveFunction
///
/// Cascade plan mirroring the namespace one, scoped to a single function.
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveFunction {
    function: Id<Function>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveFunction {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        board.functions.retain(|id| *id != self.function);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.functions.push(self.function);
        board.sort_functions();
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// RenameFunction
///

#[derive(Clone, Debug)]
pub(crate) struct RenameFunction {
    function: Id<Function>,
    from: String,
    to: String,
}

impl RenameFunction {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        board.function_mut(self.function).name = self.to.clone();
        board.sort_functions();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.function_mut(self.function).name = self.from.clone();
        board.sort_functions();
    }
}

///
/// SetFunctionPublic
///

#[derive(Clone, Debug)]
pub(crate) struct SetFunctionPublic {
    function: Id<Function>,
    public: bool,
}

impl SetFunctionPublic {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        board.function_mut(self.function).is_public = self.public;
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.function_mut(self.function).is_public = !self.public;
    }
}

///
/// TESTS
///
