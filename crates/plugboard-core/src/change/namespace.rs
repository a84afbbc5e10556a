//! Namespace edits.

use crate::{
    change::{Change, ChangeKind, ConnRef, function::collect_function_connections},
    model::{Board, Function, ManagedFunction, Namespace},
    types::{Id, PropertyList},
};

impl Change {
    /// Add a namespace with a fresh set of managed functions.
    #[must_use]
    pub fn add_namespace(
        board: &Board,
        name: impl Into<String>,
        source: impl Into<String>,
        properties: PropertyList,
        managed_function_names: Vec<String>,
    ) -> Self {
        let name = name.into();
        if board.namespace_named(&name).is_some() {
            return Self::no_change(format!("namespace '{name}' already exists"));
        }
        let mut names = managed_function_names;
        names.sort();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Self::no_change(format!("duplicate managed function name '{}'", pair[0]));
        }

        let description = format!("Add namespace {name}");
        Self::new(
            ChangeKind::AddNamespace(AddNamespace {
                name,
                source: source.into(),
                properties,
                managed_function_names: names,
                created: None,
            }),
            description,
        )
    }

    /// Remove a namespace, cascading over its managed functions and every
    /// function live-bound to them.
    #[must_use]
    pub fn remove_namespace(board: &Board, namespace: Id<Namespace>) -> Self {
        if !board.namespaces.contains(&namespace) {
            return Self::no_change("namespace is not on the board");
        }

        // Dependents: functions whose binding resolves into this
        // namespace. A dangling name pointing here is not a dependency.
        let mut detached_functions = Vec::new();
        for f in board.functions.iter().copied() {
            if let Some(mf) = board.bound_managed_function(f) {
                if board.managed_function(mf).owner == namespace {
                    detached_functions.push(f);
                }
            }
        }

        let mut removed_connections = Vec::new();
        for f in detached_functions.iter().copied() {
            collect_function_connections(board, f, &mut removed_connections);
        }

        let description = format!("Remove namespace {}", board.namespace(namespace).name);
        Self::new(
            ChangeKind::RemoveNamespace(RemoveNamespace {
                namespace,
                detached_functions,
                removed_connections,
            }),
            description,
        )
    }

    #[must_use]
    pub fn rename_namespace(
        board: &Board,
        namespace: Id<Namespace>,
        new_name: impl Into<String>,
    ) -> Self {
        let new_name = new_name.into();
        if !board.namespaces.contains(&namespace) {
            return Self::no_change("namespace is not on the board");
        }
        let old_name = board.namespace(namespace).name.clone();
        if old_name == new_name {
            return Self::no_change(format!("namespace is already named '{new_name}'"));
        }
        if board.namespace_named(&new_name).is_some() {
            return Self::no_change(format!("namespace '{new_name}' already exists"));
        }

        let description = format!("Rename namespace {old_name} to {new_name}");
        Self::new(
            ChangeKind::RenameNamespace(RenameNamespace {
                namespace,
                from: old_name,
                to: new_name,
            }),
            description,
        )
    }

    /// Replace a namespace's property list wholesale.
    #[must_use]
    pub fn set_namespace_properties(
        board: &Board,
        namespace: Id<Namespace>,
        properties: PropertyList,
    ) -> Self {
        if !board.namespaces.contains(&namespace) {
            return Self::no_change("namespace is not on the board");
        }
        let node = board.namespace(namespace);
        if node.properties == properties {
            return Self::no_change(format!(
                "properties of namespace '{}' are unchanged",
                node.name
            ));
        }

        let description = format!("Set namespace {} properties", node.name);
        Self::new(
            ChangeKind::SetNamespaceProperties(SetNamespaceProperties {
                namespace,
                from: node.properties.clone(),
                to: properties,
            }),
            description,
        )
    }
}

///
/// AddNamespace
///
/// First apply allocates the namespace and its managed functions; a redo
/// re-attaches the identical arena entries.
///

#[derive(Clone, Debug)]
pub(crate) struct AddNamespace {
    name: String,
    source: String,
    properties: PropertyList,
    managed_function_names: Vec<String>,
    created: Option<Id<Namespace>>,
}

impl AddNamespace {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let ns = match self.created {
            Some(ns) => ns,
            None => {
                let ns = board.namespace_arena.alloc(Namespace::new(
                    &self.name,
                    &self.source,
                    self.properties.clone(),
                ));
                for name in &self.managed_function_names {
                    let mf = board
                        .managed_function_arena
                        .alloc(ManagedFunction::new(ns, name));
                    board.namespace_arena[ns].managed_functions.push(mf);
                }
                self.created = Some(ns);
                ns
            }
        };

        board.namespaces.push(ns);
        board.sort_namespaces();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(ns) = self.created {
            board.namespaces.retain(|id| *id != ns);
        }
    }
}

///
/// RemoveNamespace
///
/// Cascade plan: touching connections in disconnect order, then dependent
/// functions, then the namespace. Revert replays the exact mirror: the
/// namespace comes back first, then the functions, then the connections
/// re-form in reverse disconnect order.
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveNamespace {
    namespace: Id<Namespace>,
    detached_functions: Vec<Id<Function>>,
    removed_connections: Vec<ConnRef>,
}

impl RemoveNamespace {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        for conn in &self.removed_connections {
            conn.remove(board);
        }
        board
            .functions
            .retain(|id| !self.detached_functions.contains(id));
        board.namespaces.retain(|id| *id != self.namespace);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.namespaces.push(self.namespace);
        board.sort_namespaces();
        board
            .functions
            .extend(self.detached_functions.iter().copied());
        board.sort_functions();
        for conn in self.removed_connections.iter().rev() {
            conn.connect(board);
        }
    }
}

///
/// RenameNamespace
///

#[derive(Clone, Debug)]
pub(crate) struct RenameNamespace {
    namespace: Id<Namespace>,
    from: String,
    to: String,
}

impl RenameNamespace {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        board.namespace_mut(self.namespace).name = self.to.clone();
        board.sort_namespaces();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.namespace_mut(self.namespace).name = self.from.clone();
        board.sort_namespaces();
    }
}

///
/// SetNamespaceProperties
///

#[derive(Clone, Debug)]
pub(crate) struct SetNamespaceProperties {
    namespace: Id<Namespace>,
    from: PropertyList,
    to: PropertyList,
}

impl SetNamespaceProperties {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        board.namespace_mut(self.namespace).properties = self.to.clone();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.namespace_mut(self.namespace).properties = self.from.clone();
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_namespace_sorts_members_and_siblings() {
        let mut board = Board::new();
        board.edit(Change::add_namespace(&board, "orders", "", PropertyList::new(), Vec::new()));
        board.edit(Change::add_namespace(
            &board,
            "billing",
            "",
            PropertyList::new(),
            vec!["refund".to_string(), "charge".to_string()],
        ));

        let names: Vec<&str> = board
            .namespaces
            .iter()
            .map(|ns| board.namespace(*ns).name.as_str())
            .collect();
        assert_eq!(names, ["billing", "orders"]);

        let billing = board
            .namespace_named("billing")
            .expect("billing should exist");
        let members: Vec<&str> = board
            .namespace(billing)
            .managed_functions
            .iter()
            .map(|mf| board.managed_function(*mf).name.as_str())
            .collect();
        assert_eq!(members, ["charge", "refund"]);
    }

    #[test]
    fn add_namespace_refuses_duplicates() {
        let mut board = Board::new();
        board.edit(Change::add_namespace(&board, "orders", "", PropertyList::new(), Vec::new()));

        let dup = Change::add_namespace(&board, "orders", "", PropertyList::new(), Vec::new());
        assert!(!dup.can_apply());
        assert_eq!(
            dup.conflicts()[0].description(),
            "namespace 'orders' already exists"
        );

        let dup_members = Change::add_namespace(
            &board,
            "billing",
            "",
            PropertyList::new(),
            vec!["charge".to_string(), "charge".to_string()],
        );
        assert!(!dup_members.can_apply());
    }

    #[test]
    fn rename_namespace_resorts_siblings() {
        let mut board = Board::new();
        board.edit(Change::add_namespace(&board, "alpha", "", PropertyList::new(), Vec::new()));
        board.edit(Change::add_namespace(&board, "beta", "", PropertyList::new(), Vec::new()));

        let alpha = board.namespace_named("alpha").expect("alpha should exist");
        let mut rename = Change::rename_namespace(&board, alpha, "zulu");
        rename.apply(&mut board);

        let names: Vec<&str> = board
            .namespaces
            .iter()
            .map(|ns| board.namespace(*ns).name.as_str())
            .collect();
        assert_eq!(names, ["beta", "zulu"]);

        rename.revert(&mut board);
        let names: Vec<&str> = board
            .namespaces
            .iter()
            .map(|ns| board.namespace(*ns).name.as_str())
            .collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    // The full cascade: a namespace with managed function "foo", function
    // "foo" bound to it, and function "bar" receiving a flow from "foo".
    // Removing the namespace must unform the flow edge, detach "foo", and
    // leave "bar" in place; revert must restore everything, the flow edge
    // re-formed last.
    #[test]
    fn remove_namespace_cascades_and_reverts_exactly() {
        let mut board = Board::new();
        board.edit(Change::add_namespace(
            &board,
            "ns",
            "",
            PropertyList::new(),
            vec!["foo".to_string()],
        ));
        let ns = board.namespace_named("ns").expect("namespace should exist");
        let mf = board
            .managed_function_named(ns, "foo")
            .expect("managed function should exist");

        board.edit(Change::add_function(&board, "foo", mf));
        board.edit(Change::add_function_unbound(&board, "bar"));

        let foo = board.function_named("foo").expect("foo should exist");
        let bar = board.function_named("bar").expect("bar should exist");
        board.edit(Change::add_flow(&board, foo, "done", None));
        let flow = board.function(foo).flows[0];
        board.edit(Change::link_flow_to_function(&board, flow, bar));

        let before = board.clone();

        let mut remove = Change::remove_namespace(&board, ns);
        remove.apply(&mut board);

        assert!(board.namespace_named("ns").is_none());
        assert!(board.function_named("foo").is_none());
        assert_eq!(board.function_named("bar"), Some(bar));
        assert_eq!(board.flow_target(flow), None);
        assert!(board.function(bar).inbound_flow_links.is_empty());

        remove.revert(&mut board);

        assert_eq!(board.namespace_named("ns"), Some(ns));
        assert_eq!(board.function_named("foo"), Some(foo));
        assert_eq!(
            board.flow_target(flow),
            Some(crate::model::FlowTarget::Function(bar))
        );
        assert_eq!(board.bound_managed_function(foo), Some(mf));
        assert_eq!(board.functions, before.functions);
        assert_eq!(board.namespaces, before.namespaces);
        assert!(board.verify().is_empty());
    }

    #[test]
    fn remove_detached_namespace_is_no_change() {
        let mut board = Board::new();
        let mut add = Change::add_namespace(&board, "ns", "", PropertyList::new(), Vec::new());
        add.apply(&mut board);
        let ns = board.namespace_named("ns").expect("namespace should exist");
        add.revert(&mut board);

        let remove = Change::remove_namespace(&board, ns);
        assert!(!remove.can_apply());
    }
}
