use crate::{
    model::{Board, ExternalFlow, ExternalObject, Function, ManagedFunction},
    types::Id,
};
use std::collections::BTreeMap;

///
/// NameIndex
///
/// Resolution table built once per load, after every entity has been
/// allocated and attached to the board. Reference resolution then runs
/// against this snapshot, so resolution order cannot depend on record
/// order.
///
/// Duplicate names keep the first occurrence, matching the board's
/// linear first-match lookups. Managed functions are keyed two levels
/// deep because their identity is the `(namespace, name)` pair.
///

#[derive(Debug, Default)]
pub(crate) struct NameIndex {
    managed_functions: BTreeMap<String, BTreeMap<String, Id<ManagedFunction>>>,
    functions: BTreeMap<String, Id<Function>>,
    external_flows: BTreeMap<String, Id<ExternalFlow>>,
    external_objects: BTreeMap<String, Id<ExternalObject>>,
}

impl NameIndex {
    pub(crate) fn from_board(board: &Board) -> Self {
        let mut index = Self::default();

        for ns in board.namespaces.iter().copied() {
            let node = board.namespace(ns);
            let inner = index
                .managed_functions
                .entry(node.name.clone())
                .or_default();
            for mf in node.managed_functions.iter().copied() {
                inner
                    .entry(board.managed_function(mf).name.clone())
                    .or_insert(mf);
            }
        }

        for f in board.functions.iter().copied() {
            index
                .functions
                .entry(board.function(f).name.clone())
                .or_insert(f);
        }
        for ef in board.external_flows.iter().copied() {
            index
                .external_flows
                .entry(board.external_flow(ef).name.clone())
                .or_insert(ef);
        }
        for eo in board.external_objects.iter().copied() {
            index
                .external_objects
                .entry(board.external_object(eo).name.clone())
                .or_insert(eo);
        }

        index
    }

    pub(crate) fn managed_function(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<Id<ManagedFunction>> {
        self.managed_functions.get(namespace)?.get(name).copied()
    }

    pub(crate) fn function(&self, name: &str) -> Option<Id<Function>> {
        self.functions.get(name).copied()
    }

    pub(crate) fn external_flow(&self, name: &str) -> Option<Id<ExternalFlow>> {
        self.external_flows.get(name).copied()
    }

    pub(crate) fn external_object(&self, name: &str) -> Option<Id<ExternalObject>> {
        self.external_objects.get(name).copied()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Namespace, types::PropertyList};

    #[test]
    fn compound_key_resolves_per_namespace() {
        let mut board = Board::new();
        for ns_name in ["billing", "orders"] {
            let ns = board
                .namespace_arena
                .alloc(Namespace::new(ns_name, "", PropertyList::new()));
            let mf = board
                .managed_function_arena
                .alloc(ManagedFunction::new(ns, "charge"));
            board.namespace_arena[ns].managed_functions.push(mf);
            board.namespaces.push(ns);
        }

        let index = NameIndex::from_board(&board);

        let billing = index
            .managed_function("billing", "charge")
            .expect("billing charge should resolve");
        let orders = index
            .managed_function("orders", "charge")
            .expect("orders charge should resolve");
        assert_ne!(billing, orders);
        assert_eq!(index.managed_function("orders", "refund"), None);
        assert_eq!(index.managed_function("shipping", "charge"), None);
    }

    #[test]
    fn duplicate_names_keep_first_occurrence() {
        let mut board = Board::new();
        let first = board.function_arena.alloc(Function::new("process"));
        let second = board.function_arena.alloc(Function::new("process"));
        board.functions.extend([first, second]);

        let index = NameIndex::from_board(&board);

        assert_eq!(index.function("process"), Some(first));
    }
}
