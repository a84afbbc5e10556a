//! Board-to-record storing.
//!
//! Mirror of `load`, in two phases. The refresh pass copies the current
//! target name of every live edge back into its source entity's name
//! field, so renames propagate into storage without the rename changes
//! chasing references. Unformed edges touch nothing: a name that never
//! resolved is written back exactly as it was loaded. The second phase is
//! a mechanical graph-to-record conversion in membership order.
//!
//! Refresh mutates the board's name fields, so `store` takes `&mut Board`.

use crate::{
    graph,
    model::Board,
    repository::record::{
        BoardRecord, EscalationRecord, ExternalFlowRecord, ExternalObjectRecord, FlowRecord,
        FunctionRecord, ManagedFunctionRecord, ManagedObjectRecord, NamespaceRecord, ObjectRecord,
    },
    types::Id,
};

///
/// Stored
///

pub(crate) struct Stored {
    pub(crate) record: BoardRecord,
    pub(crate) links_flattened: usize,
}

pub(crate) fn store(board: &mut Board) -> Stored {
    let links_flattened = refresh(board);
    let record = flatten(board);

    Stored {
        record,
        links_flattened,
    }
}

//
// phase one: refresh
//

fn refresh(board: &mut Board) -> usize {
    let mut refreshed = 0;

    for conn in ids(&board.managed_function_links) {
        if !graph::formed(board, conn) {
            continue;
        }
        let edge = board.managed_function_links[conn];
        let target = &board.managed_function_arena[edge.target];
        let namespace_name = board.namespace_arena[target.owner].name.clone();
        let target_name = target.name.clone();

        let source = &mut board.function_arena[edge.source];
        source.bound_namespace_name = Some(namespace_name);
        source.bound_function_name = Some(target_name);
        refreshed += 1;
    }

    for conn in ids(&board.flow_function_links) {
        if !graph::formed(board, conn) {
            continue;
        }
        let edge = board.flow_function_links[conn];
        let name = board.function_arena[edge.target].name.clone();
        board.flow_arena[edge.source].target_function_name = Some(name);
        refreshed += 1;
    }

    for conn in ids(&board.flow_external_links) {
        if !graph::formed(board, conn) {
            continue;
        }
        let edge = board.flow_external_links[conn];
        let name = board.external_flow_arena[edge.target].name.clone();
        board.flow_arena[edge.source].target_external_flow_name = Some(name);
        refreshed += 1;
    }

    for conn in ids(&board.escalation_function_links) {
        if !graph::formed(board, conn) {
            continue;
        }
        let edge = board.escalation_function_links[conn];
        let name = board.function_arena[edge.target].name.clone();
        board.escalation_arena[edge.source].target_function_name = Some(name);
        refreshed += 1;
    }

    for conn in ids(&board.escalation_external_links) {
        if !graph::formed(board, conn) {
            continue;
        }
        let edge = board.escalation_external_links[conn];
        let name = board.external_flow_arena[edge.target].name.clone();
        board.escalation_arena[edge.source].target_external_flow_name = Some(name);
        refreshed += 1;
    }

    for conn in ids(&board.object_external_links) {
        if !graph::formed(board, conn) {
            continue;
        }
        let edge = board.object_external_links[conn];
        let name = board.external_object_arena[edge.target].name.clone();
        board.object_arena[edge.source].external_object_name = Some(name);
        refreshed += 1;
    }

    refreshed
}

fn ids<K>(arena: &crate::types::Arena<K>) -> Vec<Id<K>> {
    arena.entries().map(|(id, _)| id).collect()
}

//
// phase two: flatten
//

fn flatten(board: &Board) -> BoardRecord {
    BoardRecord {
        namespaces: board
            .namespaces
            .iter()
            .map(|ns| namespace_record(board, *ns))
            .collect(),
        functions: board
            .functions
            .iter()
            .map(|f| function_record(board, *f))
            .collect(),
        external_flows: board
            .external_flows
            .iter()
            .map(|ef| {
                let node = board.external_flow(*ef);
                ExternalFlowRecord {
                    name: node.name.clone(),
                    argument_type: node.argument_type.clone(),
                }
            })
            .collect(),
        external_objects: board
            .external_objects
            .iter()
            .map(|eo| {
                let node = board.external_object(*eo);
                ExternalObjectRecord {
                    name: node.name.clone(),
                    object_type: node.object_type.clone(),
                }
            })
            .collect(),
        managed_objects: board
            .managed_objects
            .iter()
            .map(|mo| {
                let node = board.managed_object(*mo);
                ManagedObjectRecord {
                    name: node.name.clone(),
                    scope: node.scope.as_text().to_string(),
                    timeout: node.timeout,
                }
            })
            .collect(),
    }
}

fn namespace_record(board: &Board, ns: Id<crate::model::Namespace>) -> NamespaceRecord {
    let node = board.namespace(ns);

    NamespaceRecord {
        name: node.name.clone(),
        source: node.source.clone(),
        properties: node.properties.clone(),
        managed_functions: node
            .managed_functions
            .iter()
            .map(|mf| ManagedFunctionRecord {
                name: board.managed_function(*mf).name.clone(),
            })
            .collect(),
    }
}

fn function_record(board: &Board, f: Id<crate::model::Function>) -> FunctionRecord {
    let node = board.function(f);

    FunctionRecord {
        name: node.name.clone(),
        is_public: node.is_public,
        namespace: node.bound_namespace_name.clone(),
        managed_function: node.bound_function_name.clone(),
        objects: node
            .objects
            .iter()
            .map(|obj| {
                let obj = board.function_object(*obj);
                ObjectRecord {
                    name: obj.name.clone(),
                    object_type: obj.object_type.clone(),
                    external_object: obj.external_object_name.clone(),
                }
            })
            .collect(),
        flows: node
            .flows
            .iter()
            .map(|flow| {
                let flow = board.flow(*flow);
                FlowRecord {
                    name: flow.name.clone(),
                    argument_type: flow.argument_type.clone(),
                    target_function: flow.target_function_name.clone(),
                    target_external_flow: flow.target_external_flow_name.clone(),
                }
            })
            .collect(),
        escalations: node
            .escalations
            .iter()
            .map(|esc| {
                let esc = board.escalation(*esc);
                EscalationRecord {
                    escalation_type: esc.escalation_type.clone(),
                    target_function: esc.target_function_name.clone(),
                    target_external_flow: esc.target_external_flow_name.clone(),
                }
            })
            .collect(),
    }
}

///
/// TESTS
///
