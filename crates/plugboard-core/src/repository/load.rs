//! Record-to-board loading.
//!
//! Two phases. Phase one allocates every entity and attaches it in record
//! order, copying reference names verbatim; nothing is sorted, so a
//! stored board reproduces its file order until the first edit. Phase two
//! builds a [`NameIndex`] over the finished board and resolves every
//! reference name best-effort: a name that resolves becomes a live edge,
//! a name that does not is simply kept as text. Unresolved references are
//! reported through the event sink, never as errors; the only things the
//! issue collector sees are record-content contract violations.

use crate::{
    graph,
    issues::Issues,
    model::{
        Board, EscalationToExternalLink, EscalationToFunctionLink, ExternalFlow, ExternalObject,
        FlowToExternalLink, FlowToFunctionLink, Function, FunctionEscalation, FunctionFlow,
        FunctionObject, ManagedFunction, ManagedFunctionLink, ManagedObject, Namespace,
        ObjectScope, ObjectToExternalLink,
    },
    obs::{EditEvent, EditSink, emit},
    repository::{index::NameIndex, record::BoardRecord},
    traits::Path,
    types::Id,
};

///
/// Loaded
///
/// A freshly loaded board plus everything the load observed.
///

pub(crate) struct Loaded {
    pub(crate) board: Board,
    pub(crate) issues: Issues,
    pub(crate) links_formed: usize,
    pub(crate) links_unresolved: usize,
}

pub(crate) fn load(record: &BoardRecord, sink: Option<&'static dyn EditSink>) -> Loaded {
    let mut board = Board::new();
    let mut issues = Issues::new();

    populate(&mut board, &mut issues, record);

    let index = NameIndex::from_board(&board);
    let mut resolver = Resolver {
        index: &index,
        sink,
        formed: 0,
        unresolved: 0,
    };
    resolve(&mut board, &mut resolver);

    Loaded {
        board,
        issues,
        links_formed: resolver.formed,
        links_unresolved: resolver.unresolved,
    }
}

//
// phase one: populate
//

fn populate(board: &mut Board, issues: &mut Issues, record: &BoardRecord) {
    for ns_record in &record.namespaces {
        let ns = board.namespace_arena.alloc(Namespace::new(
            &ns_record.name,
            &ns_record.source,
            ns_record.properties.clone(),
        ));
        for mf_record in &ns_record.managed_functions {
            let mf = board
                .managed_function_arena
                .alloc(ManagedFunction::new(ns, &mf_record.name));
            board.namespace_arena[ns].managed_functions.push(mf);
        }
        board.namespaces.push(ns);
    }

    for f_record in &record.functions {
        let f = board.function_arena.alloc(Function::new(&f_record.name));
        {
            let node = &mut board.function_arena[f];
            node.is_public = f_record.is_public;
            node.bound_namespace_name = f_record.namespace.clone();
            node.bound_function_name = f_record.managed_function.clone();
        }

        for o_record in &f_record.objects {
            let obj = board.object_arena.alloc(FunctionObject::new(
                f,
                &o_record.name,
                &o_record.object_type,
            ));
            board.object_arena[obj].external_object_name = o_record.external_object.clone();
            board.function_arena[f].objects.push(obj);
        }
        for fl_record in &f_record.flows {
            let flow = board.flow_arena.alloc(FunctionFlow::new(
                f,
                &fl_record.name,
                fl_record.argument_type.clone(),
            ));
            {
                let node = &mut board.flow_arena[flow];
                node.target_function_name = fl_record.target_function.clone();
                node.target_external_flow_name = fl_record.target_external_flow.clone();
            }
            board.function_arena[f].flows.push(flow);
        }
        for e_record in &f_record.escalations {
            let esc = board
                .escalation_arena
                .alloc(FunctionEscalation::new(f, &e_record.escalation_type));
            {
                let node = &mut board.escalation_arena[esc];
                node.target_function_name = e_record.target_function.clone();
                node.target_external_flow_name = e_record.target_external_flow.clone();
            }
            board.function_arena[f].escalations.push(esc);
        }

        board.functions.push(f);
    }

    for ef_record in &record.external_flows {
        let ef = board.external_flow_arena.alloc(ExternalFlow::new(
            &ef_record.name,
            ef_record.argument_type.clone(),
        ));
        board.external_flows.push(ef);
    }
    for eo_record in &record.external_objects {
        let eo = board
            .external_object_arena
            .alloc(ExternalObject::new(&eo_record.name, &eo_record.object_type));
        board.external_objects.push(eo);
    }

    for mo_record in &record.managed_objects {
        let scope = if mo_record.scope.is_empty() {
            ObjectScope::default()
        } else {
            ObjectScope::from_text(&mo_record.scope).unwrap_or_else(|| {
                issues.add(
                    format!("managed_objects.{}", mo_record.name),
                    format!("unknown object scope '{}'", mo_record.scope),
                );
                ObjectScope::default()
            })
        };
        let mo = board
            .managed_object_arena
            .alloc(ManagedObject::new(&mo_record.name, scope, mo_record.timeout));
        board.managed_objects.push(mo);
    }
}

//
// phase two: resolve
//

struct Resolver<'a> {
    index: &'a NameIndex,
    sink: Option<&'static dyn EditSink>,
    formed: usize,
    unresolved: usize,
}

impl Resolver<'_> {
    fn formed(&mut self) {
        self.formed += 1;
    }

    fn unresolved(&mut self, connection: &'static str, name: impl Into<String>) {
        self.unresolved += 1;
        emit(
            self.sink,
            EditEvent::LinkUnresolved {
                connection,
                name: name.into(),
            },
        );
    }
}

fn resolve(board: &mut Board, resolver: &mut Resolver<'_>) {
    resolve_bindings(board, resolver);
    resolve_flows(board, resolver);
    resolve_escalations(board, resolver);
    resolve_objects(board, resolver);
}

fn resolve_bindings(board: &mut Board, resolver: &mut Resolver<'_>) {
    for f in board.functions.clone() {
        let node = &board.function_arena[f];
        let (ns_name, mf_name) = (
            node.bound_namespace_name.clone(),
            node.bound_function_name.clone(),
        );
        if ns_name.is_none() && mf_name.is_none() {
            continue;
        }

        let target = match (&ns_name, &mf_name) {
            (Some(ns), Some(mf)) => resolver.index.managed_function(ns, mf),
            _ => None,
        };
        match target {
            Some(target) => {
                graph::form(board, ManagedFunctionLink { source: f, target });
                resolver.formed();
            }
            None => resolver.unresolved(
                ManagedFunctionLink::PATH,
                compound_name(ns_name.as_deref(), mf_name.as_deref()),
            ),
        }
    }
}

fn resolve_flows(board: &mut Board, resolver: &mut Resolver<'_>) {
    for flow in flow_ids(board) {
        let node = &board.flow_arena[flow];

        // The function side carries the newer intent and wins when a
        // record names both targets; the external name stays as text.
        if let Some(name) = node.target_function_name.clone() {
            match resolver.index.function(&name) {
                Some(target) => {
                    graph::form(board, FlowToFunctionLink { source: flow, target });
                    resolver.formed();
                }
                None => resolver.unresolved(FlowToFunctionLink::PATH, name),
            }
        } else if let Some(name) = node.target_external_flow_name.clone() {
            match resolver.index.external_flow(&name) {
                Some(target) => {
                    graph::form(board, FlowToExternalLink { source: flow, target });
                    resolver.formed();
                }
                None => resolver.unresolved(FlowToExternalLink::PATH, name),
            }
        }
    }
}

fn resolve_escalations(board: &mut Board, resolver: &mut Resolver<'_>) {
    for esc in escalation_ids(board) {
        let node = &board.escalation_arena[esc];

        if let Some(name) = node.target_function_name.clone() {
            match resolver.index.function(&name) {
                Some(target) => {
                    graph::form(board, EscalationToFunctionLink { source: esc, target });
                    resolver.formed();
                }
                None => resolver.unresolved(EscalationToFunctionLink::PATH, name),
            }
        } else if let Some(name) = node.target_external_flow_name.clone() {
            match resolver.index.external_flow(&name) {
                Some(target) => {
                    graph::form(board, EscalationToExternalLink { source: esc, target });
                    resolver.formed();
                }
                None => resolver.unresolved(EscalationToExternalLink::PATH, name),
            }
        }
    }
}

fn resolve_objects(board: &mut Board, resolver: &mut Resolver<'_>) {
    for obj in object_ids(board) {
        let node = &board.object_arena[obj];

        if let Some(name) = node.external_object_name.clone() {
            match resolver.index.external_object(&name) {
                Some(target) => {
                    graph::form(board, ObjectToExternalLink { source: obj, target });
                    resolver.formed();
                }
                None => resolver.unresolved(ObjectToExternalLink::PATH, name),
            }
        }
    }
}

fn flow_ids(board: &Board) -> Vec<Id<FunctionFlow>> {
    board
        .functions
        .iter()
        .flat_map(|f| board.function_arena[*f].flows.iter().copied())
        .collect()
}

fn escalation_ids(board: &Board) -> Vec<Id<FunctionEscalation>> {
    board
        .functions
        .iter()
        .flat_map(|f| board.function_arena[*f].escalations.iter().copied())
        .collect()
}

fn object_ids(board: &Board) -> Vec<Id<FunctionObject>> {
    board
        .functions
        .iter()
        .flat_map(|f| board.function_arena[*f].objects.iter().copied())
        .collect()
}

fn compound_name(namespace: Option<&str>, name: Option<&str>) -> String {
    format!(
        "{}.{}",
        namespace.unwrap_or_default(),
        name.unwrap_or_default()
    )
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::record::{
        ExternalFlowRecord, FlowRecord, FunctionRecord, ManagedFunctionRecord,
        ManagedObjectRecord, NamespaceRecord,
    };
    use crate::types::PropertyList;

    fn function_record(name: &str) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            is_public: false,
            namespace: None,
            managed_function: None,
            objects: Vec::new(),
            flows: Vec::new(),
            escalations: Vec::new(),
        }
    }

    fn namespace_record(name: &str, managed: &[&str]) -> NamespaceRecord {
        NamespaceRecord {
            name: name.to_string(),
            source: String::new(),
            properties: PropertyList::new(),
            managed_functions: managed
                .iter()
                .map(|mf| ManagedFunctionRecord {
                    name: (*mf).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn load_preserves_record_order() {
        let record = BoardRecord {
            functions: vec![function_record("gamma"), function_record("alpha")],
            ..BoardRecord::default()
        };

        let loaded = load(&record, None);

        let names: Vec<&str> = loaded
            .board
            .functions
            .iter()
            .map(|f| loaded.board.function(*f).name.as_str())
            .collect();
        assert_eq!(names, ["gamma", "alpha"]);
    }

    #[test]
    fn binding_resolves_through_compound_key() {
        let mut charge = function_record("charge_card");
        charge.namespace = Some("orders".to_string());
        charge.managed_function = Some("charge".to_string());
        let record = BoardRecord {
            namespaces: vec![namespace_record("orders", &["charge"])],
            functions: vec![charge],
            ..BoardRecord::default()
        };

        let loaded = load(&record, None);

        assert_eq!(loaded.links_formed, 1);
        assert_eq!(loaded.links_unresolved, 0);
        let f = loaded
            .board
            .function_named("charge_card")
            .expect("function should load");
        let mf = loaded
            .board
            .bound_managed_function(f)
            .expect("binding should resolve");
        assert_eq!(loaded.board.managed_function(mf).name, "charge");
    }

    #[test]
    fn unresolved_reference_is_kept_not_failed() {
        let mut f = function_record("alpha");
        f.flows.push(FlowRecord {
            name: "success".to_string(),
            argument_type: None,
            target_function: Some("vanished".to_string()),
            target_external_flow: None,
        });
        let record = BoardRecord {
            functions: vec![f],
            ..BoardRecord::default()
        };

        let loaded = load(&record, None);

        assert_eq!(loaded.links_formed, 0);
        assert_eq!(loaded.links_unresolved, 1);
        assert!(loaded.issues.is_empty());

        let f = loaded
            .board
            .function_named("alpha")
            .expect("function should load");
        let flow = loaded.board.function(f).flows[0];
        assert_eq!(loaded.board.flow_target(flow), None);
        assert_eq!(
            loaded.board.flow(flow).target_function_name.as_deref(),
            Some("vanished")
        );
    }

    #[test]
    fn function_target_wins_over_external_name() {
        let mut f = function_record("alpha");
        f.flows.push(FlowRecord {
            name: "success".to_string(),
            argument_type: None,
            target_function: Some("beta".to_string()),
            target_external_flow: Some("shutdown".to_string()),
        });
        let record = BoardRecord {
            functions: vec![f, function_record("beta")],
            external_flows: vec![ExternalFlowRecord {
                name: "shutdown".to_string(),
                argument_type: None,
            }],
            ..BoardRecord::default()
        };

        let loaded = load(&record, None);

        assert_eq!(loaded.links_formed, 1);
        let alpha = loaded
            .board
            .function_named("alpha")
            .expect("function should load");
        let beta = loaded
            .board
            .function_named("beta")
            .expect("function should load");
        let flow = loaded.board.function(alpha).flows[0];
        assert_eq!(
            loaded.board.flow_target(flow),
            Some(crate::model::FlowTarget::Function(beta))
        );
        // The stale external name survives for round-tripping.
        assert_eq!(
            loaded.board.flow(flow).target_external_flow_name.as_deref(),
            Some("shutdown")
        );
    }

    #[test]
    fn unknown_scope_defaults_and_reports() {
        let record = BoardRecord {
            managed_objects: vec![ManagedObjectRecord {
                name: "cache".to_string(),
                scope: "banana".to_string(),
                timeout: 30,
            }],
            ..BoardRecord::default()
        };

        let loaded = load(&record, None);

        assert_eq!(loaded.issues.len(), 1);
        let mo = loaded
            .board
            .managed_object_named("cache")
            .expect("managed object should load");
        assert_eq!(loaded.board.managed_object(mo).scope, ObjectScope::Process);
    }
}
