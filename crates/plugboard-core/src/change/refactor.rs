//! Conforming an entity to a declared shape in one undo unit.
//!
//! A refactor compares what an entity has against what a type says it
//! should have, then plans the difference: matched children are revised
//! in place (keeping their ids and links), unmatched targets are added,
//! and leftover children are removed with their cascades. Matching runs
//! the caller's rename mapping first; identical names pair up whatever
//! remains.
//!
//! Members are planned serially against a scratch copy of the board so
//! each plan sees the state its predecessors will have produced. The
//! scratch copy is discarded; replaying the members against the real
//! board allocates the same ids in the same order.

use std::collections::BTreeMap;

use crate::{
    change::Change,
    model::{Board, Function, Namespace},
    types::{Id, PropertyList},
};

///
/// FunctionType
///
/// The shape a function should conform to: its objects, flows, and
/// escalations by name. Link targets are not part of the shape; revised
/// children keep whatever they were pointing at.
///

#[derive(Clone, Debug, Default)]
pub struct FunctionType {
    pub objects: Vec<ObjectSpec>,
    pub flows: Vec<FlowSpec>,
    pub escalations: Vec<EscalationSpec>,
}

///
/// NamespaceType
///
/// The shape a namespace should conform to: its property list and the
/// managed functions it declares.
///

#[derive(Clone, Debug, Default)]
pub struct NamespaceType {
    pub properties: PropertyList,
    pub managed_functions: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ObjectSpec {
    pub name: String,
    pub object_type: String,
}

impl ObjectSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_type: object_type.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FlowSpec {
    pub name: String,
    pub argument_type: Option<String>,
}

impl FlowSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, argument_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            argument_type: argument_type.map(String::from),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EscalationSpec {
    pub escalation_type: String,
}

impl EscalationSpec {
    #[must_use]
    pub fn new(escalation_type: impl Into<String>) -> Self {
        Self {
            escalation_type: escalation_type.into(),
        }
    }
}

impl Change {
    /// Conform `function` to `target`. The mappings say which existing
    /// child becomes which target entry, keyed old name to target name;
    /// children and targets they leave out fall back to identical-name
    /// matching.
    #[must_use]
    pub fn refactor_function(
        board: &Board,
        function: Id<Function>,
        new_name: impl Into<String>,
        target: &FunctionType,
        object_mapping: &BTreeMap<String, String>,
        flow_mapping: &BTreeMap<String, String>,
        escalation_mapping: &BTreeMap<String, String>,
    ) -> Self {
        if !board.functions.contains(&function) {
            return Self::no_change("function is not on the board");
        }
        let node = board.function(function);

        let objects: Vec<_> = node
            .objects
            .iter()
            .map(|id| (*id, board.function_object(*id).name.clone()))
            .collect();
        let object_names: Vec<String> =
            target.objects.iter().map(|s| s.name.clone()).collect();
        let objects = match_by_name(&objects, &object_names, object_mapping);

        let flows: Vec<_> = node
            .flows
            .iter()
            .map(|id| (*id, board.flow(*id).name.clone()))
            .collect();
        let flow_names: Vec<String> = target.flows.iter().map(|s| s.name.clone()).collect();
        let flows = match_by_name(&flows, &flow_names, flow_mapping);

        let escalations: Vec<_> = node
            .escalations
            .iter()
            .map(|id| (*id, board.escalation(*id).escalation_type.clone()))
            .collect();
        let escalation_names: Vec<String> = target
            .escalations
            .iter()
            .map(|s| s.escalation_type.clone())
            .collect();
        let escalations = match_by_name(&escalations, &escalation_names, escalation_mapping);

        let description = format!("Refactor function {}", node.name);
        let mut scratch = board.clone();
        let mut members = Vec::new();

        let rename = Change::rename_function(&scratch, function, new_name);
        plan(&mut members, &mut scratch, rename);

        // Orphans leave first so their names are free for the survivors.
        for id in &objects.orphans {
            let change = Change::remove_object(&scratch, *id);
            plan(&mut members, &mut scratch, change);
        }
        for id in &flows.orphans {
            let change = Change::remove_flow(&scratch, *id);
            plan(&mut members, &mut scratch, change);
        }
        for id in &escalations.orphans {
            let change = Change::remove_escalation(&scratch, *id);
            plan(&mut members, &mut scratch, change);
        }

        for (id, i) in &objects.pairs {
            let spec = &target.objects[*i];
            let change = Change::revise_object(&scratch, *id, &spec.name, &spec.object_type);
            plan(&mut members, &mut scratch, change);
        }
        for (id, i) in &flows.pairs {
            let spec = &target.flows[*i];
            let change =
                Change::revise_flow(&scratch, *id, &spec.name, spec.argument_type.as_deref());
            plan(&mut members, &mut scratch, change);
        }
        for (id, i) in &escalations.pairs {
            let spec = &target.escalations[*i];
            let change = Change::revise_escalation(&scratch, *id, &spec.escalation_type);
            plan(&mut members, &mut scratch, change);
        }

        for i in &objects.additions {
            let spec = &target.objects[*i];
            let change = Change::add_object(&scratch, function, &spec.name, &spec.object_type);
            plan(&mut members, &mut scratch, change);
        }
        for i in &flows.additions {
            let spec = &target.flows[*i];
            let change =
                Change::add_flow(&scratch, function, &spec.name, spec.argument_type.as_deref());
            plan(&mut members, &mut scratch, change);
        }
        for i in &escalations.additions {
            let spec = &target.escalations[*i];
            let change = Change::add_escalation(&scratch, function, &spec.escalation_type);
            plan(&mut members, &mut scratch, change);
        }

        Self::compound(description, members)
    }

    /// Conform `namespace` to `target`: name, properties, and declared
    /// managed functions. Live bindings follow their managed functions
    /// through renames; bindings to removed declarations are unformed.
    #[must_use]
    pub fn refactor_namespace(
        board: &Board,
        namespace: Id<Namespace>,
        new_name: impl Into<String>,
        target: &NamespaceType,
        mapping: &BTreeMap<String, String>,
    ) -> Self {
        if !board.namespaces.contains(&namespace) {
            return Self::no_change("namespace is not on the board");
        }
        let node = board.namespace(namespace);

        let children: Vec<_> = node
            .managed_functions
            .iter()
            .map(|id| (*id, board.managed_function(*id).name.clone()))
            .collect();
        let matched = match_by_name(&children, &target.managed_functions, mapping);

        let description = format!("Refactor namespace {}", node.name);
        let mut scratch = board.clone();
        let mut members = Vec::new();

        let rename = Change::rename_namespace(&scratch, namespace, new_name);
        plan(&mut members, &mut scratch, rename);
        let properties =
            Change::set_namespace_properties(&scratch, namespace, target.properties.clone());
        plan(&mut members, &mut scratch, properties);

        for id in &matched.orphans {
            let change = Change::remove_managed_function(&scratch, *id);
            plan(&mut members, &mut scratch, change);
        }
        for (id, i) in &matched.pairs {
            let change =
                Change::rename_managed_function(&scratch, *id, &target.managed_functions[*i]);
            plan(&mut members, &mut scratch, change);
        }
        for i in &matched.additions {
            let change =
                Change::add_managed_function(&scratch, namespace, &target.managed_functions[*i]);
            plan(&mut members, &mut scratch, change);
        }

        Self::compound(description, members)
    }
}

/// Advance the scratch board past `change` and keep the unapplied
/// original as a member. The scratch twin takes the first-apply arena
/// allocations; the kept member re-allocates identically when the
/// compound runs against the real board.
fn plan(members: &mut Vec<Change>, scratch: &mut Board, change: Change) {
    let mut ahead = change.clone();
    ahead.apply(scratch);
    members.push(change);
}

///
/// Matching
///
/// How one child category lines up against its target entries: `pairs`
/// hold (child, target index), `orphans` matched nothing, `additions`
/// index targets nothing claimed.
///

struct Matching<K> {
    pairs: Vec<(K, usize)>,
    orphans: Vec<K>,
    additions: Vec<usize>,
}

/// Mapping entries claim their targets first; identical names pair up
/// whatever is left. Every target is claimed at most once.
fn match_by_name<K: Copy>(
    existing: &[(K, String)],
    targets: &[String],
    mapping: &BTreeMap<String, String>,
) -> Matching<K> {
    let mut claimed = vec![false; targets.len()];
    let mut pairs = Vec::new();
    let mut leftover = Vec::new();

    for (id, name) in existing {
        let target = mapping
            .get(name)
            .and_then(|to| targets.iter().position(|t| t == to))
            .filter(|i| !claimed[*i]);
        match target {
            Some(i) => {
                claimed[i] = true;
                pairs.push((*id, i));
            }
            None => leftover.push((*id, name)),
        }
    }

    let mut orphans = Vec::new();
    for (id, name) in leftover {
        match targets
            .iter()
            .position(|t| t == name)
            .filter(|i| !claimed[*i])
        {
            Some(i) => {
                claimed[i] = true;
                pairs.push((id, i));
            }
            None => orphans.push(id),
        }
    }

    let additions = (0..targets.len()).filter(|i| !claimed[*i]).collect();

    Matching {
        pairs,
        orphans,
        additions,
    }
}

///
/// TESTS
///
