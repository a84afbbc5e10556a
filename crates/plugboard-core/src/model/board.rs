use crate::{
    issues::Issues,
    model::{
        EscalationToExternalLink, EscalationToFunctionLink, ExternalFlow, ExternalObject,
        FlowTarget, FlowToExternalLink, FlowToFunctionLink, Function, FunctionEscalation,
        FunctionFlow, FunctionObject, ManagedFunction, ManagedFunctionLink, ManagedObject,
        Namespace, ObjectToExternalLink,
    },
    traits::Entity,
    types::{Arena, Id},
};

///
/// Board
///
/// The full in-memory model: entity arenas, edge arenas, and the root
/// membership lists. Arena slots are never freed; removing an entity
/// detaches it from its membership list, so a revert can re-attach the
/// same id and every outstanding handle stays valid.
///
/// Membership lists are kept name-sorted by the change layer after every
/// structural edit. The loader deliberately does not sort (see
/// `repository::load`), so a loaded board reproduces its stored order
/// until the first edit.
///

#[derive(Clone, Debug, Default)]
pub struct Board {
    pub namespaces: Vec<Id<Namespace>>,
    pub functions: Vec<Id<Function>>,
    pub external_flows: Vec<Id<ExternalFlow>>,
    pub external_objects: Vec<Id<ExternalObject>>,
    pub managed_objects: Vec<Id<ManagedObject>>,

    pub(crate) namespace_arena: Arena<Namespace>,
    pub(crate) managed_function_arena: Arena<ManagedFunction>,
    pub(crate) function_arena: Arena<Function>,
    pub(crate) object_arena: Arena<FunctionObject>,
    pub(crate) flow_arena: Arena<FunctionFlow>,
    pub(crate) escalation_arena: Arena<FunctionEscalation>,
    pub(crate) external_flow_arena: Arena<ExternalFlow>,
    pub(crate) external_object_arena: Arena<ExternalObject>,
    pub(crate) managed_object_arena: Arena<ManagedObject>,

    pub(crate) managed_function_links: Arena<ManagedFunctionLink>,
    pub(crate) flow_function_links: Arena<FlowToFunctionLink>,
    pub(crate) flow_external_links: Arena<FlowToExternalLink>,
    pub(crate) escalation_function_links: Arena<EscalationToFunctionLink>,
    pub(crate) escalation_external_links: Arena<EscalationToExternalLink>,
    pub(crate) object_external_links: Arena<ObjectToExternalLink>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // entity accessors
    //

    #[must_use]
    pub fn namespace(&self, id: Id<Namespace>) -> &Namespace {
        &self.namespace_arena[id]
    }

    pub(crate) fn namespace_mut(&mut self, id: Id<Namespace>) -> &mut Namespace {
        &mut self.namespace_arena[id]
    }

    #[must_use]
    pub fn managed_function(&self, id: Id<ManagedFunction>) -> &ManagedFunction {
        &self.managed_function_arena[id]
    }

    pub(crate) fn managed_function_mut(&mut self, id: Id<ManagedFunction>) -> &mut ManagedFunction {
        &mut self.managed_function_arena[id]
    }

    #[must_use]
    pub fn function(&self, id: Id<Function>) -> &Function {
        &self.function_arena[id]
    }

    pub(crate) fn function_mut(&mut self, id: Id<Function>) -> &mut Function {
        &mut self.function_arena[id]
    }

    #[must_use]
    pub fn function_object(&self, id: Id<FunctionObject>) -> &FunctionObject {
        &self.object_arena[id]
    }

    pub(crate) fn function_object_mut(&mut self, id: Id<FunctionObject>) -> &mut FunctionObject {
        &mut self.object_arena[id]
    }

    #[must_use]
    pub fn flow(&self, id: Id<FunctionFlow>) -> &FunctionFlow {
        &self.flow_arena[id]
    }

    pub(crate) fn flow_mut(&mut self, id: Id<FunctionFlow>) -> &mut FunctionFlow {
        &mut self.flow_arena[id]
    }

    #[must_use]
    pub fn escalation(&self, id: Id<FunctionEscalation>) -> &FunctionEscalation {
        &self.escalation_arena[id]
    }

    pub(crate) fn escalation_mut(&mut self, id: Id<FunctionEscalation>) -> &mut FunctionEscalation {
        &mut self.escalation_arena[id]
    }

    #[must_use]
    pub fn external_flow(&self, id: Id<ExternalFlow>) -> &ExternalFlow {
        &self.external_flow_arena[id]
    }

    #[must_use]
    pub fn external_object(&self, id: Id<ExternalObject>) -> &ExternalObject {
        &self.external_object_arena[id]
    }

    #[must_use]
    pub fn managed_object(&self, id: Id<ManagedObject>) -> &ManagedObject {
        &self.managed_object_arena[id]
    }

    pub(crate) fn managed_object_mut(&mut self, id: Id<ManagedObject>) -> &mut ManagedObject {
        &mut self.managed_object_arena[id]
    }

    //
    // name lookups
    //
    // Linear scans over the membership lists. Boards are edited by hand;
    // list sizes stay far below anything an index would pay for.
    //

    #[must_use]
    pub fn namespace_named(&self, name: &str) -> Option<Id<Namespace>> {
        self.namespaces
            .iter()
            .copied()
            .find(|id| self.namespace_arena[*id].name == name)
    }

    #[must_use]
    pub fn function_named(&self, name: &str) -> Option<Id<Function>> {
        self.functions
            .iter()
            .copied()
            .find(|id| self.function_arena[*id].name == name)
    }

    #[must_use]
    pub fn external_flow_named(&self, name: &str) -> Option<Id<ExternalFlow>> {
        self.external_flows
            .iter()
            .copied()
            .find(|id| self.external_flow_arena[*id].name == name)
    }

    #[must_use]
    pub fn external_object_named(&self, name: &str) -> Option<Id<ExternalObject>> {
        self.external_objects
            .iter()
            .copied()
            .find(|id| self.external_object_arena[*id].name == name)
    }

    #[must_use]
    pub fn managed_object_named(&self, name: &str) -> Option<Id<ManagedObject>> {
        self.managed_objects
            .iter()
            .copied()
            .find(|id| self.managed_object_arena[*id].name == name)
    }

    /// Managed functions are named per namespace; the compound
    /// `(namespace, name)` pair is the unit of identity.
    #[must_use]
    pub fn managed_function_named(
        &self,
        namespace: Id<Namespace>,
        name: &str,
    ) -> Option<Id<ManagedFunction>> {
        self.namespace_arena[namespace]
            .managed_functions
            .iter()
            .copied()
            .find(|id| self.managed_function_arena[*id].name == name)
    }

    //
    // resolved targets
    //
    // Slot occupancy is what decides liveness, so resolving a target is a
    // plain slot read; the persisted name fields play no part here.
    //

    /// The managed function a function is currently bound to, if any.
    #[must_use]
    pub fn bound_managed_function(&self, function: Id<Function>) -> Option<Id<ManagedFunction>> {
        let conn = self.function_arena[function].managed_function_link?;

        Some(self.managed_function_links[conn].target)
    }

    /// The live target of a flow. At most one of the two typed slots is
    /// occupied; the function side wins if both ever are.
    #[must_use]
    pub fn flow_target(&self, flow: Id<FunctionFlow>) -> Option<FlowTarget> {
        let flow = &self.flow_arena[flow];

        if let Some(conn) = flow.function_link {
            return Some(FlowTarget::Function(self.flow_function_links[conn].target));
        }
        if let Some(conn) = flow.external_flow_link {
            return Some(FlowTarget::External(self.flow_external_links[conn].target));
        }

        None
    }

    /// The live target of an escalation.
    #[must_use]
    pub fn escalation_target(&self, escalation: Id<FunctionEscalation>) -> Option<FlowTarget> {
        let escalation = &self.escalation_arena[escalation];

        if let Some(conn) = escalation.function_link {
            return Some(FlowTarget::Function(
                self.escalation_function_links[conn].target,
            ));
        }
        if let Some(conn) = escalation.external_flow_link {
            return Some(FlowTarget::External(
                self.escalation_external_links[conn].target,
            ));
        }

        None
    }

    /// The external object a function object currently draws on, if any.
    #[must_use]
    pub fn object_target(&self, object: Id<FunctionObject>) -> Option<Id<ExternalObject>> {
        let conn = self.object_arena[object].external_object_link?;

        Some(self.object_external_links[conn].target)
    }

    //
    // sibling ordering
    //
    // Stable sorts by entity name, so ids with equal names keep their
    // relative order. Called by the change layer after every structural
    // edit; never by the loader.
    //

    pub(crate) fn sort_namespaces(&mut self) {
        let arena = &self.namespace_arena;
        self.namespaces
            .sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
    }

    pub(crate) fn sort_functions(&mut self) {
        let arena = &self.function_arena;
        self.functions
            .sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
    }

    pub(crate) fn sort_external_flows(&mut self) {
        let arena = &self.external_flow_arena;
        self.external_flows
            .sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
    }

    pub(crate) fn sort_external_objects(&mut self) {
        let arena = &self.external_object_arena;
        self.external_objects
            .sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
    }

    pub(crate) fn sort_managed_objects(&mut self) {
        let arena = &self.managed_object_arena;
        self.managed_objects
            .sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
    }

    pub(crate) fn sort_managed_functions(&mut self, namespace: Id<Namespace>) {
        let mut list = std::mem::take(&mut self.namespace_arena[namespace].managed_functions);
        let arena = &self.managed_function_arena;
        list.sort_by(|a, b| arena[*a].name.cmp(&arena[*b].name));
        self.namespace_arena[namespace].managed_functions = list;
    }

    /// Re-sort all three child lists of one function.
    pub(crate) fn sort_function_children(&mut self, function: Id<Function>) {
        let mut objects = std::mem::take(&mut self.function_arena[function].objects);
        let object_arena = &self.object_arena;
        objects.sort_by(|a, b| object_arena[*a].name.cmp(&object_arena[*b].name));

        let mut flows = std::mem::take(&mut self.function_arena[function].flows);
        let flow_arena = &self.flow_arena;
        flows.sort_by(|a, b| flow_arena[*a].name.cmp(&flow_arena[*b].name));

        let mut escalations = std::mem::take(&mut self.function_arena[function].escalations);
        let escalation_arena = &self.escalation_arena;
        escalations.sort_by(|a, b| {
            escalation_arena[*a]
                .escalation_type
                .cmp(&escalation_arena[*b].escalation_type)
        });

        let entry = &mut self.function_arena[function];
        entry.objects = objects;
        entry.flows = flows;
        entry.escalations = escalations;
    }

    //
    // verification
    //

    /// Walk the whole board and report every broken structural contract.
    ///
    /// A healthy board returns an empty collection. Broken contracts mean
    /// model-layer bugs, not bad user input: unresolved name fields are
    /// normal and never reported here.
    #[must_use]
    pub fn verify(&self) -> Issues {
        let mut issues = Issues::new();

        self.verify_order(&mut issues);
        self.verify_ownership(&mut issues);
        self.verify_links(&mut issues);

        issues
    }

    fn verify_order(&self, issues: &mut Issues) {
        fn check<K: Entity>(
            issues: &mut Issues,
            route: &str,
            arena: &Arena<K>,
            members: &[Id<K>],
        ) {
            for pair in members.windows(2) {
                let (a, b) = (arena[pair[0]].name(), arena[pair[1]].name());
                if a > b {
                    issues.add(route, format!("'{b}' sorts before '{a}'"));
                }
                if a == b {
                    issues.add(route, format!("duplicate name '{a}'"));
                }
            }
        }

        check(issues, "namespaces", &self.namespace_arena, &self.namespaces);
        check(issues, "functions", &self.function_arena, &self.functions);
        check(
            issues,
            "external_flows",
            &self.external_flow_arena,
            &self.external_flows,
        );
        check(
            issues,
            "external_objects",
            &self.external_object_arena,
            &self.external_objects,
        );
        check(
            issues,
            "managed_objects",
            &self.managed_object_arena,
            &self.managed_objects,
        );

        for ns in self.namespaces.iter().copied() {
            let node = &self.namespace_arena[ns];
            check(
                issues,
                &format!("namespaces.{}", node.name),
                &self.managed_function_arena,
                &node.managed_functions,
            );
        }
        for f in self.functions.iter().copied() {
            let node = &self.function_arena[f];
            let route = format!("functions.{}", node.name);
            check(issues, &route, &self.object_arena, &node.objects);
            check(issues, &route, &self.flow_arena, &node.flows);
            check(issues, &route, &self.escalation_arena, &node.escalations);
        }
    }

    fn verify_ownership(&self, issues: &mut Issues) {
        for ns in self.namespaces.iter().copied() {
            for mf in self.namespace_arena[ns].managed_functions.iter().copied() {
                if self.managed_function_arena[mf].owner != ns {
                    issues.add(
                        format!("namespaces.{}", self.namespace_arena[ns].name),
                        format!(
                            "managed function '{}' does not point back at its namespace",
                            self.managed_function_arena[mf].name
                        ),
                    );
                }
            }
        }

        for f in self.functions.iter().copied() {
            let node = &self.function_arena[f];
            let route = format!("functions.{}", node.name);
            for obj in node.objects.iter().copied() {
                if self.object_arena[obj].owner != f {
                    issues.add(
                        &route,
                        format!(
                            "object '{}' does not point back at its function",
                            self.object_arena[obj].name
                        ),
                    );
                }
            }
            for flow in node.flows.iter().copied() {
                if self.flow_arena[flow].owner != f {
                    issues.add(
                        &route,
                        format!(
                            "flow '{}' does not point back at its function",
                            self.flow_arena[flow].name
                        ),
                    );
                }
            }
            for esc in node.escalations.iter().copied() {
                if self.escalation_arena[esc].owner != f {
                    issues.add(
                        &route,
                        format!(
                            "escalation '{}' does not point back at its function",
                            self.escalation_arena[esc].escalation_type
                        ),
                    );
                }
            }
        }
    }

    fn verify_links(&self, issues: &mut Issues) {
        // Every occupied slot must hold an edge whose source is the
        // holder and whose target lists the edge inbound.
        for (f, node) in self.function_arena.entries() {
            if let Some(conn) = node.managed_function_link {
                let edge = &self.managed_function_links[conn];
                if edge.source != f {
                    issues.add("links", "function slot holds a foreign managed-function edge");
                }
                if !self.managed_function_arena[edge.target]
                    .inbound_function_links
                    .contains(&conn)
                {
                    issues.add("links", "live managed-function edge missing from inbound list");
                }
            }
        }

        for (flow, node) in self.flow_arena.entries() {
            if node.function_link.is_some() && node.external_flow_link.is_some() {
                issues.add(
                    "links",
                    format!("flow '{}' targets a function and an external flow at once", node.name),
                );
            }
            if let Some(conn) = node.function_link {
                let edge = &self.flow_function_links[conn];
                if edge.source != flow {
                    issues.add("links", "flow slot holds a foreign flow edge");
                }
                if !self.function_arena[edge.target]
                    .inbound_flow_links
                    .contains(&conn)
                {
                    issues.add("links", "live flow edge missing from inbound list");
                }
            }
            if let Some(conn) = node.external_flow_link {
                let edge = &self.flow_external_links[conn];
                if edge.source != flow {
                    issues.add("links", "flow slot holds a foreign external-flow edge");
                }
                if !self.external_flow_arena[edge.target]
                    .inbound_flow_links
                    .contains(&conn)
                {
                    issues.add("links", "live external-flow edge missing from inbound list");
                }
            }
        }

        for (esc, node) in self.escalation_arena.entries() {
            if node.function_link.is_some() && node.external_flow_link.is_some() {
                issues.add(
                    "links",
                    format!(
                        "escalation '{}' targets a function and an external flow at once",
                        node.escalation_type
                    ),
                );
            }
            if let Some(conn) = node.function_link {
                let edge = &self.escalation_function_links[conn];
                if edge.source != esc {
                    issues.add("links", "escalation slot holds a foreign escalation edge");
                }
                if !self.function_arena[edge.target]
                    .inbound_escalation_links
                    .contains(&conn)
                {
                    issues.add("links", "live escalation edge missing from inbound list");
                }
            }
            if let Some(conn) = node.external_flow_link {
                let edge = &self.escalation_external_links[conn];
                if edge.source != esc {
                    issues.add(
                        "links",
                        "escalation slot holds a foreign external-escalation edge",
                    );
                }
                if !self.external_flow_arena[edge.target]
                    .inbound_escalation_links
                    .contains(&conn)
                {
                    issues.add(
                        "links",
                        "live external-escalation edge missing from inbound list",
                    );
                }
            }
        }

        for (obj, node) in self.object_arena.entries() {
            if let Some(conn) = node.external_object_link {
                let edge = &self.object_external_links[conn];
                if edge.source != obj {
                    issues.add("links", "object slot holds a foreign object edge");
                }
                if !self.external_object_arena[edge.target]
                    .inbound_object_links
                    .contains(&conn)
                {
                    issues.add("links", "live object edge missing from inbound list");
                }
            }
        }

        // Inbound lists may carry dangling edges (displaced, not yet
        // removed), but every entry must at least target its holder.
        for (mf, node) in self.managed_function_arena.entries() {
            for conn in node.inbound_function_links.iter().copied() {
                if self.managed_function_links[conn].target != mf {
                    issues.add("links", "inbound managed-function edge targets someone else");
                }
            }
        }
        for (f, node) in self.function_arena.entries() {
            for conn in node.inbound_flow_links.iter().copied() {
                if self.flow_function_links[conn].target != f {
                    issues.add("links", "inbound flow edge targets someone else");
                }
            }
            for conn in node.inbound_escalation_links.iter().copied() {
                if self.escalation_function_links[conn].target != f {
                    issues.add("links", "inbound escalation edge targets someone else");
                }
            }
        }
        for (ef, node) in self.external_flow_arena.entries() {
            for conn in node.inbound_flow_links.iter().copied() {
                if self.flow_external_links[conn].target != ef {
                    issues.add("links", "inbound external-flow edge targets someone else");
                }
            }
            for conn in node.inbound_escalation_links.iter().copied() {
                if self.escalation_external_links[conn].target != ef {
                    issues.add(
                        "links",
                        "inbound external-escalation edge targets someone else",
                    );
                }
            }
        }
        for (eo, node) in self.external_object_arena.entries() {
            for conn in node.inbound_object_links.iter().copied() {
                if self.object_external_links[conn].target != eo {
                    issues.add("links", "inbound object edge targets someone else");
                }
            }
        }
    }
}

///
/// TESTS
///
