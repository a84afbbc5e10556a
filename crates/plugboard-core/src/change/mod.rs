//! Undoable board edits.
//!
//! Every edit is a [`Change`]: planned completely at construction against
//! the current board, then applied and reverted mechanically. Factories
//! validate their preconditions up front; a failing precondition yields
//! the `NoChange` variant, which carries the diagnostic as a conflict and
//! never touches the board. Nothing in this layer returns `Result`: a
//! change either has a full plan or is `NoChange`.
//!
//! Applying changes out of construction order, or interleaving changes
//! planned over overlapping entities, is unsupported: plans capture ids
//! and before-state once and replay them verbatim.

mod child;
mod compound;
mod external;
mod function;
mod history;
mod link;
mod namespace;
mod object;
mod refactor;

#[cfg(test)]
mod tests;

pub use history::ChangeLog;
pub use refactor::{EscalationSpec, FlowSpec, FunctionType, NamespaceType, ObjectSpec};

use crate::{
    change::{
        child::{
            AddEscalation, AddFlow, AddManagedFunction, AddObject, RemoveEscalation, RemoveFlow,
            RemoveManagedFunction, RemoveObject, RenameManagedFunction, ReviseEscalation,
            ReviseFlow, ReviseObject,
        },
        external::{
            AddExternalFlow, AddExternalObject, RemoveExternalFlow, RemoveExternalObject,
        },
        function::{AddFunction, RemoveFunction, RenameFunction, SetFunctionPublic},
        link::{
            LinkEscalation, LinkFlow, LinkObject, UnlinkEscalation, UnlinkFlow, UnlinkObject,
        },
        namespace::{AddNamespace, RemoveNamespace, RenameNamespace, SetNamespaceProperties},
        object::{AddManagedObject, RemoveManagedObject, RenameManagedObject},
    },
    graph,
    model::{
        Board, EscalationToExternalLink, EscalationToFunctionLink, FlowToExternalLink,
        FlowToFunctionLink, ManagedFunctionLink, ObjectToExternalLink,
    },
    types::Id,
};

///
/// Conflict
///
/// One reason a change cannot be applied, phrased for the user.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conflict {
    description: String,
}

impl Conflict {
    pub(crate) fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

///
/// Change
///
/// One planned edit with an applied/unapplied state machine. `apply` on
/// an applied change and `revert` on an unapplied one are no-ops, so a
/// change can cycle through an undo stack indefinitely. The description
/// is a stable label meant verbatim for undo menus.
///

#[derive(Clone, Debug)]
pub struct Change {
    kind: ChangeKind,
    description: String,
    conflicts: Vec<Conflict>,
    applied: bool,
}

impl Change {
    pub(crate) fn new(kind: ChangeKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            conflicts: Vec::new(),
            applied: false,
        }
    }

    pub(crate) fn no_change(reason: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::NoChange,
            description: "No change".to_string(),
            conflicts: vec![Conflict::new(reason)],
            applied: false,
        }
    }

    pub fn apply(&mut self, board: &mut Board) {
        if self.applied || !self.can_apply() {
            return;
        }
        self.kind.apply(board);
        self.applied = true;
    }

    pub fn revert(&mut self, board: &mut Board) {
        if !self.applied {
            return;
        }
        self.kind.revert(board);
        self.applied = false;
    }

    #[must_use]
    pub const fn can_apply(&self) -> bool {
        !matches!(self.kind, ChangeKind::NoChange)
    }

    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.applied
    }
}

///
/// ChangeKind
///
/// Tagged plan storage, one variant per edit. Plan fields are written
/// once (at construction, or on first apply for arena allocations) and
/// replayed by apply/revert.
///

#[remain::sorted]
#[derive(Clone, Debug)]
pub(crate) enum ChangeKind {
    AddEscalation(AddEscalation),
    AddExternalFlow(AddExternalFlow),
    AddExternalObject(AddExternalObject),
    AddFlow(AddFlow),
    AddFunction(AddFunction),
    AddManagedFunction(AddManagedFunction),
    AddManagedObject(AddManagedObject),
    AddNamespace(AddNamespace),
    AddObject(AddObject),
    Compound(Vec<Change>),
    LinkEscalation(LinkEscalation),
    LinkFlow(LinkFlow),
    LinkObject(LinkObject),
    NoChange,
    RemoveEscalation(RemoveEscalation),
    RemoveExternalFlow(RemoveExternalFlow),
    RemoveExternalObject(RemoveExternalObject),
    RemoveFlow(RemoveFlow),
    RemoveFunction(RemoveFunction),
    RemoveManagedFunction(RemoveManagedFunction),
    RemoveManagedObject(RemoveManagedObject),
    RemoveNamespace(RemoveNamespace),
    RemoveObject(RemoveObject),
    RenameFunction(RenameFunction),
    RenameManagedFunction(RenameManagedFunction),
    RenameManagedObject(RenameManagedObject),
    RenameNamespace(RenameNamespace),
    ReviseEscalation(ReviseEscalation),
    ReviseFlow(ReviseFlow),
    ReviseObject(ReviseObject),
    SetFunctionPublic(SetFunctionPublic),
    SetNamespaceProperties(SetNamespaceProperties),
    UnlinkEscalation(UnlinkEscalation),
    UnlinkFlow(UnlinkFlow),
    UnlinkObject(UnlinkObject),
}

impl ChangeKind {
    fn apply(&mut self, board: &mut Board) {
        match self {
            Self::AddEscalation(plan) => plan.apply(board),
            Self::AddExternalFlow(plan) => plan.apply(board),
            Self::AddExternalObject(plan) => plan.apply(board),
            Self::AddFlow(plan) => plan.apply(board),
            Self::AddFunction(plan) => plan.apply(board),
            Self::AddManagedFunction(plan) => plan.apply(board),
            Self::AddManagedObject(plan) => plan.apply(board),
            Self::AddNamespace(plan) => plan.apply(board),
            Self::AddObject(plan) => plan.apply(board),
            Self::Compound(changes) => {
                for change in changes.iter_mut() {
                    change.apply(board);
                }
            }
            Self::LinkEscalation(plan) => plan.apply(board),
            Self::LinkFlow(plan) => plan.apply(board),
            Self::LinkObject(plan) => plan.apply(board),
            Self::NoChange => {}
            Self::RemoveEscalation(plan) => plan.apply(board),
            Self::RemoveExternalFlow(plan) => plan.apply(board),
            Self::RemoveExternalObject(plan) => plan.apply(board),
            Self::RemoveFlow(plan) => plan.apply(board),
            Self::RemoveFunction(plan) => plan.apply(board),
            Self::RemoveManagedFunction(plan) => plan.apply(board),
            Self::RemoveManagedObject(plan) => plan.apply(board),
            Self::RemoveNamespace(plan) => plan.apply(board),
            Self::RemoveObject(plan) => plan.apply(board),
            Self::RenameFunction(plan) => plan.apply(board),
            Self::RenameManagedFunction(plan) => plan.apply(board),
            Self::RenameManagedObject(plan) => plan.apply(board),
            Self::RenameNamespace(plan) => plan.apply(board),
            Self::ReviseEscalation(plan) => plan.apply(board),
            Self::ReviseFlow(plan) => plan.apply(board),
            Self::ReviseObject(plan) => plan.apply(board),
            Self::SetFunctionPublic(plan) => plan.apply(board),
            Self::SetNamespaceProperties(plan) => plan.apply(board),
            Self::UnlinkEscalation(plan) => plan.apply(board),
            Self::UnlinkFlow(plan) => plan.apply(board),
            Self::UnlinkObject(plan) => plan.apply(board),
        }
    }

    fn revert(&mut self, board: &mut Board) {
        match self {
            Self::AddEscalation(plan) => plan.revert(board),
            Self::AddExternalFlow(plan) => plan.revert(board),
            Self::AddExternalObject(plan) => plan.revert(board),
            Self::AddFlow(plan) => plan.revert(board),
            Self::AddFunction(plan) => plan.revert(board),
            Self::AddManagedFunction(plan) => plan.revert(board),
            Self::AddManagedObject(plan) => plan.revert(board),
            Self::AddNamespace(plan) => plan.revert(board),
            Self::AddObject(plan) => plan.revert(board),
            Self::Compound(changes) => {
                for change in changes.iter_mut().rev() {
                    change.revert(board);
                }
            }
            Self::LinkEscalation(plan) => plan.revert(board),
            Self::LinkFlow(plan) => plan.revert(board),
            Self::LinkObject(plan) => plan.revert(board),
            Self::NoChange => {}
            Self::RemoveEscalation(plan) => plan.revert(board),
            Self::RemoveExternalFlow(plan) => plan.revert(board),
            Self::RemoveExternalObject(plan) => plan.revert(board),
            Self::RemoveFlow(plan) => plan.revert(board),
            Self::RemoveFunction(plan) => plan.revert(board),
            Self::RemoveManagedFunction(plan) => plan.revert(board),
            Self::RemoveManagedObject(plan) => plan.revert(board),
            Self::RemoveNamespace(plan) => plan.revert(board),
            Self::RemoveObject(plan) => plan.revert(board),
            Self::RenameFunction(plan) => plan.revert(board),
            Self::RenameManagedFunction(plan) => plan.revert(board),
            Self::RenameManagedObject(plan) => plan.revert(board),
            Self::RenameNamespace(plan) => plan.revert(board),
            Self::ReviseEscalation(plan) => plan.revert(board),
            Self::ReviseFlow(plan) => plan.revert(board),
            Self::ReviseObject(plan) => plan.revert(board),
            Self::SetFunctionPublic(plan) => plan.revert(board),
            Self::SetNamespaceProperties(plan) => plan.revert(board),
            Self::UnlinkEscalation(plan) => plan.revert(board),
            Self::UnlinkFlow(plan) => plan.revert(board),
            Self::UnlinkObject(plan) => plan.revert(board),
        }
    }
}

///
/// ConnRef
///
/// Kind-erased handle to one edge, the currency of cascade plans. Cascade
/// disconnects record the exact edges they removed as `ConnRef`s, so the
/// revert can re-connect the identical edges in reverse order.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ConnRef {
    Binding(Id<ManagedFunctionLink>),
    EscalationToExternal(Id<EscalationToExternalLink>),
    EscalationToFunction(Id<EscalationToFunctionLink>),
    FlowToExternal(Id<FlowToExternalLink>),
    FlowToFunction(Id<FlowToFunctionLink>),
    ObjectToExternal(Id<ObjectToExternalLink>),
}

impl ConnRef {
    pub(crate) fn connect(self, board: &mut Board) {
        match self {
            Self::Binding(conn) => graph::connect(board, conn),
            Self::EscalationToExternal(conn) => graph::connect(board, conn),
            Self::EscalationToFunction(conn) => graph::connect(board, conn),
            Self::FlowToExternal(conn) => graph::connect(board, conn),
            Self::FlowToFunction(conn) => graph::connect(board, conn),
            Self::ObjectToExternal(conn) => graph::connect(board, conn),
        }
    }

    pub(crate) fn remove(self, board: &mut Board) {
        match self {
            Self::Binding(conn) => graph::remove(board, conn),
            Self::EscalationToExternal(conn) => graph::remove(board, conn),
            Self::EscalationToFunction(conn) => graph::remove(board, conn),
            Self::FlowToExternal(conn) => graph::remove(board, conn),
            Self::FlowToFunction(conn) => graph::remove(board, conn),
            Self::ObjectToExternal(conn) => graph::remove(board, conn),
        }
    }
}
