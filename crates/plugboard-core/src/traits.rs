// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================
//
// These traits define *what kind of node* something is, not what data it
// contains. Every entity and connection kind implements `Path`; named graph
// nodes additionally implement `Entity`.
//

///
/// Path
/// Fully-qualified kind path, used in diagnostics and issue keys.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// Entity
///
/// A named node in the wiring graph. The name is the entity's stable
/// identity in the persisted form and the natural key for sibling ordering;
/// renames go through the change layer so the owning collection re-sorts.
///

pub trait Entity: Path {
    /// The entity's current name.
    fn name(&self) -> &str;
}
