//! Plugboard: reversible object-graph model and name-keyed repository
//! for visual wiring editors.
//!
//! ## Crate layout
//! - `core`: the wiring-board model, the change layer, and the repository.
//!
//! The `prelude` module mirrors the editor-facing surface; pull it in with
//! `use plugboard::prelude::*;`.

pub use plugboard_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Editor Prelude
///
/// Everything a hosting editor touches in a normal session: the board,
/// the change layer, and the repository boundary.
///

pub mod prelude {
    pub use crate::core::{
        change::{Change, ChangeLog},
        issues::Issues,
        model::{
            Board, ExternalFlow, ExternalObject, Function, ManagedFunction, ManagedObject,
            Namespace, ObjectScope,
        },
        repository::{BoardRecord, RecordStore, Repository},
        types::{Id, Property, PropertyList},
    };
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn version_matches_the_workspace_package() {
        assert_eq!(crate::VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn prelude_supports_a_full_edit_session() {
        let mut board = Board::default();
        let mut log = ChangeLog::new();

        let add = Change::add_function_unbound(&board, "alpha");
        assert!(log.apply(&mut board, add));
        let alpha = board.functions[0];

        let add = Change::add_flow(&board, alpha, "done", None);
        assert!(log.apply(&mut board, add));

        assert_eq!(log.next_undo(), Some("Add flow done"));
        assert!(log.undo(&mut board));
        assert!(log.redo(&mut board));

        let record = Repository::new().store(&mut board);
        assert_eq!(record.functions.len(), 1);
        assert_eq!(record.functions[0].flows.len(), 1);
    }
}
