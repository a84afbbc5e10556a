//! Grouping already-planned changes into one undo unit.

use crate::change::{Change, ChangeKind};

impl Change {
    /// Group planned changes into one unit: apply runs the members in
    /// order, revert runs them in reverse. Members that can never apply
    /// are dropped at construction; a compound left with no live members
    /// is itself `NoChange` and carries every dropped diagnostic.
    #[must_use]
    pub fn compound(description: impl Into<String>, changes: Vec<Self>) -> Self {
        let (live, dead): (Vec<_>, Vec<_>) = changes.into_iter().partition(Self::can_apply);
        if live.is_empty() {
            let mut change = Self::no_change("compound has no members");
            let conflicts: Vec<_> = dead.into_iter().flat_map(|c| c.conflicts).collect();
            if !conflicts.is_empty() {
                change.conflicts = conflicts;
            }
            return change;
        }

        Self::new(ChangeKind::Compound(live), description)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Board;

    #[test]
    fn members_apply_in_order_and_revert_in_reverse() {
        let mut board = Board::new();
        board.edit(Change::add_function_unbound(&board, "alpha"));
        let alpha = board.function_named("alpha").expect("alpha should exist");

        // The second member's plan assumes the first has run: it renames
        // the function the first member renamed.
        let first = Change::rename_function(&board, alpha, "beta");
        let second = {
            let mut scratch = board.clone();
            let mut ahead = first.clone();
            ahead.apply(&mut scratch);
            Change::rename_function(&scratch, alpha, "gamma")
        };

        let mut group = board.edit(Change::compound("Rename twice", vec![first, second]));
        assert_eq!(board.function(alpha).name, "gamma");
        assert_eq!(group.description(), "Rename twice");

        group.revert(&mut board);
        assert_eq!(board.function(alpha).name, "alpha");

        group.apply(&mut board);
        assert_eq!(board.function(alpha).name, "gamma");
    }

    #[test]
    fn dead_members_are_dropped() {
        let mut board = Board::new();
        board.edit(Change::add_function_unbound(&board, "alpha"));
        let alpha = board.function_named("alpha").expect("alpha should exist");

        let group = Change::compound(
            "Partial",
            vec![
                Change::rename_function(&board, alpha, "alpha"),
                Change::set_function_public(&board, alpha, true),
            ],
        );
        assert!(group.can_apply());

        let mut group = group;
        group.apply(&mut board);
        assert!(board.function(alpha).is_public);
    }

    #[test]
    fn all_dead_members_collapse_to_no_change() {
        let mut board = Board::new();
        board.edit(Change::add_function_unbound(&board, "alpha"));
        let alpha = board.function_named("alpha").expect("alpha should exist");

        let group = Change::compound(
            "Nothing doing",
            vec![
                Change::rename_function(&board, alpha, "alpha"),
                Change::add_function_unbound(&board, "alpha"),
            ],
        );
        assert!(!group.can_apply());
        let reasons: Vec<&str> = group.conflicts().iter().map(|c| c.description()).collect();
        assert_eq!(
            reasons,
            [
                "function is already named 'alpha'",
                "function 'alpha' already exists",
            ]
        );

        let empty = Change::compound("Empty", Vec::new());
        assert!(!empty.can_apply());
        assert_eq!(
            empty.conflicts()[0].description(),
            "compound has no members"
        );
    }

    #[test]
    fn compounds_nest() {
        let mut board = Board::new();
        let inner = Change::compound(
            "Externals",
            vec![
                Change::add_external_flow(&board, "shutdown", None),
                Change::add_external_flow(&board, "panic", None),
            ],
        );
        let mut outer = board.edit(Change::compound(
            "Setup",
            vec![Change::add_function_unbound(&board, "alpha"), inner],
        ));

        assert!(board.function_named("alpha").is_some());
        assert_eq!(board.external_flows.len(), 2);

        outer.revert(&mut board);
        assert!(board.function_named("alpha").is_none());
        assert!(board.external_flows.is_empty());
    }
}
