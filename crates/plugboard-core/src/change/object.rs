//! Managed object edits.
//!
//! Managed objects take part in no links, so these plans are pure
//! membership and field edits. The timeout arrives as text from the
//! editing surface and is validated at plan time.

use crate::{
    change::{Change, ChangeKind},
    model::{Board, ManagedObject, ObjectScope},
    types::Id,
};

impl Change {
    /// `timeout_text` is the raw field content; anything that does not
    /// parse as a whole number of milliseconds is a conflict.
    #[must_use]
    pub fn add_managed_object(
        board: &Board,
        name: impl Into<String>,
        scope: ObjectScope,
        timeout_text: &str,
    ) -> Self {
        let name = name.into();
        if board.managed_object_named(&name).is_some() {
            return Self::no_change(format!("managed object '{name}' already exists"));
        }
        let Ok(timeout) = timeout_text.trim().parse::<u64>() else {
            return Self::no_change(format!("timeout '{timeout_text}' is not a number"));
        };

        let description = format!("Add managed object {name}");
        Self::new(
            ChangeKind::AddManagedObject(AddManagedObject {
                name,
                scope,
                timeout,
                created: None,
            }),
            description,
        )
    }

    #[must_use]
    pub fn remove_managed_object(board: &Board, managed_object: Id<ManagedObject>) -> Self {
        if !board.managed_objects.contains(&managed_object) {
            return Self::no_change("managed object is not on the board");
        }

        let description = format!(
            "Remove managed object {}",
            board.managed_object(managed_object).name
        );
        Self::new(
            ChangeKind::RemoveManagedObject(RemoveManagedObject { managed_object }),
            description,
        )
    }

    #[must_use]
    pub fn rename_managed_object(
        board: &Board,
        managed_object: Id<ManagedObject>,
        new_name: impl Into<String>,
    ) -> Self {
        let new_name = new_name.into();
        if !board.managed_objects.contains(&managed_object) {
            return Self::no_change("managed object is not on the board");
        }
        let node = board.managed_object(managed_object);
        if node.name == new_name {
            return Self::no_change(format!("managed object is already named '{new_name}'"));
        }
        if board.managed_object_named(&new_name).is_some() {
            return Self::no_change(format!("managed object '{new_name}' already exists"));
        }

        let description = format!("Rename managed object {} to {new_name}", node.name);
        Self::new(
            ChangeKind::RenameManagedObject(RenameManagedObject {
                managed_object,
                from: node.name.clone(),
                to: new_name,
            }),
            description,
        )
    }
}

///
/// AddManagedObject
///

#[derive(Clone, Debug)]
pub(crate) struct AddManagedObject {
    name: String,
    scope: ObjectScope,
    timeout: u64,
    created: Option<Id<ManagedObject>>,
}

impl AddManagedObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        let created = match self.created {
            Some(managed_object) => managed_object,
            None => {
                let managed_object = board.managed_object_arena.alloc(ManagedObject::new(
                    &self.name,
                    self.scope,
                    self.timeout,
                ));
                self.created = Some(managed_object);
                managed_object
            }
        };

        board.managed_objects.push(created);
        board.sort_managed_objects();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        if let Some(managed_object) = self.created {
            board.managed_objects.retain(|id| *id != managed_object);
        }
    }
}

///
/// RemoveManagedObject
///

#[derive(Clone, Debug)]
pub(crate) struct RemoveManagedObject {
    managed_object: Id<ManagedObject>,
}

impl RemoveManagedObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        board.managed_objects.retain(|id| *id != self.managed_object);
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.managed_objects.push(self.managed_object);
        board.sort_managed_objects();
    }
}

///
/// RenameManagedObject
///

#[derive(Clone, Debug)]
pub(crate) struct RenameManagedObject {
    managed_object: Id<ManagedObject>,
    from: String,
    to: String,
}

impl RenameManagedObject {
    pub(crate) fn apply(&mut self, board: &mut Board) {
        board.managed_object_mut(self.managed_object).name = self.to.clone();
        board.sort_managed_objects();
    }

    pub(crate) fn revert(&mut self, board: &mut Board) {
        board.managed_object_mut(self.managed_object).name = self.from.clone();
        board.sort_managed_objects();
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_parses_the_timeout_field() {
        let mut board = Board::new();
        board.edit(Change::add_managed_object(
            &board,
            "cache",
            ObjectScope::Thread,
            " 1500 ",
        ));

        let cache = board
            .managed_object_named("cache")
            .expect("cache should exist");
        assert_eq!(board.managed_object(cache).timeout, 1500);
        assert_eq!(board.managed_object(cache).scope, ObjectScope::Thread);

        let bad = Change::add_managed_object(&board, "journal", ObjectScope::Process, "soon");
        assert!(!bad.can_apply());
        assert_eq!(
            bad.conflicts()[0].description(),
            "timeout 'soon' is not a number"
        );
    }

    #[test]
    fn rename_round_trips_and_keeps_order() {
        let mut board = Board::new();
        board.edit(Change::add_managed_object(&board, "cache", ObjectScope::Process, "0"));
        board.edit(Change::add_managed_object(&board, "journal", ObjectScope::Process, "0"));
        let cache = board
            .managed_object_named("cache")
            .expect("cache should exist");

        let mut rename = board.edit(Change::rename_managed_object(&board, cache, "store"));
        let names: Vec<&str> = board
            .managed_objects
            .iter()
            .map(|id| board.managed_object(*id).name.as_str())
            .collect();
        assert_eq!(names, ["journal", "store"]);

        rename.revert(&mut board);
        assert_eq!(board.managed_object(cache).name, "cache");
        assert_eq!(board.managed_objects[0], cache);

        let mut remove = board.edit(Change::remove_managed_object(&board, cache));
        assert!(board.managed_object_named("cache").is_none());
        remove.revert(&mut board);
        assert_eq!(board.managed_objects[0], cache);
    }
}
