//! Persistence boundary: name-keyed records in, live boards out.

mod index;
mod load;
mod record;
mod store;

pub use record::{
    BoardRecord, EscalationRecord, ExternalFlowRecord, ExternalObjectRecord, FlowRecord,
    FunctionRecord, ManagedFunctionRecord, ManagedObjectRecord, NamespaceRecord, ObjectRecord,
};

use crate::{
    error::InternalError,
    issues::Issues,
    model::Board,
    obs::{EditEvent, EditSink, emit},
};

///
/// RecordStore
///
/// Host-owned raw storage for one board record. The subsystem never
/// interprets storage failures; whatever the host returns propagates
/// unchanged to the caller.
///

pub trait RecordStore {
    fn read(&self) -> Result<BoardRecord, InternalError>;
    fn write(&mut self, record: &BoardRecord) -> Result<(), InternalError>;
}

///
/// Repository
///
/// Session-scoped load/store handle with policy (debug, events).
///

#[derive(Default)]
pub struct Repository {
    debug: bool,
    sink: Option<&'static dyn EditSink>,
}

impl Repository {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            debug: false,
            sink: None,
        }
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn edit_sink(mut self, sink: &'static dyn EditSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build a live board from a record.
    ///
    /// Never fails: references that do not resolve stay as loaded text,
    /// and content contract violations come back in the issue collector.
    #[must_use]
    pub fn load(&self, record: &BoardRecord) -> (Board, Issues) {
        let loaded = load::load(record, self.sink);

        self.debug_log(format!(
            "load: {} links formed, {} unresolved, {} issues",
            loaded.links_formed,
            loaded.links_unresolved,
            loaded.issues.len()
        ));
        emit(
            self.sink,
            EditEvent::LoadCompleted {
                links_formed: loaded.links_formed,
                links_unresolved: loaded.links_unresolved,
            },
        );

        (loaded.board, loaded.issues)
    }

    /// Flatten a board back into its record form.
    ///
    /// Mutates the board: every live edge's target name is refreshed into
    /// the source's name field first (see `store` module docs).
    pub fn store(&self, board: &mut Board) -> BoardRecord {
        let stored = store::store(board);

        self.debug_log(format!("store: {} links flattened", stored.links_flattened));
        emit(
            self.sink,
            EditEvent::StoreCompleted {
                links_flattened: stored.links_flattened,
            },
        );

        stored.record
    }

    /// Read a record from host storage and load it.
    pub fn load_from(&self, store: &impl RecordStore) -> Result<(Board, Issues), InternalError> {
        let record = store.read()?;

        Ok(self.load(&record))
    }

    /// Store a board and write the record to host storage.
    pub fn store_to(
        &self,
        board: &mut Board,
        store: &mut impl RecordStore,
    ) -> Result<(), InternalError> {
        let record = self.store(board);

        store.write(&record)
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }
}

///
/// TESTS
///
