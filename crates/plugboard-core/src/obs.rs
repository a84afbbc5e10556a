//! Observability: structural edit events and sink abstractions.
//!
//! Events describe *what happened* to the graph, never its full contents.
//! Sinks are static so sessions stay `Copy`-cheap to thread around; tests
//! install a buffering sink and assert on the event stream.

///
/// EditEvent
///
/// One observable step in a load, store, or change session.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EditEvent {
    /// A change was applied (forward) to the board.
    ChangeApplied { description: String },
    /// A change was reverted from the board.
    ChangeReverted { description: String },
    /// A load finished; counts cover every connection kind.
    LoadCompleted {
        links_formed: usize,
        links_unresolved: usize,
    },
    /// A name reference did not resolve during load; the connection was
    /// left unformed (documented best-effort policy, not an error).
    LinkUnresolved {
        connection: &'static str,
        name: String,
    },
    /// A store pass finished after refreshing every link name field.
    StoreCompleted { links_flattened: usize },
}

///
/// EditSink
///
/// Receiver for [`EditEvent`]s. Implementations must be cheap and
/// infallible; the graph layer never branches on sink behavior.
///

pub trait EditSink: Sync {
    fn on_event(&self, event: EditEvent);
}

///
/// NoopSink
///

pub struct NoopSink;

impl EditSink for NoopSink {
    fn on_event(&self, _: EditEvent) {}
}

/// Emit an event to an optional sink.
pub(crate) fn emit(sink: Option<&'static dyn EditSink>, event: EditEvent) {
    if let Some(sink) = sink {
        sink.on_event(event);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static EVENTS: Mutex<Vec<EditEvent>> = Mutex::new(Vec::new());
    static SINK: BufferSink = BufferSink;

    struct BufferSink;

    impl EditSink for BufferSink {
        fn on_event(&self, event: EditEvent) {
            EVENTS
                .lock()
                .expect("event buffer lock should succeed")
                .push(event);
        }
    }

    #[test]
    fn emit_routes_to_installed_sink() {
        emit(None, EditEvent::StoreCompleted { links_flattened: 1 });
        emit(
            Some(&SINK),
            EditEvent::ChangeApplied {
                description: "Add namespace orders".to_string(),
            },
        );

        let events = EVENTS.lock().expect("event buffer lock should succeed");
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            EditEvent::ChangeApplied {
                description: "Add namespace orders".to_string(),
            }
        );
    }
}
