//! Shared fixtures for unit tests: a fully wired board record, an
//! in-memory record store, and a plan-and-apply helper on [`Board`].

use crate::{
    change::Change,
    error::InternalError,
    model::Board,
    repository::{
        BoardRecord, EscalationRecord, ExternalFlowRecord, ExternalObjectRecord, FlowRecord,
        FunctionRecord, ManagedFunctionRecord, ManagedObjectRecord, NamespaceRecord, ObjectRecord,
        RecordStore,
    },
    types::{Property, PropertyList},
};

impl Board {
    /// Plan a change against the current board state and apply it in one
    /// step. Method-call syntax gives the factory its shared borrow before
    /// `apply` takes the exclusive one.
    pub(crate) fn edit(&mut self, mut change: Change) -> Change {
        change.apply(self);
        change
    }
}

/// A small board exercising every record shape: one namespace with two
/// declarations, a bound function carrying all three child kinds, an
/// unbound observer, both external kinds, and two managed objects. Every
/// name reference resolves, and every sibling list arrives name-sorted,
/// so the record survives a load/store round trip verbatim.
pub(crate) fn order_processing_record() -> BoardRecord {
    BoardRecord {
        namespaces: vec![NamespaceRecord {
            name: "orders".to_string(),
            source: "orders.toml".to_string(),
            properties: PropertyList::from_vec(vec![Property::new("region", "eu")]),
            managed_functions: vec![
                ManagedFunctionRecord {
                    name: "cancel".to_string(),
                },
                ManagedFunctionRecord {
                    name: "submit".to_string(),
                },
            ],
        }],
        functions: vec![
            FunctionRecord {
                name: "dispatcher".to_string(),
                is_public: true,
                namespace: Some("orders".to_string()),
                managed_function: Some("submit".to_string()),
                objects: vec![ObjectRecord {
                    name: "cfg".to_string(),
                    object_type: "Settings".to_string(),
                    external_object: Some("settings".to_string()),
                }],
                flows: vec![
                    FlowRecord {
                        name: "done".to_string(),
                        argument_type: Some("Receipt".to_string()),
                        target_function: Some("watchdog".to_string()),
                        target_external_flow: None,
                    },
                    FlowRecord {
                        name: "rejected".to_string(),
                        argument_type: None,
                        target_function: None,
                        target_external_flow: Some("shutdown".to_string()),
                    },
                ],
                escalations: vec![EscalationRecord {
                    escalation_type: "timeout".to_string(),
                    target_function: Some("watchdog".to_string()),
                    target_external_flow: None,
                }],
            },
            FunctionRecord {
                name: "watchdog".to_string(),
                is_public: false,
                namespace: None,
                managed_function: None,
                objects: Vec::new(),
                flows: Vec::new(),
                escalations: vec![EscalationRecord {
                    escalation_type: "error".to_string(),
                    target_function: None,
                    target_external_flow: Some("panic".to_string()),
                }],
            },
        ],
        external_flows: vec![
            ExternalFlowRecord {
                name: "panic".to_string(),
                argument_type: Some("Report".to_string()),
            },
            ExternalFlowRecord {
                name: "shutdown".to_string(),
                argument_type: None,
            },
        ],
        external_objects: vec![ExternalObjectRecord {
            name: "settings".to_string(),
            object_type: "Settings".to_string(),
        }],
        managed_objects: vec![
            ManagedObjectRecord {
                name: "cache".to_string(),
                scope: "thread".to_string(),
                timeout: 1500,
            },
            ManagedObjectRecord {
                name: "journal".to_string(),
                scope: "process".to_string(),
                timeout: 0,
            },
        ],
    }
}

///
/// MemoryStore
///
/// [`RecordStore`] over an in-memory record, with a switch that makes
/// every host call fail the way an unreachable backend would.
///

pub(crate) struct MemoryStore {
    record: Option<BoardRecord>,
    unreachable: bool,
}

impl MemoryStore {
    pub(crate) const fn unreachable() -> Self {
        Self {
            record: None,
            unreachable: true,
        }
    }

    pub(crate) const fn with_record(record: BoardRecord) -> Self {
        Self {
            record: Some(record),
            unreachable: false,
        }
    }

    /// The last record written, if any.
    pub(crate) const fn record(&self) -> Option<&BoardRecord> {
        self.record.as_ref()
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Result<BoardRecord, InternalError> {
        if self.unreachable {
            return Err(InternalError::store_internal("record store unreachable"));
        }
        self.record
            .clone()
            .ok_or_else(|| InternalError::store_internal("record store is empty"))
    }

    fn write(&mut self, record: &BoardRecord) -> Result<(), InternalError> {
        if self.unreachable {
            return Err(InternalError::store_internal("record store unreachable"));
        }
        self.record = Some(record.clone());
        Ok(())
    }
}
