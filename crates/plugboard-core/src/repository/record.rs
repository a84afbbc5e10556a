//! Persisted record shapes.
//!
//! Records are the name-keyed flat form a board is stored as: every
//! cross-entity reference is a name (or a `(namespace, managed function)`
//! name pair), never an id. Ids are a per-session artifact and must not
//! leak into storage.
//!
//! Unknown fields are rejected as corruption; missing collections default
//! to empty so older files keep loading.

use crate::types::PropertyList;
use serde::{Deserialize, Serialize};

///
/// BoardRecord
///
/// Root of the persisted tree. Member order is preserved exactly as
/// stored: the loader never re-sorts, so load-then-store reproduces the
/// record even when references are unresolved.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BoardRecord {
    #[serde(default)]
    pub namespaces: Vec<NamespaceRecord>,
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
    #[serde(default)]
    pub external_flows: Vec<ExternalFlowRecord>,
    #[serde(default)]
    pub external_objects: Vec<ExternalObjectRecord>,
    #[serde(default)]
    pub managed_objects: Vec<ManagedObjectRecord>,
}

///
/// NamespaceRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceRecord {
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub properties: PropertyList,
    #[serde(default)]
    pub managed_functions: Vec<ManagedFunctionRecord>,
}

///
/// ManagedFunctionRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManagedFunctionRecord {
    pub name: String,
}

///
/// FunctionRecord
///
/// `namespace` + `managed_function` carry the compound-keyed binding
/// intent; either may name something that no longer exists.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionRecord {
    pub name: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub managed_function: Option<String>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
    #[serde(default)]
    pub flows: Vec<FlowRecord>,
    #[serde(default)]
    pub escalations: Vec<EscalationRecord>,
}

///
/// ObjectRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectRecord {
    pub name: String,
    #[serde(default)]
    pub object_type: String,
    #[serde(default)]
    pub external_object: Option<String>,
}

///
/// FlowRecord
///
/// A flow's target is one name in one of two namespaces: another function
/// on the board, or an external flow. Records may carry both (legacy files
/// did); the function side wins at load.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FlowRecord {
    pub name: String,
    #[serde(default)]
    pub argument_type: Option<String>,
    #[serde(default)]
    pub target_function: Option<String>,
    #[serde(default)]
    pub target_external_flow: Option<String>,
}

///
/// EscalationRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EscalationRecord {
    pub escalation_type: String,
    #[serde(default)]
    pub target_function: Option<String>,
    #[serde(default)]
    pub target_external_flow: Option<String>,
}

///
/// ExternalFlowRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalFlowRecord {
    pub name: String,
    #[serde(default)]
    pub argument_type: Option<String>,
}

///
/// ExternalObjectRecord
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalObjectRecord {
    pub name: String,
    #[serde(default)]
    pub object_type: String,
}

///
/// ManagedObjectRecord
///
/// `scope` stays a free string in storage; the loader maps it onto
/// [`crate::model::ObjectScope`] and reports unknown values as issues.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManagedObjectRecord {
    pub name: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub timeout: u64,
}

///
/// TESTS
///
