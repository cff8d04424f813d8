//! Override record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ViolationKind;

/// An accepted, attributable exception to a policy violation.
///
/// Created once per accepted override by
/// [`authorize_override`](crate::compliance::authorize_override). The record is
/// referenced, not owned, by the external audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Unique reference for the audit log.
    pub id: Uuid,
    /// The privileged actor who authorized the override.
    pub actor_id: String,
    /// The violation kind being overridden.
    pub violation_kind: ViolationKind,
    /// Free-text reason supplied by the actor.
    pub justification: String,
    /// When the override was authorized.
    pub timestamp: DateTime<Utc>,
}

impl OverrideRecord {
    /// Returns true if this record covers violations of the given kind.
    pub fn covers(&self, kind: ViolationKind) -> bool {
        self.violation_kind == kind && kind.is_overridable()
    }
}
