//! Override authorization.
//!
//! Authorizing an override only constructs the [`OverrideRecord`]. Persisting it
//! and writing the audit log belong to the caller's audit collaborator; the
//! evaluator receives already-authorized records as plain input.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{OverrideRecord, Violation, ViolationKind};

/// Authorizes an override, stamping the current time.
///
/// # Errors
///
/// - [`EngineError::NonOverridableViolation`] for
///   [`ViolationKind::RestPeriodViolation`]
/// - [`EngineError::InvalidOverride`] if `actor_id` or `justification` is blank
///
/// # Example
///
/// ```
/// use shift_compliance::compliance::authorize_override;
/// use shift_compliance::models::ViolationKind;
///
/// let record = authorize_override(
///     "admin_7",
///     ViolationKind::WeeklyCapExceeded,
///     "Coverage for event security",
/// )
/// .unwrap();
/// assert_eq!(record.violation_kind, ViolationKind::WeeklyCapExceeded);
///
/// assert!(authorize_override("admin_7", ViolationKind::RestPeriodViolation, "x").is_err());
/// ```
pub fn authorize_override(
    actor_id: &str,
    violation_kind: ViolationKind,
    justification: &str,
) -> EngineResult<OverrideRecord> {
    authorize_override_at(actor_id, violation_kind, justification, Utc::now())
}

/// Authorizes an override at a caller-supplied time.
pub fn authorize_override_at(
    actor_id: &str,
    violation_kind: ViolationKind,
    justification: &str,
    timestamp: DateTime<Utc>,
) -> EngineResult<OverrideRecord> {
    if !violation_kind.is_overridable() {
        return Err(EngineError::NonOverridableViolation {
            kind: violation_kind,
        });
    }
    if actor_id.trim().is_empty() {
        return Err(EngineError::InvalidOverride {
            field: "actor_id".to_string(),
            message: "must not be blank".to_string(),
        });
    }
    if justification.trim().is_empty() {
        return Err(EngineError::InvalidOverride {
            field: "justification".to_string(),
            message: "must not be blank".to_string(),
        });
    }

    Ok(OverrideRecord {
        id: Uuid::new_v4(),
        actor_id: actor_id.to_string(),
        violation_kind,
        justification: justification.trim().to_string(),
        timestamp,
    })
}

/// Marks violations covered by a supplied override.
///
/// Returns the ids of the records that covered at least one violation, in
/// violation order. Records for kinds that were not raised are ignored, and
/// non-overridable violations are never marked.
pub(crate) fn apply_overrides(violations: &mut [Violation], overrides: &[OverrideRecord]) -> Vec<Uuid> {
    let mut applied = Vec::new();

    for violation in violations.iter_mut() {
        if let Some(record) = overrides.iter().find(|o| o.covers(violation.kind)) {
            violation.overridden = true;
            if !applied.contains(&record.id) {
                applied.push(record.id);
            }
        }
    }

    applied
}
