//! Double-booking detection.
//!
//! A proposed shift that overlaps any committed shift or absence of the same
//! employee raises a [`ViolationKind::RestPeriodViolation`]. It signals a
//! data-integrity conflict rather than a policy limit and can never be
//! overridden.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Violation, ViolationKind};

use super::ledger_view::LedgerView;
use super::periods::{Period, seconds_to_hours};

/// The outcome of the double-booking check.
#[derive(Debug, Clone)]
pub struct DoubleBookingCheck {
    /// The violation, if any committed entry overlaps the shift.
    pub violation: Option<Violation>,
    /// The audit step recording the check.
    pub audit_step: AuditStep,
}

/// Looks for committed entries overlapping the proposed shift.
///
/// Entries that merely touch the shift (ending exactly when it starts, or
/// starting exactly when it ends) do not conflict. The violation magnitude is
/// the total overlapping time in hours.
pub fn detect_double_booking(
    shift: &Period,
    ledger: &LedgerView<'_>,
    step_number: u32,
) -> DoubleBookingCheck {
    let conflicts = ledger.overlapping(shift);

    let overlap_seconds: i64 = conflicts
        .iter()
        .map(|c| shift.overlap_seconds(c.start, c.end))
        .sum();
    let conflicting_entry_ids: Vec<String> =
        conflicts.iter().map(|c| c.entry.id.clone()).collect();
    let overlap_hours = seconds_to_hours(overlap_seconds);

    let reasoning = if conflicting_entry_ids.is_empty() {
        "No committed shift or absence overlaps the proposed shift".to_string()
    } else {
        format!(
            "Proposed shift overlaps {} committed entries for {} hours",
            conflicting_entry_ids.len(),
            overlap_hours
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "no_double_booking".to_string(),
        rule_name: "Double Booking".to_string(),
        input: serde_json::json!({
            "start": shift.start.to_string(),
            "end": shift.end.to_string(),
            "committed_entries": ledger.len()
        }),
        output: serde_json::json!({
            "conflicting_entry_ids": conflicting_entry_ids,
            "overlap_hours": overlap_hours.to_string()
        }),
        reasoning,
    };

    let violation = (!conflicting_entry_ids.is_empty()).then(|| Violation {
        kind: ViolationKind::RestPeriodViolation,
        magnitude: overlap_hours,
        rule_id: "no_double_booking".to_string(),
        limit: Decimal::ZERO,
        observed: overlap_hours,
        overridden: false,
        conflicting_entry_ids,
    });

    DoubleBookingCheck {
        violation,
        audit_step,
    }
}
