//! Shift models for compliance evaluation.
//!
//! This module defines the [`ProposedShift`] under evaluation and the
//! [`ShiftLedgerEntry`] records that make up an employee's committed history.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A shift assignment that has not been committed yet.
///
/// Constructed by the caller for each assignment attempt and consumed once by
/// the evaluator. The UTC offset of `start` defines the local wall-clock frame
/// used for weeks, months, days, the night window and the Saturday cutoff.
///
/// # Example
///
/// ```
/// use shift_compliance::models::ProposedShift;
/// use chrono::DateTime;
///
/// let shift = ProposedShift {
///     id: "shift_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     start: DateTime::parse_from_rfc3339("2026-01-12T22:00:00-03:00").unwrap(),
///     end: DateTime::parse_from_rfc3339("2026-01-12T23:00:00-03:00").unwrap(),
///     agreement_code: "SUVICO".to_string(),
/// };
/// assert_eq!(shift.duration_seconds(), 3600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedShift {
    /// Identifier of the assignment attempt.
    pub id: String,
    /// The employee the shift would be assigned to.
    pub employee_id: String,
    /// Start instant of the shift.
    pub start: DateTime<FixedOffset>,
    /// End instant of the shift (exclusive).
    pub end: DateTime<FixedOffset>,
    /// The labor agreement code governing the employee.
    pub agreement_code: String,
}

impl ProposedShift {
    /// Returns the duration of the shift in seconds.
    pub fn duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Rejects shifts whose end does not come strictly after their start, or
    /// whose bounds carry fractions of a second.
    pub fn validate(&self) -> EngineResult<()> {
        validate_range(&self.id, self.start, self.end)
    }
}

/// The kind of a committed ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A worked shift; counts towards hour totals.
    Shift,
    /// A leave or absence; blocks double-booking but carries no worked hours.
    Absence,
}

/// An existing committed shift or absence for one employee.
///
/// Supplied by the caller in start order. The caller must cover at least the
/// ISO week and the calendar month of the proposed shift; a shorter window
/// silently under-counts hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftLedgerEntry {
    /// Identifier of the committed document.
    pub id: String,
    /// The employee the entry belongs to.
    pub employee_id: String,
    /// Start instant of the entry.
    pub start: DateTime<FixedOffset>,
    /// End instant of the entry (exclusive).
    pub end: DateTime<FixedOffset>,
    /// Whether this is a worked shift or an absence.
    pub kind: EntryKind,
}

impl ShiftLedgerEntry {
    /// Returns true if this entry contributes worked hours.
    pub fn is_worked(&self) -> bool {
        self.kind == EntryKind::Shift
    }

    /// Rejects entries whose end does not come strictly after their start, or
    /// whose bounds carry fractions of a second.
    pub fn validate(&self) -> EngineResult<()> {
        validate_range(&self.id, self.start, self.end)
    }
}

fn validate_range(
    id: &str,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> EngineResult<()> {
    if end <= start {
        return Err(EngineError::InvalidShift {
            shift_id: id.to_string(),
            message: format!("end {} must be after start {}", end, start),
        });
    }
    // Hours are accounted in whole seconds
    for (bound, instant) in [("start", start), ("end", end)] {
        if instant.timestamp_subsec_nanos() != 0 {
            return Err(EngineError::InvalidShift {
                shift_id: id.to_string(),
                message: format!("{} {} must be a whole second", bound, instant),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn proposed(start: &str, end: &str) -> ProposedShift {
        ProposedShift {
            id: "shift_001".to_string(),
            employee_id: "emp_001".to_string(),
            start: at(start),
            end: at(end),
            agreement_code: "SUVICO".to_string(),
        }
    }

    #[test]
    fn test_duration_seconds() {
        let shift = proposed("2026-01-12T09:00:00+00:00", "2026-01-12T17:30:00+00:00");
        assert_eq!(shift.duration_seconds(), 510 * 60);
    }

    #[test]
    fn test_duration_across_offsets_uses_instants() {
        // 10:00 at -03:00 is 13:00 UTC
        let shift = proposed("2026-01-12T10:00:00-03:00", "2026-01-12T14:00:00+00:00");
        assert_eq!(shift.duration_seconds(), 3600);
    }

    #[test]
    fn test_duration_keeps_partial_minutes() {
        let shift = proposed("2026-01-12T10:00:00+00:00", "2026-01-12T11:00:30+00:00");
        assert_eq!(shift.duration_seconds(), 3630);
        assert!(shift.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_forty_second_shift() {
        let shift = proposed("2026-01-12T10:00:00+00:00", "2026-01-12T10:00:40+00:00");
        assert!(shift.validate().is_ok());
        assert_eq!(shift.duration_seconds(), 40);
    }

    #[test]
    fn test_validate_rejects_fractional_seconds() {
        let shift = proposed("2026-01-12T10:00:00.250+00:00", "2026-01-12T11:00:00+00:00");
        match shift.validate() {
            Err(EngineError::InvalidShift { message, .. }) => {
                assert!(message.contains("whole second"))
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_positive_range() {
        let shift = proposed("2026-01-12T09:00:00+00:00", "2026-01-12T10:00:00+00:00");
        assert!(shift.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let shift = proposed("2026-01-12T09:00:00+00:00", "2026-01-12T09:00:00+00:00");
        match shift.validate() {
            Err(EngineError::InvalidShift { shift_id, .. }) => assert_eq!(shift_id, "shift_001"),
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let shift = proposed("2026-01-12T10:00:00+00:00", "2026-01-12T09:00:00+00:00");
        assert!(matches!(
            shift.validate(),
            Err(EngineError::InvalidShift { .. })
        ));
    }

    #[test]
    fn test_ledger_entry_kind_deserializes_snake_case() {
        let json = r#"{
            "id": "abs_1",
            "employee_id": "emp_001",
            "start": "2026-01-12T00:00:00+00:00",
            "end": "2026-01-13T00:00:00+00:00",
            "kind": "absence"
        }"#;
        let entry: ShiftLedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, EntryKind::Absence);
        assert!(!entry.is_worked());
    }

    #[test]
    fn test_ledger_entry_validate_rejects_reversed_range() {
        let entry = ShiftLedgerEntry {
            id: "led_1".to_string(),
            employee_id: "emp_001".to_string(),
            start: at("2026-01-12T10:00:00+00:00"),
            end: at("2026-01-12T10:00:00+00:00"),
            kind: EntryKind::Shift,
        };
        match entry.validate() {
            Err(EngineError::InvalidShift { shift_id, .. }) => assert_eq!(shift_id, "led_1"),
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_ledger_entry_validate_rejects_fractional_seconds() {
        let entry = ShiftLedgerEntry {
            id: "led_2".to_string(),
            employee_id: "emp_001".to_string(),
            start: at("2026-01-12T10:00:00+00:00"),
            end: at("2026-01-12T18:00:00.5+00:00"),
            kind: EntryKind::Shift,
        };
        assert!(matches!(
            entry.validate(),
            Err(EngineError::InvalidShift { .. })
        ));
    }
}
