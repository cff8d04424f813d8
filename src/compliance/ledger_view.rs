//! Read-only view over one employee's committed ledger window.
//!
//! The caller supplies the ledger; this view keeps only the entries of the
//! employee under evaluation, converted to the evaluation's local frame. It
//! trusts the window to cover the ISO week and calendar month of the proposed
//! shift and never checks completeness.

use chrono::{FixedOffset, NaiveDateTime};

use crate::error::EngineResult;
use crate::models::ShiftLedgerEntry;

use super::periods::{Period, local_time};

/// A ledger entry converted to local wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct LocalEntry<'a> {
    /// The original entry.
    pub entry: &'a ShiftLedgerEntry,
    /// Local start.
    pub start: NaiveDateTime,
    /// Local end.
    pub end: NaiveDateTime,
}

/// The employee's committed shifts and absences in local time.
#[derive(Debug, Clone)]
pub struct LedgerView<'a> {
    entries: Vec<LocalEntry<'a>>,
}

impl<'a> LedgerView<'a> {
    /// Builds the view for one employee.
    ///
    /// Entries of other employees are dropped. Fails with
    /// [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift)
    /// if one of the employee's entries has a malformed range.
    pub fn new(
        employee_id: &str,
        ledger: &'a [ShiftLedgerEntry],
        offset: FixedOffset,
    ) -> EngineResult<Self> {
        let mut entries = Vec::new();

        for entry in ledger.iter().filter(|e| e.employee_id == employee_id) {
            entry.validate()?;
            entries.push(LocalEntry {
                entry,
                start: local_time(entry.start, offset),
                end: local_time(entry.end, offset),
            });
        }

        Ok(Self { entries })
    }

    /// Number of entries belonging to the employee.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the employee has no entries in the window.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Worked seconds falling inside `period`, counting shifts only.
    pub fn worked_seconds_in(&self, period: &Period) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.entry.is_worked())
            .map(|e| period.overlap_seconds(e.start, e.end))
            .sum()
    }

    /// Entries (shifts and absences) that overlap `period`.
    pub fn overlapping(&self, period: &Period) -> Vec<LocalEntry<'a>> {
        self.entries
            .iter()
            .filter(|e| period.overlaps(e.start, e.end))
            .copied()
            .collect()
    }
}
