//! Core data models for the Shift Compliance Engine.
//!
//! This module contains the shift, verdict, and override types exchanged
//! between the evaluator and its callers.

mod override_record;
mod shift;
mod verdict;

pub use override_record::OverrideRecord;
pub use shift::{EntryKind, ProposedShift, ShiftLedgerEntry};
pub(crate) use verdict::VerdictParts;
pub use verdict::{
    AuditStep, ClassifiedSegment, ComplianceVerdict, HoursBreakdown, Violation, ViolationKind,
};
