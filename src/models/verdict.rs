//! Compliance verdict models.
//!
//! This module contains the [`ComplianceVerdict`] type and the structures it is
//! assembled from: violations, the classified hours breakdown, and the audit
//! trace of every evaluation stage.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a policy or integrity violation.
///
/// # Example
///
/// ```
/// use shift_compliance::models::ViolationKind;
///
/// assert!(ViolationKind::WeeklyCapExceeded.is_overridable());
/// assert!(!ViolationKind::RestPeriodViolation.is_overridable());
/// assert_eq!(ViolationKind::MonthlyCapExceeded.to_string(), "monthly_cap_exceeded");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Hours in the ISO week exceed the agreement's weekly cap.
    WeeklyCapExceeded,
    /// Hours in the calendar month exceed the agreement's monthly cap.
    MonthlyCapExceeded,
    /// The proposed shift overlaps a committed shift or absence.
    RestPeriodViolation,
}

impl ViolationKind {
    /// Returns true if a privileged actor may override this kind.
    ///
    /// Double-booking signals a data-integrity conflict, not a policy limit,
    /// so it is never overridable.
    pub fn is_overridable(self) -> bool {
        !matches!(self, ViolationKind::RestPeriodViolation)
    }

    /// The audit-log action recorded when this kind is overridden.
    pub fn audit_action(self) -> Option<&'static str> {
        match self {
            ViolationKind::WeeklyCapExceeded | ViolationKind::MonthlyCapExceeded => {
                Some("OVERRIDE_SHIFT_LIMIT")
            }
            ViolationKind::RestPeriodViolation => None,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::WeeklyCapExceeded => write!(f, "weekly_cap_exceeded"),
            ViolationKind::MonthlyCapExceeded => write!(f, "monthly_cap_exceeded"),
            ViolationKind::RestPeriodViolation => write!(f, "rest_period_violation"),
        }
    }
}

/// A single violation raised by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The kind of violation.
    pub kind: ViolationKind,
    /// How far the limit was exceeded, in hours.
    ///
    /// For double-booking this is the total overlapping time.
    pub magnitude: Decimal,
    /// The agreement field (or integrity rule) that triggered the violation.
    pub rule_id: String,
    /// The configured limit in hours (zero for double-booking).
    pub limit: Decimal,
    /// The observed total in hours.
    pub observed: Decimal,
    /// Whether a supplied override covers this violation.
    pub overridden: bool,
    /// Ledger entries the proposed shift collides with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_entry_ids: Vec<String>,
}

/// A contiguous stretch of the proposed shift sharing the same classification.
///
/// Night and Saturday premium are independent flags and may both be set.
/// Overtime takes precedence: an overtime segment never carries the other flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSegment {
    /// Start of the segment in the shift's local offset.
    pub start: DateTime<FixedOffset>,
    /// End of the segment in the shift's local offset.
    pub end: DateTime<FixedOffset>,
    /// Hours in the segment.
    pub hours: Decimal,
    /// Falls inside the agreement's night window.
    pub night: bool,
    /// Falls on Saturday at or after the cutoff hour.
    pub saturday_premium: bool,
    /// Exceeds the daily overtime threshold.
    pub overtime: bool,
}

/// Hours of the proposed shift split by classification.
///
/// `regular + overtime + (hours flagged night or saturday premium)` equals the
/// shift duration; `night` and `saturday_premium` may overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// Hours with no premium classification.
    pub regular: Decimal,
    /// Hours inside the night window.
    pub night: Decimal,
    /// Saturday hours at or after the cutoff.
    pub saturday_premium: Decimal,
    /// Hours beyond the daily overtime threshold.
    pub overtime: Decimal,
    /// The segments the totals were computed from, in chronological order.
    pub segments: Vec<ClassifiedSegment>,
}

/// A single step in the audit trace recording an evaluation decision.
///
/// Each step captures the input, output, and reasoning for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The outcome of evaluating a proposed shift.
///
/// A verdict is immutable once produced and contains no timestamps or random
/// identifiers, so evaluating identical inputs twice yields equal verdicts.
/// Violations are not errors: callers must check [`is_blocking`](Self::is_blocking),
/// since a verdict with violations that are all overridden is an accepted
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceVerdict {
    employee_id: String,
    shift_id: String,
    agreement_code: String,
    weekly_hours: Decimal,
    monthly_hours: Decimal,
    breakdown: HoursBreakdown,
    violations: Vec<Violation>,
    applied_overrides: Vec<uuid::Uuid>,
    is_blocking: bool,
    audit_trace: Vec<AuditStep>,
}

/// The parts a verdict is assembled from.
#[derive(Debug)]
pub(crate) struct VerdictParts {
    pub employee_id: String,
    pub shift_id: String,
    pub agreement_code: String,
    pub weekly_hours: Decimal,
    pub monthly_hours: Decimal,
    pub breakdown: HoursBreakdown,
    pub violations: Vec<Violation>,
    pub applied_overrides: Vec<uuid::Uuid>,
    pub audit_trace: Vec<AuditStep>,
}

impl ComplianceVerdict {
    /// Seals the parts into a verdict, deriving the blocking decision.
    ///
    /// Blocking iff any violation is non-overridable, or any overridable
    /// violation lacks an override.
    pub(crate) fn seal(parts: VerdictParts) -> Self {
        let is_blocking = parts
            .violations
            .iter()
            .any(|v| !v.kind.is_overridable() || !v.overridden);

        Self {
            employee_id: parts.employee_id,
            shift_id: parts.shift_id,
            agreement_code: parts.agreement_code,
            weekly_hours: parts.weekly_hours,
            monthly_hours: parts.monthly_hours,
            breakdown: parts.breakdown,
            violations: parts.violations,
            applied_overrides: parts.applied_overrides,
            is_blocking,
            audit_trace: parts.audit_trace,
        }
    }

    /// The employee the shift was proposed for.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// The proposed shift's identifier.
    pub fn shift_id(&self) -> &str {
        &self.shift_id
    }

    /// The agreement the shift was evaluated against.
    pub fn agreement_code(&self) -> &str {
        &self.agreement_code
    }

    /// Hours in the ISO week, including the proposed shift.
    pub fn weekly_hours(&self) -> Decimal {
        self.weekly_hours
    }

    /// Hours in the calendar month, including the proposed shift.
    pub fn monthly_hours(&self) -> Decimal {
        self.monthly_hours
    }

    /// Classification of the proposed shift's hours.
    pub fn breakdown(&self) -> &HoursBreakdown {
        &self.breakdown
    }

    /// All violations raised, overridden or not.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the violation of the given kind, if raised.
    pub fn violation(&self, kind: ViolationKind) -> Option<&Violation> {
        self.violations.iter().find(|v| v.kind == kind)
    }

    /// Returns true if no violation was raised.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Ids of the override records that covered a raised violation.
    pub fn applied_overrides(&self) -> &[uuid::Uuid] {
        &self.applied_overrides
    }

    /// Whether the assignment must not be committed.
    pub fn is_blocking(&self) -> bool {
        self.is_blocking
    }

    /// The audit trace of every evaluation stage.
    pub fn audit_trace(&self) -> &[AuditStep] {
        &self.audit_trace
    }
}
