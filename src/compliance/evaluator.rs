//! The compliance evaluator.
//!
//! [`evaluate`] is a pure function of its inputs: it performs no I/O, holds no
//! state, and may be called concurrently over the same rule.

use crate::config::LaborRule;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, ComplianceVerdict, OverrideRecord, ProposedShift, ShiftLedgerEntry, VerdictParts,
};

use super::classification::classify_hours;
use super::double_booking::detect_double_booking;
use super::hour_caps::{HourCap, calculate_hour_totals, check_hour_cap};
use super::ledger_view::LedgerView;
use super::override_authorization::apply_overrides;
use super::periods::{Period, local_time, seconds_to_hours};

/// Evaluates a proposed shift against a labor rule.
///
/// # Arguments
///
/// * `proposed` - The shift assignment being attempted
/// * `ledger` - Committed shifts and absences covering at least the ISO week
///   and calendar month of `proposed.start`; entries of other employees are ignored
/// * `rule` - The rule for `proposed.agreement_code`
/// * `overrides` - Already-authorized override records for this assignment
///
/// # Returns
///
/// A [`ComplianceVerdict`], or an error if:
/// - `proposed` does not end after it starts (`InvalidShift`)
/// - an employee ledger entry does not end after it starts (`InvalidShift`)
/// - `proposed.agreement_code` differs from the rule's code (`InvalidShift`)
///
/// # Example
///
/// ```
/// use shift_compliance::compliance::evaluate;
/// use shift_compliance::config::{LaborAgreementRecord, LaborRule};
/// use shift_compliance::models::ProposedShift;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// let rule = LaborRule::from_record(&LaborAgreementRecord {
///     code: "SUVICO".to_string(),
///     name: None,
///     max_hours_weekly: Some(48),
///     max_hours_monthly: 204,
///     overtime_threshold_daily: None,
///     saturday_cutoff_hour: 13,
///     night_shift_start: 21,
///     night_shift_end: 6,
///     is_active: true,
/// })
/// .unwrap();
///
/// // Monday 22:00 to 23:00
/// let proposed = ProposedShift {
///     id: "shift_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     start: DateTime::parse_from_rfc3339("2026-01-12T22:00:00-03:00").unwrap(),
///     end: DateTime::parse_from_rfc3339("2026-01-12T23:00:00-03:00").unwrap(),
///     agreement_code: "SUVICO".to_string(),
/// };
///
/// let verdict = evaluate(&proposed, &[], &rule, &[]).unwrap();
/// assert!(verdict.is_clean());
/// assert!(!verdict.is_blocking());
/// assert_eq!(verdict.breakdown().night, Decimal::from(1));
/// ```
pub fn evaluate(
    proposed: &ProposedShift,
    ledger: &[ShiftLedgerEntry],
    rule: &LaborRule,
    overrides: &[OverrideRecord],
) -> EngineResult<ComplianceVerdict> {
    proposed.validate()?;
    if proposed.agreement_code != rule.code() {
        return Err(EngineError::InvalidShift {
            shift_id: proposed.id.clone(),
            message: format!(
                "agreement code '{}' does not match rule '{}'",
                proposed.agreement_code,
                rule.code()
            ),
        });
    }

    let offset = *proposed.start.offset();
    let view = LedgerView::new(&proposed.employee_id, ledger, offset)?;
    let shift = Period::new(
        local_time(proposed.start, offset),
        local_time(proposed.end, offset),
    );

    let mut audit_trace: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let totals = calculate_hour_totals(&shift, &view, step_number);
    step_number += totals.audit_steps.len() as u32;
    audit_trace.extend(totals.audit_steps);

    let classification = classify_hours(&shift, offset, &view, rule, step_number);
    audit_trace.push(classification.audit_step);
    step_number += 1;

    let weekly = check_hour_cap(
        HourCap::Weekly,
        totals.weekly_seconds,
        rule.max_hours_weekly(),
        step_number,
    );
    audit_trace.push(weekly.audit_step);
    step_number += 1;

    let monthly = check_hour_cap(
        HourCap::Monthly,
        totals.monthly_seconds,
        Some(rule.max_hours_monthly()),
        step_number,
    );
    audit_trace.push(monthly.audit_step);
    step_number += 1;

    let booking = detect_double_booking(&shift, &view, step_number);
    audit_trace.push(booking.audit_step);
    step_number += 1;

    let mut violations: Vec<_> = [weekly.violation, monthly.violation, booking.violation]
        .into_iter()
        .flatten()
        .collect();
    let applied_overrides = apply_overrides(&mut violations, overrides);

    let blocking_kinds: Vec<String> = violations
        .iter()
        .filter(|v| !v.kind.is_overridable() || !v.overridden)
        .map(|v| v.kind.to_string())
        .collect();
    let reasoning = if violations.is_empty() {
        "No violations raised".to_string()
    } else if blocking_kinds.is_empty() {
        format!(
            "{} violations raised, all covered by overrides",
            violations.len()
        )
    } else {
        format!("Blocked by {}", blocking_kinds.join(", "))
    };
    audit_trace.push(AuditStep {
        step_number,
        rule_id: "blocking_decision".to_string(),
        rule_name: "Blocking Decision".to_string(),
        input: serde_json::json!({
            "violations": violations.iter().map(|v| v.kind.to_string()).collect::<Vec<_>>(),
            "overrides_supplied": overrides.len()
        }),
        output: serde_json::json!({
            "is_blocking": !blocking_kinds.is_empty(),
            "applied_overrides": applied_overrides.iter().map(|id| id.to_string()).collect::<Vec<_>>()
        }),
        reasoning,
    });

    Ok(ComplianceVerdict::seal(VerdictParts {
        employee_id: proposed.employee_id.clone(),
        shift_id: proposed.id.clone(),
        agreement_code: rule.code().to_string(),
        weekly_hours: seconds_to_hours(totals.weekly_seconds),
        monthly_hours: seconds_to_hours(totals.monthly_seconds),
        breakdown: classification.breakdown,
        violations,
        applied_overrides,
        audit_trace,
    }))
}
