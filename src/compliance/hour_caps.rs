//! Weekly and monthly hour totals and cap checks.
//!
//! Totals are overlap-clamped: an entry or proposed shift that spans a week or
//! month boundary contributes only the portion inside the target period.
//! Totals are kept in whole seconds so comparisons against caps are exact.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Violation, ViolationKind};

use super::ledger_view::LedgerView;
use super::periods::{Period, calendar_month_containing, iso_week_containing, seconds_to_hours};

/// Worked seconds in the ISO week and calendar month of a proposed shift.
#[derive(Debug, Clone)]
pub struct HourTotals {
    /// The ISO week of the proposed shift's start.
    pub week: Period,
    /// The calendar month of the proposed shift's start.
    pub month: Period,
    /// Ledger plus proposed seconds inside the week.
    pub weekly_seconds: i64,
    /// Ledger plus proposed seconds inside the month.
    pub monthly_seconds: i64,
    /// One audit step per period.
    pub audit_steps: Vec<AuditStep>,
}

/// The outcome of checking one cap.
#[derive(Debug, Clone)]
pub struct CapCheck {
    /// The violation, if the cap was strictly exceeded.
    pub violation: Option<Violation>,
    /// The audit step recording the check.
    pub audit_step: AuditStep,
}

/// Sums worked seconds for the week and month containing the shift's start.
///
/// Only ledger entries of kind shift count; the proposed shift is added with
/// its own overlap-clamped duration.
pub fn calculate_hour_totals(shift: &Period, ledger: &LedgerView<'_>, step_number: u32) -> HourTotals {
    let week = iso_week_containing(shift.start);
    let month = calendar_month_containing(shift.start);

    let (weekly_seconds, weekly_step) = total_for(
        shift,
        ledger,
        &week,
        ("weekly_hours_total", "Weekly Hours Total"),
        step_number,
    );
    let (monthly_seconds, monthly_step) = total_for(
        shift,
        ledger,
        &month,
        ("monthly_hours_total", "Monthly Hours Total"),
        step_number + 1,
    );

    HourTotals {
        week,
        month,
        weekly_seconds,
        monthly_seconds,
        audit_steps: vec![weekly_step, monthly_step],
    }
}

fn total_for(
    shift: &Period,
    ledger: &LedgerView<'_>,
    period: &Period,
    (rule_id, rule_name): (&str, &str),
    step_number: u32,
) -> (i64, AuditStep) {
    let ledger_seconds = ledger.worked_seconds_in(period);
    let proposed_seconds = period.overlap_seconds(shift.start, shift.end);
    let total = ledger_seconds + proposed_seconds;

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string(),
            "ledger_hours": seconds_to_hours(ledger_seconds).to_string(),
            "proposed_hours": seconds_to_hours(proposed_seconds).to_string()
        }),
        output: serde_json::json!({
            "total_hours": seconds_to_hours(total).to_string()
        }),
        reasoning: format!(
            "{} committed hours plus {} proposed hours inside {} to {}",
            seconds_to_hours(ledger_seconds),
            seconds_to_hours(proposed_seconds),
            period.start,
            period.end
        ),
    };

    (total, audit_step)
}

/// The hour caps an agreement can impose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCap {
    /// `maxHoursWeekly`, over the ISO week.
    Weekly,
    /// `maxHoursMonthly`, over the calendar month.
    Monthly,
}

impl HourCap {
    /// The violation raised when this cap is exceeded.
    pub fn violation_kind(self) -> ViolationKind {
        match self {
            HourCap::Weekly => ViolationKind::WeeklyCapExceeded,
            HourCap::Monthly => ViolationKind::MonthlyCapExceeded,
        }
    }

    fn rule_id(self) -> &'static str {
        match self {
            HourCap::Weekly => "max_hours_weekly",
            HourCap::Monthly => "max_hours_monthly",
        }
    }

    fn rule_name(self) -> &'static str {
        match self {
            HourCap::Weekly => "Weekly Hour Cap",
            HourCap::Monthly => "Monthly Hour Cap",
        }
    }
}

/// Checks an observed total against an optional hour cap.
///
/// Only strictly exceeding counts: a total equal to the cap is compliant.
/// Partial seconds are never lost, so a single second over the cap is a
/// violation.
///
/// # Examples
///
/// ```
/// use shift_compliance::compliance::{HourCap, check_hour_cap};
/// use shift_compliance::models::ViolationKind;
/// use rust_decimal::Decimal;
///
/// // 49 hours against a 48 hour weekly cap
/// let check = check_hour_cap(HourCap::Weekly, 49 * 3600, Some(48), 1);
/// let violation = check.violation.unwrap();
/// assert_eq!(violation.kind, ViolationKind::WeeklyCapExceeded);
/// assert_eq!(violation.magnitude, Decimal::from(1));
///
/// // Exactly at the cap
/// let check = check_hour_cap(HourCap::Weekly, 48 * 3600, Some(48), 1);
/// assert!(check.violation.is_none());
/// ```
pub fn check_hour_cap(
    cap: HourCap,
    observed_seconds: i64,
    cap_hours: Option<u32>,
    step_number: u32,
) -> CapCheck {
    let rule_id = cap.rule_id();
    let observed = seconds_to_hours(observed_seconds);

    let Some(cap_hours) = cap_hours else {
        return CapCheck {
            violation: None,
            audit_step: AuditStep {
                step_number,
                rule_id: rule_id.to_string(),
                rule_name: cap.rule_name().to_string(),
                input: serde_json::json!({
                    "observed_hours": observed.to_string(),
                    "cap_hours": null
                }),
                output: serde_json::json!({ "exceeded": false }),
                reasoning: "No cap configured for this agreement".to_string(),
            },
        };
    };

    let cap_seconds = i64::from(cap_hours) * 3600;
    let excess_seconds = observed_seconds - cap_seconds;
    let limit = Decimal::from(cap_hours);

    let violation = (excess_seconds > 0).then(|| Violation {
        kind: cap.violation_kind(),
        magnitude: seconds_to_hours(excess_seconds),
        rule_id: rule_id.to_string(),
        limit,
        observed,
        overridden: false,
        conflicting_entry_ids: Vec::new(),
    });

    let reasoning = if excess_seconds > 0 {
        format!(
            "{} hours exceeds the {} hour cap by {} hours",
            observed,
            limit,
            seconds_to_hours(excess_seconds)
        )
    } else if excess_seconds == 0 {
        format!("{} hours equals the {} hour cap, no violation", observed, limit)
    } else {
        format!("{} hours is under the {} hour cap", observed, limit)
    };

    CapCheck {
        audit_step: AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: cap.rule_name().to_string(),
            input: serde_json::json!({
                "observed_hours": observed.to_string(),
                "cap_hours": limit.to_string()
            }),
            output: serde_json::json!({
                "exceeded": violation.is_some(),
                "excess_hours": seconds_to_hours(excess_seconds.max(0)).to_string()
            }),
            reasoning,
        },
        violation,
    }
}
