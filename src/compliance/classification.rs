//! Classification of a proposed shift's hours.
//!
//! The shift is walked in pieces that never cross a wall-clock hour boundary.
//! Each piece is flagged night and/or Saturday premium from its clock hour and
//! weekday; daily overtime is evaluated last and takes the marginal seconds
//! that push the day's running total past the threshold.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::config::LaborRule;
use crate::models::{AuditStep, ClassifiedSegment, HoursBreakdown};

use super::ledger_view::LedgerView;
use super::periods::{Period, calendar_day_containing, seconds_to_hours, split_by_hour, to_instant};

/// The classified hours of a proposed shift and the audit step documenting them.
#[derive(Debug, Clone)]
pub struct HourClassification {
    /// Totals and segments by classification.
    pub breakdown: HoursBreakdown,
    /// The audit step recording the classification.
    pub audit_step: AuditStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    night: bool,
    saturday_premium: bool,
    overtime: bool,
}

#[derive(Debug)]
struct RawSegment {
    start: NaiveDateTime,
    end: NaiveDateTime,
    seconds: i64,
    flags: Flags,
}

#[derive(Debug, Default)]
struct SecondTotals {
    regular: i64,
    night: i64,
    saturday_premium: i64,
    overtime: i64,
}

/// Classifies every second of the shift as regular, night, Saturday premium or
/// overtime.
///
/// # Arguments
///
/// * `shift` - The proposed shift in local time
/// * `offset` - The local offset, used to report segment instants
/// * `ledger` - The employee's committed entries, for the daily running total
/// * `rule` - The agreement thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Behavior
///
/// - Night: clock hour in `[nightShiftStart, nightShiftEnd)`, wrapping past midnight
/// - Saturday premium: Saturday at or after `saturdayCutoffHour`
/// - Night and Saturday premium may both apply to the same time
/// - Overtime: per calendar day, committed shift time comes first; proposed
///   time beyond the daily threshold are overtime and carry no other flag
pub fn classify_hours(
    shift: &Period,
    offset: FixedOffset,
    ledger: &LedgerView<'_>,
    rule: &LaborRule,
    step_number: u32,
) -> HourClassification {
    let threshold = rule.overtime_threshold_seconds();
    let mut running_day: Option<(NaiveDate, i64)> = None;
    let mut totals = SecondTotals::default();
    let mut segments: Vec<RawSegment> = Vec::new();

    for piece in split_by_hour(*shift) {
        let day = piece.start.date();
        let worked_before = match running_day {
            Some((d, seconds)) if d == day => seconds,
            _ => ledger.worked_seconds_in(&calendar_day_containing(piece.start)),
        };

        let seconds = piece.seconds();
        let overtime_seconds = match threshold {
            Some(limit) => (worked_before + seconds - limit).clamp(0, seconds),
            None => 0,
        };
        running_day = Some((day, worked_before + seconds));

        let straight_seconds = seconds - overtime_seconds;
        let hour = piece.start.hour();
        let night = rule.is_night_hour(hour);
        let saturday_premium =
            piece.start.weekday() == Weekday::Sat && hour >= rule.saturday_cutoff_hour();

        let split_at = piece.start + Duration::seconds(straight_seconds);

        if straight_seconds > 0 {
            if night {
                totals.night += straight_seconds;
            }
            if saturday_premium {
                totals.saturday_premium += straight_seconds;
            }
            if !night && !saturday_premium {
                totals.regular += straight_seconds;
            }
            push_segment(
                &mut segments,
                piece.start,
                split_at,
                straight_seconds,
                Flags {
                    night,
                    saturday_premium,
                    overtime: false,
                },
            );
        }

        if overtime_seconds > 0 {
            totals.overtime += overtime_seconds;
            push_segment(
                &mut segments,
                split_at,
                piece.end,
                overtime_seconds,
                Flags {
                    night: false,
                    saturday_premium: false,
                    overtime: true,
                },
            );
        }
    }

    let breakdown = HoursBreakdown {
        regular: seconds_to_hours(totals.regular),
        night: seconds_to_hours(totals.night),
        saturday_premium: seconds_to_hours(totals.saturday_premium),
        overtime: seconds_to_hours(totals.overtime),
        segments: segments
            .into_iter()
            .map(|s| ClassifiedSegment {
                start: to_instant(s.start, offset),
                end: to_instant(s.end, offset),
                hours: seconds_to_hours(s.seconds),
                night: s.flags.night,
                saturday_premium: s.flags.saturday_premium,
                overtime: s.flags.overtime,
            })
            .collect(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "hour_classification".to_string(),
        rule_name: "Hour Classification".to_string(),
        input: serde_json::json!({
            "start": shift.start.to_string(),
            "end": shift.end.to_string(),
            "night_shift_start": rule.night_shift_start(),
            "night_shift_end": rule.night_shift_end(),
            "saturday_cutoff_hour": rule.saturday_cutoff_hour(),
            "overtime_threshold_daily": rule
                .overtime_threshold_daily()
                .map(|t| t.normalize().to_string())
        }),
        output: serde_json::json!({
            "regular": breakdown.regular.to_string(),
            "night": breakdown.night.to_string(),
            "saturday_premium": breakdown.saturday_premium.to_string(),
            "overtime": breakdown.overtime.to_string()
        }),
        reasoning: format!(
            "{} regular, {} night, {} Saturday premium and {} overtime hours across {} segments",
            breakdown.regular,
            breakdown.night,
            breakdown.saturday_premium,
            breakdown.overtime,
            breakdown.segments.len()
        ),
    };

    HourClassification {
        breakdown,
        audit_step,
    }
}

/// Appends a segment, merging it into the previous one when contiguous with
/// identical flags.
fn push_segment(
    segments: &mut Vec<RawSegment>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    seconds: i64,
    flags: Flags,
) {
    if let Some(last) = segments.last_mut() {
        if last.end == start && last.flags == flags {
            last.end = end;
            last.seconds += seconds;
            return;
        }
    }
    segments.push(RawSegment {
        start,
        end,
        seconds,
        flags,
    });
}
