//! Property tests for the compliance evaluator.

use chrono::{DateTime, Duration, FixedOffset};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use shift_compliance::compliance::{authorize_override, evaluate};
use shift_compliance::config::{LaborAgreementRecord, LaborRule};
use shift_compliance::error::EngineError;
use shift_compliance::models::{
    ClassifiedSegment, EntryKind, ProposedShift, ShiftLedgerEntry, ViolationKind,
};

fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

fn rule(overtime_threshold_daily: Option<Decimal>) -> LaborRule {
    LaborRule::from_record(&LaborAgreementRecord {
        code: "SUVICO".to_string(),
        name: None,
        max_hours_weekly: Some(48),
        max_hours_monthly: 204,
        overtime_threshold_daily,
        saturday_cutoff_hour: 13,
        night_shift_start: 21,
        night_shift_end: 6,
        is_active: true,
    })
    .unwrap()
}

fn proposed(start: DateTime<FixedOffset>, minutes: i64) -> ProposedShift {
    ProposedShift {
        id: "prop_001".to_string(),
        employee_id: "emp_001".to_string(),
        start,
        end: start + Duration::minutes(minutes),
        agreement_code: "SUVICO".to_string(),
    }
}

fn entry(start: DateTime<FixedOffset>, minutes: i64, kind: EntryKind) -> ShiftLedgerEntry {
    ShiftLedgerEntry {
        id: "led_001".to_string(),
        employee_id: "emp_001".to_string(),
        start,
        end: start + Duration::minutes(minutes),
        kind,
    }
}

fn minutes(value: i64) -> Decimal {
    Decimal::from(value) / Decimal::from(60)
}

fn seconds(value: i64) -> Decimal {
    Decimal::from(value) / Decimal::from(3600)
}

fn hours_where(segments: &[ClassifiedSegment], keep: impl Fn(&ClassifiedSegment) -> bool) -> Decimal {
    segments.iter().filter(|s| keep(s)).map(|s| s.hours).sum()
}

fn kind_strategy() -> impl Strategy<Value = ViolationKind> {
    prop_oneof![
        Just(ViolationKind::WeeklyCapExceeded),
        Just(ViolationKind::MonthlyCapExceeded),
        Just(ViolationKind::RestPeriodViolation),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn weekly_cap_flags_only_strict_excess(
        ledger_minutes in 60_i64..2_800,
        proposed_minutes in 1_i64..600,
    ) {
        // Ledger starts Monday of the ISO week, proposed shift is that Sunday
        let ledger = vec![entry(at("2026-01-12T00:00:00-03:00"), ledger_minutes, EntryKind::Shift)];
        let shift = proposed(at("2026-01-18T08:00:00-03:00"), proposed_minutes);

        let verdict = evaluate(&shift, &ledger, &rule(None), &[]).unwrap();
        let total = ledger_minutes + proposed_minutes;

        prop_assert_eq!(verdict.weekly_hours(), minutes(total));
        match verdict.violation(ViolationKind::WeeklyCapExceeded) {
            Some(violation) => {
                prop_assert!(total > 48 * 60);
                prop_assert_eq!(violation.magnitude, minutes(total - 48 * 60));
            }
            None => prop_assert!(total <= 48 * 60),
        }
    }

    #[test]
    fn hours_inside_wrapping_night_window_are_all_night(
        offset in 0_i64..540,
        length in 1_i64..540,
    ) {
        let length = length.min(540 - offset);
        // Tuesday 21:00 to Wednesday 06:00
        let shift = proposed(at("2026-01-13T21:00:00-03:00") + Duration::minutes(offset), length);

        let verdict = evaluate(&shift, &[], &rule(None), &[]).unwrap();
        let breakdown = verdict.breakdown();

        prop_assert_eq!(breakdown.night, minutes(length));
        prop_assert_eq!(breakdown.regular, Decimal::ZERO);
        prop_assert_eq!(breakdown.saturday_premium, Decimal::ZERO);
        prop_assert_eq!(breakdown.overtime, Decimal::ZERO);
    }

    #[test]
    fn segments_cover_the_shift_and_match_totals(
        offset in 0_i64..(27 * 24 * 60),
        start_second in prop_oneof![Just(0_i64), 1_i64..60],
        length in 1_i64..(16 * 3600),
    ) {
        // Starts on a minute boundary or part way into one
        let start = at("2026-02-01T00:00:00-03:00")
            + Duration::minutes(offset)
            + Duration::seconds(start_second);
        let shift = ProposedShift {
            end: start + Duration::seconds(length),
            ..proposed(start, 0)
        };

        let verdict = evaluate(&shift, &[], &rule(Some(Decimal::from(8))), &[]).unwrap();
        let breakdown = verdict.breakdown();
        let segments = &breakdown.segments;

        // Hours are rounded independently at 28 digits
        let tolerance = Decimal::new(1, 20);
        let segment_total = hours_where(segments, |_| true);
        prop_assert!((segment_total - seconds(length)).abs() < tolerance);
        prop_assert_eq!(segments[0].start, shift.start);
        prop_assert_eq!(segments[segments.len() - 1].end, shift.end);

        let regular = hours_where(segments, |s| !s.night && !s.saturday_premium && !s.overtime);
        prop_assert!((breakdown.regular - regular).abs() < tolerance);
        let night = hours_where(segments, |s| s.night);
        prop_assert!((breakdown.night - night).abs() < tolerance);
        let overtime = hours_where(segments, |s| s.overtime);
        prop_assert!((breakdown.overtime - overtime).abs() < tolerance);
        prop_assert!(segments.iter().all(|s| !s.overtime || (!s.night && !s.saturday_premium)));
    }

    #[test]
    fn evaluation_is_idempotent(
        offset in 0_i64..(7 * 24 * 60),
        length in 1_i64..(12 * 60),
        ledger_minutes in 1_i64..(40 * 60),
    ) {
        let ledger = vec![entry(at("2026-01-05T00:00:00-03:00"), ledger_minutes, EntryKind::Shift)];
        let shift = proposed(at("2026-01-12T00:00:00-03:00") + Duration::minutes(offset), length);
        let rule = rule(Some(Decimal::from(8)));

        let first = evaluate(&shift, &ledger, &rule, &[]).unwrap();
        let second = evaluate(&shift, &ledger, &rule, &[]).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn overlapping_entry_always_blocks(
        overlap_start in 0_i64..480,
        overlap_length in 1_i64..480,
        absence in any::<bool>(),
    ) {
        let kind = if absence { EntryKind::Absence } else { EntryKind::Shift };
        let ledger = vec![entry(
            at("2026-01-14T09:00:00-03:00") + Duration::minutes(overlap_start),
            overlap_length,
            kind,
        )];
        let shift = proposed(at("2026-01-14T09:00:00-03:00"), 480);
        let overrides = vec![
            authorize_override("admin_001", ViolationKind::WeeklyCapExceeded, "Cover").unwrap(),
            authorize_override("admin_001", ViolationKind::MonthlyCapExceeded, "Cover").unwrap(),
        ];

        let verdict = evaluate(&shift, &ledger, &rule(None), &overrides).unwrap();

        prop_assert!(verdict.violation(ViolationKind::RestPeriodViolation).is_some());
        prop_assert!(verdict.is_blocking());
    }

    #[test]
    fn rest_period_override_is_never_authorized(
        actor in "[a-z0-9_]{1,12}",
        justification in "[A-Za-z ]{1,40}",
    ) {
        let result = authorize_override(&actor, ViolationKind::RestPeriodViolation, &justification);
        let refused = matches!(result, Err(EngineError::NonOverridableViolation { .. }));
        prop_assert!(refused);
    }

    #[test]
    fn only_rest_period_is_non_overridable(kind in kind_strategy()) {
        let result = authorize_override("admin_001", kind, "Approved by operations");
        prop_assert_eq!(result.is_ok(), kind.is_overridable());
    }
}
