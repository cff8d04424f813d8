//! Performance benchmarks for the Shift Compliance Engine.
//!
//! Covers direct evaluation against ledgers of increasing size and the full
//! HTTP round trip through `/evaluate`.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{DateTime, Duration, FixedOffset};
use shift_compliance::api::{AppState, EvaluationRequest, create_router};
use shift_compliance::compliance::evaluate;
use shift_compliance::config::{AgreementLoader, AgreementRegistry};
use shift_compliance::models::{EntryKind, ProposedShift, ShiftLedgerEntry};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_registry() -> AgreementRegistry {
    AgreementLoader::load("./config/agreements.yaml")
        .and_then(|loader| loader.registry())
        .expect("Failed to load config")
}

fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).expect("valid timestamp")
}

/// A proposed evening shift on Friday 2026-01-30 under COMERCIO.
fn create_proposed() -> ProposedShift {
    ProposedShift {
        id: "prop_bench".to_string(),
        employee_id: "emp_bench_001".to_string(),
        start: at("2026-01-30T18:00:00-03:00"),
        end: at("2026-01-30T23:00:00-03:00"),
        agreement_code: "COMERCIO".to_string(),
    }
}

/// One six-hour morning shift per day, walking back from the proposed day.
/// Every fifth entry belongs to another employee.
fn create_ledger(entry_count: usize) -> Vec<ShiftLedgerEntry> {
    let first = at("2026-01-29T07:00:00-03:00");
    (0..entry_count)
        .map(|i| {
            let start = first - Duration::days(i as i64);
            ShiftLedgerEntry {
                id: format!("led_{:03}", i),
                employee_id: if i % 5 == 4 {
                    "emp_other".to_string()
                } else {
                    "emp_bench_001".to_string()
                },
                start,
                end: start + Duration::hours(6),
                kind: EntryKind::Shift,
            }
        })
        .collect()
}

/// Benchmark: evaluation with no committed history.
fn bench_empty_ledger(c: &mut Criterion) {
    let rule = load_registry().lookup("COMERCIO").expect("COMERCIO is active");
    let proposed = create_proposed();

    c.bench_function("evaluate_empty_ledger", |b| {
        b.iter(|| black_box(evaluate(black_box(&proposed), &[], &rule, &[])))
    });
}

/// Benchmark: ledger sizes up to roughly two months of daily shifts.
fn bench_ledger_scaling(c: &mut Criterion) {
    let rule = load_registry().lookup("COMERCIO").expect("COMERCIO is active");
    let proposed = create_proposed();

    let mut group = c.benchmark_group("ledger_scaling");

    for entry_count in [7usize, 31, 62].iter() {
        let ledger = create_ledger(*entry_count);

        group.throughput(Throughput::Elements(*entry_count as u64));
        group.bench_with_input(
            BenchmarkId::new("entries", entry_count),
            &ledger,
            |b, ledger| b.iter(|| black_box(evaluate(&proposed, ledger, &rule, &[]))),
        );
    }

    group.finish();
}

/// Benchmark: full HTTP round trip with a month-sized ledger.
fn bench_http_evaluate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_registry()));
    let request = EvaluationRequest {
        proposed: create_proposed(),
        ledger: create_ledger(31),
        overrides: Vec::new(),
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("http_evaluate_month_ledger", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/evaluate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_empty_ledger,
    bench_ledger_scaling,
    bench_http_evaluate,
);
criterion_main!(benches);
