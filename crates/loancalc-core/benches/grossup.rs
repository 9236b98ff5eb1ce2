//! Benchmarks for schedules, grossup and IRR.
//!
//! Run with: cargo bench -p loancalc-core

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use loancalc_core::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn monthly_days(payments: u32) -> ReturnDays {
    ReturnDays::new((1..=payments).map(|m| m * 30).collect()).unwrap()
}

fn standard_functions(
    schedule_type: AmortizationScheduleType,
) -> GrossupFunctions<AmortizationScheduleType, CappedDailyTax, ProportionalCharge, ProportionalCharge>
{
    GrossupFunctions::new(
        schedule_type,
        CappedDailyTax::new(0.000082, 0.015),
        ProportionalCharge::new(0.0038),
        ProportionalCharge::new(0.01),
    )
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");
    let days = monthly_days(60);

    for schedule_type in AmortizationScheduleType::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(schedule_type),
            &schedule_type,
            |b, &schedule_type| {
                b.iter(|| {
                    AmortizationSchedule::new(
                        schedule_type,
                        black_box(10_000.0),
                        black_box(0.001),
                        days.clone(),
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_grossup_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("grossup");
    let days = monthly_days(24);
    let functions = standard_functions(AmortizationScheduleType::ProgressivePrice);

    for method in [GrossupMethod::Broyden, GrossupMethod::Secant] {
        let config = GrossupConfig::with_method(method);
        group.bench_function(BenchmarkId::from_parameter(method), |b| {
            b.iter(|| approximate_grossup(black_box(10_000.0), 0.001, &days, &functions, &config))
        });
    }

    group.finish();
}

fn bench_irr_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("irr");
    let schedule = AmortizationScheduleType::ProgressivePrice
        .build(10_000.0, 0.001, monthly_days(60).as_slice())
        .unwrap();

    for strategy in [IrrStrategy::Bisection, IrrStrategy::NewtonRaphson] {
        let config = IrrConfig::with_strategy(strategy);
        group.bench_function(BenchmarkId::from_parameter(strategy), |b| {
            b.iter(|| {
                irr(
                    black_box(10_000.0),
                    schedule.due_payments(),
                    schedule.return_days().as_slice(),
                    &config,
                )
            })
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let projection = GrossupProjection::new(10_000.0, 0.001, monthly_days(24)).unwrap();
    let functions = standard_functions(AmortizationScheduleType::RegressivePrice);
    let references: Vec<u32> = (0..30).collect();

    c.bench_function("projection/30_reference_days", |b| {
        b.iter(|| projection.project(&functions, black_box(&references)))
    });
}

criterion_group!(
    benches,
    bench_schedules,
    bench_grossup_methods,
    bench_irr_strategies,
    bench_projection,
);

criterion_main!(benches);
