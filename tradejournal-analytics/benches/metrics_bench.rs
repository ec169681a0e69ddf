//! Criterion benchmarks for dashboard metric computation.
//!
//! Run with: `cargo bench -p tradejournal-analytics`
//!
//! Measures the full dashboard pass plus the two metrics that sort or
//! group (drawdown and daily bucketing) across journal sizes.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tradejournal_analytics::{daily, metrics, DashboardMetrics, MetricsContext};
use tradejournal_core::{ReferenceClock, Session, Trade, TradeType};

fn clock() -> ReferenceClock {
    ReferenceClock::fixed(
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

/// Seeded synthetic journal: a few trades per day, sessions and sides mixed.
fn generate_trades(count: usize) -> Vec<Trade> {
    let mut rng = StdRng::seed_from_u64(42);
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    (0..count)
        .map(|i| {
            let day = start + Duration::days((i / 3) as i64);
            let entry = day.and_hms_opt(rng.gen_range(0..20), rng.gen_range(0..60), 0).unwrap();
            let mut t = Trade::new(
                format!("t{i}"),
                day.format("%Y-%m-%d").to_string(),
                ["ES", "NQ", "CL"][i % 3],
                rng.gen_range(-500.0..600.0),
            );
            t.entry_date = Some(entry);
            t.exit_date = Some(entry + Duration::minutes(rng.gen_range(1..240)));
            t.session = Some(Session::ALL[i % Session::ALL.len()]);
            t.trade_type = Some(if rng.gen_bool(0.5) { TradeType::Long } else { TradeType::Short });
            t.reward_to_risk_ratio = Some(rng.gen_range(0.5..4.0));
            t
        })
        .collect()
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_compute");
    let ctx = MetricsContext::new(clock(), Default::default());

    for size in [100, 1_000, 10_000].iter() {
        let trades = generate_trades(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| DashboardMetrics::compute(black_box(&trades), &ctx));
        });
    }

    group.finish();
}

fn bench_max_drawdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_drawdown");
    let clock = clock();

    for size in [100, 1_000, 10_000].iter() {
        let trades = generate_trades(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| metrics::max_drawdown(black_box(&trades), &clock));
        });
    }

    group.finish();
}

fn bench_daily_pnl(c: &mut Criterion) {
    let clock = clock();
    let trades = generate_trades(10_000);
    c.bench_function("daily_pnl_10000", |b| {
        b.iter(|| daily::daily_pnl(black_box(&trades), &clock));
    });
}

criterion_group!(benches, bench_dashboard, bench_max_drawdown, bench_daily_pnl);
criterion_main!(benches);
