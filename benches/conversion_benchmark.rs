// ============================================================================
// Conversion Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Arithmetic - Raw division at different precisions
// 2. Unit and Exchange Conversions - WAD-scale round trips
// 3. Rate Conversions - APR <-> APY (exact integer power vs truncated)
// 4. Output - Safe string rendering
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use defi_decimal::prelude::*;
use std::hint::black_box;

// ============================================================================
// Arithmetic Benchmarks
// ============================================================================

fn benchmark_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("division");
    let dividend = DecimalAmount::from("123456789.123456789");
    let divisor = DecimalAmount::from("3.14159265358979");

    for places in [18u32, 40, 100].iter() {
        let config = DecimalConfig::default().with_decimal_places(*places);
        group.bench_with_input(BenchmarkId::new("places", places), &config, |b, config| {
            b.iter(|| black_box(dividend.divide_with(&divisor, config)));
        });
    }

    group.finish();
}

// ============================================================================
// Unit and Exchange Conversion Benchmarks
// ============================================================================

fn benchmark_unit_conversions(c: &mut Criterion) {
    let amount = DecimalAmount::from("1234.567890123456789");

    c.bench_function("to_basic_units_round_trip", |b| {
        b.iter(|| {
            black_box(
                amount
                    .to_basic_units(WAD_DECIMALS)
                    .to_full_decimals(WAD_DECIMALS),
            )
        });
    });
}

fn benchmark_exchange_conversions(c: &mut Criterion) {
    let rate = DecimalAmount::from("1020304050607080901");
    let tokens = DecimalAmount::from("98765.4321");

    c.bench_function("to_underlying", |b| {
        b.iter(|| black_box(tokens.to_underlying(&rate)));
    });

    let underlying = tokens.to_underlying(&rate);
    c.bench_function("to_tokens", |b| {
        b.iter(|| black_box(underlying.to_tokens(&rate)));
    });
}

// ============================================================================
// Rate Conversion Benchmarks
// ============================================================================

fn benchmark_rate_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_apy");
    let apr = DecimalAmount::from("0.05");

    group.bench_function("exact", |b| {
        b.iter(|| black_box(apr.to_apy()));
    });

    let truncated = DecimalConfig::default().with_pow_precision(40);
    group.bench_function("pow_precision_40", |b| {
        b.iter(|| black_box(apr.to_apy_with(&truncated)));
    });

    group.finish();

    let apy = apr.to_apy_with(&truncated);
    c.bench_function("to_apr", |b| {
        b.iter(|| black_box(apy.to_apr()));
    });
}

// ============================================================================
// Output Benchmarks
// ============================================================================

fn benchmark_safe_output(c: &mut Criterion) {
    let large = DecimalAmount::from("1.5e30");
    let small = DecimalAmount::from("1.5e-30");

    c.bench_function("remove_scientific_notation", |b| {
        b.iter(|| {
            black_box(large.remove_scientific_notation());
            black_box(small.remove_scientific_notation());
        });
    });

    c.bench_function("to_safe_fixed", |b| {
        b.iter(|| black_box(large.to_safe_fixed(6, RoundingMode::HalfUp)));
    });
}

criterion_group!(
    benches,
    benchmark_division,
    benchmark_unit_conversions,
    benchmark_exchange_conversions,
    benchmark_rate_conversions,
    benchmark_safe_output
);

criterion_main!(benches);
