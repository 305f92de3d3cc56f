//! Benchmarks for the filter & aggregation engine
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use salesboard::dataset::{Dataset, SalesRecord};
use salesboard::engine::{compute, filter_records, to_csv, FilterCriteria};

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

fn create_test_dataset(days: i64) -> Dataset {
    let origin = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let records = (0..days)
        .flat_map(|day| {
            REGIONS.iter().enumerate().map(move |(i, region)| {
                let amount = 100.0 + ((day * 31 + i as i64 * 17) % 500) as f64;
                SalesRecord::new(*region, origin + Duration::days(day), amount)
            })
        })
        .collect();
    Dataset::from_records(records)
}

fn full_range(dataset: &Dataset, regions: &[&str]) -> FilterCriteria {
    let bounds = dataset.date_bounds().unwrap();
    FilterCriteria::new(regions.iter().copied(), bounds.start, bounds.end)
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");

    for days in [30, 365, 3650] {
        let dataset = create_test_dataset(days);
        let criteria = full_range(&dataset, &REGIONS);

        group.throughput(Throughput::Elements(dataset.len() as u64));

        group.bench_function(format!("all_regions_{}d", days), |b| {
            b.iter(|| compute(black_box(&dataset), black_box(&criteria)).unwrap())
        });

        let single = full_range(&dataset, &["North"]);
        group.bench_function(format!("one_region_{}d", days), |b| {
            b.iter(|| compute(black_box(&dataset), black_box(&single)).unwrap())
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    let dataset = create_test_dataset(3650);
    let criteria = full_range(&dataset, &REGIONS);
    let records = filter_records(&dataset, &criteria);

    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("to_csv_14600", |b| {
        b.iter(|| to_csv(dataset.columns(), black_box(&records)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_compute, bench_export);
criterion_main!(benches);
