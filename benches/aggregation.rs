use bikeshare::{
    City, RecordSet, Trip, TripFilter,
    aggregation::Aggregator,
    temporal::TemporalFields,
    types::{MonthName, OptionalColumns, TripRecord},
};
use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generate_records(count: usize) -> RecordSet {
    let base = NaiveDate::from_ymd_opt(2017, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let trips = (0..count)
        .map(|i| {
            let start_time = base + Duration::minutes((i * 37 % 260_000) as i64);
            Trip {
                record: TripRecord {
                    start_time,
                    end_time: None,
                    trip_duration: (120 + i % 3_000) as f64,
                    start_station: format!("Station {}", i % 300),
                    end_station: format!("Station {}", (i * 13) % 300),
                    user_type: Some(if i % 4 == 0 { "Customer" } else { "Subscriber" }.to_string()),
                    gender: Some(if i % 2 == 0 { "Male" } else { "Female" }.to_string()),
                    birth_year: Some(1940 + (i % 60) as i32),
                },
                temporal: TemporalFields::from_timestamp(&start_time),
            }
        })
        .collect();

    let columns = OptionalColumns {
        end_time: false,
        gender: true,
        birth_year: true,
    };
    RecordSet::new(City::Chicago, columns, trips)
}

fn benchmark_statistic_groups(c: &mut Criterion) {
    let records = generate_records(100_000);

    c.bench_function("time_stats", |b| {
        b.iter(|| Aggregator::time_stats(black_box(&records)))
    });
    c.bench_function("station_stats", |b| {
        b.iter(|| Aggregator::station_stats(black_box(&records)))
    });
    c.bench_function("duration_stats", |b| {
        b.iter(|| Aggregator::duration_stats(black_box(&records)))
    });
    c.bench_function("user_stats", |b| {
        b.iter(|| Aggregator::user_stats(black_box(&records)))
    });
}

fn benchmark_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_all");
    let filter = TripFilter::None;

    for size in [1_000, 10_000, 100_000] {
        let records = generate_records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| Aggregator::run_all(black_box(records), &filter))
        });
    }

    group.finish();
}

fn benchmark_filtering(c: &mut Criterion) {
    let records = generate_records(100_000);
    let filter = TripFilter::Month(MonthName::March);

    c.bench_function("filter by month", |b| {
        b.iter(|| filter.apply(black_box(records.clone())))
    });
}

criterion_group!(
    benches,
    benchmark_statistic_groups,
    benchmark_full_report,
    benchmark_filtering
);
criterion_main!(benches);
