use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use exercise_tracker::models::ExerciseEntry;
use exercise_tracker::services::{LogFilter, LogQuery};
use exercise_tracker::time_utils::format_display_date;
use std::hint::black_box;

/// One entry per day for `days` days starting 2020-01-01.
fn daily_log(days: i64) -> Vec<ExerciseEntry> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..days)
        .map(|i| ExerciseEntry {
            entry_id: format!("{:032x}", i),
            description: format!("Workout {}", i),
            duration: Some(30.0),
            date: format_display_date(start + Duration::days(i)),
        })
        .collect()
}

fn benchmark_log_filter(c: &mut Criterion) {
    let log = daily_log(5_000);

    let unbounded = LogFilter::default();
    let ranged = LogFilter::from_query(&LogQuery {
        from: Some("2022-01-01".to_string()),
        to: Some("2022-12-31".to_string()),
        limit: None,
    });
    let limited = LogFilter::from_query(&LogQuery {
        from: Some("2021-06-01".to_string()),
        to: None,
        limit: Some("10".to_string()),
    });

    let mut group = c.benchmark_group("log_filter");

    group.bench_function("unbounded", |b| {
        b.iter(|| unbounded.apply(black_box(log.clone())))
    });

    group.bench_function("one_year_range", |b| {
        b.iter(|| ranged.apply(black_box(log.clone())))
    });

    group.bench_function("from_with_limit", |b| {
        b.iter(|| limited.apply(black_box(log.clone())))
    });

    group.finish();
}

criterion_group!(benches, benchmark_log_filter);
criterion_main!(benches);
