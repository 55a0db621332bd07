// Benchmark for lane layout
// Measures greedy lane packing and full-week snapshot layout

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use worklog_scheduler::models::appointment::{at_minute, Appointment};
use worklog_scheduler::models::filter::FilterSelection;
use worklog_scheduler::models::timeline::TimelineConfig;
use worklog_scheduler::models::ui::ViewType;
use worklog_scheduler::services::layout::assign_lanes;
use worklog_scheduler::services::schedule::ScheduleSnapshot;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// Deterministic, heavily overlapping entries spread over `days` days.
fn sample_entries(count: usize, days: u64) -> Vec<Appointment> {
    (0..count)
        .map(|i| {
            let date = monday() + chrono::Days::new(i as u64 % days.max(1));
            let start = ((i * 37) % 88) as i32 * 15;
            let minutes = 15 * (1 + (i * 7) % 8) as i32;
            Appointment::builder()
                .id(i as i64 + 1)
                .title(format!("Entry {}", i))
                .start(at_minute(date, start))
                .end(at_minute(date, start + minutes))
                .build(15)
                .unwrap()
        })
        .collect()
}

fn bench_assign_lanes(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_lanes");

    for count in [10, 100, 1000].iter() {
        let entries = sample_entries(*count, 1);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| assign_lanes(black_box(entries)));
        });
    }

    group.finish();
}

fn bench_week_layout(c: &mut Criterion) {
    let entries = sample_entries(500, 7);
    let filter = FilterSelection::default();
    let timeline = TimelineConfig::default();

    c.bench_function("week_day_layouts_500", |b| {
        b.iter(|| {
            let snapshot = ScheduleSnapshot {
                appointments: black_box(&entries),
                filter: &filter,
                timeline: &timeline,
                view: ViewType::Week,
                anchor: monday(),
                first_day_of_week: 1,
            };
            snapshot.day_layouts()
        });
    });
}

criterion_group!(benches, bench_assign_lanes, bench_week_layout);
criterion_main!(benches);
