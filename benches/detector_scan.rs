/// Cadence detector benchmarks
///
/// Measures the group-then-scan pass over synthetic commit histories,
/// sequential vs. parallel per-identity scan.
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lapsewatch::detector::{detect, Detector, DetectorConfig, Event};
use std::collections::HashSet;

/// `identities` contributors, each with `per_identity` commits spread over a year,
/// emitted in interleaved (unsorted) order
fn synthetic_history(identities: usize, per_identity: usize) -> (HashSet<String>, Vec<Event<String>>) {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let roster = (0..identities).map(|i| format!("dev{}", i)).collect();

    let mut events = Vec::with_capacity(identities * per_identity);
    for n in (0..per_identity).rev() {
        for i in 0..identities {
            let hours = ((n * 7919 + i * 104_729) % (365 * 24)) as i64;
            events.push(Event::new(format!("dev{}", i), start + Duration::hours(hours)));
        }
    }

    (roster, events)
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");

    for &identities in &[10usize, 100, 1_000] {
        let (roster, events) = synthetic_history(identities, 50);
        group.throughput(Throughput::Elements(events.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("free_fn", identities),
            &(roster.clone(), events.clone()),
            |b, (roster, events)| {
                b.iter(|| detect(black_box(roster), black_box(events), Duration::days(7)))
            },
        );

        for parallel in [false, true] {
            let detector = Detector::new(DetectorConfig {
                parallel,
                ..DetectorConfig::default()
            })
            .unwrap();
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(
                BenchmarkId::new(label, identities),
                &(roster.clone(), events.clone()),
                |b, (roster, events)| b.iter(|| detector.analyze(black_box(roster), black_box(events))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
