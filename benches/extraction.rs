//! Performance benchmarks for road-reveal's data pipeline
//!
//! Run with: cargo bench --bench extraction

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use road_reveal::data::{
    Coordinate, Effect, Event, GeoElement, GeometryPoint, Snapshot, Way, extract_segments,
    segment_count,
};
use std::collections::HashMap;
use std::hint::black_box;
use std::time::Duration;

/// Generate a wiggly way with the specified number of points
fn generate_way(id: i64, num_points: usize, base_lat: f64, base_lon: f64) -> GeoElement {
    let geometry = (0..num_points)
        .map(|i| {
            let t = i as f64 / num_points as f64;
            GeometryPoint {
                lat: base_lat + t * 0.01 + (t * 50.0).sin() * 0.0001,
                lon: base_lon + t * 0.01 + (t * 30.0).cos() * 0.0001,
            }
        })
        .collect();

    GeoElement::Way(Way {
        id,
        nodes: Vec::new(),
        tags: HashMap::from([("highway".to_string(), "residential".to_string())]),
        geometry,
    })
}

/// Generate ways spread across a city-sized area, in no particular order
fn generate_ways(num_ways: usize, points_per_way: usize) -> Vec<GeoElement> {
    (0..num_ways)
        .map(|i| {
            // Scatter so the sort has real work to do
            let lat_offset = ((i * 7919) % 100) as f64 * 0.001;
            let lon_offset = ((i * 104_729) % 100) as f64 * 0.001;
            generate_way(
                i as i64,
                points_per_way,
                49.98 + lat_offset,
                36.18 + lon_offset,
            )
        })
        .collect()
}

fn bench_extract_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_segments");

    for num_ways in [100, 1_000, 10_000] {
        let elements = generate_ways(num_ways, 12);
        group.throughput(Throughput::Elements(segment_count(&elements) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_ways),
            &elements,
            |b, elements| b.iter(|| extract_segments(black_box(elements))),
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let elements = generate_ways(5_000, 12);
    let start = Coordinate::new(49.982967, 36.183048);
    let end = Coordinate::new(49.992669, 36.231978);

    group.bench_function("fetch_succeeded", |b| {
        b.iter(|| {
            let (snapshot, Effect::Fetch { generation, .. }) =
                Snapshot::new(start, end, Duration::from_millis(10));
            snapshot.update(Event::FetchSucceeded {
                generation,
                elements: black_box(elements.clone()),
            })
        })
    });

    let (snapshot, Effect::Fetch { generation, .. }) =
        Snapshot::new(start, end, Duration::from_millis(10));
    let (loaded, _) = snapshot.update(Event::FetchSucceeded {
        generation,
        elements,
    });

    // Segments are shared, so a tick should not scale with their number
    group.bench_function("tick", |b| {
        b.iter(|| loaded.update(Event::Tick(black_box(Duration::from_millis(16)))))
    });

    group.bench_function("set_end", |b| {
        b.iter(|| loaded.update(Event::SetEnd(black_box(Coordinate::new(50.0, 36.3)))))
    });

    group.finish();
}

criterion_group!(benches, bench_extract_segments, bench_pipeline);
criterion_main!(benches);
