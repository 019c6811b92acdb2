use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use std::hint::black_box;
use trail_planner::{
    parse_street_network, search_route, InitialBearing, SearchConfig, StreetGraph, StreetNode,
};

fn bench_xml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/grid_network.xml");

    c.bench_function("xml_parse_grid_network", |b| {
        b.iter(|| {
            let graph = parse_street_network(black_box(xml_content)).expect("XML parse failed");
            black_box(graph.node_count())
        })
    });
}

/// Quadratisches Strassengitter mit `size × size` Kreuzungen, leicht verzerrt,
/// damit die Peilungen nicht alle exakt gleich sind.
fn build_synthetic_grid(size: u64, spacing: f64) -> StreetGraph {
    let mut graph = StreetGraph::new();
    graph.extend_nodes((0..size * size).map(|index| {
        let column = (index % size) as f64;
        let row = (index / size) as f64;
        let position = DVec2::new(
            column * spacing + row * 0.37,
            row * spacing + column * 0.53,
        );
        StreetNode::new(index + 1, position, (column * 3.0 + row * 5.0) % 40.0)
    }));

    for row in 0..size {
        for column in 0..size {
            let id = row * size + column + 1;
            if column + 1 < size {
                graph.add_street(id, id + 1).expect("Strasse Ost");
            }
            if row + 1 < size {
                graph.add_street(id, id + size).expect("Strasse Nord");
            }
        }
    }

    graph
}

fn bench_route_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_search");

    for &size in &[10u64, 30u64] {
        let graph = build_synthetic_grid(size, 100.0);
        let start = size * (size / 2) + size / 2 + 1;

        for straighten in [false, true] {
            let config = SearchConfig::new(2_000.0)
                .with_straighten(straighten)
                .with_initial_bearing(InitialBearing::Fixed(45.0))
                .with_max_expansions(1_000_000);
            let label = if straighten { "straight" } else { "native" };

            group.bench_with_input(
                BenchmarkId::new(label, size * size),
                &graph,
                |b, graph| {
                    b.iter(|| {
                        let outcome =
                            search_route(graph, black_box(start), &config).expect("search failed");
                        black_box(outcome.stats().expanded)
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_nearest_node(c: &mut Criterion) {
    let graph = build_synthetic_grid(100, 10.0);
    let queries: Vec<DVec2> = (0..1024)
        .map(|i| DVec2::new((i % 100) as f64 * 9.7, ((i * 7) % 100) as f64 * 9.3))
        .collect();

    c.bench_function("nearest_node_batch_10k", |b| {
        b.iter(|| {
            let hits = queries
                .iter()
                .filter(|q| graph.nearest_node(black_box(**q)).is_some())
                .count();
            black_box(hits)
        })
    });
}

criterion_group!(
    search_benches,
    bench_xml_parsing,
    bench_route_search,
    bench_nearest_node
);
criterion_main!(search_benches);
