use criterion::criterion_main;
use geo::coord;
use roadmend::difference::{DifferenceConfig, difference};
use roadmend::geometry::{Attributes, Crs, Feature, GeometrySet, LineGeometry};
use roadmend::load::{GeoJsonLoader, Load};
use roadmend_fixtures::{COVERAGE, RIGHT_OF_WAY, fixture_path};

struct GridScenario {
    name: &'static str,
    rows: usize,
    columns: usize,
}

const GRID_CASES: [GridScenario; 3] = [
    GridScenario {
        name: "GRID_10x10",
        rows: 10,
        columns: 10,
    },
    GridScenario {
        name: "GRID_50x50",
        rows: 50,
        columns: 50,
    },
    GridScenario {
        name: "GRID_200x50",
        rows: 200,
        columns: 50,
    },
];

/// Short streets on a 0.001 degree grid starting at `origin`.
fn streets(origin: (f64, f64), rows: usize, columns: usize, vertical: bool) -> GeometrySet {
    let features = (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (row, column)))
        .map(|(row, column)| {
            let x = origin.0 + 0.001 * column as f64;
            let y = origin.1 + 0.001 * row as f64;
            let line = LineGeometry::from_coords([
                coord! { x: x, y: y },
                if vertical {
                    coord! { x: x, y: y + 0.0008 }
                } else {
                    coord! { x: x + 0.0008, y: y }
                },
            ])
            .expect("segment has two finite coordinates");

            Feature::new(line, Attributes::new())
        })
        .collect();

    GeometrySet::with_features(Crs::Geographic, features)
}

fn grid_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("difference");
    group.significance_level(0.1).sample_size(30);

    GRID_CASES.into_iter().for_each(|sc| {
        let reference = streets((3.30, 6.40), sc.rows, sc.columns, false);
        // Each vertical candidate crosses one reference street, the shifted
        // half of the grid crosses none.
        let mut candidate = streets((3.3004, 6.3995), sc.rows, sc.columns, true);
        for feature in streets((3.3004, 6.4001), sc.rows, sc.columns, false) {
            candidate.push(feature);
        }

        group.bench_function(format!("grid: {}", sc.name), |b| {
            b.iter(|| {
                difference([reference.clone()], &candidate, &DifferenceConfig::default())
                    .expect("Difference must complete successfully")
            })
        });
    });

    group.finish();
}

fn fixture_benchmark(c: &mut criterion::Criterion) {
    let reference = GeoJsonLoader
        .load(&fixture_path(RIGHT_OF_WAY))
        .expect("Fixture must load");
    let candidate = GeoJsonLoader
        .load(&fixture_path(COVERAGE))
        .expect("Fixture must load")
        .remove(0);

    c.bench_function("difference: fixtures", |b| {
        b.iter(|| {
            let result = difference(reference.clone(), &candidate, &DifferenceConfig::default())
                .expect("Difference must complete successfully");
            assert_eq!(result.counts.retained, 11);
        })
    });
}

criterion::criterion_group!(difference_benches, grid_benchmark, fixture_benchmark);
criterion_main!(difference_benches);
