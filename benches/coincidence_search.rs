use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hetbuild::{run, Atoms, RunConfig};
use nalgebra::{Matrix3, Vector3};

fn single_atom_square_layer() -> Atoms {
    Atoms::new(
        Matrix3::identity(),
        vec![Vector3::new(0.0, 0.0, 0.0)],
        vec!["C".to_string()],
        [true, true, false],
    )
}

fn config_for_nmax(nmax: i64) -> RunConfig {
    RunConfig {
        angles: vec![0.0],
        nmin: 0,
        nmax,
        tolerance: 1e-3,
        ..RunConfig::default()
    }
}

pub fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("coincidence search");
    let bottom = single_atom_square_layer();
    let top = single_atom_square_layer();
    for nmax in [2, 4, 6, 8] {
        let config = config_for_nmax(nmax);
        group.throughput(Throughput::Elements(((nmax + 1).pow(4)) as u64));
        group.bench_with_input(BenchmarkId::new("run", nmax), &config, |b, config| {
            b.iter(|| run(&bottom, &top, config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
