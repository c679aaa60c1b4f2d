use corrosion_core::galvanic::{assess_galvanic, GalvanicInput};
use corrosion_data::CatalogSet;
use criterion::{criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
}

fn bench_galvanic_solve(c: &mut Criterion) {
    let catalogs = CatalogSet::load(&data_dir()).unwrap();
    let input = GalvanicInput {
        anode: "HY80".into(),
        cathode: "SS316".into(),
        temperature_c: 25.0,
        ph: 8.0,
        chloride_mg_l: 19_000.0,
        area_ratio: 10.0,
        dissolved_oxygen_mg_l: Some(8.0),
        velocity_m_s: 0.0,
        pipe_diameter_m: None,
        pipe_length_m: None,
    };

    c.bench_function("galvanic_hy80_ss316_seawater", |b| {
        b.iter(|| assess_galvanic(&catalogs, &input).unwrap())
    });
}

criterion_group!(benches, bench_galvanic_solve);
criterion_main!(benches);
