use criterion::{black_box, criterion_group, criterion_main, Criterion};
use omop_categorical::{
    resolve_administrative_sex, resolve_encounter_class, reverse_resolve_condition_category,
    tables,
};

fn bench_resolve_known(c: &mut Criterion) {
    c.bench_function("resolve_encounter_class (known)", |b| {
        b.iter(|| resolve_encounter_class(black_box(Some("OBSENC"))))
    });
}

fn bench_resolve_unknown(c: &mut Criterion) {
    c.bench_function("resolve_administrative_sex (fallback)", |b| {
        b.iter(|| resolve_administrative_sex(black_box(Some("not-a-code"))))
    });
}

fn bench_reverse_resolve(c: &mut Criterion) {
    c.bench_function("reverse_resolve_condition_category", |b| {
        b.iter(|| reverse_resolve_condition_category(black_box(42894222)))
    });
}

fn bench_organization_scan(c: &mut Criterion) {
    let codes: Vec<&str> = tables::ORGANIZATION_TYPE
        .iter()
        .map(|entry| entry.domain_code)
        .collect();
    c.bench_function("organization_type full scan", |b| {
        b.iter(|| {
            for code in &codes {
                black_box(tables::ORGANIZATION_TYPE.resolve(Some(*code)).ok());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_known,
    bench_resolve_unknown,
    bench_reverse_resolve,
    bench_organization_scan
);
criterion_main!(benches);
