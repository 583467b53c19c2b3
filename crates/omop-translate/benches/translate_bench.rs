use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use omop_translate::{CacheConfig, InMemoryConceptStore, Translator, TranslatorConfig};
use omop_vocab::{Concept, ConceptRelationship, UriVocabularyNormalizer};

const SNOMED: &str = "http://snomed.info/sct";
const ICD10CM: &str = "http://hl7.org/fhir/sid/icd-10-cm";

/// Builds a store with `size` SNOMED concepts, each mapped to two ICD10CM codes.
fn create_store(size: i64) -> InMemoryConceptStore {
    let mut store = InMemoryConceptStore::new();
    for i in 0..size {
        let source = i * 3 + 1;
        store
            .add_concept(Concept::new(source, "SNOMED", format!("S{i}")))
            .unwrap();
        for offset in 1..=2 {
            store
                .add_concept(Concept::new(
                    source + offset,
                    "ICD10CM",
                    format!("I{i}.{offset}"),
                ))
                .unwrap();
            store.add_relationship(ConceptRelationship::new(
                source,
                source + offset,
                "SNOMED - ICD10CM eq",
            ));
        }
    }
    store
}

fn bench_translate(c: &mut Criterion) {
    let normalizer = UriVocabularyNormalizer::new();
    let mut group = c.benchmark_group("translate");

    for size in [100, 1_000, 10_000] {
        let store = create_store(size);
        let translator = Translator::from_store(&normalizer, &store);
        let code = format!("S{}", size / 2);

        group.bench_with_input(BenchmarkId::new("found", size), &code, |b, code| {
            b.iter(|| translator.translate(black_box(code), SNOMED, ICD10CM))
        });
    }

    group.finish();
}

fn bench_not_found(c: &mut Criterion) {
    let normalizer = UriVocabularyNormalizer::new();
    let store = create_store(1_000);
    let translator = Translator::from_store(&normalizer, &store);

    c.bench_function("translate unknown system", |b| {
        b.iter(|| translator.translate(black_box("S1"), "http://example.org/none", ICD10CM))
    });
    c.bench_function("translate unknown code", |b| {
        b.iter(|| translator.translate(black_box("missing"), SNOMED, ICD10CM))
    });
}

fn bench_cached(c: &mut Criterion) {
    let normalizer = UriVocabularyNormalizer::new();
    let store = create_store(10_000);
    let translator = Translator::with_config(
        &normalizer,
        &store,
        &store,
        TranslatorConfig::builder()
            .with_cache(CacheConfig::default())
            .build(),
    );
    translator.translate("S5000", SNOMED, ICD10CM);

    c.bench_function("translate cached", |b| {
        b.iter(|| translator.translate(black_box("S5000"), SNOMED, ICD10CM))
    });
}

criterion_group!(benches, bench_translate, bench_not_found, bench_cached);
criterion_main!(benches);
