use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fm_search::index::{FmIndex, IndexOpt, SaAlgorithm, Text};
use fm_search::search::{InexactSearcher, Query};
use fm_search::util::alphabet::Alphabet;

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn build_fm_index(seq: &[u8], spacing: usize) -> FmIndex {
    let text = Text::from_body(&Alphabet::dna(), seq).unwrap();
    let opt = IndexOpt { occ_spacing: spacing, ..IndexOpt::default() };
    FmIndex::build(Alphabet::dna(), &text, &opt).unwrap()
}

fn bench_backward_search(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let fm_idx = build_fm_index(&reference, 32);
    let pattern = fm_idx.alphabet().encode_pattern(&reference[100..120]).unwrap();

    c.bench_function("backward_search_20bp", |b| {
        b.iter(|| {
            black_box(fm_idx.backward_search(black_box(&pattern)));
        })
    });
}

fn bench_inexact_search(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let mut group = c.benchmark_group("inexact_search_20bp");
    for spacing in [1usize, 32, 128] {
        let fm_idx = build_fm_index(&reference, spacing);
        let mut read = reference[500..520].to_vec();
        read[10] = if read[10] == b'A' { b'C' } else { b'A' };
        for k in [0u32, 1, 2] {
            let query = Query::new(fm_idx.alphabet(), &read, k).unwrap();
            group.bench_with_input(BenchmarkId::new(format!("spacing{}", spacing), k), &query, |b, q| {
                b.iter(|| black_box(InexactSearcher::new(&fm_idx, q).intervals()));
            });
        }
    }
    group.finish();
}

fn bench_build_sa(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let text = Text::from_body(&Alphabet::dna(), &reference).unwrap();
    let mut group = c.benchmark_group("build_sa_10k");
    for alg in [SaAlgorithm::Naive, SaAlgorithm::Doubling, SaAlgorithm::Sais] {
        let builder = alg.builder(false);
        group.bench_function(builder.name(), |b| {
            b.iter(|| black_box(builder.build(black_box(&text), 5)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backward_search, bench_inexact_search, bench_build_sa);
criterion_main!(benches);
