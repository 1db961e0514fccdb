use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use textcodecs::compression::{evaluate, huffman, lz77, lzw, EvaluatorConfig, Lz77Config};

const SIZES: &[usize] = &[1024, 8192, 65536];

/// Words drawn from a small vocabulary, so every codec finds repetition.
fn test_text(size: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "the", "book", "city", "world", "secret", "dream", "page", "step", "star", "song",
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut text = Vec::with_capacity(size + 8);
    while text.len() < size {
        text.extend_from_slice(WORDS[rng.gen_range(0..WORDS.len())].as_bytes());
        text.push(b' ');
    }
    text.truncate(size);
    text
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    for &size in SIZES {
        let data = test_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &data, |b, data| {
            b.iter(|| huffman::huffman_encode(black_box(data)).unwrap());
        });

        let (encoded, tree) = huffman::huffman_encode(&data).unwrap();
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| huffman::decode(black_box(encoded), &tree).unwrap());
        });
    }
    group.finish();
}

fn bench_lz77(c: &mut Criterion) {
    let mut group = c.benchmark_group("lz77");
    let config = Lz77Config::default();
    for &size in SIZES {
        let data = test_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, data| {
            b.iter(|| lz77::compress(black_box(data), &config));
        });

        let triples = lz77::compress(&data, &config);
        group.bench_with_input(BenchmarkId::new("decompress", size), &triples, |b, triples| {
            b.iter(|| lz77::decompress(black_box(triples)).unwrap());
        });
    }
    group.finish();
}

fn bench_lzw(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzw");
    for &size in SIZES {
        let data = test_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("compress", size), &data, |b, data| {
            b.iter(|| lzw::compress(black_box(data)));
        });

        let codes = lzw::compress(&data);
        group.bench_with_input(BenchmarkId::new("decompress", size), &codes, |b, codes| {
            b.iter(|| lzw::decompress(black_box(codes)).unwrap());
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let data = test_text(8192);
    let config = EvaluatorConfig::default();
    c.bench_function("evaluate_8192", |b| {
        b.iter(|| evaluate(black_box(&data), &config).unwrap());
    });
}

criterion_group!(benches, bench_huffman, bench_lz77, bench_lzw, bench_evaluate);
criterion_main!(benches);
