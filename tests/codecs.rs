//! End-to-end checks across the three codecs and the evaluator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use textcodecs::compression::{
    evaluate, evaluate_batch, Codec, CodecKind, EvaluatorConfig, Huffman, Lz77, Lz77Config, Lzw,
};
use textcodecs::Error;

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

fn roundtrip<C: Codec>(codec: &C, data: &[u8]) {
    let compressed = codec.compress(data).expect("compress failed");
    let decoded = codec.decompress(&compressed).expect("decompress failed");
    assert_eq!(decoded, data, "{} round trip failed", codec.kind());
}

#[test]
fn test_all_codecs_random_full_alphabet() {
    let data = random_bytes(4096, 42);
    roundtrip(&Huffman, &data);
    roundtrip(&Lz77::default(), &data);
    roundtrip(&Lzw, &data);
}

#[test]
fn test_all_codecs_repeated_symbol() {
    let data = vec![b'A'; 1000];
    roundtrip(&Huffman, &data);
    roundtrip(&Lz77::new(Lz77Config::new(10, 10).unwrap()), &data);
    roundtrip(&Lzw, &data);
}

#[test]
fn test_all_codecs_empty() {
    roundtrip(&Huffman, b"");
    roundtrip(&Lz77::default(), b"");
    roundtrip(&Lzw, b"");
}

#[test]
fn test_repetitive_text_compresses() {
    let text = "the quick brown fox jumps over the lazy dog. ".repeat(40);
    let evaluation = evaluate(text.as_bytes(), &EvaluatorConfig::default()).unwrap();
    for measurement in evaluation.measurements() {
        let ratio = measurement.ratio.expect("ratio should be defined");
        assert!(ratio > 1.0, "{measurement}");
    }
}

#[test]
fn test_random_bytes_do_not_compress_under_lz77() {
    // Matches on random bytes are one or two symbols long, and each triple costs 32 bits.
    let data = random_bytes(2048, 3);
    let evaluation = evaluate(&data, &EvaluatorConfig::default()).unwrap();
    assert_eq!(evaluation.lz77.codec, CodecKind::Lz77);
    assert!(evaluation.lz77.ratio.unwrap() < 1.0);
}

#[test]
fn test_batch_matches_single() {
    let inputs = vec![random_bytes(300, 1), b"abababababab".to_vec(), Vec::new()];
    let config = EvaluatorConfig::default();
    let batch = evaluate_batch(&inputs, &config);
    for (input, result) in inputs.iter().zip(batch) {
        assert_eq!(result.unwrap(), evaluate(input, &config).unwrap());
    }
}

#[test]
fn test_lzw_rejects_malformed_stream() {
    let err = Lzw.decompress(&vec![84, 79, 300]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidCode {
            code: 300,
            position: 2
        }
    );
}
