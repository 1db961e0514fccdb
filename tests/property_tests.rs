use proptest::prelude::*;
use textcodecs::compression::huffman::{build_tree, generate_codes, huffman_decode, huffman_encode};
use textcodecs::compression::lzw::SEED_SIZE;
use textcodecs::compression::{
    build_frequency_table, evaluate, lz77, lzw, EvaluatorConfig, Lz77Config,
};

proptest! {
    #[test]
    fn test_huffman_roundtrip(input in prop::collection::vec(any::<u8>(), 1..400)) {
        let (encoded, tree) = huffman_encode(&input).unwrap();
        prop_assert_eq!(huffman_decode(&encoded, &tree).unwrap(), input);
    }

    #[test]
    fn test_huffman_roundtrip_chars(input in "\\PC{1,200}") {
        let symbols: Vec<char> = input.chars().collect();
        let (encoded, tree) = huffman_encode(&symbols).unwrap();
        prop_assert_eq!(huffman_decode(&encoded, &tree).unwrap(), symbols);
    }

    #[test]
    fn test_huffman_prefix_free(input in prop::collection::vec(0..12u8, 1..300)) {
        let table = generate_codes(&build_tree(&build_frequency_table(&input)).unwrap());
        let codes: Vec<_> = table.iter().collect();
        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    prop_assert!(!code_b.starts_with(*code_a));
                }
            }
        }
    }

    #[test]
    fn test_huffman_deterministic(input in prop::collection::vec(0..6u8, 1..200)) {
        let first = huffman_encode(&input).unwrap();
        let second = huffman_encode(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_lz77_roundtrip_and_bounds(
        input in prop::collection::vec(0..4u8, 0..400),
        window in 1..64usize,
        lookahead in 1..32usize,
    ) {
        let config = Lz77Config::new(window, lookahead).unwrap();
        let triples = lz77::compress(&input, &config);
        for triple in &triples {
            prop_assert!(triple.offset <= window);
            prop_assert!(triple.length <= lookahead);
        }
        prop_assert_eq!(&triples, &lz77::compress(&input, &config));
        prop_assert_eq!(lz77::decompress(&triples).unwrap(), input);
    }

    #[test]
    fn test_lzw_roundtrip_and_growth(input in prop::collection::vec(any::<u8>(), 0..600)) {
        let codes = lzw::compress(&input);
        prop_assert!(codes.len() <= input.len());
        if let Some(&largest) = codes.iter().max() {
            prop_assert!(largest < SEED_SIZE + input.len());
        }
        prop_assert_eq!(lzw::decompress(&codes).unwrap(), input);
    }

    #[test]
    fn test_evaluate_never_mismatches(input in prop::collection::vec(0..8u8, 0..300)) {
        let evaluation = evaluate(&input, &EvaluatorConfig::default()).unwrap();
        prop_assert_eq!(evaluation.original_bits, input.len() * 8);
        prop_assert_eq!(evaluation.lz77.ratio.is_none(), input.is_empty());
        prop_assert_eq!(evaluation.lzw.ratio.is_none(), input.is_empty());
    }
}
