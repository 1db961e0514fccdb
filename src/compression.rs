//! Compression algorithms implementation.
//!
//! This module provides three lossless codecs plus a measurement harness:
//! - Huffman prefix coding over a frequency table
//! - LZ77 sliding-window coding with (offset, length, next) triples
//! - LZW adaptive-dictionary coding seeded with the 256 single-byte phrases
//! - An evaluator that checks round trips and computes compression ratios
//!
//! None of the codecs defines a wire format. Compressed sizes are computed
//! from a per-codec accounting model so ratios can be compared.
//!
//! # Examples
//!
//! ```rust
//! use textcodecs::compression::{Codec, Lzw};
//!
//! let codes = Lzw.compress(b"TOBEORNOTTOBE").unwrap();
//! assert_eq!(Lzw.decompress(&codes).unwrap(), b"TOBEORNOTTOBE");
//! ```

use std::fmt;

pub use crate::error::{Error, Result};

/// An atomic unit of the input alphabet, such as a `char` or a byte.
pub trait Symbol: Copy + Ord + fmt::Debug {}

impl<T: Copy + Ord + fmt::Debug> Symbol for T {}

/// Common interface the evaluator drives every codec through.
///
/// Implementations operate on bytes; the free functions in each codec module
/// are more general where the algorithm allows it.
pub trait Codec {
    /// The compressed representation produced by `compress`.
    type Compressed;

    /// Which codec this is, for reporting.
    fn kind(&self) -> CodecKind;

    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Self::Compressed>;

    /// Decompress the compressed data
    fn decompress(&self, compressed: &Self::Compressed) -> Result<Vec<u8>>;

    /// Modeled size of the compressed representation in bits.
    fn compressed_bits(&self, compressed: &Self::Compressed) -> usize;

    /// Number of output units (codes, triples or bits) in the representation.
    fn units(&self, compressed: &Self::Compressed) -> usize;
}

/// Identifies one of the codecs in reports and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Huffman,
    Lz77,
    Lzw,
}

impl CodecKind {
    /// What an evaluator measurement's `units` counts for this codec.
    pub fn unit_name(&self) -> &'static str {
        match self {
            CodecKind::Huffman => "bits",
            CodecKind::Lz77 => "triples",
            CodecKind::Lzw => "codes",
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecKind::Huffman => "Huffman",
            CodecKind::Lz77 => "LZ77",
            CodecKind::Lzw => "LZW",
        };
        f.write_str(name)
    }
}

pub mod evaluate;
pub mod frequency;
pub mod huffman;
pub mod lz77;
pub mod lzw;

pub use evaluate::{
    compression_ratio, evaluate, evaluate_batch, measure, run, CodecRun, Evaluation,
    EvaluatorConfig, Measurement,
};
pub use frequency::{build_frequency_table, FrequencyTable};
pub use huffman::{
    build_tree, decode, encode, generate_codes, huffman_decode, huffman_encode, CodeTable, Huffman,
    HuffmanEncoded, HuffmanNode, HuffmanTree,
};
pub use lz77::{Lz77, Lz77Config, Triple};
pub use lzw::Lzw;
