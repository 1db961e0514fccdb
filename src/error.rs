//! Error types shared by every codec in the crate.
//!
//! Codecs never fall back to partial output: any malformed input or
//! configuration surfaces as one of these variants.

use thiserror::Error;

use crate::compression::CodecKind;

/// Errors produced by the codecs and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A Huffman tree was requested for a frequency table with no symbols.
    #[error("empty frequency table: cannot build a huffman tree")]
    EmptyFrequencyTable,

    /// The text being encoded contains a symbol the code table does not know.
    #[error("symbol {symbol} at position {position} has no code")]
    UnknownSymbol { symbol: String, position: usize },

    /// Decoding was attempted without a tree, but the bit stream is not empty.
    #[error("cannot decode {bits} bits without a huffman tree")]
    EmptyTree { bits: usize },

    /// A Huffman bit stream ended in the middle of a code.
    #[error("bit stream ended mid-code after {consumed} bits")]
    IncompleteCode { consumed: usize },

    /// A code that cannot appear at this point of the stream.
    #[error("invalid code {code} at position {position}")]
    InvalidCode { code: usize, position: usize },

    /// An LZ77 triple points outside the already decoded output.
    #[error("back-reference offset {offset} length {length} with only {available} symbols decoded")]
    InvalidBackReference {
        offset: usize,
        length: usize,
        available: usize,
    },

    /// An LZ77 literal triple without its symbol.
    #[error("literal triple at index {index} carries no symbol")]
    MissingLiteral { index: usize },

    /// Codec configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// decode(encode(x)) != x inside the evaluator. Always a codec bug.
    #[error("{codec} round trip mismatch: decoded {decoded} symbols, expected {expected}")]
    RoundTripMismatch {
        codec: CodecKind,
        expected: usize,
        decoded: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
