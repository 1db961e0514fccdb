//! LZ77 sliding-window coding.
//!
//! The encoder emits (offset, length, next) triples. At every position it
//! scans the search window from its oldest position forward and keeps a
//! candidate only if it is strictly longer than the best so far, so among
//! equally long matches the most distant one wins. Matches may run past the
//! current position (self-overlapping runs), which the decoder supports by
//! copying one symbol at a time.
//!
//! Sizes are accounted at a flat [`TRIPLE_BITS`] per triple. This is a
//! comparison convention, not a bitstream layout.

use log::{debug, trace};

use crate::compression::{Codec, CodecKind, Result, Symbol};
use crate::error::Error;

/// Bits charged for a triple's offset.
pub const OFFSET_BITS: usize = 16;
/// Bits charged for a triple's length.
pub const LENGTH_BITS: usize = 8;
/// Bits charged for a triple's next symbol.
pub const SYMBOL_BITS: usize = 8;
/// Bits charged for every triple, literal or not.
pub const TRIPLE_BITS: usize = OFFSET_BITS + LENGTH_BITS + SYMBOL_BITS;

/// Default maximum look-back distance.
pub const DEFAULT_WINDOW_SIZE: usize = 400;
/// Default maximum match length.
pub const DEFAULT_LOOKAHEAD_SIZE: usize = 50;

/// An LZ77 triple.
///
/// When a match is found, the triple is:
///   (offset, length, next)
///
/// If no match is found, then offset and length are zero, and `next` is the literal.
/// `next` is `None` only when a match runs to the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple<S> {
    pub offset: usize,
    pub length: usize,
    pub next: Option<S>,
}

impl<S> Triple<S> {
    /// A triple carrying a single symbol and no back-reference.
    pub fn literal(symbol: S) -> Self {
        Triple {
            offset: 0,
            length: 0,
            next: Some(symbol),
        }
    }

    pub fn is_literal(&self) -> bool {
        self.offset == 0 && self.length == 0
    }
}

/// Window configuration for the LZ77 codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Config {
    /// Maximum number of previous symbols to search for a match.
    window_size: usize,
    /// Maximum match length.
    lookahead_size: usize,
}

impl Lz77Config {
    /// Creates a new window configuration.
    ///
    /// # Arguments
    ///
    /// * `window_size` - Maximum look-back distance, must be positive
    /// * `lookahead_size` - Maximum match length, must be positive
    pub fn new(window_size: usize, lookahead_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidConfig(
                "LZ77 window size must be positive".to_string(),
            ));
        }
        if lookahead_size == 0 {
            return Err(Error::InvalidConfig(
                "LZ77 lookahead size must be positive".to_string(),
            ));
        }
        Ok(Lz77Config {
            window_size,
            lookahead_size,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn lookahead_size(&self) -> usize {
        self.lookahead_size
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Lz77Config {
            window_size: DEFAULT_WINDOW_SIZE,
            lookahead_size: DEFAULT_LOOKAHEAD_SIZE,
        }
    }
}

/// Number of equal symbols starting at `candidate` and `position`, at most `limit`.
fn match_length<S: Symbol>(input: &[S], candidate: usize, position: usize, limit: usize) -> usize {
    input[candidate..]
        .iter()
        .zip(&input[position..])
        .take(limit)
        .take_while(|(a, b)| a == b)
        .count()
}

/// Compress the input data using the LZ77 algorithm.
///
/// # Parameters
///
/// - `input`: the symbols to compress.
/// - `config`: search window and lookahead sizes.
///
/// # Returns
///
/// A vector of `Triple` representing the compressed data.
///
/// # Example
///
/// ```
/// use textcodecs::compression::lz77::{compress, Lz77Config};
///
/// let data = b"abracadabra abracadabra";
/// let triples = compress(data, &Lz77Config::new(16, 8).unwrap());
/// assert!(!triples.is_empty());
/// ```
pub fn compress<S: Symbol>(input: &[S], config: &Lz77Config) -> Vec<Triple<S>> {
    let mut triples = Vec::new();
    let end = input.len();
    let mut i = 0;
    while i < end {
        let search_start = i.saturating_sub(config.window_size);
        let longest_possible = config.lookahead_size.min(end - i);
        let mut best_length = 0;
        let mut best_offset = 0;
        for j in search_start..i {
            let length = match_length(input, j, i, config.lookahead_size);
            if length > best_length {
                best_length = length;
                best_offset = i - j;
                if best_length == longest_possible {
                    break;
                }
            }
        }

        if best_length > 0 {
            let next = input.get(i + best_length).copied();
            trace!(
                "pos {}: match offset {} length {} next {:?}",
                i,
                best_offset,
                best_length,
                next
            );
            triples.push(Triple {
                offset: best_offset,
                length: best_length,
                next,
            });
            i += best_length + 1;
        } else {
            triples.push(Triple::literal(input[i]));
            i += 1;
        }
    }
    debug!(
        "lz77: {} symbols -> {} triples (window {}, lookahead {})",
        input.len(),
        triples.len(),
        config.window_size,
        config.lookahead_size
    );
    triples
}

/// Decompress a sequence of LZ77 triples into the original data.
///
/// Back-references are replayed one symbol at a time, so a match longer than
/// its offset repeats the symbols it has just produced.
///
/// # Errors
///
/// - [`Error::MissingLiteral`] for a literal triple without a symbol.
/// - [`Error::InvalidBackReference`] for a zero offset with a non-zero length,
///   or an offset reaching before the start of the output.
///
/// # Example
///
/// ```
/// use textcodecs::compression::lz77::{compress, decompress, Lz77Config};
///
/// let data = b"abracadabra abracadabra";
/// let triples = compress(data, &Lz77Config::default());
/// assert_eq!(decompress(&triples).unwrap(), data);
/// ```
pub fn decompress<S: Symbol>(triples: &[Triple<S>]) -> Result<Vec<S>> {
    let mut output = Vec::new();
    for (index, triple) in triples.iter().enumerate() {
        if triple.is_literal() {
            let symbol = triple.next.ok_or(Error::MissingLiteral { index })?;
            output.push(symbol);
            continue;
        }

        if triple.offset == 0 || triple.offset > output.len() {
            return Err(Error::InvalidBackReference {
                offset: triple.offset,
                length: triple.length,
                available: output.len(),
            });
        }
        let start = output.len() - triple.offset;
        for k in 0..triple.length {
            let symbol = output[start + k];
            output.push(symbol);
        }
        if let Some(symbol) = triple.next {
            output.push(symbol);
        }
    }
    Ok(output)
}

/// Modeled size of a triple stream in bits.
pub fn compressed_bits<S>(triples: &[Triple<S>]) -> usize {
    triples.len() * TRIPLE_BITS
}

/// LZ77 codec over bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz77 {
    config: Lz77Config,
}

impl Lz77 {
    pub fn new(config: Lz77Config) -> Self {
        Lz77 { config }
    }

    pub fn config(&self) -> &Lz77Config {
        &self.config
    }
}

impl Codec for Lz77 {
    type Compressed = Vec<Triple<u8>>;

    fn kind(&self) -> CodecKind {
        CodecKind::Lz77
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<Triple<u8>>> {
        Ok(compress(data, &self.config))
    }

    fn decompress(&self, compressed: &Vec<Triple<u8>>) -> Result<Vec<u8>> {
        decompress(compressed)
    }

    fn compressed_bits(&self, compressed: &Vec<Triple<u8>>) -> usize {
        compressed_bits(compressed)
    }

    fn units(&self, compressed: &Vec<Triple<u8>>) -> usize {
        compressed.len()
    }
}
