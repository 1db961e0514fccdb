//! Round-trip checking and compression-ratio measurement.
//!
//! The original size of an input is charged at [`BITS_PER_SYMBOL`] bits per
//! byte. Every codec's output is decoded and compared with the input before
//! its size is reported; a mismatch is a bug in the codec and is returned as
//! [`Error::RoundTripMismatch`].
//!
//! The three codecs share no state, so [`evaluate`] runs them concurrently
//! and [`evaluate_batch`] spreads independent inputs over the rayon pool.

use std::fmt;

use log::{debug, error};
use rayon::prelude::*;

use crate::compression::huffman::Huffman;
use crate::compression::lz77::{Lz77, Lz77Config};
use crate::compression::lzw::Lzw;
use crate::compression::{Codec, CodecKind, Result};
use crate::error::Error;

/// Bits charged per input symbol when computing the original size.
pub const BITS_PER_SYMBOL: usize = 8;

/// Settings for an evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Window settings handed to the LZ77 codec.
    pub lz77: Lz77Config,
}

impl EvaluatorConfig {
    pub fn new(lz77: Lz77Config) -> Self {
        EvaluatorConfig { lz77 }
    }
}

/// Size and ratio of one codec on one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub codec: CodecKind,
    /// Output units: bits for Huffman, triples for LZ77, codes for LZW.
    pub units: usize,
    /// Modeled compressed size in bits.
    pub compressed_bits: usize,
    /// `original / compressed`, `None` when the compressed size is zero.
    pub ratio: Option<f64>,
}

/// Full output of a codec run: what it produced, what it decoded back to,
/// and the resulting measurement.
#[derive(Debug, Clone)]
pub struct CodecRun<T> {
    pub compressed: T,
    pub decoded: Vec<u8>,
    pub measurement: Measurement,
}

/// Measurements of all three codecs on a single input.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Input length in symbols.
    pub symbols: usize,
    pub original_bits: usize,
    pub huffman: Measurement,
    pub lz77: Measurement,
    pub lzw: Measurement,
}

impl Evaluation {
    pub fn measurements(&self) -> [&Measurement; 3] {
        [&self.huffman, &self.lz77, &self.lzw]
    }

    /// The measurement with the highest defined ratio, if any.
    pub fn best(&self) -> Option<&Measurement> {
        self.measurements()
            .into_iter()
            .filter(|m| m.ratio.is_some())
            .max_by(|a, b| {
                a.ratio
                    .partial_cmp(&b.ratio)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Original size of `symbols` input symbols in bits.
pub fn original_bits(symbols: usize) -> usize {
    symbols * BITS_PER_SYMBOL
}

/// `original_bits / compressed_bits`, or `None` if nothing was compressed.
pub fn compression_ratio(original_bits: usize, compressed_bits: usize) -> Option<f64> {
    if compressed_bits == 0 {
        return None;
    }
    Some(original_bits as f64 / compressed_bits as f64)
}

/// Compress, decompress and verify `data` with `codec`, keeping every artefact.
///
/// # Errors
///
/// Any codec error, or [`Error::RoundTripMismatch`] if the decoded output
/// differs from `data`.
pub fn run<C: Codec>(codec: &C, data: &[u8]) -> Result<CodecRun<C::Compressed>> {
    let kind = codec.kind();
    let compressed = codec.compress(data)?;
    let decoded = codec.decompress(&compressed)?;
    if decoded != data {
        error!(
            "{} round trip mismatch: {} symbols in, {} decoded",
            kind,
            data.len(),
            decoded.len()
        );
        return Err(Error::RoundTripMismatch {
            codec: kind,
            expected: data.len(),
            decoded: decoded.len(),
        });
    }

    let compressed_bits = codec.compressed_bits(&compressed);
    let measurement = Measurement {
        codec: kind,
        units: codec.units(&compressed),
        compressed_bits,
        ratio: compression_ratio(original_bits(data.len()), compressed_bits),
    };
    debug!(
        "{}: {} -> {} bits, ratio {:?}",
        kind,
        original_bits(data.len()),
        compressed_bits,
        measurement.ratio
    );
    Ok(CodecRun {
        compressed,
        decoded,
        measurement,
    })
}

/// Like [`run`], keeping only the measurement.
pub fn measure<C: Codec>(codec: &C, data: &[u8]) -> Result<Measurement> {
    run(codec, data).map(|run| run.measurement)
}

/// Measure Huffman, LZ77 and LZW on `data`.
///
/// # Example
///
/// ```
/// use textcodecs::compression::{evaluate, EvaluatorConfig};
///
/// let evaluation = evaluate(b"TOBEORNOTTOBEORTOBEORNOT", &EvaluatorConfig::default()).unwrap();
/// assert_eq!(evaluation.original_bits, 192);
/// assert_eq!(evaluation.lzw.compressed_bits, 144);
/// ```
pub fn evaluate(data: &[u8], config: &EvaluatorConfig) -> Result<Evaluation> {
    let lz77_codec = Lz77::new(config.lz77);
    let (huffman, (lz77, lzw)) = rayon::join(
        || measure(&Huffman, data),
        || rayon::join(|| measure(&lz77_codec, data), || measure(&Lzw, data)),
    );
    Ok(Evaluation {
        symbols: data.len(),
        original_bits: original_bits(data.len()),
        huffman: huffman?,
        lz77: lz77?,
        lzw: lzw?,
    })
}

/// Evaluate independent inputs in parallel. Results keep the input order.
pub fn evaluate_batch<T>(inputs: &[T], config: &EvaluatorConfig) -> Vec<Result<Evaluation>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| evaluate(input.as_ref(), config))
        .collect()
}

struct Ratio(Option<f64>);

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ratio) => write!(f, "{ratio:.2}"),
            None => f.write_str("undefined"),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}, {} bits, ratio {}",
            self.codec,
            self.units,
            self.codec.unit_name(),
            self.compressed_bits,
            Ratio(self.ratio)
        )
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "original: {} symbols, {} bits",
            self.symbols, self.original_bits
        )?;
        for measurement in self.measurements() {
            writeln!(f, "{measurement}")?;
        }
        Ok(())
    }
}
