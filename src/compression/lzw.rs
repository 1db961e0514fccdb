//! LZW adaptive-dictionary coding over bytes.
//!
//! Both sides start from the same dictionary of 256 single-byte phrases and
//! add exactly one phrase per code after the first, so after `k` codes the
//! encoder and decoder dictionaries hold the same entries. The decoder can be
//! handed the code the encoder created on the previous step before it has
//! materialised it; that code is always the next free one and its phrase is
//! the previous phrase followed by its own first byte.
//!
//! Dictionary growth is unbounded. Codes are `usize`, so they cannot overflow
//! for any input that fits in memory.

use std::collections::HashMap;

use log::{debug, trace};

use crate::compression::{Codec, CodecKind, Result};
use crate::error::Error;

/// An LZW output code.
pub type Code = usize;

/// Number of single-byte phrases the dictionary is seeded with.
pub const SEED_SIZE: usize = 256;

/// Encoder-side dictionary. Phrases are stored as (code of prefix, last byte).
struct EncoderDictionary {
    entries: HashMap<(Code, u8), Code>,
    next_code: Code,
}

impl EncoderDictionary {
    fn seeded() -> Self {
        EncoderDictionary {
            entries: HashMap::new(),
            next_code: SEED_SIZE,
        }
    }

    fn lookup(&self, prefix: Code, byte: u8) -> Option<Code> {
        self.entries.get(&(prefix, byte)).copied()
    }

    fn insert(&mut self, prefix: Code, byte: u8) {
        trace!("lzw add {} = ({}, {:#04x})", self.next_code, prefix, byte);
        self.entries.insert((prefix, byte), self.next_code);
        self.next_code += 1;
    }

    fn len(&self) -> usize {
        self.next_code
    }
}

/// Decoder-side dictionary, indexed by code.
struct DecoderDictionary {
    phrases: Vec<Vec<u8>>,
}

impl DecoderDictionary {
    fn seeded() -> Self {
        DecoderDictionary {
            phrases: (0..=u8::MAX).map(|byte| vec![byte]).collect(),
        }
    }

    fn get(&self, code: Code) -> Option<&[u8]> {
        self.phrases.get(code).map(Vec::as_slice)
    }

    fn next_code(&self) -> Code {
        self.phrases.len()
    }

    fn push(&mut self, phrase: Vec<u8>) {
        self.phrases.push(phrase);
    }
}

/// Compresses the input data using the LZW algorithm.
///
/// # Details
///
/// The dictionary is initialized with all 256 possible single-byte sequences.
/// Then, the algorithm finds the longest sequence `w` present in the dictionary that
/// is a prefix of the remaining input. It outputs the code for `w`, adds `w` concatenated
/// with the next byte to the dictionary, and continues. Empty input yields no codes.
///
/// # Example
///
/// ```
/// use textcodecs::compression::lzw::compress;
///
/// let codes = compress(b"TOBEORNOTTOBE");
/// assert!(!codes.is_empty());
/// ```
pub fn compress(input: &[u8]) -> Vec<Code> {
    let mut dictionary = EncoderDictionary::seeded();
    let mut codes = Vec::new();
    let mut phrase: Option<Code> = None;

    for &byte in input {
        phrase = match phrase {
            None => Some(Code::from(byte)),
            Some(prefix) => match dictionary.lookup(prefix, byte) {
                Some(extended) => Some(extended),
                None => {
                    codes.push(prefix);
                    dictionary.insert(prefix, byte);
                    Some(Code::from(byte))
                }
            },
        };
    }
    if let Some(prefix) = phrase {
        codes.push(prefix);
    }

    debug!(
        "lzw: {} bytes -> {} codes, dictionary size {}",
        input.len(),
        codes.len(),
        dictionary.len()
    );
    codes
}

/// Decompresses a sequence of LZW codes back into the original byte data.
///
/// An empty code sequence decodes to empty output.
///
/// # Errors
///
/// [`Error::InvalidCode`] if the first code is not a single-byte phrase, or a
/// later code is neither in the dictionary nor the next code to be assigned.
///
/// # Example
///
/// ```
/// use textcodecs::compression::lzw::{compress, decompress};
///
/// let input = b"TOBEORNOTTOBE";
/// let decompressed = decompress(&compress(input)).unwrap();
/// assert_eq!(decompressed, input);
/// ```
pub fn decompress(codes: &[Code]) -> Result<Vec<u8>> {
    let mut codes = codes.iter().copied().enumerate();
    let Some((_, first)) = codes.next() else {
        return Ok(Vec::new());
    };
    let first = u8::try_from(first).map_err(|_| Error::InvalidCode {
        code: first,
        position: 0,
    })?;

    let mut dictionary = DecoderDictionary::seeded();
    let mut previous = vec![first];
    let mut output = previous.clone();

    for (position, code) in codes {
        let entry = match dictionary.get(code) {
            Some(phrase) => phrase.to_vec(),
            None if code == dictionary.next_code() => {
                // The encoder used the phrase it created on the previous step.
                let mut phrase = previous.clone();
                phrase.push(previous[0]);
                phrase
            }
            None => return Err(Error::InvalidCode { code, position }),
        };
        output.extend_from_slice(&entry);

        let mut new_phrase = previous;
        new_phrase.push(entry[0]);
        dictionary.push(new_phrase);
        previous = entry;
    }
    Ok(output)
}

/// Bit width charged for every code: the bit length of the largest code, at least one.
///
/// This is an approximation of a variable-width stream, not a wire format.
pub fn code_width(codes: &[Code]) -> usize {
    let largest = codes.iter().copied().max().unwrap_or(0);
    let bits = (Code::BITS - largest.leading_zeros()) as usize;
    bits.max(1)
}

/// Modeled size of a code stream in bits.
pub fn compressed_bits(codes: &[Code]) -> usize {
    if codes.is_empty() {
        return 0;
    }
    codes.len() * code_width(codes)
}

/// LZW codec over bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzw;

impl Codec for Lzw {
    type Compressed = Vec<Code>;

    fn kind(&self) -> CodecKind {
        CodecKind::Lzw
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<Code>> {
        Ok(compress(data))
    }

    fn decompress(&self, compressed: &Vec<Code>) -> Result<Vec<u8>> {
        decompress(compressed)
    }

    fn compressed_bits(&self, compressed: &Vec<Code>) -> usize {
        compressed_bits(compressed)
    }

    fn units(&self, compressed: &Vec<Code>) -> usize {
        compressed.len()
    }
}
