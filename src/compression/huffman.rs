//! Huffman prefix coding.
//!
//! The tree is built by greedily merging the two lightest candidates until one
//! remains. Every candidate carries a sequence number (leaves are numbered in
//! frequency-table order, merged nodes in creation order) and ties on weight
//! are broken by that number, so a given frequency table always yields the
//! same tree and the same code table.
//!
//! Code generation and decoding walk the tree iteratively; neither recurses.
//!
//! A table with a single distinct symbol produces a tree whose root is a leaf.
//! That symbol is assigned the one-bit code `0`.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use bitvec::prelude::*;
use log::{debug, trace};

use crate::compression::frequency::{build_frequency_table, FrequencyTable};
use crate::compression::{Codec, CodecKind, Result, Symbol};
use crate::error::Error;

/// Bit string used for codes and encoded streams.
pub type Bits = BitVec<u8, Msb0>;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S> {
    /// A leaf node contains a symbol and its frequency.
    Leaf { symbol: S, weight: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        weight: usize,
        left: Box<HuffmanNode<S>>,
        right: Box<HuffmanNode<S>>,
    },
}

impl<S> HuffmanNode<S> {
    /// Returns the weight of the node.
    pub fn weight(&self) -> usize {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// A complete Huffman tree. Always has a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: HuffmanNode<S>,
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> &HuffmanNode<S> {
        &self.root
    }

    /// Total weight, i.e. the length of the sequence the tree was built for.
    pub fn weight(&self) -> usize {
        self.root.weight()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(left.as_ref());
                    stack.push(right.as_ref());
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path. A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => deepest = deepest.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((left.as_ref(), depth + 1));
                    stack.push((right.as_ref(), depth + 1));
                }
            }
        }
        deepest
    }
}

/// Heap entry ordered so the lightest, then oldest, candidate pops first.
#[derive(Debug)]
struct Candidate<S> {
    weight: usize,
    sequence: usize,
    node: HuffmanNode<S>,
}

impl<S> PartialEq for Candidate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl<S> Eq for Candidate<S> {}

impl<S> Ord for Candidate<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: BinaryHeap is a max-heap.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<S> PartialOrd for Candidate<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree given a frequency table.
///
/// The first candidate popped in each merge becomes the left child.
///
/// # Errors
///
/// [`Error::EmptyFrequencyTable`] if the table has no symbols.
pub fn build_tree<S: Symbol>(freq_table: &FrequencyTable<S>) -> Result<HuffmanTree<S>> {
    let mut heap = BinaryHeap::with_capacity(freq_table.len());
    let mut sequence = 0;
    for (symbol, weight) in freq_table.iter() {
        heap.push(Candidate {
            weight,
            sequence,
            node: HuffmanNode::Leaf { symbol, weight },
        });
        sequence += 1;
    }

    loop {
        let Some(left) = heap.pop() else {
            return Err(Error::EmptyFrequencyTable);
        };
        let Some(right) = heap.pop() else {
            debug!(
                "built huffman tree: {} symbols, total weight {}",
                freq_table.len(),
                left.weight
            );
            return Ok(HuffmanTree { root: left.node });
        };

        let weight = left.weight + right.weight;
        trace!(
            "merge #{} (w={}) + #{} (w={}) -> #{} (w={})",
            left.sequence,
            left.weight,
            right.sequence,
            right.weight,
            sequence,
            weight
        );
        heap.push(Candidate {
            weight,
            sequence,
            node: HuffmanNode::Internal {
                weight,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        });
        sequence += 1;
    }
}

/// Mapping from symbol to its prefix-free bit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Ord> {
    codes: BTreeMap<S, Bits>,
}

impl<S: Symbol> CodeTable<S> {
    /// The code for `symbol`, if it is part of the alphabet.
    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|code| code.len()).max().unwrap_or(0)
    }

    /// Codes listed most frequent first, ties by symbol, with their counts.
    pub fn by_frequency<'a>(
        &'a self,
        freq_table: &FrequencyTable<S>,
    ) -> Vec<(S, &'a BitSlice<u8, Msb0>, usize)> {
        let mut rows: Vec<_> = self
            .iter()
            .map(|(symbol, code)| (symbol, code, freq_table.get(&symbol)))
            .collect();
        rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        rows
    }

    /// Expected code length in bits per symbol under `freq_table`.
    ///
    /// Returns `None` when the table counts nothing.
    pub fn average_code_len(&self, freq_table: &FrequencyTable<S>) -> Option<f64> {
        let total = freq_table.total();
        if total == 0 {
            return None;
        }
        let weighted: usize = freq_table
            .iter()
            .map(|(symbol, count)| count * self.codes.get(&symbol).map_or(0, |code| code.len()))
            .sum();
        Some(weighted as f64 / total as f64)
    }
}

/// Build the code table by walking the tree. Left edges append 0, right edges 1.
///
/// If the tree consists of a single leaf (i.e. one unique symbol), the code "0" is assigned.
pub fn generate_codes<S: Symbol>(tree: &HuffmanTree<S>) -> CodeTable<S> {
    let mut codes = BTreeMap::new();

    if let HuffmanNode::Leaf { symbol, .. } = tree.root() {
        codes.insert(*symbol, bitvec![u8, Msb0; 0]);
        return CodeTable { codes };
    }

    let mut stack: Vec<(&HuffmanNode<S>, Bits)> = vec![(tree.root(), Bits::new())];
    while let Some((node, prefix)) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, prefix);
            }
            HuffmanNode::Internal { left, right, .. } => {
                let mut right_prefix = prefix.clone();
                right_prefix.push(true);
                let mut left_prefix = prefix;
                left_prefix.push(false);
                stack.push((right.as_ref(), right_prefix));
                stack.push((left.as_ref(), left_prefix));
            }
        }
    }

    CodeTable { codes }
}

/// Encode `input` by concatenating each symbol's code in order.
///
/// # Errors
///
/// [`Error::UnknownSymbol`] if a symbol of `input` is missing from `code_table`.
pub fn encode<S: Symbol>(input: &[S], code_table: &CodeTable<S>) -> Result<Bits> {
    let mut encoded = Bits::new();
    for (position, symbol) in input.iter().enumerate() {
        let code = code_table.get(symbol).ok_or_else(|| Error::UnknownSymbol {
            symbol: format!("{symbol:?}"),
            position,
        })?;
        encoded.extend_from_bitslice(code);
    }
    Ok(encoded)
}

/// Decode a bit string by walking `tree` from the root, 0 left and 1 right,
/// emitting a symbol at every leaf.
///
/// # Errors
///
/// - [`Error::IncompleteCode`] if the bits run out in the middle of a code.
/// - [`Error::InvalidCode`] if a single-leaf tree sees a `1` bit.
pub fn decode<S: Symbol>(encoded: &BitSlice<u8, Msb0>, tree: &HuffmanTree<S>) -> Result<Vec<S>> {
    let root = tree.root();

    if let HuffmanNode::Leaf { symbol, .. } = root {
        let mut decoded = Vec::with_capacity(encoded.len());
        for (position, bit) in encoded.iter().by_vals().enumerate() {
            if bit {
                return Err(Error::InvalidCode { code: 1, position });
            }
            decoded.push(*symbol);
        }
        return Ok(decoded);
    }

    let mut decoded = Vec::new();
    let mut current = root;
    let mut pending = 0;
    for bit in encoded.iter().by_vals() {
        if let HuffmanNode::Internal { left, right, .. } = current {
            current = if bit { right.as_ref() } else { left.as_ref() };
        }
        pending += 1;
        if let HuffmanNode::Leaf { symbol, .. } = current {
            decoded.push(*symbol);
            current = root;
            pending = 0;
        }
    }

    if pending > 0 {
        return Err(Error::IncompleteCode {
            consumed: encoded.len(),
        });
    }
    Ok(decoded)
}

/// Convenience function: builds the Huffman tree from input, encodes the input,
/// and returns (encoded bits, Huffman tree).
pub fn huffman_encode<S: Symbol>(input: &[S]) -> Result<(Bits, HuffmanTree<S>)> {
    let freq_table = build_frequency_table(input);
    let tree = build_tree(&freq_table)?;
    let code_table = generate_codes(&tree);
    let encoded = encode(input, &code_table)?;
    debug!(
        "huffman: {} symbols -> {} bits, max code length {}",
        input.len(),
        encoded.len(),
        code_table.max_code_len()
    );
    Ok((encoded, tree))
}

/// Convenience function: decodes an encoded bit string using the provided Huffman tree.
pub fn huffman_decode<S: Symbol>(
    encoded: &BitSlice<u8, Msb0>,
    tree: &HuffmanTree<S>,
) -> Result<Vec<S>> {
    decode(encoded, tree)
}

/// Render bits as a string of `0` and `1` characters.
pub fn bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Huffman codec over bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

/// Huffman output: the tree needed to decode plus the encoded bits.
///
/// `tree` is `None` only for empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEncoded {
    pub tree: Option<HuffmanTree<u8>>,
    pub bits: Bits,
}

impl Codec for Huffman {
    type Compressed = HuffmanEncoded;

    fn kind(&self) -> CodecKind {
        CodecKind::Huffman
    }

    /// Empty input is accepted and yields no tree and no bits.
    fn compress(&self, data: &[u8]) -> Result<HuffmanEncoded> {
        if data.is_empty() {
            return Ok(HuffmanEncoded {
                tree: None,
                bits: Bits::new(),
            });
        }
        let (bits, tree) = huffman_encode(data)?;
        Ok(HuffmanEncoded {
            tree: Some(tree),
            bits,
        })
    }

    fn decompress(&self, compressed: &HuffmanEncoded) -> Result<Vec<u8>> {
        match &compressed.tree {
            Some(tree) => decode(&compressed.bits, tree),
            None if compressed.bits.is_empty() => Ok(Vec::new()),
            None => Err(Error::EmptyTree {
                bits: compressed.bits.len(),
            }),
        }
    }

    fn compressed_bits(&self, compressed: &HuffmanEncoded) -> usize {
        compressed.bits.len()
    }

    fn units(&self, compressed: &HuffmanEncoded) -> usize {
        compressed.bits.len()
    }
}
