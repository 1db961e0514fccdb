use std::collections::BTreeMap;

/// Symbol occurrence counts.
///
/// Entries iterate in ascending symbol order, which is what makes the Huffman
/// tree built from a table reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Ord> {
    counts: BTreeMap<S, usize>,
}

impl<S: Ord> Default for FrequencyTable<S> {
    fn default() -> Self {
        FrequencyTable {
            counts: BTreeMap::new(),
        }
    }
}

impl<S: Ord + Copy> FrequencyTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `symbol`.
    pub fn add(&mut self, symbol: S) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Set the count of `symbol` directly. A count of zero removes it.
    pub fn set(&mut self, symbol: S, count: usize) {
        if count == 0 {
            self.counts.remove(&symbol);
        } else {
            self.counts.insert(symbol, count);
        }
    }

    /// Occurrences of `symbol`, zero if it never appeared.
    pub fn get(&self, symbol: &S) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted sequence.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// (symbol, count) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FrequencyTable<char> {
    /// Count the characters of a string.
    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }
}

impl<S: Ord + Copy> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for symbol in iter {
            table.add(symbol);
        }
        table
    }
}

/// Build a frequency table mapping each symbol in `input` to its frequency.
pub fn build_frequency_table<S: Ord + Copy>(input: &[S]) -> FrequencyTable<S> {
    input.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_table() {
        let freq = FrequencyTable::from_text("aabccc");
        assert_eq!(freq.get(&'a'), 2);
        assert_eq!(freq.get(&'b'), 1);
        assert_eq!(freq.get(&'c'), 3);
        assert_eq!(freq.get(&'z'), 0);
        assert_eq!(freq.len(), 3);
        assert_eq!(freq.total(), 6);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let freq = build_frequency_table(b"zyxzyz");
        let symbols: Vec<u8> = freq.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'x', b'y', b'z']);
    }

    #[test]
    fn test_empty_input() {
        let freq = build_frequency_table::<u8>(&[]);
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
    }

    #[test]
    fn test_set_zero_removes() {
        let mut freq = FrequencyTable::new();
        freq.set('a', 4);
        freq.set('b', 1);
        freq.set('a', 0);
        assert_eq!(freq.len(), 1);
        assert_eq!(freq.get(&'a'), 0);
    }
}
