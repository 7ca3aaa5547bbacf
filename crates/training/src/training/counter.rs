//! Symbol-sequence bookkeeping for BPE training.
//!
//! Each distinct whitespace token of the corpus is held once, as the
//! sequence of its current symbols (vocabulary ids), together with its
//! corpus-wide occurrence count. Merges rewrite the sequences in place.

use ahash::AHashMap;
use compact_str::CompactString;
use morsel_core::Vocabulary;
use std::collections::hash_map::Entry;

/// A pair of adjacent symbol ids.
pub type Pair = (u32, u32);

/// Per-word symbol sequences with occurrence counts.
pub struct SymbolCounter {
    /// Distinct words as symbol-id sequences, in first-seen order
    words: Vec<Vec<u32>>,
    /// Occurrence count per word, parallel to `words`
    word_counts: Vec<u64>,
    /// Word text -> slot in `words`
    index: AHashMap<CompactString, usize>,
}

impl SymbolCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            word_counts: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Register one occurrence of `word`, seeding any character not yet
    /// in the vocabulary. Characters are assigned ids in first-seen
    /// order, which keeps training reproducible.
    pub fn add_word(&mut self, word: &str, vocab: &mut Vocabulary) {
        if let Some(&slot) = self.index.get(word) {
            self.word_counts[slot] += 1;
            return;
        }

        let mut buf = [0u8; 4];
        let symbols = word
            .chars()
            .map(|c| vocab.add_token(c.encode_utf8(&mut buf)))
            .collect();

        self.index.insert(CompactString::new(word), self.words.len());
        self.words.push(symbols);
        self.word_counts.push(1);
    }

    /// Tally every adjacent ordered pair across all sequences, weighted
    /// by occurrence count.
    pub fn count_pairs(&self) -> PairTally {
        let mut counts: AHashMap<Pair, u64> = AHashMap::new();
        let mut order: Vec<Pair> = Vec::new();

        for (word, &count) in self.words.iter().zip(self.word_counts.iter()) {
            for window in word.windows(2) {
                let pair = (window[0], window[1]);
                match counts.entry(pair) {
                    Entry::Occupied(entry) => *entry.into_mut() += count,
                    Entry::Vacant(entry) => {
                        entry.insert(count);
                        order.push(pair);
                    }
                }
            }
        }

        PairTally { counts, order }
    }

    /// Rewrite every sequence, replacing non-overlapping left-to-right
    /// occurrences of `pair` with `new_id`. The scan resumes after the
    /// merged unit, so a merge never overlaps or cascades within a pass.
    pub fn merge_pair(&mut self, pair: Pair, new_id: u32) {
        for word in &mut self.words {
            let mut i = 0;
            while i + 1 < word.len() {
                if word[i] == pair.0 && word[i + 1] == pair.1 {
                    word[i] = new_id;
                    word.remove(i + 1);
                }
                i += 1;
            }
        }
    }

    /// Number of distinct words seen.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The symbol sequences, in first-seen order.
    pub fn words(&self) -> &[Vec<u32>] {
        &self.words
    }
}

impl Default for SymbolCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate pair counts for one training round.
pub struct PairTally {
    counts: AHashMap<Pair, u64>,
    /// Pairs in first-encounter order, for deterministic tie-breaking
    order: Vec<Pair>,
}

impl PairTally {
    /// The pair with the strictly highest aggregate count. Equal counts
    /// resolve to the pair encountered first in enumeration order
    /// (sequences in first-seen order, pairs left to right), so
    /// selection is reproducible across runs.
    pub fn best(&self) -> Option<(Pair, u64)> {
        let mut best: Option<(Pair, u64)> = None;
        for &pair in &self.order {
            let count = self.counts.get(&pair).copied().unwrap_or(0);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((pair, count));
            }
        }
        best
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no adjacent pair exists at all.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The aggregate count for a pair.
    pub fn get(&self, pair: Pair) -> Option<u64> {
        self.counts.get(&pair).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_word_seeds_characters() {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();
        counter.add_word("ba", &mut vocab);

        assert_eq!(vocab.get_id("b"), Some(4));
        assert_eq!(vocab.get_id("a"), Some(5));
        assert_eq!(counter.words()[0].as_slice(), &[4, 5]);
    }

    #[test]
    fn test_repeated_word_increments_count() {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();
        counter.add_word("aa", &mut vocab);
        counter.add_word("aa", &mut vocab);

        assert_eq!(counter.word_count(), 1);

        let tally = counter.count_pairs();
        let a = vocab.get_id("a").unwrap();
        assert_eq!(tally.get((a, a)), Some(2));
    }

    #[test]
    fn test_count_pairs_weighted() {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();
        counter.add_word("aa", &mut vocab);
        counter.add_word("aa", &mut vocab);
        counter.add_word("ab", &mut vocab);

        let a = vocab.get_id("a").unwrap();
        let b = vocab.get_id("b").unwrap();
        let tally = counter.count_pairs();

        assert_eq!(tally.get((a, a)), Some(2));
        assert_eq!(tally.get((a, b)), Some(1));
        assert_eq!(tally.best(), Some(((a, a), 2)));
    }

    #[test]
    fn test_best_tie_breaks_on_first_encounter() {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();
        counter.add_word("cd", &mut vocab);
        counter.add_word("ab", &mut vocab);

        let c = vocab.get_id("c").unwrap();
        let d = vocab.get_id("d").unwrap();
        let tally = counter.count_pairs();

        // Both pairs count 1; (c, d) was enumerated first.
        assert_eq!(tally.best(), Some(((c, d), 1)));
    }

    #[test]
    fn test_merge_pair_is_non_overlapping() {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();
        counter.add_word("aaaa", &mut vocab);
        counter.add_word("aaa", &mut vocab);

        let a = vocab.get_id("a").unwrap();
        let merged = vocab.add_token("aa");
        counter.merge_pair((a, a), merged);

        assert_eq!(counter.words()[0].as_slice(), &[merged, merged]);
        assert_eq!(counter.words()[1].as_slice(), &[merged, a]);
    }

    #[test]
    fn test_single_symbol_words_have_no_pairs() {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();
        counter.add_word("a", &mut vocab);
        counter.add_word("b", &mut vocab);

        let tally = counter.count_pairs();
        assert!(tally.is_empty());
        assert_eq!(tally.best(), None);
    }
}
