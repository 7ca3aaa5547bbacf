//! BPE vocabulary training.
//!
//! Iteratively merges the most frequent adjacent symbol pair across the
//! corpus until the vocabulary reaches its target size, the merge
//! ceiling is hit, or no adjacent pair remains.

use crate::training::corpus::CorpusReader;
use crate::training::counter::{Pair, SymbolCounter};
use compact_str::CompactString;
use morsel_core::{Result, Vocabulary};
use std::path::Path;

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target total vocabulary size, reserved tokens included
    pub vocab_size: usize,
    /// Ceiling on merge iterations, the safety valve against
    /// pathological corpora that would otherwise merge unboundedly
    pub max_merges: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 10_000,
            max_merges: 50_000,
        }
    }
}

/// BPE trainer.
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a trainer with the given target size and default ceiling.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Train on the given corpus file and return the new vocabulary.
    ///
    /// Every distinct whitespace token becomes a sequence of
    /// single-character symbols carrying its corpus-wide occurrence
    /// count; characters are seeded into the vocabulary in first-seen
    /// order. Each round tallies all adjacent pairs, picks the most
    /// frequent one (ties resolve to the pair encountered first in
    /// enumeration order), appends its concatenation if new, and
    /// rewrites the sequences. User-defined symbols are appended last,
    /// uncapped by the target size.
    pub fn train(&self, corpus: &Path, user_symbols: &[String]) -> Result<Vocabulary> {
        let mut vocab = Vocabulary::new();
        let mut counter = SymbolCounter::new();

        for line in CorpusReader::open(corpus)? {
            for word in line?.split_whitespace() {
                counter.add_word(word, &mut vocab);
            }
        }

        let mut merges_done = 0;
        while vocab.len() < self.config.vocab_size && merges_done < self.config.max_merges {
            let tally = counter.count_pairs();
            let Some((pair, _count)) = tally.best() else {
                break;
            };

            let merged = merged_piece(&vocab, pair);
            let new_id = vocab.add_token(&merged);
            counter.merge_pair(pair, new_id);
            merges_done += 1;
        }

        log::debug!(
            "bpe training finished after {} merges, vocabulary size {}",
            merges_done,
            vocab.len()
        );

        for symbol in user_symbols {
            vocab.add_token(symbol);
        }

        Ok(vocab)
    }
}

/// Concatenation of the two pieces of a pair.
fn merged_piece(vocab: &Vocabulary, pair: Pair) -> CompactString {
    let mut piece = CompactString::new(vocab.get_token(pair.0).unwrap_or(""));
    piece.push_str(vocab.get_token(pair.1).unwrap_or(""));
    piece
}

#[cfg(test)]
mod tests {
    use super::*;
    use morsel_core::TokenizerError;
    use std::path::PathBuf;

    fn write_corpus(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_first_merge_is_most_frequent_pair() {
        let path = write_corpus("morsel_test_bpe_first.txt", "aa aa ab\n");
        let vocab = BpeTrainer::with_vocab_size(7).train(&path, &[]).unwrap();

        // Seeds a and b in first-seen order, then one merge.
        assert_eq!(
            &vocab.snapshot()[4..],
            &["a".to_string(), "b".to_string(), "aa".to_string()]
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_merging_stops_when_no_pairs_remain() {
        let path = write_corpus("morsel_test_bpe_exhaust.txt", "ab ab\n");
        let vocab = BpeTrainer::with_vocab_size(100).train(&path, &[]).unwrap();

        // "ab" collapses to a single symbol and no pair is left.
        assert_eq!(
            &vocab.snapshot()[4..],
            &["a".to_string(), "b".to_string(), "ab".to_string()]
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_merge_ceiling_bounds_training() {
        let path = write_corpus("morsel_test_bpe_ceiling.txt", "abc abc\n");
        let trainer = BpeTrainer::new(TrainingConfig {
            vocab_size: 100,
            max_merges: 1,
        });
        let vocab = trainer.train(&path, &[]).unwrap();

        // Pairs (a,b) and (b,c) both count 2; (a,b) is enumerated first.
        assert_eq!(vocab.get_id("ab"), Some(7));
        assert_eq!(vocab.get_id("abc"), None);
        assert_eq!(vocab.len(), 8);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_longer_tokens_build_on_earlier_ones() {
        let path = write_corpus("morsel_test_bpe_chain.txt", "abab abab abab\n");
        let vocab = BpeTrainer::with_vocab_size(20).train(&path, &[]).unwrap();

        // Every multi-character piece concatenates two earlier pieces.
        let ab = vocab.get_id("ab").unwrap();
        let abab = vocab.get_id("abab").unwrap();
        assert!(ab < abab);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_user_symbols_appended_uncapped() {
        let path = write_corpus("morsel_test_bpe_user.txt", "ab ab\n");
        let symbols = vec!["<sep>".to_string(), "a".to_string()];
        let vocab = BpeTrainer::with_vocab_size(6).train(&path, &symbols).unwrap();

        assert!(vocab.get_id("<sep>").is_some());
        // "a" is already seeded and keeps its original id.
        assert_eq!(vocab.get_id("a"), Some(4));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_target_size_already_met_by_seeding() {
        let path = write_corpus("morsel_test_bpe_small.txt", "abc abc\n");
        let vocab = BpeTrainer::with_vocab_size(4).train(&path, &[]).unwrap();

        // Only specials and the seeded characters, no merges.
        assert_eq!(vocab.len(), 7);
        assert_eq!(vocab.get_id("ab"), None);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_training_is_deterministic() {
        let path = write_corpus("morsel_test_bpe_det.txt", "abc bcd cde abc\n");
        let trainer = BpeTrainer::with_vocab_size(12);

        let first = trainer.train(&path, &[]).unwrap();
        let second = trainer.train(&path, &[]).unwrap();
        assert_eq!(first.snapshot(), second.snapshot());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_corpus_is_file_access() {
        let err = BpeTrainer::with_vocab_size(10)
            .train(Path::new("/no/such/morsel_bpe_corpus.txt"), &[])
            .unwrap_err();
        assert!(matches!(err, TokenizerError::FileAccess { .. }));
    }
}
