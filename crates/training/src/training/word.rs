//! Word-level vocabulary training.

use crate::training::corpus::CorpusReader;
use ahash::AHashMap;
use compact_str::CompactString;
use morsel_core::{Result, Vocabulary};
use std::path::Path;

/// Trainer that builds a vocabulary from whole-word frequency counts.
pub struct WordLevelTrainer {
    /// Number of corpus tokens to add beyond the reserved ones
    vocab_size: usize,
}

impl WordLevelTrainer {
    /// Create a trainer that keeps the `vocab_size` most frequent words.
    pub fn new(vocab_size: usize) -> Self {
        Self { vocab_size }
    }

    /// Train on the given corpus file and return the new vocabulary.
    ///
    /// Distinct whitespace-delimited tokens are ranked by descending
    /// corpus frequency; equal counts are ordered lexicographically so
    /// repeated runs produce identical vocabularies. Exactly
    /// `vocab_size` corpus tokens are added after the reserved ones
    /// (fewer if the corpus is smaller), then every user-defined symbol
    /// not already present, uncapped by `vocab_size`.
    pub fn train(&self, corpus: &Path, user_symbols: &[String]) -> Result<Vocabulary> {
        let mut freqs: AHashMap<CompactString, u64> = AHashMap::new();
        for line in CorpusReader::open(corpus)? {
            for word in line?.split_whitespace() {
                *freqs.entry(CompactString::new(word)).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(CompactString, u64)> = freqs.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        log::debug!(
            "word-level training: ranked {} distinct tokens, keeping up to {}",
            ranked.len(),
            self.vocab_size
        );

        let mut vocab = Vocabulary::new();
        let mut remaining = self.vocab_size;
        for (token, _) in &ranked {
            if remaining == 0 {
                break;
            }
            // Tokens whose text collides with a reserved token are
            // already present and do not consume a slot.
            if vocab.get_id(token).is_none() {
                vocab.add_token(token);
                remaining -= 1;
            }
        }

        for symbol in user_symbols {
            vocab.add_token(symbol);
        }

        Ok(vocab)
    }
}
