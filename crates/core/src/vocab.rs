//! Vocabulary storage and lookup.
//!
//! This module provides the bidirectional token/id mapping used by every
//! other component, using `AHashMap` for fast lookups and `CompactString`
//! for memory-efficient piece storage. The forward map and the id-ordered
//! piece list are two views of one bijection and are only ever mutated
//! together, through the methods below.

use ahash::AHashMap;
use compact_str::CompactString;

/// Padding token, id 0 in a freshly initialized vocabulary.
pub const PAD_TOKEN: &str = "<pad>";
/// Unknown token, id 1 in a freshly initialized vocabulary.
pub const UNK_TOKEN: &str = "<unk>";
/// Start-of-sequence token, id 2 in a freshly initialized vocabulary.
pub const SOS_TOKEN: &str = "<sos>";
/// End-of-sequence token, id 3 in a freshly initialized vocabulary.
pub const EOS_TOKEN: &str = "<eos>";

/// The reserved tokens, in the fixed id order they are seeded in.
pub const RESERVED_TOKENS: [&str; 4] = [PAD_TOKEN, UNK_TOKEN, SOS_TOKEN, EOS_TOKEN];

/// Forward mapping: token string -> id.
pub type Vocab = AHashMap<CompactString, u32>;

/// Vocabulary with forward and reverse mappings.
///
/// Invariant: `pieces[vocab[t] as usize] == t` for every key `t`. Both
/// fields are private so the invariant cannot be broken from outside.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Forward mapping: token string -> id
    vocab: Vocab,
    /// Reverse mapping: id -> token string, insertion-ordered
    pieces: Vec<CompactString>,
    /// Special token ids (cached for fast access)
    special: SpecialTokens,
}

impl Vocabulary {
    /// Create a vocabulary pre-populated with the four reserved tokens
    /// at ids 0 through 3.
    pub fn new() -> Self {
        let mut vocab = Self::empty();
        vocab.ensure_specials();
        vocab
    }

    /// Create a vocabulary with no tokens at all, not even the reserved
    /// ones. Used when rebuilding from a saved token list, which defines
    /// every id itself.
    pub fn empty() -> Self {
        Self {
            vocab: Vocab::new(),
            pieces: Vec::new(),
            special: SpecialTokens::default(),
        }
    }

    /// Seed the four reserved tokens if the vocabulary is currently
    /// empty, then refresh the cached special-token ids. A non-empty
    /// vocabulary keeps its existing pieces untouched.
    pub fn ensure_specials(&mut self) {
        if self.pieces.is_empty() {
            for token in RESERVED_TOKENS {
                self.add_token(token);
            }
        }
        self.relink_specials();
    }

    /// Recompute the cached special-token ids by looking up the literal
    /// reserved strings. A reserved token missing from the vocabulary
    /// leaves its id unset. Both training and loading end with this.
    pub fn relink_specials(&mut self) {
        self.special = SpecialTokens {
            pad: self.get_id(PAD_TOKEN),
            unk: self.get_id(UNK_TOKEN),
            sos: self.get_id(SOS_TOKEN),
            eos: self.get_id(EOS_TOKEN),
        };
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the id assigned to the token, or the existing id if the
    /// token is already present.
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.vocab.get(token) {
            return id;
        }
        let id = self.pieces.len() as u32;
        let token = CompactString::new(token);
        self.pieces.push(token.clone());
        self.vocab.insert(token, id);
        id
    }

    /// Get the id for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an id.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.pieces.get(id as usize).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Copy of the piece list, in id order.
    pub fn snapshot(&self) -> Vec<String> {
        self.pieces.iter().map(|s| s.to_string()).collect()
    }

    /// Iterate over the pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().map(|s| s.as_str())
    }

    /// The cached special-token ids.
    #[inline]
    pub fn special(&self) -> SpecialTokens {
        self.special
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// Special token ids cached for fast access.
///
/// An id is `None` when the corresponding reserved token is not in the
/// vocabulary, which can only happen after loading a token list that
/// omits it. Callers must treat such lookups as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Padding token id
    pub pad: Option<u32>,
    /// Unknown token id
    pub unk: Option<u32>,
    /// Start-of-sequence token id
    pub sos: Option<u32>,
    /// End-of-sequence token id
    pub eos: Option<u32>,
}

impl SpecialTokens {
    /// Check if an id is one of the special tokens.
    #[inline]
    pub fn is_special(&self, id: u32) -> bool {
        Some(id) == self.pad || Some(id) == self.unk || Some(id) == self.sos || Some(id) == self.eos
    }
}
