//! The tokenizer model object.
//!
//! `TokenizerModel` owns one vocabulary store behind a single exclusive
//! lock; every public operation acquires the lock once for its whole
//! duration, so operations on one model are serialized and never
//! interleave. Internal helpers never call back into public operations,
//! so nested use from one logical task cannot deadlock. Separate model
//! instances share nothing and may be used concurrently.

use crate::io;
use crate::segment::Segmenter;
use morsel_core::{Result, Vocabulary};
use morsel_training::{BpeTrainer, TrainingConfig, WordLevelTrainer};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Segmentation mode, fixed by training.
///
/// The model file format carries no metadata, so a caller restoring a
/// saved vocabulary selects the mode explicitly with
/// [`TokenizerModel::set_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMode {
    /// One token per whitespace-delimited word
    #[default]
    Word,
    /// Greedy longest-match over the raw text
    Bpe,
}

/// Configuration for building a tokenizer model.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Ceiling on BPE merge iterations
    pub max_merges: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { max_merges: 50_000 }
    }
}

struct ModelState {
    vocab: Vocabulary,
    mode: EncodingMode,
}

/// Vocabulary-construction and text-segmentation model.
///
/// # Example
///
/// ```rust,no_run
/// use morsel_tokenizer::{EncodingMode, TokenizerModel};
///
/// let model = TokenizerModel::new();
/// model.train("corpus.txt", 8_000, &[], EncodingMode::Bpe)?;
///
/// let ids = model.encode_as_ids("some text");
/// assert_eq!(model.decode_ids(&ids), "some text");
///
/// model.save("model.vocab")?;
/// # Ok::<(), morsel_tokenizer::TokenizerError>(())
/// ```
pub struct TokenizerModel {
    config: TokenizerConfig,
    state: Mutex<ModelState>,
}

impl TokenizerModel {
    /// Create a model with a fresh vocabulary (the four reserved tokens
    /// at ids 0 through 3) and the default configuration.
    pub fn new() -> Self {
        Self::with_config(TokenizerConfig::default())
    }

    /// Create a model with the given configuration.
    pub fn with_config(config: TokenizerConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ModelState {
                vocab: Vocabulary::new(),
                mode: EncodingMode::default(),
            }),
        }
    }

    // Every mutation behind the lock is a whole-value swap, so a
    // poisoned lock still hands back consistent state.
    fn state(&self) -> MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Train a new vocabulary from a text corpus, replacing the current
    /// one wholesale and fixing the segmentation mode.
    ///
    /// In `Word` mode, `vocab_size` is the number of corpus words kept
    /// beyond the reserved tokens; in `Bpe` mode it is the target total
    /// vocabulary size. User-defined symbols are always appended, even
    /// past `vocab_size`.
    pub fn train(
        &self,
        corpus: impl AsRef<Path>,
        vocab_size: usize,
        user_symbols: &[String],
        mode: EncodingMode,
    ) -> Result<()> {
        let mut state = self.state();
        state.vocab = match mode {
            EncodingMode::Word => {
                WordLevelTrainer::new(vocab_size).train(corpus.as_ref(), user_symbols)?
            }
            EncodingMode::Bpe => BpeTrainer::new(TrainingConfig {
                vocab_size,
                max_merges: self.config.max_merges,
            })
            .train(corpus.as_ref(), user_symbols)?,
        };
        state.mode = mode;
        Ok(())
    }

    /// Write the vocabulary to `path`, one token per line in id order.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let state = self.state();
        io::save_vocab(&state.vocab, path.as_ref())
    }

    /// Replace the vocabulary wholesale from a saved token list.
    ///
    /// The segmentation mode is not stored in the file and stays as it
    /// was; use [`set_mode`](Self::set_mode) when restoring a BPE model.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut state = self.state();
        state.vocab = io::load_vocab(path.as_ref())?;
        Ok(())
    }

    /// Encode text to vocabulary ids.
    pub fn encode_as_ids(&self, text: &str) -> Vec<u32> {
        let state = self.state();
        Segmenter::new(&state.vocab, state.mode).encode_as_ids(text)
    }

    /// Encode text to piece strings.
    pub fn encode_as_tokens(&self, text: &str) -> Vec<String> {
        let state = self.state();
        Segmenter::new(&state.vocab, state.mode).encode_as_tokens(text)
    }

    /// Decode ids back to text.
    pub fn decode_ids(&self, ids: &[u32]) -> String {
        let state = self.state();
        Segmenter::new(&state.vocab, state.mode).decode_ids(ids)
    }

    /// Decode piece strings back to text.
    pub fn decode_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let state = self.state();
        Segmenter::new(&state.vocab, state.mode).decode_tokens(tokens)
    }

    /// The id for a token, or the `<unk>` id for an unknown token.
    ///
    /// Returns `None` only when the vocabulary has no `<unk>` anchor,
    /// which can only happen after loading a token list without it.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        let state = self.state();
        state.vocab.get_id(token).or(state.vocab.special().unk)
    }

    /// The token at `id`, or the `<unk>` piece for an out-of-range id.
    ///
    /// Returns `None` under the same condition as
    /// [`token_to_id`](Self::token_to_id).
    pub fn id_to_token(&self, id: u32) -> Option<String> {
        let state = self.state();
        state
            .vocab
            .get_token(id)
            .or_else(|| {
                state
                    .vocab
                    .special()
                    .unk
                    .and_then(|unk| state.vocab.get_token(unk))
            })
            .map(|s| s.to_string())
    }

    /// Current vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.state().vocab.len()
    }

    /// Copy of the vocabulary pieces, in id order.
    pub fn vocab_snapshot(&self) -> Vec<String> {
        self.state().vocab.snapshot()
    }

    /// The active segmentation mode.
    pub fn mode(&self) -> EncodingMode {
        self.state().mode
    }

    /// Select the segmentation mode, typically after
    /// [`load`](Self::load).
    pub fn set_mode(&self, mode: EncodingMode) {
        self.state().mode = mode;
    }
}

impl Default for TokenizerModel {
    fn default() -> Self {
        Self::new()
    }
}
