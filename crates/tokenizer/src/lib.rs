//! Morsel-tokenizer - high-level tokenizer API
//!
//! This crate ties the vocabulary store and the trainers together into a
//! single model object exposing training, encoding, decoding, and
//! persistence.
//!
//! # Features
//!
//! - Word-level and BPE vocabulary construction from a text corpus
//! - Greedy longest-match segmentation, identical for both trainers
//! - Newline-delimited vocabulary persistence
//! - One exclusive lock per operation; models are `Send + Sync`
//!
//! # Example
//!
//! ```rust,no_run
//! use morsel_tokenizer::{EncodingMode, TokenizerModel};
//!
//! let model = TokenizerModel::new();
//! model.train("corpus.txt", 10_000, &[], EncodingMode::Word)?;
//!
//! let ids = model.encode_as_ids("hello world");
//! println!("{}", model.decode_ids(&ids));
//! # Ok::<(), morsel_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use morsel_core::{Result, SpecialTokens, TokenizerError, Vocabulary};

// Model API
pub mod tokenizer;
pub use tokenizer::{EncodingMode, TokenizerConfig, TokenizerModel};

// Segmentation
pub mod segment;
pub use segment::Segmenter;

// Persistence
pub mod io;
pub use io::{load_vocab, save_vocab};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
