//! Morsel-core - Vocabulary store for the morsel tokenizer
//!
//! This crate provides the shared data model for vocabulary construction
//! and text segmentation: the bidirectional token/id mapping, the
//! reserved special tokens, and the library error type.
//!
//! # Features
//!
//! - Efficient vocabulary storage using `AHashMap` and compact strings
//! - Reserved `<pad>`/`<unk>`/`<sos>`/`<eos>` tokens at fixed low ids
//! - Error handling with file context
//!
//! # Example
//!
//! ```rust
//! use morsel_core::Vocabulary;
//!
//! let mut vocab = Vocabulary::new();
//! let id = vocab.add_token("hello");
//! assert_eq!(vocab.get_token(id), Some("hello"));
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod vocab;
pub use vocab::{
    SpecialTokens, Vocab, Vocabulary, EOS_TOKEN, PAD_TOKEN, RESERVED_TOKENS, SOS_TOKEN, UNK_TOKEN,
};
