//! Morsel-training - vocabulary training algorithms
//!
//! This crate derives a vocabulary from a text corpus, either by ranking
//! whole words by frequency or by byte-pair-encoding merges.
//!
//! # Features
//!
//! - Exact whole-corpus frequency counting with `AHashMap`
//! - Deterministic tie-breaking, so identical inputs train identical
//!   vocabularies
//! - A configurable merge ceiling bounding BPE training cost
//!
//! # Example
//!
//! ```rust,no_run
//! use morsel_training::BpeTrainer;
//! use std::path::Path;
//!
//! let trainer = BpeTrainer::with_vocab_size(8_000);
//! let vocab = trainer.train(Path::new("corpus.txt"), &[])?;
//! println!("trained {} pieces", vocab.len());
//! # Ok::<(), morsel_training::TokenizerError>(())
//! ```

pub use morsel_core::{Result, TokenizerError};

pub mod training;
pub use training::{BpeTrainer, Pair, PairTally, SymbolCounter, TrainingConfig, WordLevelTrainer};
