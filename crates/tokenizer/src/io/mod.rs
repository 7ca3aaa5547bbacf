//! Persistence for trained vocabularies.
//!
//! The on-disk format is intentionally minimal: a UTF-8 text file with
//! one token per line, in id order, and nothing else. Merge provenance
//! is not recorded, which is sufficient for encoding and decoding but
//! not for resuming or extending training.

pub mod load;
pub mod save;

pub use load::load_vocab;
pub use save::save_vocab;
