//! Training algorithms for vocabulary construction.
//!
//! Two trainers are provided: word-level (whole-word frequency ranking)
//! and BPE (iterative pair merging). Both read a corpus file, build a
//! fresh vocabulary with the reserved tokens at ids 0 through 3, and
//! append user-defined symbols last.

mod corpus;

pub mod bpe;
pub mod counter;
pub mod word;

pub use bpe::{BpeTrainer, TrainingConfig};
pub use counter::{Pair, PairTally, SymbolCounter};
pub use word::WordLevelTrainer;
