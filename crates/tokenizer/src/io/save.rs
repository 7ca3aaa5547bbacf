//! Saving a trained vocabulary to disk.

use morsel_core::{Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the vocabulary to `path` as a newline-delimited token list,
/// one piece per line in id order, UTF-8, with no header or metadata.
///
/// A piece containing a newline cannot round-trip through this format;
/// its halves load back as separate tokens.
pub fn save_vocab(vocab: &Vocabulary, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| TokenizerError::file_access(path, e))?;
    let mut writer = BufWriter::new(file);

    for piece in vocab.pieces() {
        writeln!(writer, "{piece}").map_err(|e| TokenizerError::file_access(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| TokenizerError::file_access(path, e))?;

    Ok(())
}
