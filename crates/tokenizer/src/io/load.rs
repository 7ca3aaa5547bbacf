//! Loading a saved vocabulary from disk.

use morsel_core::{Result, TokenizerError, Vocabulary};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Rebuild a vocabulary from a newline-delimited token list.
///
/// Lines are assigned sequential ids starting at 0 in file order,
/// skipping empty lines. Duplicate lines collapse to their first
/// occurrence, keeping the token/id mapping a bijection. The special
/// token ids are then relinked by literal lookup; a reserved token
/// absent from the file leaves its cached id unset.
pub fn load_vocab(path: &Path) -> Result<Vocabulary> {
    let file = File::open(path).map_err(|e| TokenizerError::file_access(path, e))?;

    let mut vocab = Vocabulary::empty();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| TokenizerError::file_access(path, e))?;
        if !line.is_empty() {
            vocab.add_token(&line);
        }
    }
    vocab.relink_specials();

    Ok(vocab)
}
