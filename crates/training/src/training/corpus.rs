//! Line-oriented corpus reading.

use morsel_core::{Result, TokenizerError};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// Iterator over the lines of a corpus file.
///
/// Open and read failures both surface as `FileAccess` with the corpus
/// path attached.
#[derive(Debug)]
pub(crate) struct CorpusReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl CorpusReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| TokenizerError::file_access(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for CorpusReader {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .next()
            .map(|line| line.map_err(|e| TokenizerError::file_access(self.path.as_path(), e)))
    }
}
