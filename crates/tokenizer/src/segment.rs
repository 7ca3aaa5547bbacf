//! Greedy longest-match segmentation.

use crate::tokenizer::EncodingMode;
use morsel_core::{Vocabulary, UNK_TOKEN};

/// Read-only view over a vocabulary that encodes and decodes text.
///
/// Segmentation is pure: given a fixed vocabulary and mode, identical
/// input always yields identical output. BPE segmentation is greedy and
/// non-backtracking, which trades a possibly non-minimal token count
/// for a single left-to-right scan.
pub struct Segmenter<'a> {
    vocab: &'a Vocabulary,
    mode: EncodingMode,
}

impl<'a> Segmenter<'a> {
    /// Borrow a vocabulary for segmentation in the given mode.
    pub fn new(vocab: &'a Vocabulary, mode: EncodingMode) -> Self {
        Self { vocab, mode }
    }

    /// Encode text to vocabulary ids.
    ///
    /// `Word` mode maps each whitespace-delimited word to its id,
    /// falling back to `<unk>`. `Bpe` mode scans the raw text left to
    /// right with no pre-splitting, emitting the longest vocabulary
    /// piece starting at each position; a character matching no piece
    /// emits `<unk>` and the scan advances exactly one character.
    ///
    /// When the vocabulary has no `<unk>` anchor (possible only after
    /// loading a token list without it), unmatchable input has no id to
    /// map to and is dropped from the output.
    pub fn encode_as_ids(&self, text: &str) -> Vec<u32> {
        let unk = self.vocab.special().unk;
        match self.mode {
            EncodingMode::Word => text
                .split_whitespace()
                .filter_map(|word| self.vocab.get_id(word).or(unk))
                .collect(),
            EncodingMode::Bpe => {
                let mut ids = Vec::new();
                let mut rest = text;
                while let Some(c) = rest.chars().next() {
                    match self.longest_piece(rest) {
                        Some((len, id)) => {
                            ids.push(id);
                            rest = &rest[len..];
                        }
                        None => {
                            if let Some(unk) = unk {
                                ids.push(unk);
                            }
                            rest = &rest[c.len_utf8()..];
                        }
                    }
                }
                ids
            }
        }
    }

    /// Encode text to piece strings; unknown positions yield the
    /// literal `<unk>` text.
    pub fn encode_as_tokens(&self, text: &str) -> Vec<String> {
        match self.mode {
            EncodingMode::Word => text
                .split_whitespace()
                .map(|word| {
                    if self.vocab.get_id(word).is_some() {
                        word.to_string()
                    } else {
                        UNK_TOKEN.to_string()
                    }
                })
                .collect(),
            EncodingMode::Bpe => {
                let mut tokens = Vec::new();
                let mut rest = text;
                while let Some(c) = rest.chars().next() {
                    match self.longest_piece(rest) {
                        Some((len, _)) => {
                            tokens.push(rest[..len].to_string());
                            rest = &rest[len..];
                        }
                        None => {
                            tokens.push(UNK_TOKEN.to_string());
                            rest = &rest[c.len_utf8()..];
                        }
                    }
                }
                tokens
            }
        }
    }

    /// Decode ids back to text. `Word` mode joins pieces with single
    /// spaces, no leading or trailing space; `Bpe` mode concatenates
    /// them. Out-of-range ids render as the literal `<unk>` text.
    pub fn decode_ids(&self, ids: &[u32]) -> String {
        self.join(
            ids.iter()
                .map(|&id| self.vocab.get_token(id).unwrap_or(UNK_TOKEN)),
        )
    }

    /// Decode piece strings back to text; strings not in the vocabulary
    /// render as the literal `<unk>` text.
    pub fn decode_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut text = String::new();
        for token in tokens {
            let token = token.as_ref();
            let piece = if self.vocab.get_id(token).is_some() {
                token
            } else {
                UNK_TOKEN
            };
            if self.mode == EncodingMode::Word && !text.is_empty() {
                text.push(' ');
            }
            text.push_str(piece);
        }
        text
    }

    fn join<'t>(&self, pieces: impl Iterator<Item = &'t str>) -> String {
        let mut text = String::new();
        for piece in pieces {
            if self.mode == EncodingMode::Word && !text.is_empty() {
                text.push(' ');
            }
            text.push_str(piece);
        }
        text
    }

    /// The longest vocabulary piece at the start of `rest`, shrinking
    /// character by character from the whole remaining text down to a
    /// single character. Returns the byte length and id of the match.
    fn longest_piece(&self, rest: &str) -> Option<(usize, u32)> {
        let mut end = rest.len();
        while end > 0 {
            if let Some(id) = self.vocab.get_id(&rest[..end]) {
                return Some((end, id));
            }
            end = match rest[..end].char_indices().next_back() {
                Some((i, _)) => i,
                None => 0,
            };
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_with(pieces: &[&str]) -> Vocabulary {
        let mut vocab = Vocabulary::new();
        for piece in pieces {
            vocab.add_token(piece);
        }
        vocab
    }

    #[test]
    fn test_word_encode_decode_roundtrip() {
        let vocab = vocab_with(&["hello", "world"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Word);

        let ids = segmenter.encode_as_ids("hello   world");
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(segmenter.decode_ids(&ids), "hello world");
    }

    #[test]
    fn test_word_unknown_maps_to_unk() {
        let vocab = vocab_with(&["hello"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Word);

        assert_eq!(segmenter.encode_as_ids("hello there"), vec![4, 1]);
        assert_eq!(
            segmenter.encode_as_tokens("hello there"),
            vec!["hello".to_string(), UNK_TOKEN.to_string()]
        );
    }

    #[test]
    fn test_bpe_prefers_longest_match() {
        let vocab = vocab_with(&["a", "b", "ab", "abc"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Bpe);

        let tokens = segmenter.encode_as_tokens("abcab");
        assert_eq!(tokens, vec!["abc".to_string(), "ab".to_string()]);
    }

    #[test]
    fn test_bpe_unknown_char_advances_one() {
        let vocab = vocab_with(&["a", "b"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Bpe);

        assert_eq!(segmenter.encode_as_ids("a!b"), vec![4, 1, 5]);
        assert_eq!(
            segmenter.encode_as_tokens("a!b"),
            vec!["a".to_string(), UNK_TOKEN.to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_bpe_unknown_multibyte_char_advances_one() {
        let vocab = vocab_with(&["a"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Bpe);

        // é is two bytes; the scan must advance a full character.
        assert_eq!(segmenter.encode_as_ids("aéa"), vec![4, 1, 4]);
    }

    #[test]
    fn test_bpe_decode_concatenates() {
        let vocab = vocab_with(&["ab", "cd"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Bpe);

        assert_eq!(segmenter.decode_ids(&[4, 5]), "abcd");
    }

    #[test]
    fn test_decode_out_of_range_renders_unk() {
        let vocab = vocab_with(&["ab"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Bpe);

        assert_eq!(segmenter.decode_ids(&[4, 999]), format!("ab{UNK_TOKEN}"));
    }

    #[test]
    fn test_decode_tokens_unknown_renders_unk() {
        let vocab = vocab_with(&["hello"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Word);

        let decoded = segmenter.decode_tokens(&["hello", "there"]);
        assert_eq!(decoded, format!("hello {UNK_TOKEN}"));
    }

    #[test]
    fn test_empty_input_encodes_to_nothing() {
        let vocab = vocab_with(&["a"]);

        for mode in [EncodingMode::Word, EncodingMode::Bpe] {
            let segmenter = Segmenter::new(&vocab, mode);
            assert!(segmenter.encode_as_ids("").is_empty());
            assert!(segmenter.encode_as_tokens("").is_empty());
        }
    }

    #[test]
    fn test_bpe_roundtrip_exact_when_fully_covered() {
        let vocab = vocab_with(&["a", "b", "ab"]);
        let segmenter = Segmenter::new(&vocab, EncodingMode::Bpe);

        let text = "abba";
        let ids = segmenter.encode_as_ids(text);
        assert_eq!(segmenter.decode_ids(&ids), text);
    }
}
