//! Word segmentation for text without whitespace between words.
//!
//! Segmenters receive text that was already cleaned: runs of Chinese
//! characters separated by single spaces. They never emit a term that spans
//! a space.
//!
//! # Available Segmenters
//!
//! - [`WhitespaceSegmenter`] - splits on whitespace only
//! - [`LinderaSegmenter`] - dictionary-based morphological analysis (CC-CEDICT)
//! - [`MaxMatchSegmenter`] - forward maximum matching against a word list

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;

use crate::error::{Error, Result};

/// Longest dictionary word tried by [`MaxMatchSegmenter`], in characters.
pub const MAX_WORD_CHARS: usize = 7;

/// Trait for word segmenters used by the [`Tokenizer`](super::tokenizer::Tokenizer).
///
/// # Examples
///
/// ```
/// use tfidf_cloud::analysis::segmenter::{Segmenter, WhitespaceSegmenter};
///
/// let segmenter = WhitespaceSegmenter;
/// assert_eq!(segmenter.segment("苹果 香蕉"), vec!["苹果", "香蕉"]);
/// ```
pub trait Segmenter: Send + Sync {
    /// Split `text` into terms, in text order.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this segmenter (for logging).
    fn name(&self) -> &'static str;
}

/// Splits on whitespace and nothing else.
/// Suited to corpora that were segmented upstream, and to tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Default dictionary of [`LinderaSegmenter`].
pub const DEFAULT_DICTIONARY_URI: &str = "embedded://cc-cedict";

/// Morphological segmenter backed by Lindera.
///
/// With the embedded CC-CEDICT dictionary this splits Chinese text into
/// dictionary words, e.g. `能够进行汉语的形态素解析` into
/// 能够/进行/汉语/的/形态/素/解析.
pub struct LinderaSegmenter {
    inner: lindera::segmenter::Segmenter,
}

impl LinderaSegmenter {
    /// Create a segmenter over the embedded CC-CEDICT dictionary
    pub fn new() -> Result<Self> {
        Self::with_dictionary("normal", DEFAULT_DICTIONARY_URI)
    }

    /// Create a segmenter with an explicit Lindera mode and dictionary URI
    pub fn with_dictionary(mode_str: &str, dict_uri: &str) -> Result<Self> {
        let mode = Mode::from_str(mode_str)
            .map_err(|e| Error::analysis(format!("Invalid mode '{mode_str}': {e}")))?;
        let dict = load_dictionary(dict_uri)
            .map_err(|e| Error::analysis(format!("Failed to load dictionary {dict_uri}: {e}")))?;
        let inner = lindera::segmenter::Segmenter::new(mode, dict, None);
        Ok(Self { inner })
    }
}

impl Segmenter for LinderaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let tokens = match self.inner.segment(Cow::Borrowed(text)) {
            Ok(tokens) => tokens,
            Err(e) => {
                log::warn!("failed to segment text: {e}");
                return Vec::new();
            }
        };
        tokens
            .iter()
            .filter_map(|token| text.get(token.byte_start..token.byte_end))
            .filter(|term| !term.trim().is_empty())
            .collect()
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

impl std::fmt::Debug for LinderaSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinderaSegmenter").finish_non_exhaustive()
    }
}

/// Forward maximum matching segmenter.
///
/// At each position the longest dictionary word starting there is taken,
/// trying at most [`MAX_WORD_CHARS`] characters. A character that starts no
/// dictionary word becomes a single-character term.
#[derive(Clone, Debug, Default)]
pub struct MaxMatchSegmenter {
    dictionary: HashSet<String>,
    /// longest word in the dictionary, capped at MAX_WORD_CHARS
    max_chars: usize,
}

impl MaxMatchSegmenter {
    /// Create a segmenter from a word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        let max_chars = dictionary
            .iter()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(1)
            .min(MAX_WORD_CHARS);
        Self {
            dictionary,
            max_chars,
        }
    }

    /// Load a dictionary file, one word per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;
        let segmenter = Self::from_words(text.lines());
        log::info!(
            "loaded {} dictionary words from {}",
            segmenter.len(),
            path.display()
        );
        Ok(segmenter)
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    fn segment_run<'a>(&self, run: &'a str, terms: &mut Vec<&'a str>) {
        let bounds = char_bounds(run);
        let chars = bounds.len() - 1;
        let mut start = 0;
        while start < chars {
            let longest = self.max_chars.min(chars - start);
            let matched = (2..=longest)
                .rev()
                .map(|len| &run[bounds[start]..bounds[start + len]])
                .position(|candidate| self.dictionary.contains(candidate))
                .map(|rev_idx| longest - rev_idx);
            let len = matched.unwrap_or(1);
            terms.push(&run[bounds[start]..bounds[start + len]]);
            start += len;
        }
    }
}

impl Segmenter for MaxMatchSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut terms = Vec::new();
        for run in text.split_whitespace() {
            self.segment_run(run, &mut terms);
        }
        terms
    }

    fn name(&self) -> &'static str {
        "max-match"
    }
}

/// Byte offsets of every char boundary, end of string included
fn char_bounds(s: &str) -> Vec<usize> {
    s.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .collect()
}
