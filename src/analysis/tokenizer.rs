//! Text cleaning and segmentation.

use regex::Regex;

use crate::analysis::segmenter::Segmenter;
use crate::error::Result;

/// File-path annotations left in the corpus by the tool that exported it.
const ANNOTATION_PATTERN: &str = r"// filepath:.*";

/// Any run of characters outside the CJK Unified Ideographs range U+4E00..=U+9FA5.
const FOREIGN_RUN_PATTERN: &str = r"[^\x{4E00}-\x{9FA5}]+";

/// Cleans raw document text and hands it to a [`Segmenter`].
///
/// Cleaning removes file-path annotations, then replaces every run of
/// non-Chinese characters (punctuation, digits, Latin letters, newlines)
/// with one space so no term can span a script boundary.
pub struct Tokenizer {
    annotation: Regex,
    foreign_run: Regex,
    segmenter: Box<dyn Segmenter>,
}

impl Tokenizer {
    pub fn new(segmenter: Box<dyn Segmenter>) -> Result<Self> {
        Ok(Self {
            annotation: Regex::new(ANNOTATION_PATTERN)?,
            foreign_run: Regex::new(FOREIGN_RUN_PATTERN)?,
            segmenter,
        })
    }

    /// Name of the underlying segmenter
    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }

    /// Strip annotations and non-Chinese runs
    pub fn clean(&self, text: &str) -> String {
        let without_annotations = self.annotation.replace_all(text, "");
        self.foreign_run
            .replace_all(&without_annotations, " ")
            .into_owned()
    }

    /// Clean and segment `text` into candidate terms
    /// Empty or all-noise text gives an empty vector.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);
        self.segmenter
            .segment(&cleaned)
            .into_iter()
            .filter(|term| !term.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("segmenter", &self.segmenter.name())
            .finish()
    }
}
