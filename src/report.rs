//! Plain-text reports written at the end of a run.
//!
//! `tf-idf.txt` lists the top terms of each document:
//! ```text
//! === a.txt ===
//! 苹果: 1.3863
//! 香蕉: 0.6931
//!
//! ```
//! `frequency.txt` lists the most frequent terms of the whole corpus with
//! their share of all terms.

use std::fmt::{Display, Write as _};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::vectorizer::{term::TermFrequency, tfidf::Weight, weights::DocumentWeights};

/// Format a weight the way reports print it (4 decimal places)
#[inline]
pub fn format_weight<N: Display>(weight: N) -> String {
    format!("{weight:.4}")
}

/// Writes the per-document TF-IDF report
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    top_n: usize,
}

impl ReportWriter {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Render the report text for every document, in order
    pub fn render<N: Weight>(&self, documents: &[DocumentWeights<N>]) -> String {
        let mut out = String::new();
        for doc in documents {
            // writing into a String cannot fail
            let _ = writeln!(out, "=== {} ===", doc.key());
            for (term, weight) in doc.top_n(self.top_n) {
                let _ = writeln!(out, "{term}: {}", format_weight(weight));
            }
            out.push('\n');
        }
        out
    }

    /// Render and write the report to `path`, creating parent directories
    pub fn write<N: Weight, P: AsRef<Path>>(
        &self,
        path: P,
        documents: &[DocumentWeights<N>],
    ) -> Result<()> {
        write_text(path.as_ref(), &self.render(documents))
    }
}

/// Writes the corpus-wide term frequency report
#[derive(Debug, Clone, Copy)]
pub struct FrequencyReport {
    top_n: usize,
}

impl FrequencyReport {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn render(&self, frequency: &TermFrequency) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total words: {}", frequency.term_sum());
        for (term, count) in frequency.sorted_frequency_vector().into_iter().take(self.top_n) {
            let _ = writeln!(
                out,
                "{term} => {count} ({})",
                format_weight(frequency.probability(term))
            );
        }
        out
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, frequency: &TermFrequency) -> Result<()> {
        write_text(path.as_ref(), &self.render(frequency))
    }
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(path, text).map_err(|e| Error::io(path, e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
