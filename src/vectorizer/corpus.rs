use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::vectorizer::term::TermFrequency;

/// Document frequency statistics of one run
/// It does not store document text; it only keeps:
/// - the number of documents discovered on disk
/// - the number of documents that survived filtering
/// - the number of surviving documents each term appears in
///
/// The vocabulary is the key set of the document frequency map, ordered by
/// first appearance across the documents.
/// Built once with [`Corpus::from_documents`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    doc_num: u64,
    surviving_doc_num: u64,
    document_frequency: IndexMap<String, u64>,
}

impl Corpus {
    /// Fold the term sets of all surviving documents into document frequencies
    ///
    /// # Arguments
    /// * `documents` - term counts of every surviving document
    /// * `discovered` - number of files found, dropped ones included
    ///
    /// # Errors
    /// More surviving documents than discovered ones would let a document
    /// frequency exceed the IDF numerator, so it is rejected.
    pub fn from_documents<'a, I>(documents: I, discovered: u64) -> Result<Self>
    where
        I: IntoIterator<Item = &'a TermFrequency>,
    {
        let (surviving_doc_num, document_frequency) = documents.into_iter().fold(
            (0u64, IndexMap::<String, u64>::new()),
            |(n, mut df), doc| {
                for term in doc.term_set_iter() {
                    if let Some(count) = df.get_mut(term) {
                        *count += 1;
                    } else {
                        df.insert(term.to_string(), 1);
                    }
                }
                (n + 1, df)
            },
        );

        if surviving_doc_num > discovered {
            return Err(Error::invariant(format!(
                "{surviving_doc_num} documents supplied but only {discovered} discovered"
            )));
        }

        Ok(Self {
            doc_num: discovered,
            surviving_doc_num,
            document_frequency,
        })
    }

    /// Number of discovered documents (IDF numerator)
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents that contributed terms
    #[inline]
    pub fn surviving_doc_num(&self) -> u64 {
        self.surviving_doc_num
    }

    /// Number of documents containing `term`, 0 when unknown
    #[inline]
    pub fn document_frequency(&self, term: &str) -> u64 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn document_frequency_iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.document_frequency
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Vocabulary in first-appearance order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.document_frequency.keys().map(|s| s.as_str())
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.document_frequency.contains_key(term)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.document_frequency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let a = TermFrequency::from(&["苹果", "苹果", "香蕉"][..]);
        let b = TermFrequency::from(&["苹果", "橘子"][..]);
        let corpus = Corpus::from_documents([&a, &b], 2).unwrap();

        assert_eq!(corpus.document_frequency("苹果"), 2);
        assert_eq!(corpus.document_frequency("香蕉"), 1);
        assert_eq!(corpus.document_frequency("橘子"), 1);
        assert_eq!(corpus.document_frequency("葡萄"), 0);
        assert_eq!(corpus.vocabulary().collect::<Vec<_>>(), vec!["苹果", "香蕉", "橘子"]);
    }

    #[test]
    fn discovered_count_includes_dropped_documents() {
        let a = TermFrequency::from(&["苹果"][..]);
        let corpus = Corpus::from_documents([&a], 3).unwrap();
        assert_eq!(corpus.doc_num(), 3);
        assert_eq!(corpus.surviving_doc_num(), 1);
    }

    #[test]
    fn more_documents_than_discovered_is_rejected() {
        let a = TermFrequency::from(&["苹果"][..]);
        let b = TermFrequency::from(&["香蕉"][..]);
        let err = Corpus::from_documents([&a, &b], 1).unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn document_frequency_bounded_by_surviving() {
        let docs: Vec<TermFrequency> = (0..5)
            .map(|i| TermFrequency::from(&["共同", if i % 2 == 0 { "偶数" } else { "奇数" }][..]))
            .collect();
        let corpus = Corpus::from_documents(docs.iter(), 7).unwrap();
        for (_, df) in corpus.document_frequency_iter() {
            assert!(df >= 1 && df <= corpus.surviving_doc_num());
        }
        assert_eq!(corpus.document_frequency("共同"), 5);
    }

    #[test]
    fn empty_corpus() {
        let corpus = Corpus::from_documents(std::iter::empty(), 0).unwrap();
        assert_eq!(corpus.vocab_size(), 0);
        assert_eq!(corpus.surviving_doc_num(), 0);
    }
}
