use indexmap::IndexMap;

use crate::utils::sort::top_n_desc;
use crate::vectorizer::tfidf::Weight;

/// Raw count and TF-IDF weight of one term in one document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermWeight<N> {
    pub count: u64,
    pub weight: N,
}

/// TF-IDF weights of one document
/// Dense over the whole vocabulary; terms absent from the document carry
/// count 0 and weight 0.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWeights<N>
where
    N: Weight,
{
    key: String,
    weights: IndexMap<String, TermWeight<N>>,
}

impl<N> DocumentWeights<N>
where
    N: Weight,
{
    pub fn new<S: Into<String>>(key: S, weights: IndexMap<String, TermWeight<N>>) -> Self {
        Self {
            key: key.into(),
            weights,
        }
    }

    /// Document name (file name)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Weight of `term`, 0 outside the vocabulary
    #[inline]
    pub fn weight(&self, term: &str) -> N {
        self.weights
            .get(term)
            .map(|tw| tw.weight)
            .unwrap_or_else(N::zero)
    }

    #[inline]
    pub fn count(&self, term: &str) -> u64 {
        self.weights.get(term).map(|tw| tw.count).unwrap_or(0)
    }

    /// All vocabulary entries in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, TermWeight<N>)> {
        self.weights.iter().map(|(term, &tw)| (term.as_str(), tw))
    }

    /// Vocabulary size this document was scored against
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of vocabulary terms that occur in this document
    pub fn present_terms(&self) -> usize {
        self.weights.values().filter(|tw| tw.count > 0).count()
    }

    /// Highest weighted terms occurring in this document
    /// Absent terms are skipped even when every present term weighs less
    /// than zero. Ties keep vocabulary order.
    pub fn top_n(&self, n: usize) -> Vec<(&str, N)> {
        let present = self
            .weights
            .iter()
            .filter(|(_, tw)| tw.count > 0)
            .map(|(term, tw)| (term.as_str(), tw.weight))
            .collect();
        top_n_desc(present, n)
    }

    /// Weights of present terms only, for rendering
    pub fn present_weights(&self) -> IndexMap<String, N> {
        self.weights
            .iter()
            .filter(|(_, tw)| tw.count > 0)
            .map(|(term, tw)| (term.clone(), tw.weight))
            .collect()
    }
}

/// Corpus-wide sum of every document's weight per term
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedWeights<N>
where
    N: Weight,
{
    weights: IndexMap<String, N>,
}

impl<N> CombinedWeights<N>
where
    N: Weight,
{
    /// Sum the weights of every document
    /// Only terms occurring in at least one document get an entry.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a DocumentWeights<N>>,
        N: 'a,
    {
        let weights = documents
            .into_iter()
            .fold(IndexMap::<String, N>::new(), |mut acc, doc| {
                for (term, tw) in doc.iter() {
                    if tw.count == 0 && !acc.contains_key(term) {
                        continue;
                    }
                    if let Some(total) = acc.get_mut(term) {
                        *total = *total + tw.weight;
                    } else {
                        acc.insert(term.to_string(), tw.weight);
                    }
                }
                acc
            });
        Self { weights }
    }

    /// Combined weight of `term`, `None` when it never occurs
    pub fn get(&self, term: &str) -> Option<N> {
        self.weights.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn as_map(&self) -> &IndexMap<String, N> {
        &self.weights
    }

    pub fn top_n(&self, n: usize) -> Vec<(&str, N)> {
        let entries = self
            .weights
            .iter()
            .map(|(term, &w)| (term.as_str(), w))
            .collect();
        top_n_desc(entries, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(key: &str, entries: &[(&str, u64, f64)]) -> DocumentWeights<f64> {
        let weights = entries
            .iter()
            .map(|&(t, count, weight)| (t.to_string(), TermWeight { count, weight }))
            .collect();
        DocumentWeights::new(key, weights)
    }

    #[test]
    fn top_n_skips_absent_terms() {
        let d = doc(
            "a.txt",
            &[("苹果", 2, -0.8), ("香蕉", 0, 0.0), ("橘子", 1, -0.1)],
        );
        let top = d.top_n(100);
        assert_eq!(top, vec![("橘子", -0.1), ("苹果", -0.8)]);
        assert_eq!(d.present_terms(), 2);
    }

    #[test]
    fn top_n_truncates_and_sorts() {
        let entries: Vec<(String, u64, f64)> = (0..150)
            .map(|i| (format!("词{i}"), 1, (i % 30) as f64))
            .collect();
        let refs: Vec<(&str, u64, f64)> =
            entries.iter().map(|(t, c, w)| (t.as_str(), *c, *w)).collect();
        let d = doc("a.txt", &refs);

        let top = d.top_n(100);
        assert_eq!(top.len(), 100);
        for pair in top.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        // first tie group keeps vocabulary order
        assert_eq!(top[0].0, "词29");
        assert_eq!(top[1].0, "词59");
    }

    #[test]
    fn combined_is_sum_over_documents() {
        let a = doc("a.txt", &[("苹果", 2, 1.5), ("香蕉", 1, 0.7), ("橘子", 0, 0.0)]);
        let b = doc("b.txt", &[("苹果", 1, 0.75), ("香蕉", 0, 0.0), ("橘子", 1, 0.7)]);
        let combined = CombinedWeights::from_documents([&a, &b]);

        for term in ["苹果", "香蕉", "橘子"] {
            let expected = a.weight(term) + b.weight(term);
            assert!((combined.get(term).unwrap() - expected).abs() < 1e-12);
        }
        assert_eq!(combined.get("葡萄"), None);

        // recomputation yields the same map
        assert_eq!(combined, CombinedWeights::from_documents([&a, &b]));
    }

    #[test]
    fn combined_of_nothing_is_empty() {
        let combined: CombinedWeights<f64> = CombinedWeights::from_documents(std::iter::empty());
        assert!(combined.is_empty());
        assert!(combined.top_n(300).is_empty());
    }
}
