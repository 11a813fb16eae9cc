use indexmap::IndexMap;

/// TermFrequency struct
/// Counts raw occurrences of each term within one document.
/// Terms keep the order of their first occurrence, so later stable sorts
/// resolve equal weights the same way on every run.
///
/// # Examples
/// ```
/// use tfidf_cloud::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("苹果");
/// term_freq.add_term("香蕉");
/// term_freq.add_term("苹果");
///
/// assert_eq!(term_freq.term_count("苹果"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        // avoid allocating for terms already seen
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Merge the counts of another TermFrequency into this one
    pub fn add_terms_from_freq(&mut self, other: &TermFrequency) -> &mut Self {
        for (term, &count) in &other.term_count {
            *self.term_count.entry(term.clone()).or_insert(0) += count;
            self.total_term_count += count;
        }
        self
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterate over terms and their counts in first-occurrence order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Get the total count of all terms
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Get the occurrence count for a specific term, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Iterate over the distinct terms
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|s| s.as_str())
    }

    /// Get the number of unique terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_term_count == 0
    }

    /// Terms sorted by count, descending
    /// Equal counts keep first-occurrence order.
    pub fn sorted_frequency_vector(&self) -> Vec<(&str, u64)> {
        let mut term_list: Vec<(&str, u64)> = self.iter().collect();
        term_list.sort_by(|a, b| b.1.cmp(&a.1));
        term_list
    }

    /// Get the probability P(term) for a specific term
    /// Returns 0.0 if total is 0
    #[inline]
    pub fn probability(&self, term: &str) -> f64 {
        if self.total_term_count == 0 {
            return 0.0;
        }
        (self.term_count(term) as f64) / (self.total_term_count as f64)
    }
}
