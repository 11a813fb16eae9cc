//! Word cloud rendering.
//!
//! A [`WordCloudRenderer`] draws a term -> weight mapping into an image.
//! [`SvgWordCloud`] is the bundled implementation.

pub mod layout;
pub mod svg;

use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::utils::{scaler::{rescale_min_to, MIN_RENDER_WEIGHT}, sort::top_n_desc};

pub use layout::LayoutOptions;
pub use svg::SvgWordCloud;

/// Draws weighted terms into an image file.
pub trait WordCloudRenderer {
    /// Render at most `max_terms` of `weights` into `output`
    ///
    /// # Returns
    /// * `usize` - number of words actually drawn
    ///
    /// # Errors
    /// Missing assets or an empty drawable set are errors; callers are
    /// expected to log them and carry on.
    fn render(
        &self,
        weights: &IndexMap<String, f64>,
        output: &Path,
        title: Option<&str>,
        max_terms: usize,
    ) -> Result<usize>;
}

/// Select what a renderer draws
/// Keeps the `max_terms` heaviest entries, drops non-positive weights, and
/// lifts tiny weights so the minimum is [`MIN_RENDER_WEIGHT`].
/// The result is ordered heaviest first.
pub fn prepare_weights(weights: &IndexMap<String, f64>, max_terms: usize) -> IndexMap<String, f64> {
    let entries: Vec<(&str, f64)> = weights.iter().map(|(t, &w)| (t.as_str(), w)).collect();
    let mut top: IndexMap<String, f64> = top_n_desc(entries, max_terms)
        .into_iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(t, w)| (t.to_string(), w))
        .collect();
    if let Some(factor) = rescale_min_to(&mut top, MIN_RENDER_WEIGHT) {
        log::debug!("rescaled cloud weights by {factor}");
    }
    top
}
