use indexmap::IndexMap;
use num::Float;

/// Smallest weight handed to a renderer.
pub const MIN_RENDER_WEIGHT: f64 = 1e-4;

/// Rescale all weights so the minimum is at least `epsilon`
/// Applied only when the minimum is positive and below `epsilon`; the ratio
/// between weights is preserved.
///
/// # Returns
/// * `Option<N>` - the factor applied, `None` when nothing changed
pub fn rescale_min_to<N: Float>(weights: &mut IndexMap<String, N>, epsilon: N) -> Option<N> {
    let min = weights.values().copied().fold(N::infinity(), N::min);
    if !min.is_finite() || min <= N::zero() || min >= epsilon {
        return None;
    }
    let factor = epsilon / min;
    weights.values_mut().for_each(|w| *w = *w * factor);
    Some(factor)
}

/// Weight relative to the maximum, in 0.0..=1.0 for non-negative input
#[inline]
pub fn relative_to_max<N: Float>(weight: N, max: N) -> N {
    if max <= N::zero() {
        return N::zero();
    }
    weight / max
}
