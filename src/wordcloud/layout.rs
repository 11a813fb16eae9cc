//! Spiral word placement.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::utils::scaler::relative_to_max;

/// Layout parameters of a cloud
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub width: f64,
    pub height: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// probability of a word being laid out horizontally
    pub prefer_horizontal: f64,
    /// font size multiplier applied when a word does not fit
    pub shrink: f64,
    /// empty space kept around each word, in pixels
    pub margin: f64,
    pub seed: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            min_font_size: 10.0,
            max_font_size: 120.0,
            prefer_horizontal: 0.9,
            shrink: 0.85,
            margin: 2.0,
            seed: 42,
        }
    }
}

/// A word with its final position
/// `x`/`y` are the center of the word's box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub vertical: bool,
    /// weight relative to the heaviest word, 0.0..=1.0
    pub relative_weight: f64,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    #[inline]
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Rendered width of `text` at `font_size`
/// CJK glyphs are square, ASCII glyphs are about 0.6 em wide.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.6 } else { 1.0 })
        .sum::<f64>()
        * font_size
}

/// Place `words` (heaviest first, weights positive) on an Archimedean spiral
/// A word that cannot be placed even at the minimum font size is left out
/// and layout goes on with the next one. Words whose minimum-size box
/// covers the box of an earlier failure are skipped without searching.
pub fn layout(words: &[(String, f64)], options: &LayoutOptions) -> Vec<PlacedWord> {
    let max_weight = words.iter().map(|(_, w)| *w).fold(0.0f64, f64::max);
    if max_weight <= 0.0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let prefer_horizontal = options.prefer_horizontal.clamp(0.0, 1.0);
    let mut occupied: Vec<Rect> = Vec::with_capacity(words.len());
    let mut placed = Vec::with_capacity(words.len());
    // minimum-size boxes that found no spot
    let mut failed: Vec<(f64, f64)> = Vec::new();
    let mut skipped = 0usize;

    for (text, weight) in words {
        let relative = relative_to_max(*weight, max_weight).clamp(0.0, 1.0);
        let vertical = !rng.gen_bool(prefer_horizontal);
        let (min_w, min_h) = word_box(text, options.min_font_size, vertical, options);
        if failed.iter().any(|&(w, h)| min_w >= w && min_h >= h) {
            skipped += 1;
            continue;
        }
        let mut font_size = options.min_font_size
            + (options.max_font_size - options.min_font_size) * relative;

        let spot = loop {
            if let Some(rect) = find_spot(text, font_size, vertical, &occupied, options) {
                break Some(rect);
            }
            if font_size <= options.min_font_size {
                break None;
            }
            font_size = (font_size * options.shrink).max(options.min_font_size);
        };

        let Some(rect) = spot else {
            failed.push((min_w, min_h));
            skipped += 1;
            continue;
        };

        occupied.push(rect);
        placed.push(PlacedWord {
            text: text.clone(),
            x: rect.x + rect.w / 2.0,
            y: rect.y + rect.h / 2.0,
            font_size,
            vertical,
            relative_weight: relative,
        });
    }
    if skipped > 0 {
        log::debug!("{} words placed, {skipped} left out", placed.len());
    }
    placed
}

/// Size of the box a word occupies, margin included
fn word_box(text: &str, font_size: f64, vertical: bool, options: &LayoutOptions) -> (f64, f64) {
    let (mut w, mut h) = (text_width(text, font_size), font_size);
    if vertical {
        std::mem::swap(&mut w, &mut h);
    }
    (w + 2.0 * options.margin, h + 2.0 * options.margin)
}

/// Walk the spiral outwards from the center until the word's box fits
fn find_spot(
    text: &str,
    font_size: f64,
    vertical: bool,
    occupied: &[Rect],
    options: &LayoutOptions,
) -> Option<Rect> {
    let (w, h) = word_box(text, font_size, vertical, options);
    if w > options.width || h > options.height {
        return None;
    }

    let (cx, cy) = (options.width / 2.0, options.height / 2.0);
    let max_radius = (cx * cx + cy * cy).sqrt();
    // radius grows 4px per turn-radian, steps are ~8px of arc
    let spacing = 4.0;
    let mut theta = 0.0f64;
    loop {
        let r = spacing * theta;
        if r > max_radius {
            return None;
        }
        let rect = Rect {
            x: cx + r * theta.cos() - w / 2.0,
            y: cy + r * theta.sin() - h / 2.0,
            w,
            h,
        };
        let inside = rect.x >= 0.0
            && rect.y >= 0.0
            && rect.x + rect.w <= options.width
            && rect.y + rect.h <= options.height;
        if inside && !occupied.iter().any(|o| o.intersects(&rect)) {
            return Some(rect);
        }
        theta += 8.0 / r.max(8.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<(String, f64)> {
        (0..n).map(|i| (format!("词语{i}"), (n - i) as f64)).collect()
    }

    fn boxes_of(placed: &[PlacedWord]) -> Vec<Rect> {
        placed
            .iter()
            .map(|p| {
                let (mut w, mut h) = (text_width(&p.text, p.font_size), p.font_size);
                if p.vertical {
                    std::mem::swap(&mut w, &mut h);
                }
                Rect { x: p.x - w / 2.0, y: p.y - h / 2.0, w, h }
            })
            .collect()
    }

    #[test]
    fn heaviest_word_is_largest_and_central() {
        let options = LayoutOptions { prefer_horizontal: 1.0, ..LayoutOptions::default() };
        let placed = layout(&words(5), &options);
        assert_eq!(placed.len(), 5);
        assert_eq!(placed[0].font_size, options.max_font_size);
        assert_eq!(placed[0].x, options.width / 2.0);
        assert_eq!(placed[0].y, options.height / 2.0);
        assert!(placed.iter().all(|p| !p.vertical));
    }

    #[test]
    fn words_do_not_overlap_and_stay_inside() {
        let options = LayoutOptions::default();
        let placed = layout(&words(60), &options);
        assert!(!placed.is_empty());
        let boxes = boxes_of(&placed);
        for (i, a) in boxes.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.w <= options.width && a.y + a.h <= options.height);
            for b in &boxes[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let options = LayoutOptions::default();
        assert_eq!(layout(&words(30), &options), layout(&words(30), &options));
    }

    #[test]
    fn too_large_word_is_shrunk_or_dropped() {
        let options = LayoutOptions {
            width: 100.0,
            height: 60.0,
            prefer_horizontal: 1.0,
            ..LayoutOptions::default()
        };
        let placed = layout(&[("中华人民共和国".to_string(), 1.0)], &options);
        assert_eq!(placed.len(), 1);
        assert!(placed[0].font_size < options.max_font_size);
    }

    #[test]
    fn shorter_word_placed_after_long_one_fails() {
        let options = LayoutOptions {
            width: 60.0,
            height: 40.0,
            prefer_horizontal: 1.0,
            ..LayoutOptions::default()
        };
        let words = vec![
            ("中华人民共和国".to_string(), 2.0),
            ("中华人民共和国成立".to_string(), 1.5),
            ("苹果".to_string(), 1.0),
        ];
        let placed = layout(&words, &options);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].text, "苹果");
    }

    #[test]
    fn non_positive_weights_give_nothing() {
        assert!(layout(&[("苹果".to_string(), 0.0)], &LayoutOptions::default()).is_empty());
        assert!(layout(&[], &LayoutOptions::default()).is_empty());
    }

    #[test]
    fn ascii_is_narrower() {
        assert!(text_width("ab", 10.0) < text_width("苹果", 10.0));
        assert_eq!(text_width("苹果", 10.0), 20.0);
    }
}
