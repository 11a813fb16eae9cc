use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::wordcloud::{
    layout::{layout, LayoutOptions, PlacedWord},
    prepare_weights, WordCloudRenderer,
};

/// Height of the band above the canvas holding the title.
const TITLE_BAND: f64 = 40.0;

/// Word cloud renderer writing SVG images.
///
/// The configured font is referenced through `@font-face`, so the file has
/// to exist when rendering; a missing font is [`Error::MissingAsset`].
#[derive(Debug, Clone)]
pub struct SvgWordCloud {
    font_path: PathBuf,
    options: LayoutOptions,
}

impl SvgWordCloud {
    pub fn new<P: Into<PathBuf>>(font_path: P) -> Self {
        Self {
            font_path: font_path.into(),
            options: LayoutOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Build the SVG document for already placed words
    pub fn to_svg(&self, font_url: &str, placed: &[PlacedWord], title: Option<&str>) -> String {
        let opts = &self.options;
        let offset = if title.is_some() { TITLE_BAND } else { 0.0 };
        let total_height = opts.height + offset;

        let mut svg = String::new();
        let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = opts.width,
            h = total_height
        );
        let _ = writeln!(
            svg,
            r#"<defs><style>@font-face {{ font-family: "CloudFont"; src: url("{}"); }} text {{ font-family: "CloudFont", sans-serif; }}</style></defs>"#,
            escape_xml(font_url)
        );
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
            opts.width, total_height
        );
        if let Some(title) = title {
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" font-size="20" fill="black" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                opts.width / 2.0,
                TITLE_BAND / 2.0,
                escape_xml(title)
            );
        }
        // contour around the cloud area
        let _ = writeln!(
            svg,
            r#"<rect x="0.5" y="{}" width="{}" height="{}" fill="none" stroke="steelblue" stroke-width="1"/>"#,
            offset + 0.5,
            opts.width - 1.0,
            opts.height - 1.0
        );
        for word in placed {
            let (x, y) = (word.x, word.y + offset);
            let rotate = if word.vertical {
                format!(r#" transform="rotate(-90 {x:.1} {y:.1})""#)
            } else {
                String::new()
            };
            let _ = writeln!(
                svg,
                r#"<text x="{x:.1}" y="{y:.1}" font-size="{:.1}" fill="{}" text-anchor="middle" dominant-baseline="central"{rotate}>{}</text>"#,
                word.font_size,
                color_for(word.relative_weight),
                escape_xml(&word.text)
            );
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl WordCloudRenderer for SvgWordCloud {
    fn render(
        &self,
        weights: &IndexMap<String, f64>,
        output: &Path,
        title: Option<&str>,
        max_terms: usize,
    ) -> Result<usize> {
        if !self.font_path.is_file() {
            return Err(Error::MissingAsset(self.font_path.clone()));
        }
        let prepared = prepare_weights(weights, max_terms);
        if prepared.is_empty() {
            return Err(Error::render("no positive weights to draw"));
        }

        let words: Vec<(String, f64)> = prepared.into_iter().collect();
        let placed = layout(&words, &self.options);
        let font = self
            .font_path
            .canonicalize()
            .map_err(|e| Error::io(&self.font_path, e))?;
        let font_url = format!("file://{}", font.display());
        let svg = self.to_svg(&font_url, &placed, title);

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }
        fs::write(output, svg).map_err(|e| Error::io(output, e))?;
        log::info!(
            "word cloud with {} of {} terms saved to {}",
            placed.len(),
            words.len(),
            output.display()
        );
        Ok(placed.len())
    }
}

/// Fill color by weight relative to the heaviest word
pub fn color_for(relative_weight: f64) -> &'static str {
    if relative_weight > 0.7 {
        "rgb(220, 20, 60)"
    } else if relative_weight > 0.4 {
        "rgb(148, 0, 211)"
    } else {
        "rgb(30, 144, 255)"
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn color_thresholds() {
        assert_eq!(color_for(1.0), "rgb(220, 20, 60)");
        assert_eq!(color_for(0.7), "rgb(148, 0, 211)");
        assert_eq!(color_for(0.41), "rgb(148, 0, 211)");
        assert_eq!(color_for(0.4), "rgb(30, 144, 255)");
        assert_eq!(color_for(0.0), "rgb(30, 144, 255)");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn missing_font_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgWordCloud::new(dir.path().join("missing.ttf"));
        let out = dir.path().join("cloud.svg");
        let err = renderer
            .render(&weights(&[("苹果", 1.0)]), &out, None, 300)
            .unwrap_err();
        assert!(matches!(err, Error::MissingAsset(_)));
        assert!(!out.exists());
    }

    #[test]
    fn nothing_positive_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        fs::write(&font, b"not really a font").unwrap();
        let renderer = SvgWordCloud::new(&font);
        let err = renderer
            .render(&weights(&[("苹果", -1.0), ("香蕉", 0.0)]), &dir.path().join("c.svg"), None, 300)
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn renders_words_and_title() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        fs::write(&font, b"not really a font").unwrap();
        let out = dir.path().join("clouds").join("cloud.svg");

        let renderer = SvgWordCloud::new(&font);
        let placed = renderer
            .render(
                &weights(&[("苹果", 3.0), ("香蕉", 2.0), ("橘子", 1.0)]),
                &out,
                Some("文件: a.txt"),
                300,
            )
            .unwrap();
        assert_eq!(placed, 3);

        let svg = fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(">苹果</text>"));
        assert!(svg.contains(">文件: a.txt</text>"));
        assert!(svg.contains("rgb(220, 20, 60)"));
        assert!(svg.contains("stroke=\"steelblue\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn max_terms_limits_words() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        fs::write(&font, b"").unwrap();
        let out = dir.path().join("cloud.svg");
        let entries: Vec<(String, f64)> = (0..20).map(|i| (format!("词语{i}"), 20.0 - i as f64)).collect();
        let map: IndexMap<String, f64> = entries.into_iter().collect();
        let placed = SvgWordCloud::new(&font).render(&map, &out, None, 5).unwrap();
        assert_eq!(placed, 5);
    }
}
