//! End-to-end batch run: discover documents, score them, write reports and
//! clouds.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::analysis::{Analyzer, LinderaSegmenter, MaxMatchSegmenter, Segmenter, StopwordFilter, Tokenizer};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::report::{FrequencyReport, ReportWriter};
use crate::vectorizer::{TfIdfModel, TfIdfVectorizer};
use crate::wordcloud::{SvgWordCloud, WordCloudRenderer};

/// Title of the corpus-wide cloud.
pub const OVERALL_TITLE: &str = "The WordCloud of All Documents";

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: u64,
    pub surviving: usize,
    pub vocab_size: usize,
    pub clouds_written: usize,
}

/// `*.txt` files directly under `input_dir`, sorted by file name
/// A missing input directory holds no documents; any other failure to list
/// it is an error.
pub fn discover_documents<P: AsRef<Path>>(input_dir: P) -> Result<Vec<PathBuf>> {
    let input_dir = input_dir.as_ref();
    let entries = match fs::read_dir(input_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("input directory {} does not exist, no documents", input_dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(input_dir, e)),
    };
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(input_dir, e))?.path();
        let is_txt = path.extension().map_or(false, |ext| ext == "txt");
        if is_txt && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::info!("found {} documents in {}", files.len(), input_dir.display());
    Ok(files)
}

/// Segmenter chosen by the configuration
/// Maximum matching when a dictionary is configured, Lindera with the
/// embedded CC-CEDICT dictionary otherwise.
pub fn build_segmenter(config: &PipelineConfig) -> Result<Box<dyn Segmenter>> {
    match &config.dictionary_path {
        Some(path) => Ok(Box::new(MaxMatchSegmenter::from_file(path)?)),
        None => Ok(Box::new(LinderaSegmenter::new()?)),
    }
}

/// Analyzer for `config` using `segmenter`
/// A stopword list that cannot be read is fatal.
pub fn build_analyzer(config: &PipelineConfig, segmenter: Box<dyn Segmenter>) -> Result<Analyzer> {
    let filter = StopwordFilter::from_file(&config.stopwords_path)?.with_min_chars(config.min_term_chars);
    log::info!(
        "loaded {} stopwords from {}",
        filter.len(),
        config.stopwords_path.display()
    );
    let tokenizer = Tokenizer::new(segmenter)?;
    Ok(Analyzer::new(tokenizer, filter))
}

/// Run the whole pipeline with the configured segmenter
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let segmenter = build_segmenter(config)?;
    run_with_segmenter(config, segmenter)
}

/// Run the whole pipeline with a caller-supplied segmenter
pub fn run_with_segmenter(config: &PipelineConfig, segmenter: Box<dyn Segmenter>) -> Result<RunSummary> {
    let analyzer = build_analyzer(config, segmenter)?;
    log::info!("segmenting with {}", analyzer.tokenizer().segmenter_name());

    let mut vectorizer: TfIdfVectorizer = TfIdfVectorizer::new();
    for path in discover_documents(&config.input_dir)? {
        let name = file_name(&path);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("cannot read {}: {e}, treating it as empty", path.display());
                String::new()
            }
        };
        let freq = analyzer.analyze(&text);
        log::debug!("{name}: {} terms, {} distinct", freq.term_sum(), freq.term_num());
        vectorizer.add_doc(name, freq);
    }

    let model = vectorizer.fit(config.idf_policy)?;
    ReportWriter::new(config.report_top_n).write(config.report_path(), &model.documents)?;
    FrequencyReport::new(config.frequency_top_n)
        .write(config.frequency_path(), &vectorizer.corpus_frequency())?;

    let clouds_written = if model.documents.is_empty() {
        log::warn!("no document has any terms, skipping word clouds");
        0
    } else {
        let renderer = SvgWordCloud::new(&config.font_path);
        render_clouds(config, &model, &renderer)
    };

    Ok(RunSummary {
        discovered: vectorizer.discovered(),
        surviving: model.documents.len(),
        vocab_size: model.corpus.vocab_size(),
        clouds_written,
    })
}

/// Render the overall cloud and, if enabled, one per document
/// Failures are logged and skipped.
fn render_clouds<R: WordCloudRenderer>(config: &PipelineConfig, model: &TfIdfModel<f64>, renderer: &R) -> usize {
    let mut written = 0;
    let overall = config.overall_cloud_path();
    match renderer.render(model.combined.as_map(), &overall, Some(OVERALL_TITLE), config.cloud_top_n) {
        Ok(_) => written += 1,
        Err(e) => log::warn!("skipping overall word cloud: {e}"),
    }

    if config.per_document_clouds {
        for doc in &model.documents {
            let path = config.document_cloud_path(doc.key());
            let title = format!("文件: {}", doc.key());
            match renderer.render(&doc.present_weights(), &path, Some(title.as_str()), config.report_top_n) {
                Ok(_) => written += 1,
                Err(e) => log::warn!("skipping word cloud of {}: {e}", doc.key()),
            }
        }
    }
    written
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::WhitespaceSegmenter;

    #[test]
    fn discovery_is_sorted_and_txt_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.md", "d.TXT.bak"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub.txt")).unwrap();
        let names: Vec<String> = discover_documents(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_input_dir_has_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_documents(dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn input_path_that_is_a_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dataset");
        fs::write(&file, "").unwrap();
        let err = discover_documents(&file).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn default_segmenter_is_lindera() {
        let segmenter = build_segmenter(&PipelineConfig::default()).unwrap();
        assert_eq!(segmenter.name(), "lindera");
    }

    #[test]
    fn missing_dictionary_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            dictionary_path: Some(dir.path().join("dict.txt")),
            ..PipelineConfig::default()
        };
        assert!(matches!(build_segmenter(&config), Err(Error::Dictionary { .. })));
    }

    #[test]
    fn analyzer_uses_configured_min_chars() {
        let dir = tempfile::tempdir().unwrap();
        let stop = dir.path().join("stop.txt");
        fs::write(&stop, "").unwrap();
        let config = PipelineConfig {
            stopwords_path: stop,
            min_term_chars: 3,
            ..PipelineConfig::default()
        };
        let analyzer = build_analyzer(&config, Box::new(WhitespaceSegmenter)).unwrap();
        assert_eq!(analyzer.terms("苹果 中华民族"), vec!["中华民族"]);
    }
}
