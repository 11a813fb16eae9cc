use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::tfidf::IdfPolicy;

/// Configuration file the binary looks for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tfidf-cloud.json";

/// Pipeline configuration
/// All paths used by a run live here; nothing is read from the command line.
///
/// Every field has a default, so a JSON config only needs the keys it changes:
/// ```
/// use tfidf_cloud::PipelineConfig;
/// let config: PipelineConfig = serde_json::from_str(r#"{ "report_top_n": 20 }"#).unwrap();
/// assert_eq!(config.report_top_n, 20);
/// assert_eq!(config.cloud_top_n, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// directory scanned for `*.txt` documents
    pub input_dir: PathBuf,
    /// directory receiving reports and clouds
    pub output_dir: PathBuf,
    /// stopword list, one word per line
    pub stopwords_path: PathBuf,
    /// word list for maximum-matching segmentation
    /// Lindera with the embedded CC-CEDICT dictionary is used when unset
    pub dictionary_path: Option<PathBuf>,
    /// font referenced by the rendered clouds
    pub font_path: PathBuf,
    /// terms listed per document in the report
    pub report_top_n: usize,
    /// terms drawn in the overall cloud
    pub cloud_top_n: usize,
    /// terms listed in the frequency report
    pub frequency_top_n: usize,
    /// shortest term kept, in characters
    pub min_term_chars: usize,
    pub idf_policy: IdfPolicy,
    /// also render one cloud per document
    pub per_document_clouds: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("dataset"),
            output_dir: PathBuf::from("output"),
            stopwords_path: PathBuf::from("cn_stopwords.txt"),
            dictionary_path: None,
            font_path: PathBuf::from("msyh.ttf"),
            report_top_n: 100,
            cloud_top_n: 300,
            frequency_top_n: 10,
            min_term_chars: 2,
            idf_policy: IdfPolicy::Raw,
            per_document_clouds: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            log::info!("loading configuration from {}", path.display());
            Self::from_json_file(path)
        } else {
            log::info!("no {} found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("tf-idf.txt")
    }

    pub fn frequency_path(&self) -> PathBuf {
        self.output_dir.join("frequency.txt")
    }

    pub fn overall_cloud_path(&self) -> PathBuf {
        self.output_dir.join("wordcloud_overall.svg")
    }

    /// Cloud path for one document, keyed by the file stem
    pub fn document_cloud_path(&self, file_name: &str) -> PathBuf {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        self.output_dir
            .join("wordclouds")
            .join(format!("{stem}_wordcloud.svg"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_limits() {
        let config = PipelineConfig::default();
        assert_eq!(config.report_top_n, 100);
        assert_eq!(config.cloud_top_n, 300);
        assert_eq!(config.min_term_chars, 2);
        assert_eq!(config.idf_policy, IdfPolicy::Raw);
        assert!(!config.per_document_clouds);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{ "input_dir": "/data/docs", "idf_policy": "clamp_zero" }"#,
        )
        .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/data/docs"));
        assert_eq!(config.idf_policy, IdfPolicy::ClampZero);
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = PipelineConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn document_cloud_path_uses_stem() {
        let config = PipelineConfig::default();
        let path = config.document_cloud_path("news.2024.txt");
        assert_eq!(path, PathBuf::from("output/wordclouds/news_wordcloud.svg"));
    }
}
