//! tfidf-cloud binary.

use std::io::Write;
use std::process;

use env_logger::{Builder, Env};

use tfidf_cloud::config::{PipelineConfig, DEFAULT_CONFIG_FILE};
use tfidf_cloud::pipeline;

fn main() {
    // RUST_LOG overrides the default level
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let config = match PipelineConfig::load_or_default(DEFAULT_CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    match pipeline::run(&config) {
        Ok(summary) => log::info!(
            "done: {} of {} documents scored, {} terms, {} word clouds",
            summary.surviving,
            summary.discovered,
            summary.vocab_size,
            summary.clouds_written
        ),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}
