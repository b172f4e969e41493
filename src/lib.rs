//src/lib.rs
pub mod types;
pub mod error;
pub mod fileio;
pub mod annotations;
pub mod annotate;
pub mod summary;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub use crate::error::{HitAnnotError, Result};
pub use crate::summary::{SummaryOutcome, SummaryReport};
pub use crate::types::AccessMode;

use crate::annotate::annotate_hits_stream;
use crate::annotations::parse_annotations;
use crate::fileio::{create_gz_writer, open_reader};
use crate::summary::summarize_stream;

/// Inputs for one annotation run.
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    pub sample: String,
    pub hits: PathBuf,
    pub annotations: PathBuf,
    pub output_dir: PathBuf,
    pub mode: AccessMode,
    /// Write the column-name header as the first output line
    pub write_header: bool,
}

/// Inputs for one summary run.
#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    pub sample: String,
    pub hits: PathBuf,
    pub output_dir: PathBuf,
}

impl AnnotateConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_annotated.txt.gz", self.sample))
    }
}

impl SummarizeConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_summary.txt", self.sample))
    }
}

/// What an annotation run wrote.
#[derive(Debug, Clone)]
pub struct AnnotationRun {
    pub output_path: PathBuf,
    pub rows_written: u64,
    pub classified: u64,
    pub unclassified: u64,
    pub custom_columns: Vec<String>,
}

/// Join the hits file with the annotation table and write
/// `<sample>_annotated.txt.gz`.
///
/// A failure part way through leaves a truncated output file behind.
pub fn annotate_hits(config: &AnnotateConfig) -> Result<AnnotationRun> {
    // 1. Build the lookup
    let table = parse_annotations(&config.annotations, config.mode)?;

    // 2. Stream hits into the output
    let output_path = config.output_path();
    let mut input = open_reader(&config.hits, config.mode)?;
    let mut out = create_gz_writer(&output_path)?;
    let stats = annotate_hits_stream(&mut *input, &table, &mut out, config.write_header)?;
    out.finish()?.flush()?;

    log::info!(
        "Wrote {} rows ({} classified, {} unclassified) to {}",
        stats.rows_written,
        stats.classified,
        stats.unclassified,
        output_path.display()
    );

    Ok(AnnotationRun {
        output_path,
        rows_written: stats.rows_written,
        classified: stats.classified,
        unclassified: stats.unclassified,
        custom_columns: table.custom_columns,
    })
}

/// Summarize an annotated hits file into `<sample>_summary.txt`.
///
/// Input is decompressed only when its name ends in `.gz`. Nothing is
/// written when the run fails.
pub fn summarize_hits(config: &SummarizeConfig) -> Result<SummaryOutcome> {
    let mut input = open_reader(&config.hits, AccessMode::Local)?;
    let outcome = summarize_stream(&mut *input, &config.hits)?;

    fs::write(config.output_path(), outcome.render())?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        let annotate = AnnotateConfig {
            sample: "S1".to_string(),
            hits: PathBuf::from("hits.txt.gz"),
            annotations: PathBuf::from("annotations.txt.gz"),
            output_dir: PathBuf::from("out"),
            mode: AccessMode::default(),
            write_header: true,
        };
        assert_eq!(annotate.output_path(), PathBuf::from("out/S1_annotated.txt.gz"));

        let summarize = SummarizeConfig {
            sample: "S1".to_string(),
            hits: annotate.output_path(),
            output_dir: PathBuf::from("out"),
        };
        assert_eq!(summarize.output_path(), PathBuf::from("out/S1_summary.txt"));
    }
}
