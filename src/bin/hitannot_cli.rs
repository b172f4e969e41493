use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;

use hitannot_rs::{
    annotate_hits, summarize_hits, AccessMode, AnnotateConfig, SummarizeConfig, SummaryOutcome,
};

#[derive(Parser)]
#[command(name = "hitannot-rs")]
#[command(version)]
#[command(about = "Annotate classifier hits with contig annotations and summarize them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append annotation columns to every hit, writing <sample>_annotated.txt.gz
    Annotate {
        #[arg(short, long)]
        sample: String,

        /// Classifier hits (tab-separated, no header)
        #[arg(long, value_name = "FILE")]
        hits: PathBuf,

        /// Annotation table keyed by contig_id, start and stop
        #[arg(short, long, value_name = "FILE")]
        annotations: PathBuf,

        /// local: decompress only *.gz paths; remote: always decompress
        #[arg(short, long, value_enum, default_value_t = Mode::Remote)]
        mode: Mode,

        #[arg(short, long, default_value = ".", value_name = "DIR")]
        output_dir: PathBuf,

        /// Omit the column-name header line
        #[arg(long)]
        no_header: bool,
    },
    /// Count taxonomy and function assignments, writing <sample>_summary.txt
    Summarize {
        #[arg(short, long)]
        sample: String,

        /// Annotated hits file (plain or .gz)
        #[arg(long, value_name = "FILE")]
        hits: PathBuf,

        #[arg(short, long, default_value = ".", value_name = "DIR")]
        output_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Local,
    Remote,
}

impl From<Mode> for AccessMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Local => AccessMode::Local,
            Mode::Remote => AccessMode::Remote,
        }
    }
}

fn spinner(color: &str, msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&[
            "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
        ])
        .template(&format!("{{spinner:.{color}}} {{msg}}"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(msg.to_string());
    spinner
}

fn run(cli: Cli) -> hitannot_rs::Result<()> {
    match cli.command {
        Command::Annotate {
            sample,
            hits,
            annotations,
            mode,
            output_dir,
            no_header,
        } => {
            let config = AnnotateConfig {
                sample,
                hits,
                annotations,
                output_dir,
                mode: mode.into(),
                write_header: !no_header,
            };
            let pb = spinner("green", "Annotating hits...");
            let result = annotate_hits(&config);
            match &result {
                Ok(run) => pb.finish_with_message(format!(
                    "Wrote {} rows to {}",
                    run.rows_written,
                    run.output_path.display()
                )),
                Err(_) => pb.abandon_with_message("Annotation failed."),
            }
            result.map(|_| ())
        }
        Command::Summarize {
            sample,
            hits,
            output_dir,
        } => {
            let config = SummarizeConfig {
                sample,
                hits,
                output_dir,
            };
            let pb = spinner("yellow", "Summarizing annotations...");
            let result = summarize_hits(&config);
            match &result {
                Ok(SummaryOutcome::Standard(report)) => pb.finish_with_message(format!(
                    "Summarized {} sequences into {}",
                    report.total_sequences,
                    config.output_path().display()
                )),
                Ok(SummaryOutcome::CustomSchema) => {
                    pb.finish_with_message("Custom database columns, summary skipped.")
                }
                Err(_) => pb.abandon_with_message("Summary failed."),
            }
            result.map(|_| ())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
