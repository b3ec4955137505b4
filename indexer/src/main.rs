use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use trecdex_core::persist::{load_index, IndexPaths};
use trecdex_core::pipeline::{build_and_save, compare_analyzers};
use trecdex_core::report::DEFAULT_PROBE_TERM;
use trecdex_core::{Analyzer, Field, IndexConfig, InvertedIndex, Report};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index TREC corpora and report vocabulary statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one index with a single analyzer and print its report
    Build {
        /// JSON config file; the flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Corpus directory
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Output index directory
        #[arg(long)]
        index: Option<PathBuf>,
        /// Only files ending with this suffix are indexed
        #[arg(long)]
        suffix: Option<String>,
        /// verbatim | whitespace-simple | stopword-filtered | standard
        #[arg(long)]
        analyzer: Option<Analyzer>,
        /// Keep stopwords (standard analyzer only)
        #[arg(long, default_value_t = false)]
        no_stopwords: bool,
        /// Apply English stemming (standard analyzer only)
        #[arg(long, default_value_t = false)]
        stem: bool,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Build one index per analyzer, in parallel, and print every report
    Compare {
        #[arg(long, default_value = "./corpus")]
        corpus: PathBuf,
        /// Each analyzer writes to <index-root>/<analyzer>
        #[arg(long, default_value = "./Indices")]
        index_root: PathBuf,
        #[arg(long, default_value = trecdex_core::config::DEFAULT_SUFFIX)]
        suffix: String,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Print the report of an index already on disk
    Stats {
        #[arg(long)]
        index: PathBuf,
        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Term whose frequencies are reported
    #[arg(long, default_value = DEFAULT_PROBE_TERM)]
    term: String,
    /// Field the statistics are computed for
    #[arg(long, default_value = "TEXT")]
    field: Field,
    /// Also list the field's vocabulary
    #[arg(long, default_value_t = false)]
    vocabulary: bool,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl ReportArgs {
    fn report(&self, index: &InvertedIndex) -> Report {
        let report = Report::collect(index, self.field, &self.term);
        if self.vocabulary { report.with_vocabulary(index) } else { report }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { config, corpus, index, suffix, analyzer, no_stopwords, stem, report } => {
            let mut cfg = match config {
                Some(path) => IndexConfig::from_json_file(path)?,
                None => IndexConfig::default(),
            };
            if let Some(corpus) = corpus { cfg.corpus_location = corpus; }
            if let Some(index) = index { cfg.index_location = index; }
            if let Some(suffix) = suffix { cfg.file_suffix = suffix; }
            if let Some(analyzer) = analyzer { cfg.analyzer = analyzer; }
            cfg.analyzer = apply_standard_flags(cfg.analyzer, no_stopwords, stem);
            build(&cfg, &report)
        }
        Commands::Compare { corpus, index_root, suffix, report } => compare(corpus, index_root, suffix, &report),
        Commands::Stats { index, report } => {
            let index = load_index(&IndexPaths::new(&index))?;
            print_reports(&[report.report(&index)], report.json)
        }
    }
}

fn apply_standard_flags(analyzer: Analyzer, no_stopwords: bool, stem: bool) -> Analyzer {
    match analyzer {
        Analyzer::Standard(mut opts) => {
            if no_stopwords { opts.stopwords = false; }
            if stem { opts.stem = true; }
            Analyzer::Standard(opts)
        }
        other => {
            if no_stopwords || stem {
                tracing::warn!(analyzer = %other, "--no-stopwords/--stem only apply to the standard analyzer");
            }
            other
        }
    }
}

fn build(cfg: &IndexConfig, args: &ReportArgs) -> Result<()> {
    let outcome = build_and_save(cfg)?;
    print_reports(&[args.report(&outcome.index)], args.json)
}

fn compare(corpus: PathBuf, index_root: PathBuf, suffix: String, args: &ReportArgs) -> Result<()> {
    let reports: Vec<Report> = compare_analyzers(&corpus, &index_root, &suffix)?
        .iter()
        .map(|outcome| args.report(&outcome.index).labelled())
        .collect();
    print_reports(&reports, args.json)
}

fn print_reports(reports: &[Report], json: bool) -> Result<()> {
    if json {
        let out = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])?
        } else {
            serde_json::to_string_pretty(reports)?
        };
        println!("{out}");
        return Ok(());
    }
    for (i, report) in reports.iter().enumerate() {
        if i > 0 { println!(); }
        println!("{report}");
    }
    Ok(())
}
