//! `cluster` command: vocabulary ingestion, pipeline run, report writing.
//!
//! All file I/O lives here, outside the clustering core. The vocabulary is
//! whitespace-tokenized into a set (duplicates collapse and are reported);
//! results are written to a report file whose name embeds the parameter
//! values, alongside the three excluded-word lists:
//!
//! ```text
//! results_mindepth2_maxsz40_minsz2.txt
//! words_not_found_mindepth2_maxsz40_minsz2.txt
//! words_excluded_by_depth_mindepth2_maxsz40_minsz2.txt
//! words_excluded_by_size_mindepth2_maxsz40_minsz2.txt
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, error, info, warn};

use concept_cluster_core::lexicon::InMemoryLexicon;
use concept_cluster_core::pipeline::{self, ClusterConfig, ClusterReport};
use concept_cluster_core::ranking::render_ranking;
use concept_cluster_core::types::{Word, WordSet};
use concept_cluster_core::SizeWindow;

use crate::error::CliExitCode;

/// Arguments for the `cluster` command.
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Path of the file storing the vocabulary to be clustered
    pub words_path: PathBuf,

    /// Path of the lexicon file (tab-separated concept hierarchy)
    pub lexicon_path: PathBuf,

    /// Path of the file where to store the ranked report
    pub results_path: PathBuf,

    /// Lowest allowed depth for a concept used as a cluster
    #[arg(short = 'd', long = "min-depth", default_value_t = 0)]
    pub min_depth: usize,

    /// Minimum allowed size for a cluster
    #[arg(short = 'm', long = "min-cluster-size")]
    pub min_cluster_size: Option<usize>,

    /// Maximum allowed size for a cluster
    #[arg(short = 'x', long = "max-cluster-size")]
    pub max_cluster_size: Option<usize>,

    /// Write the report as JSON instead of the line-oriented text form
    #[arg(long)]
    pub json: bool,
}

/// Execute the cluster command, returning the process exit code.
pub fn run(args: ClusterArgs) -> CliExitCode {
    debug!(?args, "cluster command");

    let config = ClusterConfig {
        min_depth: args.min_depth,
        size: SizeWindow {
            min: args.min_cluster_size.unwrap_or(0),
            max: args.max_cluster_size,
        },
    };
    if let Err(err) = config.validate() {
        error!(%err, "invalid configuration");
        return CliExitCode::Config;
    }

    let vocabulary = match read_vocabulary(&args.words_path) {
        Ok(v) => v,
        Err(err) => {
            error!(path = %args.words_path.display(), %err, "cannot read vocabulary");
            return CliExitCode::Failure;
        }
    };

    let lexicon = match load_lexicon(&args.lexicon_path) {
        Ok(l) => l,
        Err(err) => {
            error!(path = %args.lexicon_path.display(), %err, "cannot load lexicon");
            return CliExitCode::Failure;
        }
    };

    let report = match pipeline::run(&lexicon, vocabulary, &config) {
        Ok(r) => r,
        Err(err) => {
            error!(%err, "clustering failed");
            return CliExitCode::from(&err);
        }
    };

    print_summary(&report);

    if let Err(err) = write_outputs(&args, &config, &report) {
        error!(%err, "cannot write results");
        return CliExitCode::Failure;
    }
    CliExitCode::Success
}

/// Read a whitespace-delimited vocabulary file into a word set.
///
/// Duplicate tokens collapse; a mismatch between raw token count and unique
/// word count is reported as a warning.
pub fn read_vocabulary(path: &Path) -> std::io::Result<WordSet> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = WordSet::new();
    let mut raw_count = 0usize;
    for line in reader.lines() {
        for token in line?.split_whitespace() {
            words.insert(Word::from(token));
            raw_count += 1;
        }
    }
    info!(words = words.len(), "vocabulary loaded");
    if raw_count != words.len() {
        warn!(
            raw = raw_count,
            unique = words.len(),
            "some of the words in the file are repeated"
        );
    }
    Ok(words)
}

fn load_lexicon(path: &Path) -> std::io::Result<InMemoryLexicon> {
    let reader = BufReader::new(File::open(path)?);
    InMemoryLexicon::from_reader(reader)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))
}

fn print_summary(report: &ClusterReport) {
    let s = &report.summary;
    println!("Number of words: {}", s.words);
    println!("Number of clusters: {}", s.clusters);
    println!("Number of words filtered by hypernym/synset depth: {}", s.excluded_by_depth);
    println!("Number of words filtered by clusters' sizes: {}", s.excluded_by_size);
    println!("Number of words not recognized in the lexicon: {}", s.not_found);
    if s.lookup_failures > 0 {
        println!("Number of words skipped on lexicon failures: {}", s.lookup_failures);
    }
}

/// Descriptor suffix embedding the parameter values, appended to every
/// output file name. Size segments appear only when the corresponding
/// option was supplied, matching the historical report naming.
fn file_descriptor(args: &ClusterArgs, config: &ClusterConfig) -> String {
    let mut descr = format!("_mindepth{}", config.min_depth);
    if let Some(max) = args.max_cluster_size {
        descr.push_str(&format!("_maxsz{max}"));
    }
    if let Some(min) = args.min_cluster_size {
        descr.push_str(&format!("_minsz{min}"));
    }
    descr
}

/// `results.txt` + `_mindepth2` -> `results_mindepth2.txt` (extension, if
/// any, is stripped first).
fn suffixed_path(path: &Path, descr: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_owned());
    let file = format!("{stem}{descr}.{extension}");
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file),
        _ => PathBuf::from(file),
    }
}

fn write_words(path: &Path, words: &WordSet) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort();
    for word in sorted {
        writeln!(out, "{word}")?;
    }
    out.flush()
}

fn write_outputs(
    args: &ClusterArgs,
    config: &ClusterConfig,
    report: &ClusterReport,
) -> std::io::Result<()> {
    let descr = file_descriptor(args, config);
    let extension = if args.json { "json" } else { "txt" };
    let report_path = suffixed_path(&args.results_path, &descr, extension);

    let mut out = BufWriter::new(File::create(&report_path)?);
    if args.json {
        serde_json::to_writer_pretty(&mut out, report)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    } else {
        out.write_all(render_ranking(&report.entries).as_bytes())?;
    }
    out.flush()?;
    info!(path = %report_path.display(), "report written");

    let dir = report_path.parent().map(Path::to_path_buf).unwrap_or_default();
    for (name, words) in [
        ("words_not_found", &report.not_found),
        ("words_excluded_by_depth", &report.excluded_by_depth),
        ("words_excluded_by_size", &report.excluded_by_size),
    ] {
        write_words(&dir.join(format!("{name}{descr}.txt")), words)?;
    }
    Ok(())
}
