use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::classify::{FailureClass, FailureClassifier};
use crate::config::BenchConfig;
use crate::domain::{Algorithm, Dataset, ResultRow};
use crate::error::{BenchError, Result};
use crate::process::Invoker;
use crate::report;
use crate::run::commands::CommandSet;
use crate::run::scratch::{Scratch, ensure_clean};
use crate::run::state::{Run, RunState, SkipReason};
use crate::scan;
use crate::tools::toolset::Toolset;

#[derive(Debug)]
pub struct ExperimentOutcome {
    pub rows: Vec<ResultRow>,
    /// None when no row was collected and no file was written.
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
enum Repetition {
    Recorded(ResultRow),
    Skipped(SkipReason),
    Aborted,
}

/// Sequential driver over datasets x algorithms x repetitions.
pub struct Experiment<'a, I> {
    config: &'a BenchConfig,
    tools: &'a Toolset,
    invoker: I,
    classifier: FailureClassifier,
}

impl<'a, I: Invoker> Experiment<'a, I> {
    pub fn new(config: &'a BenchConfig, tools: &'a Toolset, invoker: I) -> Self {
        Self {
            config,
            tools,
            invoker,
            classifier: FailureClassifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: FailureClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn run(&self) -> Result<ExperimentOutcome> {
        self.config.validate()?;
        let algorithms = self.tools.algorithms();
        if algorithms.is_empty() {
            return Err(BenchError::NoTools);
        }

        fs::create_dir_all(&self.config.output_dir)?;
        // Archive paths are handed to tools running inside the dataset.
        let output_dir = fs::canonicalize(&self.config.output_dir)?;

        let datasets = scan::scan_all(&self.config.datasets, &self.config.datasets_dir);
        let mut rows = Vec::new();
        for ds in &datasets {
            info!(
                "--- Dataset: {} ({:.2} MB; {} files) ---",
                ds.name,
                ds.size_mb(),
                ds.file_count
            );
            for &alg in &algorithms {
                info!("  Algorithm: {alg} (non-solid)");
                self.run_pair(ds, alg, &output_dir, &mut rows);
            }
        }

        let report = report::write_report(&rows, &output_dir.join(&self.config.report_name))?;
        match &report {
            Some(p) => info!("results saved to {}", p.display()),
            None => warn!("no results produced (check that datasets and tools are present)"),
        }
        Ok(ExperimentOutcome { rows, report })
    }

    /// Run every repetition of one pair, stopping at the first abort.
    fn run_pair(&self, ds: &Dataset, alg: Algorithm, output_dir: &Path, rows: &mut Vec<ResultRow>) {
        let Some(program) = self.tools.program_for(alg) else {
            return;
        };
        let set = CommandSet {
            algorithm: alg,
            program,
            rar_version: self.tools.rar_version(),
            source: &ds.source,
        };
        for rep in 1..=self.config.total_runs() {
            match self.run_repetition(&set, ds, rep, output_dir) {
                Repetition::Recorded(row) => rows.push(row),
                Repetition::Skipped(reason) => debug!("{alg} rep {rep} produced no row: {reason}"),
                Repetition::Aborted => {
                    warn!("skipping {alg} for dataset {}", ds.name);
                    break;
                }
            }
        }
    }

    fn run_repetition(
        &self,
        set: &CommandSet<'_>,
        ds: &Dataset,
        rep: u32,
        output_dir: &Path,
    ) -> Repetition {
        let alg = set.algorithm;
        let scratch = Scratch::prepare(output_dir, &ds.folder, alg, rep);
        let mut run = Run::new(&ds.name, alg, rep);

        run.advance(RunState::Compressing);
        let Some(compress_time) = self.compress(set, &scratch) else {
            run.advance(RunState::Aborted);
            return Repetition::Aborted;
        };

        let compressed_bytes = match fs::metadata(&scratch.archive) {
            Ok(md) if md.is_file() => md.len(),
            _ => {
                warn!(
                    "output archive was not created: {}. Skipping row.",
                    scratch.archive.display()
                );
                return skip(&mut run, SkipReason::MissingArchive);
            }
        };

        run.advance(RunState::Decompressing);
        if let Err(e) = fs::create_dir_all(&scratch.extract_dir) {
            error!("cannot create {}: {e}. Skipping row.", scratch.extract_dir.display());
            return skip(&mut run, SkipReason::DecompressFailed);
        }
        let decompress_time = match self.invoker.invoke(&set.decompress(&scratch)) {
            Ok(t) => t,
            Err(e) => {
                error!("decompression {alg} failed: {e}. Skipping row.");
                return skip(&mut run, SkipReason::DecompressFailed);
            }
        };

        let warmup = self.config.warmup_runs;
        if rep <= warmup {
            return skip(&mut run, SkipReason::WarmUp);
        }

        run.advance(RunState::Recorded);
        Repetition::Recorded(ResultRow {
            dataset: ds.name.clone(),
            algorithm: alg,
            repetition: rep - warmup,
            file_count: ds.file_count,
            original_bytes: ds.size_bytes,
            compressed_bytes,
            compress_time,
            decompress_time,
        })
    }

    /// Time the compression, retrying once when the failure classifies
    /// as retryable. None aborts the pair.
    fn compress(&self, set: &CommandSet<'_>, scratch: &Scratch) -> Option<Duration> {
        let alg = set.algorithm;
        let err = match self.invoker.invoke(&set.compress(scratch)) {
            Ok(t) => return Some(t),
            Err(e) => e,
        };
        error!("{alg} failed: {err}");

        if self.classifier.classify(alg, err.exit_code()) != FailureClass::RetryWithFallback {
            return None;
        }
        let fallback = set.fallback(scratch)?;
        warn!("retrying {alg} with minimal switches");
        ensure_clean(&scratch.archive);
        match self.invoker.invoke(&fallback) {
            Ok(t) => Some(t),
            Err(e) => {
                error!("{alg} failed again: {e}");
                None
            }
        }
    }
}

fn skip(run: &mut Run<'_>, reason: SkipReason) -> Repetition {
    run.advance(RunState::Skipped(reason));
    Repetition::Skipped(reason)
}

/// Validate, check tools, run every pair and write the report once.
pub fn run_experiment<I: Invoker>(
    config: &BenchConfig,
    tools: &Toolset,
    invoker: I,
) -> Result<ExperimentOutcome> {
    Experiment::new(config, tools, invoker).run()
}
