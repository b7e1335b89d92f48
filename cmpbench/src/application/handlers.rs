use std::path::PathBuf;

use cmpbench_core::config::{BenchConfig, DatasetSpec, ToolCandidates};
use cmpbench_core::domain::ToolFamily;
use cmpbench_core::error::Result;
use cmpbench_core::scan::{ScanOutcome, scan_dataset};
use cmpbench_core::summary::{PairSummary, summarize};
use cmpbench_core::{SystemInvoker, Toolset, run_experiment};

use crate::presentation::cli::{DatasetArgs, ToolArgs};

fn candidates_from_args(args: ToolArgs) -> ToolCandidates {
    let mut c = ToolCandidates::default();
    if let Some(p) = args.sevenzip {
        c.prefer(ToolFamily::SevenZip, p.to_string_lossy());
    }
    if let Some(p) = args.rar {
        c.prefer(ToolFamily::Rar, p.to_string_lossy());
    }
    c
}

fn dataset_specs(args: &DatasetArgs) -> Result<Vec<DatasetSpec>> {
    if args.datasets.is_empty() {
        return Ok(BenchConfig::default().datasets);
    }
    args.datasets.iter().map(|s| DatasetSpec::parse(s)).collect()
}

fn config_from_args(
    datasets: DatasetArgs,
    repetitions: u32,
    warmup: u32,
    output_dir: PathBuf,
    report_name: String,
) -> Result<BenchConfig> {
    let config = BenchConfig {
        repetitions,
        warmup_runs: warmup,
        datasets: dataset_specs(&datasets)?,
        datasets_dir: datasets.datasets_dir,
        output_dir,
        report_name,
    };
    config.validate()?;
    Ok(config)
}

pub fn handle_run(
    datasets: DatasetArgs,
    tools: ToolArgs,
    repetitions: u32,
    warmup: u32,
    output_dir: PathBuf,
    report_name: String,
) -> Result<()> {
    let config = config_from_args(datasets, repetitions, warmup, output_dir, report_name)?;
    eprintln!(
        "run: {} measured + {} warm-up repetitions over {} dataset(s)",
        config.repetitions,
        config.warmup_runs,
        config.datasets.len()
    );
    let toolset = Toolset::resolve(&candidates_from_args(tools));
    let outcome = run_experiment(&config, &toolset, SystemInvoker)?;
    if !outcome.rows.is_empty() {
        print_summary(&summarize(&outcome.rows));
    }
    eprintln!("run: done");
    Ok(())
}

pub fn handle_tools(tools: ToolArgs) -> Result<()> {
    let toolset = Toolset::resolve(&candidates_from_args(tools));
    for family in [ToolFamily::SevenZip, ToolFamily::Rar] {
        match toolset.family_path(family) {
            Some(p) => println!("{:<8} {}", family.label(), p.display()),
            None => println!("{:<8} (not found)", family.label()),
        }
    }
    if toolset.rar.is_some() {
        match toolset.rar_version() {
            Some(v) => println!("{:<8} version {v}", ""),
            None => println!("{:<8} version unknown, baseline switches", ""),
        }
    }
    let algs: Vec<String> = toolset.algorithms().iter().map(|a| a.to_string()).collect();
    if algs.is_empty() {
        println!("algorithms: none");
    } else {
        println!("algorithms: {}", algs.join(", "));
    }
    Ok(())
}

pub fn handle_scan(datasets: DatasetArgs) -> Result<()> {
    let specs = dataset_specs(&datasets)?;
    println!(
        "{:<20} {:<24} {:>12} {:>8}",
        "Dataset", "Folder", "Size (MB)", "Files"
    );
    for spec in &specs {
        match scan_dataset(spec, &datasets.datasets_dir) {
            ScanOutcome::Ready(d) => println!(
                "{:<20} {:<24} {:>12.2} {:>8}",
                d.name,
                d.folder,
                d.size_mb(),
                d.file_count
            ),
            ScanOutcome::Missing(p) => {
                println!("{:<20} {:<24} missing: {}", spec.name, spec.folder, p.display())
            }
            ScanOutcome::Empty(p) => {
                println!("{:<20} {:<24} empty: {}", spec.name, spec.folder, p.display())
            }
        }
    }
    Ok(())
}

fn print_summary(summaries: &[PairSummary]) {
    println!(
        "{:<20} {:<5} {:>4} {:>14} {:>10} {:>20} {:>20}",
        "Dataset", "Alg", "Runs", "Archive (MB)", "Ratio (%)", "Comp (s) mean±sd", "Decomp (s) mean±sd"
    );
    for s in summaries {
        println!(
            "{:<20} {:<5} {:>4} {:>14.4} {:>10.2} {:>20} {:>20}",
            s.dataset,
            s.algorithm,
            s.runs,
            s.compressed_mb,
            s.ratio_percent,
            format!("{:.4}±{:.4}", s.compress_secs.mean, s.compress_secs.stddev),
            format!("{:.4}±{:.4}", s.decompress_secs.mean, s.decompress_secs.stddev),
        );
    }
}
