use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "cmpbench: ZIP/7Z/RAR compression benchmark", long_about = None)]
pub struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct ToolArgs {
    /// Explicit 7-Zip executable, tried before PATH and default locations
    #[arg(long = "sevenzip")]
    pub sevenzip: Option<PathBuf>,

    /// Explicit RAR executable, tried before PATH and default locations
    #[arg(long = "rar")]
    pub rar: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct DatasetArgs {
    /// Root directory holding one folder per dataset
    #[arg(long, default_value = "datasets")]
    pub datasets_dir: PathBuf,

    /// Dataset as NAME=FOLDER (repeatable); replaces the default set
    #[arg(long = "dataset", value_name = "NAME=FOLDER")]
    pub datasets: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full benchmark and write the CSV report
    Run {
        #[command(flatten)]
        datasets: DatasetArgs,

        #[command(flatten)]
        tools: ToolArgs,

        /// Measured repetitions per dataset and algorithm
        #[arg(long, short = 'n', default_value_t = cmpbench_core::config::DEFAULT_REPETITIONS)]
        repetitions: u32,

        /// Leading repetitions executed but not reported
        #[arg(long, default_value_t = cmpbench_core::config::DEFAULT_WARMUP_RUNS)]
        warmup: u32,

        /// Directory for scratch archives and the report
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Report file name inside the output directory
        #[arg(long, default_value = cmpbench_core::config::DEFAULT_REPORT_NAME)]
        report_name: String,
    },

    /// Show which compressors were found and which algorithms they enable
    Tools {
        #[command(flatten)]
        tools: ToolArgs,
    },

    /// Show size and file count of each configured dataset
    Scan {
        #[command(flatten)]
        datasets: DatasetArgs,
    },
}
