pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use cmpbench_core::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            datasets,
            tools,
            repetitions,
            warmup,
            output_dir,
            report_name,
        } => handlers::handle_run(
            datasets,
            tools,
            repetitions,
            warmup,
            output_dir,
            report_name,
        ),
        Commands::Tools { tools } => handlers::handle_tools(tools),
        Commands::Scan { datasets } => handlers::handle_scan(datasets),
    }
}
