#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod domain;
pub mod error;
pub mod process;
pub mod report;
pub mod scan;
pub mod summary;

pub mod tools {
    pub mod rar;
    pub mod resolve;
    pub mod toolset;
}

pub mod run {
    pub mod commands;
    pub mod driver;
    pub mod scratch;
    pub mod state;
}

// Re-exports: stable API surface
pub use config::{BenchConfig, DatasetSpec, ToolCandidates};
pub use domain::{Algorithm, ResultRow, ToolFamily};
pub use process::{Invoker, SystemInvoker};
pub use run::driver::{Experiment, ExperimentOutcome, run_experiment};
pub use tools::toolset::Toolset;
