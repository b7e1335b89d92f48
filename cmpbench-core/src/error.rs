use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no compressor found on PATH or in the standard install locations")]
    NoTools,

    #[error("{program} failed (exit code {}){}", fmt_code(.code), fmt_stderr(.stderr))]
    ToolFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl BenchError {
    /// Exit code of a failed external tool, if the failure came from one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            BenchError::ToolFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn fmt_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none, killed by signal".into())
}

fn fmt_stderr(stderr: &str) -> String {
    let s = stderr.trim();
    if s.is_empty() {
        String::new()
    } else {
        format!(": {s}")
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, BenchError>;
