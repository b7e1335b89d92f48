use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::Algorithm;
use crate::error::{BenchError, Result};

/// Keep only the tail of a failing tool's stderr in error messages.
const STDERR_TAIL: usize = 512;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Compress,
    /// Reduced-switch retry after a classified failure.
    CompressFallback,
    Decompress,
}

/// One synchronous external command, plus the scratch paths it touches.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub stage: Stage,
    pub algorithm: Algorithm,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
}

impl Invocation {
    pub fn command_line(&self) -> String {
        let mut s = self.program.display().to_string();
        for a in &self.args {
            s.push(' ');
            s.push_str(&a.to_string_lossy());
        }
        s
    }
}

/// Runs an invocation to completion and reports its wall-clock time.
/// A non-zero exit is `BenchError::ToolFailed`.
pub trait Invoker {
    fn invoke(&self, inv: &Invocation) -> Result<Duration>;
}

impl<T: Invoker + ?Sized> Invoker for &T {
    fn invoke(&self, inv: &Invocation) -> Result<Duration> {
        (**self).invoke(inv)
    }
}

/// Spawns the real executable. No timeout: a hung tool hangs the run.
pub struct SystemInvoker;

impl Invoker for SystemInvoker {
    fn invoke(&self, inv: &Invocation) -> Result<Duration> {
        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &inv.cwd {
            cmd.current_dir(dir);
        }
        debug!("exec: {}", inv.command_line());

        let start = Instant::now();
        let out = cmd.output()?;
        let elapsed = start.elapsed();

        if !out.status.success() {
            return Err(BenchError::ToolFailed {
                program: inv.command_line(),
                code: out.status.code(),
                stderr: stderr_tail(&out.stderr),
            });
        }
        Ok(elapsed)
    }
}

fn stderr_tail(raw: &[u8]) -> String {
    let s = String::from_utf8_lossy(raw);
    let s = s.trim();
    match s.char_indices().rev().nth(STDERR_TAIL) {
        Some((i, _)) => format!("...{}", &s[i..]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_is_truncated_from_the_front() {
        let long = "x".repeat(STDERR_TAIL * 2) + "END";
        let t = stderr_tail(long.as_bytes());
        assert!(t.starts_with("..."));
        assert!(t.ends_with("END"));
        assert!(t.len() <= STDERR_TAIL + 4);
        assert_eq!(stderr_tail(b"  short\n"), "short");
    }

    #[cfg(unix)]
    #[test]
    fn system_invoker_reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let inv = Invocation {
            stage: Stage::Compress,
            algorithm: Algorithm::Rar,
            program: "/bin/sh".into(),
            args: vec!["-c".into(), "echo nope >&2; exit 7".into()],
            cwd: Some(tmp.path().to_path_buf()),
            archive: tmp.path().join("a.rar"),
            extract_dir: tmp.path().join("x"),
        };
        let err = SystemInvoker.invoke(&inv).unwrap_err();
        assert_eq!(err.exit_code(), Some(7));
        assert!(err.to_string().contains("nope"));
    }

    #[cfg(unix)]
    #[test]
    fn system_invoker_times_successful_runs() {
        let tmp = tempfile::tempdir().unwrap();
        let inv = Invocation {
            stage: Stage::Decompress,
            algorithm: Algorithm::Zip,
            program: "/bin/sh".into(),
            args: vec!["-c".into(), "touch made".into()],
            cwd: Some(tmp.path().to_path_buf()),
            archive: tmp.path().join("a.zip"),
            extract_dir: tmp.path().join("x"),
        };
        SystemInvoker.invoke(&inv).unwrap();
        assert!(tmp.path().join("made").exists());
    }
}
