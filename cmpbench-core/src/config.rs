use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::ToolFamily;
use crate::error::{BenchError, Result};

pub const DEFAULT_REPETITIONS: u32 = 10;
pub const DEFAULT_WARMUP_RUNS: u32 = 1;
pub const DEFAULT_REPORT_NAME: &str = "compression_results.csv";

/// Display name bound to a folder under the datasets root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetSpec {
    pub name: String,
    pub folder: String,
}

impl DatasetSpec {
    pub fn new(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: folder.into(),
        }
    }

    /// Parse `Name=Folder`.
    pub fn parse(s: &str) -> Result<Self> {
        let (name, folder) = s
            .split_once('=')
            .ok_or_else(|| BenchError::Config(format!("expected NAME=FOLDER, got {s:?}")))?;
        let (name, folder) = (name.trim(), folder.trim());
        if name.is_empty() || folder.is_empty() {
            return Err(BenchError::Config(format!(
                "dataset name and folder must be non-empty: {s:?}"
            )));
        }
        check_folder(folder)?;
        Ok(Self::new(name, folder))
    }
}

/// Folders are spliced into scratch file names, so they must be a single
/// path component.
fn check_folder(folder: &str) -> Result<()> {
    if folder.contains(['/', '\\']) || folder == "." || folder == ".." {
        return Err(BenchError::Config(format!(
            "dataset folder must be a plain directory name: {folder:?}"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Measured repetitions per (dataset, algorithm) pair.
    pub repetitions: u32,
    /// Leading repetitions executed but never reported.
    pub warmup_runs: u32,
    pub datasets_dir: PathBuf,
    pub output_dir: PathBuf,
    pub datasets: Vec<DatasetSpec>,
    pub report_name: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
            warmup_runs: DEFAULT_WARMUP_RUNS,
            datasets_dir: PathBuf::from("datasets"),
            output_dir: PathBuf::from("results"),
            datasets: vec![
                DatasetSpec::new("Texto Puro", "Dataset_Texto"),
                DatasetSpec::new("Imagens", "Dataset_Imagens"),
                DatasetSpec::new("Misto", "Dataset_Misto"),
            ],
            report_name: DEFAULT_REPORT_NAME.into(),
        }
    }
}

impl BenchConfig {
    /// Warm-up plus measured repetitions. Saturates; `validate` rejects
    /// configs where the sum does not fit.
    pub fn total_runs(&self) -> u32 {
        self.repetitions.saturating_add(self.warmup_runs)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_name)
    }

    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(BenchError::Config(
                "at least one measured repetition is required".into(),
            ));
        }
        if self.repetitions.checked_add(self.warmup_runs).is_none() {
            return Err(BenchError::Config(format!(
                "{} repetitions plus {} warm-up runs overflow the run counter",
                self.repetitions, self.warmup_runs
            )));
        }
        if self.datasets.is_empty() {
            return Err(BenchError::Config("no datasets configured".into()));
        }
        let mut seen = HashSet::new();
        for d in &self.datasets {
            if !seen.insert(d.name.as_str()) {
                return Err(BenchError::Config(format!(
                    "duplicate dataset name: {}",
                    d.name
                )));
            }
            check_folder(&d.folder)?;
        }
        if self.report_name.is_empty() || self.report_name.contains(['/', '\\']) {
            return Err(BenchError::Config(format!(
                "report name must be a plain file name: {:?}",
                self.report_name
            )));
        }
        Ok(())
    }
}

/// Ordered executable candidates per tool family. Bare names go through
/// the executable search path; absolute paths are checked directly.
#[derive(Clone, Debug)]
pub struct ToolCandidates {
    pub sevenzip: Vec<String>,
    pub rar: Vec<String>,
}

impl Default for ToolCandidates {
    fn default() -> Self {
        Self {
            sevenzip: vec![
                "7z".into(),
                "7zz".into(),
                r"C:\Program Files\7-Zip\7z.exe".into(),
                r"C:\Program Files (x86)\7-Zip\7z.exe".into(),
            ],
            rar: vec![
                "rar".into(),
                r"C:\Program Files\WinRAR\Rar.exe".into(),
                r"C:\Program Files (x86)\WinRAR\Rar.exe".into(),
            ],
        }
    }
}

impl ToolCandidates {
    pub fn for_family(&self, family: ToolFamily) -> &[String] {
        match family {
            ToolFamily::SevenZip => &self.sevenzip,
            ToolFamily::Rar => &self.rar,
        }
    }

    /// Put an explicit path ahead of the defaults.
    pub fn prefer(&mut self, family: ToolFamily, path: impl Into<String>) {
        let list = match family {
            ToolFamily::SevenZip => &mut self.sevenzip,
            ToolFamily::Rar => &mut self.rar,
        };
        list.insert(0, path.into());
    }
}
