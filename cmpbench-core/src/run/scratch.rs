use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::Algorithm;

/// Archive and extraction directory for one repetition. Both are removed
/// when the guard is created and again when it drops.
#[derive(Debug)]
pub struct Scratch {
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
}

impl Scratch {
    pub fn prepare(output_dir: &Path, folder: &str, algorithm: Algorithm, rep: u32) -> Self {
        let ext = algorithm.extension();
        let stem = format!("{folder}_{ext}_rep{rep}");
        let s = Self {
            archive: output_dir.join(format!("{stem}.{ext}")),
            extract_dir: output_dir.join(format!("{stem}_extract")),
        };
        s.clean();
        s
    }

    pub fn clean(&self) {
        ensure_clean(&self.archive);
        ensure_clean(&self.extract_dir);
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        self.clean();
    }
}

/// Remove a file or directory tree; already-absent is fine.
pub fn ensure_clean(path: &Path) {
    let md = match fs::symlink_metadata(path) {
        Ok(md) => md,
        Err(_) => return,
    };
    let res = if md.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match res {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => debug!("cleanup of {} failed: {e}", path.display()),
    }
}
