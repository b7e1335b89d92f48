use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DatasetSpec;
use crate::domain::Dataset;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirStats {
    pub size_bytes: u64,
    pub file_count: u64,
}

/// Why a configured dataset was left out of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    Ready(Dataset),
    Missing(PathBuf),
    Empty(PathBuf),
}

/// Recursively sum file sizes and count files below `root`.
///
/// Symlinks to files are counted but their size is not followed. Symlinks
/// to directories are treated as directories and neither counted nor
/// descended into. Entries that vanish while walking, or cannot be read,
/// are skipped.
pub fn dir_stats(root: &Path) -> DirStats {
    let mut stats = DirStats::default();
    for e in WalkDir::new(root).follow_links(false) {
        let e = match e {
            Ok(e) => e,
            Err(err) => {
                debug!("scan: skipping unreadable entry: {err}");
                continue;
            }
        };
        let ft = e.file_type();
        if ft.is_dir() {
            continue;
        }
        if ft.is_symlink() {
            // Dangling links count as files.
            if !e.path().is_dir() {
                stats.file_count += 1;
            }
            continue;
        }
        stats.file_count += 1;
        match e.metadata() {
            Ok(md) => stats.size_bytes += md.len(),
            Err(err) if err.io_error().map(|io| io.kind()) == Some(ErrorKind::NotFound) => {
                debug!("scan: {} vanished during scan", e.path().display());
            }
            Err(err) => debug!("scan: no metadata for {}: {err}", e.path().display()),
        }
    }
    stats
}

pub fn scan_dataset(spec: &DatasetSpec, datasets_dir: &Path) -> ScanOutcome {
    let source = datasets_dir.join(&spec.folder);
    if !source.is_dir() {
        return ScanOutcome::Missing(source);
    }
    let stats = dir_stats(&source);
    if stats.size_bytes == 0 {
        return ScanOutcome::Empty(source);
    }
    ScanOutcome::Ready(Dataset {
        name: spec.name.clone(),
        folder: spec.folder.clone(),
        source,
        size_bytes: stats.size_bytes,
        file_count: stats.file_count,
    })
}

/// Scan every configured dataset, warning about and dropping missing or
/// empty ones.
pub fn scan_all(specs: &[DatasetSpec], datasets_dir: &Path) -> Vec<Dataset> {
    specs
        .iter()
        .filter_map(|s| match scan_dataset(s, datasets_dir) {
            ScanOutcome::Ready(d) => Some(d),
            ScanOutcome::Missing(p) => {
                warn!("dataset folder not found: {}. Skipping...", p.display());
                None
            }
            ScanOutcome::Empty(p) => {
                warn!("dataset is empty: {}. Skipping...", p.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn sums_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("top.txt"), vec![0u8; 100]).unwrap();
        fs::write(tmp.path().join("a/one.bin"), vec![1u8; 250]).unwrap();
        fs::write(tmp.path().join("a/b/two.bin"), vec![2u8; 50]).unwrap();

        let s = dir_stats(tmp.path());
        assert_eq!(s.size_bytes, 400);
        assert_eq!(s.file_count, 3);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_sizes_are_not_followed() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("real.bin");
        fs::write(&target, vec![0u8; 1000]).unwrap();
        std::os::unix::fs::symlink(&target, tmp.path().join("link.bin")).unwrap();

        let s = dir_stats(tmp.path());
        assert_eq!(s.size_bytes, 1000);
        assert_eq!(s.file_count, 2);
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_not_files() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("abc.txt"), b"abc").unwrap();
        std::os::unix::fs::symlink(&data, data.join("loop")).unwrap();
        std::os::unix::fs::symlink(data.join("gone.txt"), data.join("dangling")).unwrap();

        let s = dir_stats(&data);
        assert_eq!(s.size_bytes, 3);
        assert_eq!(s.file_count, 2);
    }

    #[test]
    fn missing_and_empty_datasets_are_reported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("Empty")).unwrap();
        fs::write(tmp.path().join("Empty/zero.txt"), b"").unwrap();

        let missing = DatasetSpec::new("Gone", "Nope");
        assert_eq!(
            scan_dataset(&missing, tmp.path()),
            ScanOutcome::Missing(tmp.path().join("Nope"))
        );
        let empty = DatasetSpec::new("Empty", "Empty");
        assert_eq!(
            scan_dataset(&empty, tmp.path()),
            ScanOutcome::Empty(tmp.path().join("Empty"))
        );
    }

    #[test]
    fn scan_all_keeps_remaining_datasets() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("Text")).unwrap();
        fs::write(tmp.path().join("Text/a.txt"), b"hello").unwrap();
        let specs = vec![
            DatasetSpec::new("Missing", "Nope"),
            DatasetSpec::new("Text", "Text"),
        ];
        let ds = scan_all(&specs, tmp.path());
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].name, "Text");
        assert_eq!(ds[0].size_bytes, 5);
        assert_eq!(ds[0].file_count, 1);
    }
}
