//! Per-algorithm command lines. Every compression command forces the
//! maximum level and non-solid mode so each file is compressed
//! independently.

use std::ffi::OsString;
use std::path::Path;

use crate::domain::Algorithm;
use crate::process::{Invocation, Stage};
use crate::run::scratch::Scratch;
use crate::tools::rar::RarVersion;

fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

/// Arguments for `<tool> a ... <archive> .`, run inside the dataset.
pub fn compress_args(
    algorithm: Algorithm,
    rar_version: Option<RarVersion>,
    archive: &Path,
) -> Vec<OsString> {
    let mut args = match algorithm {
        Algorithm::Zip => os(&["a", "-tzip", "-mx=9", "-mmt=on", "-bd", "-y"]),
        Algorithm::SevenZ => os(&["a", "-t7z", "-mx=9", "-mmt=on", "-ms=off", "-bd", "-y"]),
        Algorithm::Rar => {
            let mut a = os(&["a"]);
            if rar_version.is_some_and(|v| v.supports_rar5_format()) {
                a.push("-ma5".into());
            }
            a.extend(os(&["-ep1", "-idq", "-y", "-r", "-s-"]));
            a
        }
    };
    args.push(archive.into());
    args.push(".".into());
    args
}

/// Minimal-switch retry command; only RAR has one.
pub fn fallback_args(algorithm: Algorithm, archive: &Path) -> Option<Vec<OsString>> {
    match algorithm {
        Algorithm::Rar => {
            let mut a = os(&["a", "-r", "-idq", "-y", "-s-"]);
            a.push(archive.into());
            a.push(".".into());
            Some(a)
        }
        Algorithm::Zip | Algorithm::SevenZ => None,
    }
}

pub fn decompress_args(algorithm: Algorithm, archive: &Path, extract_dir: &Path) -> Vec<OsString> {
    match algorithm {
        Algorithm::Zip | Algorithm::SevenZ => {
            let mut out = OsString::from("-o");
            out.push(extract_dir);
            let mut a = os(&["x", "-bd", "-y"]);
            a.push(archive.into());
            a.push(out);
            a
        }
        Algorithm::Rar => {
            let mut a = os(&["x", "-o+", "-idq", "-y"]);
            a.push(archive.into());
            a.push(extract_dir.into());
            a
        }
    }
}

/// Builds invocations for one (dataset, algorithm) pair.
pub struct CommandSet<'a> {
    pub algorithm: Algorithm,
    pub program: &'a Path,
    pub rar_version: Option<RarVersion>,
    pub source: &'a Path,
}

impl CommandSet<'_> {
    pub fn compress(&self, scratch: &Scratch) -> Invocation {
        self.invocation(
            Stage::Compress,
            compress_args(self.algorithm, self.rar_version, &scratch.archive),
            Some(self.source),
            scratch,
        )
    }

    pub fn fallback(&self, scratch: &Scratch) -> Option<Invocation> {
        let args = fallback_args(self.algorithm, &scratch.archive)?;
        Some(self.invocation(
            Stage::CompressFallback,
            args,
            Some(self.source),
            scratch,
        ))
    }

    pub fn decompress(&self, scratch: &Scratch) -> Invocation {
        self.invocation(
            Stage::Decompress,
            decompress_args(self.algorithm, &scratch.archive, &scratch.extract_dir),
            None,
            scratch,
        )
    }

    fn invocation(
        &self,
        stage: Stage,
        args: Vec<OsString>,
        cwd: Option<&Path>,
        scratch: &Scratch,
    ) -> Invocation {
        Invocation {
            stage,
            algorithm: self.algorithm,
            program: self.program.to_path_buf(),
            args,
            cwd: cwd.map(Path::to_path_buf),
            archive: scratch.archive.clone(),
            extract_dir: scratch.extract_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(v: &[OsString]) -> Vec<String> {
        v.iter().map(|s| s.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn seven_z_is_non_solid() {
        let a = strs(&compress_args(Algorithm::SevenZ, None, Path::new("/o/a.7z")));
        assert_eq!(
            a,
            ["a", "-t7z", "-mx=9", "-mmt=on", "-ms=off", "-bd", "-y", "/o/a.7z", "."]
        );
    }

    #[test]
    fn zip_uses_seven_zip_zip_mode() {
        let a = strs(&compress_args(Algorithm::Zip, None, Path::new("/o/a.zip")));
        assert_eq!(a[..3], ["a", "-tzip", "-mx=9"]);
        assert_eq!(a.last().map(String::as_str), Some("."));
    }

    #[test]
    fn rar_adds_ma5_only_for_rar5_and_later() {
        let v6 = RarVersion { major: 6, minor: 2 };
        let v4 = RarVersion { major: 4, minor: 20 };
        let new = strs(&compress_args(Algorithm::Rar, Some(v6), Path::new("a.rar")));
        assert_eq!(new, ["a", "-ma5", "-ep1", "-idq", "-y", "-r", "-s-", "a.rar", "."]);
        let old = strs(&compress_args(Algorithm::Rar, Some(v4), Path::new("a.rar")));
        assert!(!old.contains(&"-ma5".to_string()));
        let unknown = strs(&compress_args(Algorithm::Rar, None, Path::new("a.rar")));
        assert!(unknown.contains(&"-s-".to_string()));
        assert!(!unknown.contains(&"-ma5".to_string()));
    }

    #[test]
    fn only_rar_has_a_fallback() {
        let fb = fallback_args(Algorithm::Rar, Path::new("a.rar")).unwrap();
        assert_eq!(strs(&fb), ["a", "-r", "-idq", "-y", "-s-", "a.rar", "."]);
        assert!(fallback_args(Algorithm::Zip, Path::new("a.zip")).is_none());
        assert!(fallback_args(Algorithm::SevenZ, Path::new("a.7z")).is_none());
    }

    #[test]
    fn extraction_targets_scratch_dir() {
        let z = strs(&decompress_args(
            Algorithm::Zip,
            Path::new("/o/a.zip"),
            Path::new("/o/x"),
        ));
        assert_eq!(z, ["x", "-bd", "-y", "/o/a.zip", "-o/o/x"]);
        let r = strs(&decompress_args(
            Algorithm::Rar,
            Path::new("/o/a.rar"),
            Path::new("/o/x"),
        ));
        assert_eq!(r, ["x", "-o+", "-idq", "-y", "/o/a.rar", "/o/x"]);
    }

    #[test]
    fn compression_runs_inside_the_dataset() {
        let tmp = tempfile::tempdir().unwrap();
        let scratch = Scratch::prepare(tmp.path(), "D", Algorithm::Rar, 1);
        let set = CommandSet {
            algorithm: Algorithm::Rar,
            program: Path::new("/usr/bin/rar"),
            rar_version: None,
            source: Path::new("/data/D"),
        };
        let c = set.compress(&scratch);
        assert_eq!(c.stage, Stage::Compress);
        assert_eq!(c.cwd.as_deref(), Some(Path::new("/data/D")));
        let d = set.decompress(&scratch);
        assert_eq!(d.cwd, None);
        assert_eq!(set.fallback(&scratch).unwrap().stage, Stage::CompressFallback);
    }
}
