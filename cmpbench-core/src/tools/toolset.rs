use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ToolCandidates;
use crate::domain::{Algorithm, ToolFamily};
use crate::tools::rar::{self, RarVersion};
use crate::tools::resolve::resolve_executable;

#[derive(Clone, Debug)]
pub struct RarTool {
    pub path: PathBuf,
    /// None when the banner could not be read; baseline switches are used.
    pub version: Option<RarVersion>,
}

/// Resolved compressor executables. A missing family only removes its
/// algorithms from the run matrix.
#[derive(Clone, Debug, Default)]
pub struct Toolset {
    pub sevenzip: Option<PathBuf>,
    pub rar: Option<RarTool>,
}

impl Toolset {
    pub fn resolve(candidates: &ToolCandidates) -> Self {
        let sevenzip = resolve_executable(candidates.for_family(ToolFamily::SevenZip));
        match &sevenzip {
            Some(p) => info!("7-Zip: {}", p.display()),
            None => warn!("7-Zip not found; ZIP and 7Z will be skipped"),
        }

        let rar = resolve_executable(candidates.for_family(ToolFamily::Rar)).map(|path| {
            let version = rar::probe_version(&path);
            match version {
                Some(v) => info!("RAR: {} (version {v})", path.display()),
                None => warn!(
                    "RAR: {} (could not detect version; assuming baseline compatibility)",
                    path.display()
                ),
            }
            RarTool { path, version }
        });
        if rar.is_none() {
            warn!("RAR/WinRAR not found; RAR will be skipped");
        }

        Self { sevenzip, rar }
    }

    pub fn family_path(&self, family: ToolFamily) -> Option<&Path> {
        match family {
            ToolFamily::SevenZip => self.sevenzip.as_deref(),
            ToolFamily::Rar => self.rar.as_ref().map(|r| r.path.as_path()),
        }
    }

    pub fn program_for(&self, algorithm: Algorithm) -> Option<&Path> {
        self.family_path(algorithm.family())
    }

    pub fn rar_version(&self) -> Option<RarVersion> {
        self.rar.as_ref().and_then(|r| r.version)
    }

    /// Algorithms in run order (ZIP, 7Z, RAR) whose family resolved.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|a| self.program_for(*a).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sevenzip.is_none() && self.rar.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithms_follow_resolved_families() {
        let only_7z = Toolset {
            sevenzip: Some("/usr/bin/7z".into()),
            rar: None,
        };
        assert_eq!(only_7z.algorithms(), vec![Algorithm::Zip, Algorithm::SevenZ]);
        assert_eq!(only_7z.program_for(Algorithm::Rar), None);

        let only_rar = Toolset {
            sevenzip: None,
            rar: Some(RarTool {
                path: "/usr/bin/rar".into(),
                version: None,
            }),
        };
        assert_eq!(only_rar.algorithms(), vec![Algorithm::Rar]);
        assert_eq!(only_rar.rar_version(), None);
    }

    #[test]
    fn empty_toolset_has_no_algorithms() {
        let t = Toolset::default();
        assert!(t.is_empty());
        assert!(t.algorithms().is_empty());
    }

    #[test]
    fn resolve_with_unreachable_candidates_is_empty() {
        let c = ToolCandidates {
            sevenzip: vec!["/nonexistent/7z".into()],
            rar: vec!["/nonexistent/rar".into()],
        };
        assert!(Toolset::resolve(&c).is_empty());
    }
}
