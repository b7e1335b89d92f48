use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// First candidate that exists as an absolute path or is found on `PATH`.
pub fn resolve_executable(candidates: &[String]) -> Option<PathBuf> {
    let search = env::var_os("PATH");
    resolve_in(candidates, search.as_deref())
}

/// Same as [`resolve_executable`] with an explicit search path.
pub fn resolve_in(candidates: &[String], search_path: Option<&OsStr>) -> Option<PathBuf> {
    for c in candidates {
        let p = Path::new(c);
        if p.is_absolute() {
            if p.exists() {
                return Some(p.to_path_buf());
            }
            continue;
        }
        if let Some(found) = search_path.and_then(|sp| find_on_path(c, sp)) {
            return Some(found);
        }
    }
    None
}

fn find_on_path(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    // A relative name with a separator is not looked up on PATH.
    if Path::new(name).components().count() > 1 {
        let p = PathBuf::from(name);
        return is_executable(&p).then_some(p);
    }
    for dir in env::split_paths(search_path) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let p = dir.join(name);
        if is_executable(&p) {
            return Some(p);
        }
        #[cfg(windows)]
        {
            let exe = dir.join(format!("{name}.exe"));
            if is_executable(&exe) {
                return Some(exe);
            }
        }
    }
    None
}

fn is_executable(p: &Path) -> bool {
    let Ok(md) = std::fs::metadata(p) else {
        return false;
    };
    if !md.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        md.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
