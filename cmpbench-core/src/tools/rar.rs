use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RAR\s+(\d+)\.(\d+)").expect("banner pattern"));

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RarVersion {
    pub major: u32,
    pub minor: u32,
}

impl RarVersion {
    /// RAR 5 and later understand `-ma5`.
    pub fn supports_rar5_format(self) -> bool {
        self.major >= 5
    }
}

impl fmt::Display for RarVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

/// Extract `major.minor` from the text RAR prints when run without
/// arguments.
pub fn parse_banner(text: &str) -> Option<RarVersion> {
    let caps = BANNER.captures(text)?;
    Some(RarVersion {
        major: caps.get(1)?.as_str().parse().ok()?,
        minor: caps.get(2)?.as_str().parse().ok()?,
    })
}

/// Run the executable bare and read its banner. The exit status is
/// ignored; RAR exits non-zero when given no command.
pub fn probe_version(rar: &Path) -> Option<RarVersion> {
    let out = match Command::new(rar)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(o) => o,
        Err(e) => {
            debug!("rar banner probe failed to start: {e}");
            return None;
        }
    };
    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));
    parse_banner(&text)
}
