// cmpbench_core/src/domain.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Family of external executables; one resolved binary serves every
/// algorithm of its family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    SevenZip,
    Rar,
}

impl ToolFamily {
    pub fn algorithms(self) -> &'static [Algorithm] {
        match self {
            ToolFamily::SevenZip => &[Algorithm::Zip, Algorithm::SevenZ],
            ToolFamily::Rar => &[Algorithm::Rar],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolFamily::SevenZip => "7-Zip",
            ToolFamily::Rar => "RAR",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    #[serde(rename = "ZIP")]
    Zip,
    #[serde(rename = "7Z")]
    SevenZ,
    #[serde(rename = "RAR")]
    Rar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Zip, Algorithm::SevenZ, Algorithm::Rar];

    pub fn family(self) -> ToolFamily {
        match self {
            Algorithm::Zip | Algorithm::SevenZ => ToolFamily::SevenZip,
            Algorithm::Rar => ToolFamily::Rar,
        }
    }

    /// Archive file extension, also used in scratch names.
    pub fn extension(self) -> &'static str {
        match self {
            Algorithm::Zip => "zip",
            Algorithm::SevenZ => "7z",
            Algorithm::Rar => "rar",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Zip => "ZIP",
            Algorithm::SevenZ => "7Z",
            Algorithm::Rar => "RAR",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A scanned dataset directory. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    pub name: String,
    pub folder: String,
    pub source: PathBuf,
    pub size_bytes: u64,
    pub file_count: u64,
}

impl Dataset {
    pub fn size_mb(&self) -> f64 {
        bytes_to_mb(self.size_bytes)
    }
}

/// One measured repetition. Only built for repetitions past the warm-up
/// window whose compression and extraction both succeeded.
#[derive(Clone, Debug)]
pub struct ResultRow {
    pub dataset: String,
    pub algorithm: Algorithm,
    /// 1-based, counted after the warm-up window.
    pub repetition: u32,
    pub file_count: u64,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl ResultRow {
    pub fn original_mb(&self) -> f64 {
        bytes_to_mb(self.original_bytes)
    }

    pub fn compressed_mb(&self) -> f64 {
        bytes_to_mb(self.compressed_bytes)
    }

    pub fn ratio_percent(&self) -> f64 {
        compression_ratio(self.original_bytes, self.compressed_bytes)
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Percentage saved: `(1 - compressed / original) * 100`.
/// Negative when the archive is larger than its input; never clamped.
pub fn compression_ratio(original_bytes: u64, compressed_bytes: u64) -> f64 {
    (1.0 - compressed_bytes as f64 / original_bytes as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_matches_formula() {
        assert!((compression_ratio(1000, 250) - 75.0).abs() < 1e-9);
        assert!((compression_ratio(4096, 4096)).abs() < 1e-9);
    }

    #[test]
    fn ratio_goes_negative_for_expanding_archives() {
        let r = compression_ratio(100, 150);
        assert!((r + 50.0).abs() < 1e-9);
    }

    #[test]
    fn families_cover_every_algorithm_once() {
        for alg in Algorithm::ALL {
            let fam = alg.family();
            assert_eq!(fam.algorithms().iter().filter(|a| **a == alg).count(), 1);
        }
    }

    #[test]
    fn mb_uses_binary_megabytes() {
        assert_eq!(bytes_to_mb(10 * 1024 * 1024), 10.0);
    }
}
