use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{Algorithm, ResultRow};
use crate::error::Result;

/// Column order of every report.
pub const HEADER: [&str; 9] = [
    "Dataset",
    "Algorithm",
    "Repetition",
    "FileCount",
    "OriginalSizeMB",
    "CompressedSizeMB",
    "CompressionRatioPercent",
    "CompressionTimeSeconds",
    "DecompressionTimeSeconds",
];

/// One CSV line; field order matches [`HEADER`].
#[derive(Serialize)]
struct Record<'a> {
    dataset: &'a str,
    algorithm: Algorithm,
    repetition: u32,
    file_count: u64,
    original_mb: String,
    compressed_mb: String,
    ratio_percent: String,
    compress_secs: String,
    decompress_secs: String,
}

fn four(v: f64) -> String {
    format!("{v:.4}")
}

impl<'a> From<&'a ResultRow> for Record<'a> {
    fn from(r: &'a ResultRow) -> Self {
        Self {
            dataset: &r.dataset,
            algorithm: r.algorithm,
            repetition: r.repetition,
            file_count: r.file_count,
            original_mb: four(r.original_mb()),
            compressed_mb: four(r.compressed_mb()),
            ratio_percent: four(r.ratio_percent()),
            compress_secs: four(r.compress_time.as_secs_f64()),
            decompress_secs: four(r.decompress_time.as_secs_f64()),
        }
    }
}

/// Write all rows once. With no rows nothing is created and None is
/// returned.
pub fn write_report(rows: &[ResultRow], path: &Path) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    w.write_record(HEADER)?;
    for r in rows {
        w.serialize(Record::from(r))?;
    }
    w.flush()?;
    Ok(Some(path.to_path_buf()))
}
