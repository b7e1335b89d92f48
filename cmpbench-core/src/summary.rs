use crate::domain::{Algorithm, ResultRow};

/// Mean and sample standard deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub stddev: f64,
}

impl Spread {
    pub fn of(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let stddev = if n > 1 {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };
        Self { mean, stddev }
    }
}

/// Aggregate over the measured rows of one (dataset, algorithm) pair.
#[derive(Clone, Debug)]
pub struct PairSummary {
    pub dataset: String,
    pub algorithm: Algorithm,
    pub runs: usize,
    pub compressed_mb: f64,
    pub ratio_percent: f64,
    pub compress_secs: Spread,
    pub decompress_secs: Spread,
}

/// Group rows by pair, keeping first-seen order.
pub fn summarize(rows: &[ResultRow]) -> Vec<PairSummary> {
    let mut groups: Vec<((&str, Algorithm), Vec<&ResultRow>)> = Vec::new();
    for r in rows {
        let key = (r.dataset.as_str(), r.algorithm);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, g)) => g.push(r),
            None => groups.push((key, vec![r])),
        }
    }

    groups
        .into_iter()
        .map(|((dataset, algorithm), g)| {
            let n = g.len() as f64;
            let ct: Vec<f64> = g.iter().map(|r| r.compress_time.as_secs_f64()).collect();
            let dt: Vec<f64> = g.iter().map(|r| r.decompress_time.as_secs_f64()).collect();
            PairSummary {
                dataset: dataset.to_string(),
                algorithm,
                runs: g.len(),
                compressed_mb: g.iter().map(|r| r.compressed_mb()).sum::<f64>() / n,
                ratio_percent: g.iter().map(|r| r.ratio_percent()).sum::<f64>() / n,
                compress_secs: Spread::of(&ct),
                decompress_secs: Spread::of(&dt),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn row(ds: &str, alg: Algorithm, secs: u64, compressed: u64) -> ResultRow {
        ResultRow {
            dataset: ds.into(),
            algorithm: alg,
            repetition: 1,
            file_count: 1,
            original_bytes: 1000,
            compressed_bytes: compressed,
            compress_time: Duration::from_secs(secs),
            decompress_time: Duration::from_secs(1),
        }
    }

    #[test]
    fn spread_of_known_values() {
        let s = Spread::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.stddev - 2.138_089_935).abs() < 1e-6);
        assert_eq!(Spread::of(&[3.0]).stddev, 0.0);
        assert_eq!(Spread::of(&[]), Spread::default());
    }

    #[test]
    fn groups_by_pair_in_first_seen_order() {
        let rows = vec![
            row("A", Algorithm::Zip, 1, 500),
            row("A", Algorithm::Rar, 3, 400),
            row("A", Algorithm::Zip, 3, 300),
            row("B", Algorithm::Zip, 2, 1200),
        ];
        let s = summarize(&rows);
        assert_eq!(s.len(), 3);
        assert_eq!((s[0].dataset.as_str(), s[0].algorithm), ("A", Algorithm::Zip));
        assert_eq!(s[0].runs, 2);
        assert!((s[0].compress_secs.mean - 2.0).abs() < 1e-12);
        assert!((s[0].ratio_percent - 60.0).abs() < 1e-9);
        assert_eq!(s[1].algorithm, Algorithm::Rar);
        assert!((s[2].ratio_percent + 20.0).abs() < 1e-9);
    }
}
