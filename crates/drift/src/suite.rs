use super::stats;
use super::*;
use mls_core::*;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;

/// Anything that can judge a current dataset against a reference one.
pub trait Analyser: Send + Sync {
    /// Both matrices are row-major and must share the column layout in `names`.
    fn compare(
        &self,
        names: &[String],
        reference: &[Vec<Feature>],
        current: &[Vec<Feature>],
    ) -> anyhow::Result<DriftReport>;
}

/// Column-wise drift suite.
///
/// A feature drifts when its two-sample KS p-value falls below
/// `p_value`; the dataset drifts when at least `share` of its features do.
/// PSI and Wasserstein distance are reported alongside for context.
/// Columns are scored in parallel; report order follows `names`.
#[derive(Debug, Clone, Copy)]
pub struct Suite {
    p_value: Statistic,
    share: Statistic,
    bins: usize,
}

impl Default for Suite {
    fn default() -> Self {
        Self {
            p_value: DRIFT_P_VALUE,
            share: DRIFT_SHARE,
            bins: PSI_BINS,
        }
    }
}

impl Suite {
    pub fn new(p_value: Statistic, share: Statistic, bins: usize) -> Self {
        Self {
            p_value,
            share,
            bins,
        }
    }
    fn column(rows: &[Vec<Feature>], j: usize) -> Vec<Feature> {
        rows.iter().map(|r| r[j]).collect()
    }
    fn feature(&self, name: &str, reference: &[Feature], current: &[Feature]) -> FeatureDrift {
        let d = stats::ks_statistic(reference, current);
        let p = stats::ks_p_value(d, reference.len(), current.len());
        FeatureDrift {
            name: name.to_string(),
            ks_statistic: d,
            p_value: p,
            psi: stats::psi(reference, current, self.bins),
            wasserstein: stats::wasserstein(reference, current),
            reference_mean: stats::mean(reference),
            current_mean: stats::mean(current),
            drift_detected: p < self.p_value,
        }
    }
}

impl Analyser for Suite {
    fn compare(
        &self,
        names: &[String],
        reference: &[Vec<Feature>],
        current: &[Vec<Feature>],
    ) -> anyhow::Result<DriftReport> {
        anyhow::ensure!(!reference.is_empty(), "reference dataset is empty");
        anyhow::ensure!(!current.is_empty(), "current dataset is empty");
        for (which, rows) in [("reference", reference), ("current", current)] {
            if let Some(i) = rows.iter().position(|r| r.len() != names.len()) {
                anyhow::bail!(
                    "{} row {} has {} values, expected {}",
                    which,
                    i,
                    rows[i].len(),
                    names.len()
                );
            }
        }
        let features = names
            .par_iter()
            .enumerate()
            .map(|(j, name)| {
                let ref r = Self::column(reference, j);
                let ref c = Self::column(current, j);
                self.feature(name, r, c)
            })
            .collect::<Vec<FeatureDrift>>();
        let n_features = features.len();
        let n_drifted = features.iter().filter(|f| f.drift_detected).count();
        let share_drifted = n_drifted as Statistic / n_features.max(1) as Statistic;
        Ok(DriftReport {
            method: "kolmogorov-smirnov".to_string(),
            p_value_threshold: self.p_value,
            share_threshold: self.share,
            reference_rows: reference.len(),
            current_rows: current.len(),
            n_features,
            n_drifted,
            share_drifted,
            dataset_drift: n_features > 0 && share_drifted >= self.share,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand_distr::Distribution;
    use rand_distr::Normal;

    fn names() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    fn gaussian(n: usize, shift: f32, seed: u64) -> Vec<Vec<f32>> {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let normal = Normal::new(0f32, 1.).unwrap();
        (0..n)
            .map(|_| vec![normal.sample(rng) + shift, normal.sample(rng)])
            .collect()
    }

    #[test]
    fn same_data_does_not_drift() {
        let rows = gaussian(300, 0., 1);
        let report = Suite::default().compare(&names(), &rows, &rows).unwrap();
        assert_eq!(report.n_drifted, 0);
        assert!(!report.dataset_drift);
        assert_eq!(report.features.len(), 2);
    }

    #[test]
    fn shifted_column_drifts() {
        let reference = gaussian(500, 0., 1);
        let current = gaussian(500, 2., 2);
        let report = Suite::new(0.001, DRIFT_SHARE, PSI_BINS)
            .compare(&names(), &reference, &current).unwrap();
        assert!(report.features[0].drift_detected);
        assert!(!report.features[1].drift_detected);
        assert!(report.features[0].wasserstein > 1.);
        assert_eq!(report.drifted().count(), 1);
        assert!(report.dataset_drift);
    }

    #[test]
    fn rejects_mismatched_width() {
        let reference = gaussian(10, 0., 1);
        let current = vec![vec![1.]];
        assert!(Suite::default().compare(&names(), &reference, &current).is_err());
    }

    #[test]
    fn rejects_empty_current() {
        let reference = gaussian(10, 0., 1);
        assert!(Suite::default().compare(&names(), &reference, &[]).is_err());
    }

    #[test]
    fn report_order_follows_column_names() {
        let names = (0..16).map(|j| format!("c{}", j)).collect::<Vec<_>>();
        let rows = (0..40)
            .map(|i| (0..16).map(|j| (i * j) as f32).collect())
            .collect::<Vec<Vec<f32>>>();
        let report = Suite::default().compare(&names, &rows, &rows).unwrap();
        let order = report.features.iter().map(|f| f.name.clone()).collect::<Vec<_>>();
        assert_eq!(order, names);
    }

    #[test]
    fn report_serializes() {
        let rows = gaussian(20, 0., 3);
        let report = Suite::default().compare(&names(), &rows, &rows).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["n_features"], 2);
        assert!(json["features"].is_array());
    }
}
