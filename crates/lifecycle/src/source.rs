use mls_core::*;
use mls_forest::Dataset;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::Distribution;
use rand_distr::Normal;

/// Where training rows come from.
pub trait Source: Send + Sync {
    /// A labelled dataset of `n` rows.
    fn dataset(&self, n: usize) -> anyhow::Result<Dataset>;
}

/// Demonstration data: `FEATURE_COUNT` standard-normal columns named
/// `feature_1..`, labelled 1 when `feature_1 + feature_2 > 0`.
///
/// Seeded, so every training run sees the same rows for the same `n`.
#[derive(Debug, Clone, Copy)]
pub struct Synthetic {
    seed: u64,
}

impl Default for Synthetic {
    fn default() -> Self {
        Self { seed: SAMPLE_SEED }
    }
}

impl Synthetic {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
    pub fn names() -> Vec<String> {
        (1..=FEATURE_COUNT).map(|i| format!("feature_{}", i)).collect()
    }
}

impl Source for Synthetic {
    fn dataset(&self, n: usize) -> anyhow::Result<Dataset> {
        let ref mut rng = SmallRng::seed_from_u64(self.seed);
        let normal = Normal::new(0 as Feature, 1.)?;
        let rows = (0..n)
            .map(|_| (0..FEATURE_COUNT).map(|_| normal.sample(rng)).collect())
            .collect::<Vec<Vec<Feature>>>();
        let labels = rows
            .iter()
            .map(|r| (r[0] + r[1] > 0.) as Label)
            .collect::<Vec<Label>>();
        Dataset::new(Self::names(), rows, labels)
    }
}

/// Copy of `rows` with independent Gaussian noise of deviation `sd` on every value.
///
/// Stands in for production traffic when no current dataset is supplied.
pub fn perturb(rows: &[Vec<Feature>], sd: Feature) -> anyhow::Result<Vec<Vec<Feature>>> {
    let normal = Normal::new(0 as Feature, sd)?;
    let ref mut rng = rand::rng();
    Ok(rows
        .iter()
        .map(|row| row.iter().map(|x| x + normal.sample(rng)).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_has_four_named_columns() {
        let data = Synthetic::default().dataset(100).unwrap();
        assert_eq!(data.len(), 100);
        assert_eq!(data.width(), 4);
        assert_eq!(data.names()[0], "feature_1");
        assert_eq!(data.names()[3], "feature_4");
    }

    #[test]
    fn synthetic_labels_follow_the_rule() {
        let data = Synthetic::default().dataset(200).unwrap();
        for (row, &label) in data.rows().iter().zip(data.labels()) {
            assert_eq!(label, (row[0] + row[1] > 0.) as usize);
        }
        assert_eq!(data.classes(), 2);
    }

    #[test]
    fn synthetic_is_reproducible() {
        let a = Synthetic::new(7).dataset(50).unwrap();
        let b = Synthetic::new(7).dataset(50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn perturb_keeps_shape_and_moves_values() {
        let rows = vec![vec![0.; 4]; 10];
        let noisy = perturb(&rows, 0.1).unwrap();
        assert_eq!(noisy.len(), 10);
        assert!(noisy.iter().all(|r| r.len() == 4));
        assert!(noisy.iter().flatten().any(|&x| x != 0.));
    }
}
