use super::*;
use aprender::primitives::Matrix;
use aprender::tree::RandomForestClassifier;
use mls_core::*;
use serde::Deserialize;
use serde::Serialize;

/// aprender's bagged Gini forest, fitted on a [`Dataset`].
///
/// Each tree sees a bootstrap sample seeded from `seed + tree index`, so
/// a fit is reproducible. Probabilities are vote shares across trees and
/// the predicted label is the most voted one. aprender's own `predict`
/// breaks ties in hash order, so labels are read off the vote shares
/// instead, with ties going to the lowest label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    n_estimators: usize,
    width: usize,
    inner: RandomForestClassifier,
}

impl Forest {
    pub fn new(n_estimators: usize, seed: u64) -> Self {
        Self {
            n_estimators,
            width: 0,
            inner: RandomForestClassifier::new(n_estimators).with_random_state(seed),
        }
    }
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        if let Some(depth) = max_depth {
            self.inner = self.inner.with_max_depth(depth);
        }
        self
    }
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }
    pub fn is_fitted(&self) -> bool {
        self.width > 0
    }
    /// Predicted labels for a batch of rows.
    pub fn predict_rows(&self, data: &Dataset) -> anyhow::Result<Vec<Label>> {
        anyhow::ensure!(self.is_fitted(), "forest has not been fitted");
        anyhow::ensure!(
            data.width() == self.width,
            "expected {} features, got {}",
            self.width,
            data.width()
        );
        let proba = self.inner.predict_proba(&data.matrix()?);
        Ok(proba.as_slice().chunks(proba.n_cols()).map(vote).collect())
    }
    fn single(&self, row: &[Feature]) -> anyhow::Result<Matrix<Feature>> {
        anyhow::ensure!(self.is_fitted(), "forest has not been fitted");
        anyhow::ensure!(
            row.len() == self.width,
            "expected {} features, got {}",
            self.width,
            row.len()
        );
        Matrix::from_vec(1, self.width, row.to_vec()).map_err(|e| anyhow::anyhow!(e))
    }
}

impl Classifier for Forest {
    fn name(&self) -> &'static str {
        "RandomForestClassifier"
    }
    fn fit(&mut self, data: &Dataset) -> anyhow::Result<()> {
        anyhow::ensure!(self.n_estimators > 0, "n_estimators must be positive");
        anyhow::ensure!(!data.is_empty(), "cannot fit on an empty dataset");
        self.inner
            .fit(&data.matrix()?, data.labels())
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        self.width = data.width();
        Ok(())
    }
    fn predict(&self, row: &[Feature]) -> anyhow::Result<Label> {
        let x = self.single(row)?;
        Ok(vote(self.inner.predict_proba(&x).as_slice()))
    }
    fn proba(&self, row: &[Feature]) -> Option<anyhow::Result<Vec<Probability>>> {
        Some(
            self.single(row)
                .map(|x| self.inner.predict_proba(&x).as_slice().to_vec()),
        )
    }
    fn width(&self) -> usize {
        self.width
    }
}

/// Most voted label; ties resolve to the lowest.
fn vote(shares: &[Probability]) -> Label {
    shares
        .iter()
        .enumerate()
        .fold((0, Probability::MIN), |(bi, bv), (i, &v)| {
            if v > bv { (i, v) } else { (bi, bv) }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use aprender::metrics::classification::accuracy;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand_distr::Distribution;
    use rand_distr::Normal;

    /// Same shape as the service's synthetic source: label = x1 + x2 > 0.
    fn linear(n: usize, seed: u64) -> Dataset {
        let ref mut rng = SmallRng::seed_from_u64(seed);
        let normal = Normal::new(0f32, 1.).unwrap();
        let rows = (0..n)
            .map(|_| (0..4).map(|_| normal.sample(rng)).collect::<Vec<f32>>())
            .collect::<Vec<_>>();
        let labels = rows.iter().map(|r| (r[0] + r[1] > 0.) as usize).collect();
        let names = (1..=4).map(|i| format!("feature_{}", i)).collect();
        Dataset::new(names, rows, labels).unwrap()
    }

    #[test]
    fn fits_a_linear_boundary() {
        let (train, test) = linear(1000, 42).split(0.2, 42).unwrap();
        let mut forest = Forest::new(20, 42).with_max_depth(Some(8));
        forest.fit(&train).unwrap();
        let predicted = forest.predict_rows(&test).unwrap();
        assert!(accuracy(&predicted, test.labels()) >= 0.8);
    }

    #[test]
    fn fit_is_reproducible_for_a_seed() {
        let data = linear(200, 1);
        let mut a = Forest::new(5, 9);
        let mut b = Forest::new(5, 9);
        a.fit(&data).unwrap();
        b.fit(&data).unwrap();
        assert_eq!(a.predict_rows(&data).unwrap(), b.predict_rows(&data).unwrap());
    }

    #[test]
    fn single_row_matches_batch() {
        let data = linear(100, 5);
        let mut forest = Forest::new(5, 5);
        forest.fit(&data).unwrap();
        let batch = forest.predict_rows(&data).unwrap();
        for (row, label) in data.rows().iter().zip(batch) {
            assert_eq!(forest.predict(row).unwrap(), label);
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let data = linear(200, 2);
        let mut forest = Forest::new(7, 3);
        forest.fit(&data).unwrap();
        let p = forest.proba(&data.rows()[0]).unwrap().unwrap();
        assert_eq!(p.len(), 2);
        assert!((p.iter().sum::<f32>() - 1.).abs() < 1e-4);
        assert!(p.iter().all(|&x| (0. ..=1.).contains(&x)));
    }

    #[test]
    fn rejects_wrong_width() {
        let data = linear(50, 3);
        let mut forest = Forest::new(3, 3);
        forest.fit(&data).unwrap();
        assert!(forest.predict(&[0., 1.]).is_err());
        assert!(forest.predict(&[0., 1., 2., 3., 4.]).is_err());
        assert!(forest.proba(&[0., 1.]).unwrap().is_err());
    }

    #[test]
    fn unfitted_forest_refuses_to_predict() {
        assert!(Forest::new(3, 0).predict(&[0.; 4]).is_err());
    }

    #[test]
    fn zero_trees_cannot_fit() {
        assert!(Forest::new(0, 0).fit(&linear(10, 0)).is_err());
    }

    #[test]
    fn ties_go_to_the_lowest_label() {
        assert_eq!(vote(&[0.5, 0.5]), 0);
        assert_eq!(vote(&[0.2, 0.8]), 1);
        assert_eq!(vote(&[0.3, 0.4, 0.3]), 1);
    }

    #[test]
    fn even_tree_counts_predict_stably() {
        let data = linear(120, 6);
        let mut forest = Forest::new(10, 6);
        forest.fit(&data).unwrap();
        for row in data.rows() {
            let first = forest.predict(row).unwrap();
            assert!((0..10).all(|_| forest.predict(row).unwrap() == first));
        }
    }

    #[test]
    fn survives_json_round_trip() {
        let data = linear(100, 4);
        let mut forest = Forest::new(4, 4);
        forest.fit(&data).unwrap();
        let json = serde_json::to_string(&forest).unwrap();
        let back = serde_json::from_str::<Forest>(&json).unwrap();
        assert_eq!(back.n_estimators(), 4);
        assert_eq!(forest.predict_rows(&data).unwrap(), back.predict_rows(&data).unwrap());
    }
}
