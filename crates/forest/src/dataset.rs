use aprender::model_selection::train_test_split;
use aprender::primitives::Matrix;
use aprender::primitives::Vector;
use mls_core::*;
use serde::Deserialize;
use serde::Serialize;

/// Row-major feature matrix with one label per row.
///
/// Column names are carried along so that a fitted model can report
/// the schema it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    names: Vec<String>,
    rows: Vec<Vec<Feature>>,
    labels: Vec<Label>,
}

impl Dataset {
    /// Checks that every row has one value per column, that labels line
    /// up with rows, and that no value is NaN or infinite.
    pub fn new(names: Vec<String>, rows: Vec<Vec<Feature>>, labels: Vec<Label>) -> anyhow::Result<Self> {
        anyhow::ensure!(!names.is_empty(), "dataset has no feature columns");
        anyhow::ensure!(
            rows.len() == labels.len(),
            "{} rows but {} labels",
            rows.len(),
            labels.len()
        );
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != names.len()) {
            anyhow::bail!("row {} has {} values, expected {}", i, row.len(), names.len());
        }
        anyhow::ensure!(
            rows.iter().flatten().all(|x| x.is_finite()),
            "dataset contains non-finite values"
        );
        Ok(Self {
            names,
            rows,
            labels,
        })
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    pub fn rows(&self) -> &[Vec<Feature>] {
        &self.rows
    }
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn width(&self) -> usize {
        self.names.len()
    }
    /// Number of classes, taken as one past the largest label.
    pub fn classes(&self) -> usize {
        self.labels.iter().copied().max().map_or(0, |l| l + 1)
    }
    /// The rows packed into aprender's row-major matrix.
    pub fn matrix(&self) -> anyhow::Result<Matrix<Feature>> {
        let flat = self.rows.iter().flatten().copied().collect::<Vec<Feature>>();
        Matrix::from_vec(self.len(), self.width(), flat).map_err(|e| anyhow::anyhow!(e))
    }
    /// Shuffled train/test partition.
    ///
    /// The test side gets `round(test_size * n)` rows and the shuffle is
    /// driven by `seed`, so equal inputs give equal partitions. Both
    /// sides must end up non-empty.
    pub fn split(&self, test_size: f32, seed: u64) -> anyhow::Result<(Self, Self)> {
        let x = self.matrix()?;
        let y = Vector::from_vec(self.labels.iter().map(|&l| l as f32).collect());
        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, test_size, Some(seed)).map_err(|e| anyhow::anyhow!(e))?;
        Ok((
            self.unpack(&x_train, &y_train),
            self.unpack(&x_test, &y_test),
        ))
    }
    fn unpack(&self, x: &Matrix<Feature>, y: &Vector<f32>) -> Self {
        Self {
            names: self.names.clone(),
            rows: x.as_slice().chunks(self.width()).map(<[Feature]>::to_vec).collect(),
            labels: y.as_slice().iter().map(|&l| l as Label).collect(),
        }
    }
}
