use super::*;
use mls_core::*;
use serde::Deserialize;
use serde::Serialize;

fn default_experiment() -> String {
    DEFAULT_EXPERIMENT.to_string()
}
fn default_test_size() -> f32 {
    DEFAULT_TEST_SIZE
}
fn default_random_state() -> u64 {
    DEFAULT_RANDOM_STATE
}
fn default_estimators() -> usize {
    DEFAULT_ESTIMATORS
}
fn default_model_version() -> String {
    DEFAULT_MODEL_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRequest {
    #[serde(default = "default_experiment")]
    pub experiment_name: String,
    #[serde(default = "default_test_size")]
    pub test_size: f32,
    #[serde(default = "default_random_state")]
    pub random_state: u64,
    #[serde(default = "default_estimators")]
    pub n_estimators: usize,
    #[serde(default)]
    pub n_samples: Option<usize>,
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Default for TrainingRequest {
    fn default() -> Self {
        Self {
            experiment_name: default_experiment(),
            test_size: default_test_size(),
            random_state: default_random_state(),
            n_estimators: default_estimators(),
            n_samples: None,
            max_depth: None,
        }
    }
}

impl TrainingRequest {
    pub fn samples(&self) -> usize {
        self.n_samples.unwrap_or(SAMPLE_COUNT)
    }
}

impl Validate for TrainingRequest {
    fn validate(&self) -> Result<(), Invalid> {
        if self.experiment_name.trim().is_empty() {
            return Err(Invalid::new("experiment_name", "must not be empty"));
        }
        if !(self.test_size > 0. && self.test_size < 1.) {
            return Err(Invalid::new("test_size", "must lie strictly between 0 and 1"));
        }
        if self.n_estimators == 0 || self.n_estimators > MAX_ESTIMATORS {
            return Err(Invalid::new(
                "n_estimators",
                format!("must lie between 1 and {}", MAX_ESTIMATORS),
            ));
        }
        if !(SAMPLE_MIN..=SAMPLE_MAX).contains(&self.samples()) {
            return Err(Invalid::new(
                "n_samples",
                format!("must lie between {} and {}", SAMPLE_MIN, SAMPLE_MAX),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(Invalid::new("max_depth", "must be positive when given"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub features: Vec<Feature>,
    #[serde(default = "default_model_version")]
    pub model_version: String,
}

impl PredictionRequest {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            model_version: default_model_version(),
        }
    }
}

impl Validate for PredictionRequest {
    fn validate(&self) -> Result<(), Invalid> {
        if self.features.is_empty() {
            return Err(Invalid::new("features", "must not be empty"));
        }
        if !self.features.iter().all(|x| x.is_finite()) {
            return Err(Invalid::new("features", "must be finite numbers"));
        }
        Ok(())
    }
}

/// Caller-supplied production data to compare against the training baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftRequest {
    pub rows: Vec<Vec<Feature>>,
}

impl Validate for DriftRequest {
    fn validate(&self) -> Result<(), Invalid> {
        let width = match self.rows.first() {
            None => return Err(Invalid::new("rows", "must not be empty")),
            Some(row) => row.len(),
        };
        if width == 0 {
            return Err(Invalid::new("rows", "rows must not be empty"));
        }
        if self.rows.iter().any(|r| r.len() != width) {
            return Err(Invalid::new("rows", "all rows must have the same length"));
        }
        if !self.rows.iter().flatten().all(|x| x.is_finite()) {
            return Err(Invalid::new("rows", "must be finite numbers"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_defaults_fill_missing_fields() {
        let req = serde_json::from_str::<TrainingRequest>("{}").unwrap();
        assert_eq!(req, TrainingRequest::default());
        assert_eq!(req.experiment_name, "default_experiment");
        assert_eq!(req.n_estimators, 100);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn training_rejects_out_of_range_fields() {
        let bad = [
            TrainingRequest {
                experiment_name: " ".to_string(),
                ..Default::default()
            },
            TrainingRequest {
                test_size: 0.,
                ..Default::default()
            },
            TrainingRequest {
                test_size: 1.,
                ..Default::default()
            },
            TrainingRequest {
                test_size: f32::NAN,
                ..Default::default()
            },
            TrainingRequest {
                n_estimators: 0,
                ..Default::default()
            },
            TrainingRequest {
                n_samples: Some(3),
                ..Default::default()
            },
            TrainingRequest {
                max_depth: Some(0),
                ..Default::default()
            },
        ];
        for req in bad.iter() {
            assert!(req.validate().is_err(), "{:?}", req);
        }
    }

    #[test]
    fn training_rejects_negative_seed_at_parse_time() {
        assert!(serde_json::from_str::<TrainingRequest>(r#"{"random_state": -1}"#).is_err());
    }

    #[test]
    fn prediction_rejects_empty_features() {
        let req = serde_json::from_str::<PredictionRequest>(r#"{"features": []}"#).unwrap();
        assert_eq!(req.model_version, "latest");
        assert_eq!(req.validate().unwrap_err().field, "features");
    }

    #[test]
    fn prediction_accepts_any_nonempty_vector() {
        assert!(PredictionRequest::new(vec![1.]).validate().is_ok());
    }

    #[test]
    fn drift_rows_must_be_rectangular() {
        let ragged = DriftRequest {
            rows: vec![vec![1., 2.], vec![3.]],
        };
        let empty = DriftRequest { rows: vec![] };
        let ok = DriftRequest {
            rows: vec![vec![1., 2.], vec![3., 4.]],
        };
        assert!(ragged.validate().is_err());
        assert!(empty.validate().is_err());
        assert!(ok.validate().is_ok());
    }
}
