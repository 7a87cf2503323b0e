use chrono::DateTime;
use chrono::Utc;
use mls_core::*;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Running,
    Finished,
    Failed,
}

/// One training attempt within an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    id: ID<Run>,
    experiment: String,
    status: Status,
    started: DateTime<Utc>,
    ended: Option<DateTime<Utc>>,
    params: BTreeMap<String, String>,
    metrics: BTreeMap<String, f64>,
    models: Vec<String>,
    error: Option<String>,
}

impl Run {
    pub fn new(experiment: &str) -> Self {
        Self {
            id: ID::default(),
            experiment: experiment.to_string(),
            status: Status::Running,
            started: Utc::now(),
            ended: None,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            models: Vec::new(),
            error: None,
        }
    }
    pub fn experiment(&self) -> &str {
        &self.experiment
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }
    pub fn ended(&self) -> Option<DateTime<Utc>> {
        self.ended
    }
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }
    pub fn models(&self) -> &[String] {
        &self.models
    }
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
    pub fn log_param(&mut self, key: &str, value: impl ToString) {
        self.params.insert(key.to_string(), value.to_string());
    }
    pub fn log_metric(&mut self, key: &str, value: f64) {
        self.metrics.insert(key.to_string(), value);
    }
    pub fn log_model(&mut self, path: impl ToString) {
        self.models.push(path.to_string());
    }
    pub fn finish(&mut self) {
        self.status = Status::Finished;
        self.ended = Some(Utc::now());
    }
    pub fn fail(&mut self, error: impl ToString) {
        self.status = Status::Failed;
        self.ended = Some(Utc::now());
        self.error = Some(error.to_string());
    }
}

impl Unique for Run {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_starts_running() {
        let run = Run::new("exp");
        assert_eq!(run.status(), Status::Running);
        assert!(run.ended().is_none());
    }

    #[test]
    fn run_collects_params_and_metrics() {
        let mut run = Run::new("exp");
        run.log_param("n_estimators", 10);
        run.log_param("test_size", 0.2);
        run.log_metric("accuracy", 0.9);
        run.log_model("models/model_x.json");
        run.finish();
        assert_eq!(run.params()["n_estimators"], "10");
        assert_eq!(run.params()["test_size"], "0.2");
        assert_eq!(run.metrics()["accuracy"], 0.9);
        assert_eq!(run.models(), &["models/model_x.json".to_string()]);
        assert_eq!(run.status(), Status::Finished);
        assert!(run.ended().unwrap() >= run.started());
    }

    #[test]
    fn failed_run_keeps_error() {
        let mut run = Run::new("exp");
        run.fail("disk full");
        assert_eq!(run.status(), Status::Failed);
        assert_eq!(run.error(), Some("disk full"));
    }
}
