use crate::*;
use chrono::Utc;
use mls_artifacts::Artifact;
use mls_artifacts::Directory;
use mls_artifacts::Store;
use mls_core::*;
use mls_drift::Analyser;
use mls_drift::DriftReport;
use mls_drift::Suite;
use mls_dto::*;
use mls_forest::Classifier;
use mls_forest::Forest;
use mls_forest::accuracy;
use mls_tracking::Journal;
use mls_tracking::Run;
use mls_tracking::Tracker;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

const TRAINING_FAILED: &str = "Training failed";
const PREDICTION_FAILED: &str = "Prediction failed";
const DRIFT_FAILED: &str = "Drift report failed";

/// Production data to hold up against the training baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Current {
    /// The baseline itself with Gaussian noise of deviation `DRIFT_NOISE`.
    Perturbed,
    /// Rows supplied by the caller.
    Supplied(Vec<Vec<Feature>>),
}

/// Owns the served model and serializes every change to it.
///
/// Readers clone the current `Arc<Snapshot>` and drop the lock at once, so
/// they never observe a half-installed model. Trainings queue on `gate` and
/// install in the order they were accepted.
pub struct Manager {
    state: RwLock<Option<Arc<Snapshot>>>,
    gate: Mutex<()>,
    source: Arc<dyn Source>,
    store: Arc<dyn Store>,
    tracker: Arc<dyn Tracker>,
    analyser: Arc<dyn Analyser>,
    telemetry: Telemetry,
}

impl Manager {
    pub fn new(
        source: Arc<dyn Source>,
        store: Arc<dyn Store>,
        tracker: Arc<dyn Tracker>,
        analyser: Arc<dyn Analyser>,
    ) -> Self {
        Self {
            state: RwLock::new(None),
            gate: Mutex::new(()),
            source,
            store,
            tracker,
            analyser,
            telemetry: Telemetry::default(),
        }
    }

    /// Synthetic data, artifacts under `models`, runs under `tracking`.
    pub fn local(models: impl Into<PathBuf>, tracking: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(Synthetic::default()),
            Arc::new(Directory::new(models)),
            Arc::new(Journal::new(tracking)),
            Arc::new(Suite::default()),
        )
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.is_some()
    }

    async fn install(&self, snapshot: Snapshot) {
        *self.state.write().await = Some(Arc::new(snapshot));
    }
}

impl Manager {
    /// Fit, evaluate, persist and track a new model, then make it current.
    ///
    /// Any failure leaves the previous snapshot in place and marks the run
    /// as failed when the tracker is still reachable.
    pub async fn train(&self, request: &TrainingRequest) -> Result<TrainResponse, Failure> {
        let _gate = self.gate.lock().await;
        let mut run = self
            .tracker
            .start(&request.experiment_name)
            .map_err(Failure::internal(TRAINING_FAILED))?;
        run.log_param("n_estimators", request.n_estimators);
        run.log_param("test_size", request.test_size);
        run.log_param("random_state", request.random_state);
        run.log_param("n_samples", request.samples());
        if let Some(depth) = request.max_depth {
            run.log_param("max_depth", depth);
        }
        log::info!("{:<24}{:<16}{}", "training started", run.id().short(), request.experiment_name);
        match self.attempt(request, &mut run).await {
            Ok(snapshot) => {
                let response = TrainResponse {
                    message: "Model trained successfully".to_string(),
                    accuracy: snapshot.metrics().accuracy,
                    model_path: snapshot.metrics().model_path.display().to_string(),
                    experiment_name: request.experiment_name.clone(),
                    run_id: run.id().to_string(),
                };
                self.install(snapshot).await;
                self.telemetry.trained();
                log::info!("{:<24}{:<16}{:.4}", "training completed", run.id().short(), response.accuracy);
                Ok(response)
            }
            Err(e) => {
                log::error!("{:<24}{:<16}{:#}", "training failed", run.id().short(), e);
                run.fail(format!("{:#}", e));
                if let Err(t) = self.tracker.record(&run) {
                    log::warn!("{:<24}{:<16}{:#}", "run not recorded", run.id().short(), t);
                }
                Err(Failure::internal(TRAINING_FAILED)(e))
            }
        }
    }

    async fn attempt(&self, request: &TrainingRequest, run: &mut Run) -> anyhow::Result<Snapshot> {
        let source = self.source.clone();
        let store = self.store.clone();
        let request = request.clone();
        let id = run.id();
        let snapshot = tokio::task::spawn_blocking(move || Self::fit(&*source, &*store, &request, id))
            .await??;
        run.log_metric("accuracy", snapshot.metrics().accuracy as f64);
        run.log_model(snapshot.metrics().model_path.display());
        run.finish();
        self.tracker.record(run)?;
        Ok(snapshot)
    }

    fn fit(
        source: &dyn Source,
        store: &dyn Store,
        request: &TrainingRequest,
        run: ID<Run>,
    ) -> anyhow::Result<Snapshot> {
        let data = source.dataset(request.samples())?;
        let (train, test) = data.split(request.test_size, request.random_state)?;
        let mut model = Forest::new(request.n_estimators, request.random_state)
            .with_max_depth(request.max_depth);
        model.fit(&train)?;
        let predicted = model.predict_rows(&test)?;
        let artifact = Artifact {
            model,
            features: data.names().to_vec(),
            accuracy: accuracy(&predicted, test.labels()),
            trained_at: Utc::now(),
            experiment: request.experiment_name.clone(),
            run,
        };
        let path = store.save(&artifact)?;
        log::debug!("{:<24}{}", "artifact saved", path.display());
        Ok(Snapshot::from_artifact(artifact, &path, Some(train.rows().to_vec())))
    }

    /// Install the newest stored artifact, if there is one.
    ///
    /// The restored snapshot serves predictions but has no drift baseline.
    pub async fn restore(&self) -> anyhow::Result<Option<PathBuf>> {
        let _gate = self.gate.lock().await;
        let store = self.store.clone();
        let found = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<(Artifact, PathBuf)>> {
            match store.latest()? {
                None => Ok(None),
                Some(path) => Ok(store.load(&path)?.map(|artifact| (artifact, path))),
            }
        })
        .await??;
        match found {
            None => {
                log::info!("{:<24}{}", "no artifact to restore", "starting empty");
                Ok(None)
            }
            Some((artifact, path)) => {
                log::info!("{:<24}{}", "restored model", path.display());
                self.install(Snapshot::from_artifact(artifact, &path, None)).await;
                Ok(Some(path))
            }
        }
    }
}

impl Manager {
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, Failure> {
        let snapshot = self
            .snapshot()
            .await
            .ok_or_else(|| Failure::Precondition(NO_MODEL_TRAIN_FIRST.to_string()))?;
        let expected = snapshot.metrics().features.len();
        if request.features.len() != expected {
            return Err(Failure::Validation(format!(
                "features: expected {} values, got {}",
                expected,
                request.features.len()
            )));
        }
        let model = snapshot.model();
        let prediction = model
            .predict(&request.features)
            .map_err(Failure::internal(PREDICTION_FAILED))?;
        let confidence = match model.proba(&request.features) {
            None => 1.,
            Some(proba) => proba
                .map_err(Failure::internal(PREDICTION_FAILED))?
                .into_iter()
                .fold(0., Probability::max),
        };
        self.telemetry.predicted();
        Ok(PredictionResponse {
            prediction,
            confidence,
            model_version: request.model_version.clone(),
            timestamp: Utc::now(),
        })
    }

    pub async fn describe(&self) -> Result<ModelInfo, Failure> {
        let snapshot = self
            .snapshot()
            .await
            .ok_or_else(|| Failure::Precondition(NO_MODEL.to_string()))?;
        let metrics = snapshot.metrics();
        Ok(ModelInfo {
            model_name: snapshot.model().name().to_string(),
            version: MODEL_SCHEMA_VERSION.to_string(),
            accuracy: Some(metrics.accuracy),
            created_at: metrics.trained_at,
            features_count: metrics.features.len(),
            feature_names: metrics.features.clone(),
            model_path: metrics.model_path.display().to_string(),
            experiment_name: metrics.experiment.clone(),
            run_id: metrics.run.to_string(),
            n_estimators: snapshot.model().n_estimators(),
        })
    }

    /// Compare current data with the training baseline.
    ///
    /// Noise generation and the statistics run on the blocking pool.
    pub async fn drift(&self, current: Current) -> Result<DriftResponse, Failure> {
        let snapshot = self
            .snapshot()
            .await
            .ok_or_else(|| Failure::Precondition(NO_BASELINE.to_string()))?;
        let analyser = self.analyser.clone();
        let report = tokio::task::spawn_blocking(move || Self::analyse(&snapshot, &*analyser, current))
            .await
            .map_err(Failure::internal(DRIFT_FAILED))??;
        log::info!(
            "{:<24}{:<16}{}/{}",
            "drift report",
            report.dataset_drift,
            report.n_drifted,
            report.n_features
        );
        Ok(DriftResponse {
            message: "Drift report generated successfully".to_string(),
            timestamp: Utc::now(),
            report,
        })
    }

    fn analyse(snapshot: &Snapshot, analyser: &dyn Analyser, current: Current) -> Result<DriftReport, Failure> {
        let reference = snapshot
            .reference()
            .ok_or_else(|| Failure::Precondition(NO_BASELINE.to_string()))?;
        let rows = match current {
            Current::Perturbed => perturb(reference, DRIFT_NOISE).map_err(Failure::internal(DRIFT_FAILED))?,
            Current::Supplied(rows) => rows,
        };
        let width = snapshot.metrics().features.len();
        if rows.is_empty() {
            return Err(Failure::Validation("rows: must not be empty".to_string()));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != width) {
            return Err(Failure::Validation(format!(
                "rows: expected {} values per row, got {}",
                width,
                row.len()
            )));
        }
        analyser
            .compare(&snapshot.metrics().features, reference, &rows)
            .map_err(Failure::internal(DRIFT_FAILED))
    }

    pub async fn metrics(&self) -> MetricsResponse {
        MetricsResponse {
            predictions_total: self.telemetry.predictions(),
            trainings_total: self.telemetry.trainings(),
            errors_total: self.telemetry.errors(),
            model_accuracy: self
                .snapshot()
                .await
                .map(|s| s.metrics().accuracy)
                .unwrap_or(0.),
            uptime_seconds: self.telemetry.uptime().as_secs(),
        }
    }
}
