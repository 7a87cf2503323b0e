use chrono::DateTime;
use chrono::Utc;
use mls_core::*;
use mls_drift::DriftReport;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResponse {
    pub message: String,
    pub accuracy: Probability,
    pub model_path: String,
    pub experiment_name: String,
    pub run_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: Label,
    pub confidence: Probability,
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub version: String,
    pub accuracy: Option<Probability>,
    pub created_at: DateTime<Utc>,
    pub features_count: usize,
    pub feature_names: Vec<String>,
    pub model_path: String,
    pub experiment_name: String,
    pub run_id: String,
    pub n_estimators: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub report: DriftReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub model_loaded: bool,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    pub train: String,
    pub predict: String,
    pub model_info: String,
    pub drift_report: String,
    pub metrics: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub message: String,
    pub description: String,
    pub version: String,
    pub health: String,
    pub endpoints: Endpoints,
}

impl Default for ServiceDescriptor {
    fn default() -> Self {
        Self {
            message: SERVICE_NAME.to_string(),
            description: SERVICE_DESCRIPTION.to_string(),
            version: MODEL_SCHEMA_VERSION.to_string(),
            health: "/health".to_string(),
            endpoints: Endpoints {
                train: "/train".to_string(),
                predict: "/predict".to_string(),
                model_info: "/model/info".to_string(),
                drift_report: "/monitoring/drift".to_string(),
                metrics: "/metrics".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub predictions_total: u64,
    pub trainings_total: u64,
    pub errors_total: u64,
    pub model_accuracy: Probability,
    pub uptime_seconds: u64,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
    pub kind: String,
}
