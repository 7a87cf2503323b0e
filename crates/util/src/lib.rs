//! Core type aliases, identifiers, and constants for mlserve.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the mlserve workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// A single feature value in a design matrix row.
pub type Feature = f32;
/// Class label index. Binary tasks use 0 and 1.
pub type Label = usize;
/// Class probabilities, confidences, and accuracy scores.
pub type Probability = f32;
/// Test statistics and distances produced by drift analysis.
pub type Statistic = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Last eight hex digits, handy for log lines and file names.
    ///
    /// A v7 uuid leads with its millisecond timestamp, so the tail is taken
    /// from the random bits: ids minted in the same millisecond still differ.
    pub fn short(&self) -> String {
        self.inner.simple().to_string()[24..].to_string()
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> TryFrom<&str> for ID<T> {
    type Error = uuid::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        uuid::Uuid::parse_str(s).map(Self::from)
    }
}

/// Time-ordered (v7) so that ids sort in creation order.
impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// SERVICE METADATA
// ============================================================================
/// Human-readable service name reported by health and root endpoints.
pub const SERVICE_NAME: &str = "MLOps Model Service";
/// Short service description for the root endpoint.
pub const SERVICE_DESCRIPTION: &str = "Model training, serving and drift monitoring over HTTP";
/// Public schema version reported by model info.
pub const MODEL_SCHEMA_VERSION: &str = "1.0.0";

// ============================================================================
// SYNTHETIC TRAINING DATA
// Four standard-normal features; label is 1 iff feature_1 + feature_2 > 0.
// ============================================================================
/// Default number of generated samples per training run.
pub const SAMPLE_COUNT: usize = 1000;
/// Smallest dataset a training run will accept.
pub const SAMPLE_MIN: usize = 10;
/// Largest dataset a training run will accept.
pub const SAMPLE_MAX: usize = 1_000_000;
/// Fixed seed for the synthetic generator, so every run sees the same rows.
pub const SAMPLE_SEED: u64 = 42;
/// Number of generated feature columns.
pub const FEATURE_COUNT: usize = 4;

// ============================================================================
// TRAINING REQUEST DEFAULTS
// ============================================================================
/// Experiment name used when the request omits one.
pub const DEFAULT_EXPERIMENT: &str = "default_experiment";
/// Held-out fraction when the request omits one.
pub const DEFAULT_TEST_SIZE: f32 = 0.2;
/// Split and forest seed when the request omits one.
pub const DEFAULT_RANDOM_STATE: u64 = 42;
/// Tree count when the request omits one.
pub const DEFAULT_ESTIMATORS: usize = 100;
/// Model version echoed by predictions when the request omits one.
pub const DEFAULT_MODEL_VERSION: &str = "latest";

// ============================================================================
// RANDOM FOREST
// ============================================================================
/// Hard cap on tree count to keep a single request bounded.
pub const MAX_ESTIMATORS: usize = 10_000;

// ============================================================================
// DRIFT ANALYSIS
// ============================================================================
/// Standard deviation of the noise added to the baseline by the demo drift source.
pub const DRIFT_NOISE: Feature = 0.1;
/// Per-feature significance level for the Kolmogorov-Smirnov test.
pub const DRIFT_P_VALUE: Statistic = 0.05;
/// Share of drifted features at which the whole dataset counts as drifted.
pub const DRIFT_SHARE: Statistic = 0.5;
/// Quantile bins used by the population stability index.
pub const PSI_BINS: usize = 10;
/// Floor on bin proportions so the PSI log term stays finite.
pub const PSI_EPSILON: Statistic = 1e-4;

// ============================================================================
// HTTP
// ============================================================================
/// Largest JSON request body accepted, in bytes.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

// ============================================================================
// STORAGE
// ============================================================================
/// Prefix of every model artifact file name.
pub const ARTIFACT_PREFIX: &str = "model_";
/// Extension of every model artifact file name.
pub const ARTIFACT_EXTENSION: &str = "json";
/// File name of the per-experiment run log.
pub const RUN_LOG: &str = "runs.jsonl";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Training has no cancellation point, so an interrupt simply ends the process.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("listen for ctrl-c");
        println!();
        log::warn!("interrupt received, exiting immediately");
        std::process::exit(0);
    });
}
