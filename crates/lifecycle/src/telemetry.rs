use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Instant;

/// Process-wide request counters. Independent of model state.
#[derive(Debug)]
pub struct Telemetry {
    started: Instant,
    predictions: AtomicU64,
    trainings: AtomicU64,
    errors: AtomicU64,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            predictions: AtomicU64::new(0),
            trainings: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }
}

impl Telemetry {
    pub fn predicted(&self) {
        self.predictions.fetch_add(1, Ordering::Relaxed);
    }
    pub fn trained(&self) {
        self.trainings.fetch_add(1, Ordering::Relaxed);
    }
    pub fn failed(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
    pub fn predictions(&self) -> u64 {
        self.predictions.load(Ordering::Relaxed)
    }
    pub fn trainings(&self) -> u64 {
        self.trainings.load(Ordering::Relaxed)
    }
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
    pub fn uptime(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}
