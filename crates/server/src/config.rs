use clap::Args;
use std::path::PathBuf;

/// Runtime settings for the HTTP service. Every flag falls back to an
/// environment variable.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,
    /// Directory for model artifacts
    #[arg(long, env = "MODELS_DIR", default_value = "models")]
    pub models: PathBuf,
    /// Directory for experiment run logs
    #[arg(long, env = "TRACKING_DIR", default_value = "mlruns")]
    pub tracking: PathBuf,
    /// Directory for datasets
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data: PathBuf,
    /// Worker threads; actix picks one per core when unset
    #[arg(long, env = "WORKERS")]
    pub workers: Option<usize>,
    /// Serve the newest stored artifact until the first training
    #[arg(long, env = "RESTORE_MODEL")]
    pub restore: bool,
    /// Largest JSON request body in bytes; bigger bodies get 413
    #[arg(long, env = "BODY_LIMIT", default_value_t = mls_core::BODY_LIMIT)]
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            models: PathBuf::from("models"),
            tracking: PathBuf::from("mlruns"),
            data: PathBuf::from("data"),
            workers: None,
            restore: false,
            body_limit: mls_core::BODY_LIMIT,
        }
    }
}

impl Config {
    /// Directories that must exist before the first request.
    pub fn directories(&self) -> [&PathBuf; 3] {
        [&self.models, &self.tracking, &self.data]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "mlserve",
            "--bind",
            "127.0.0.1:9000",
            "--models",
            "/tmp/models",
            "--workers",
            "2",
            "--restore",
            "--body-limit",
            "1024",
        ])
        .unwrap();
        assert_eq!(cli.config.bind, "127.0.0.1:9000");
        assert_eq!(cli.config.models, PathBuf::from("/tmp/models"));
        assert_eq!(cli.config.workers, Some(2));
        assert!(cli.config.restore);
        assert_eq!(cli.config.body_limit, 1024);
    }

    #[test]
    fn body_limit_defaults_to_two_mebibytes() {
        let cli = Cli::try_parse_from(["mlserve"]).unwrap();
        assert_eq!(cli.config.body_limit, 2 * 1024 * 1024);
        assert_eq!(cli.config.body_limit, Config::default().body_limit);
    }

    #[test]
    fn directories_cover_every_store() {
        let config = Config::default();
        assert_eq!(config.directories().len(), 3);
        assert!(config.directories().contains(&&PathBuf::from("mlruns")));
    }
}
