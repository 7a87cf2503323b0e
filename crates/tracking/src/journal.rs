use super::*;
use mls_core::*;
use std::io::BufRead;
use std::io::BufReader;
use std::io::ErrorKind;
use std::io::Write;
use std::path::PathBuf;

/// Persistence contract for experiment runs.
pub trait Tracker: Send + Sync {
    /// Open a run under `experiment`, creating the experiment if needed.
    fn start(&self, experiment: &str) -> anyhow::Result<Run>;
    /// Append a finished (or failed) run to its experiment log.
    fn record(&self, run: &Run) -> anyhow::Result<()>;
    /// All recorded runs of an experiment, oldest first.
    fn runs(&self, experiment: &str) -> anyhow::Result<Vec<Run>>;
}

/// Run logs as JSON lines under `<root>/<experiment>/runs.jsonl`.
#[derive(Debug, Clone)]
pub struct Journal {
    root: PathBuf,
}

impl Journal {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
    /// Experiment names become directory names. Every byte outside
    /// `[A-Za-z0-9_-]` is written as `%XX`, so a name cannot escape the
    /// root and distinct names never share a directory.
    fn directory(&self, experiment: &str) -> PathBuf {
        self.root.join(escape(experiment))
    }
    fn log(&self, experiment: &str) -> PathBuf {
        self.directory(experiment).join(RUN_LOG)
    }
}

fn escape(name: &str) -> String {
    name.bytes()
        .map(|b| match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'-' => (b as char).to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}

impl Tracker for Journal {
    fn start(&self, experiment: &str) -> anyhow::Result<Run> {
        anyhow::ensure!(!experiment.trim().is_empty(), "experiment name is empty");
        std::fs::create_dir_all(self.directory(experiment))?;
        let run = Run::new(experiment);
        log::debug!("{:<24}{:<40}{}", "run started", run.id(), experiment);
        Ok(run)
    }
    fn record(&self, run: &Run) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.directory(run.experiment()))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log(run.experiment()))?;
        let mut line = serde_json::to_vec(run)?;
        line.push(b'\n');
        file.write_all(&line)?;
        log::debug!("{:<24}{:<40}{:?}", "run recorded", run.id(), run.status());
        Ok(())
    }
    fn runs(&self, experiment: &str) -> anyhow::Result<Vec<Run>> {
        let file = match std::fs::File::open(self.log(experiment)) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
            Ok(file) => file,
        };
        BufReader::new(file)
            .lines()
            .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|line| -> anyhow::Result<Run> { Ok(serde_json::from_str(&line?)?) })
            .filter(|run| run.as_ref().map_or(true, |r| r.experiment() == experiment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_append_one_line_per_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let journal = Journal::new(dir.path());
        for accuracy in [0.7, 0.8, 0.9] {
            let mut run = journal.start("exp").unwrap();
            run.log_metric("accuracy", accuracy);
            run.finish();
            journal.record(&run).unwrap();
        }
        let runs = journal.runs("exp").unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[2].metrics()["accuracy"], 0.9);
        let text = std::fs::read_to_string(dir.path().join("exp").join(RUN_LOG)).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn unknown_experiment_has_no_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Journal::new(dir.path()).runs("ghost").unwrap().is_empty());
    }

    #[test]
    fn empty_experiment_name_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Journal::new(dir.path()).start("  ").is_err());
    }

    #[test]
    fn experiment_names_stay_inside_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let journal = Journal::new(dir.path());
        assert_eq!(journal.directory("../etc"), dir.path().join("%2E%2E%2Fetc"));
        assert_eq!(journal.directory(".."), dir.path().join("%2E%2E"));
        assert_eq!(journal.directory("a/b"), dir.path().join("a%2Fb"));
        assert_eq!(journal.directory("a_b"), dir.path().join("a_b"));
        assert_eq!(journal.directory("é"), dir.path().join("%C3%A9"));
    }

    #[test]
    fn similar_experiment_names_keep_separate_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        let journal = Journal::new(dir.path());
        for name in ["a/b", "a_b", "a b", "a%2Fb"] {
            let mut run = journal.start(name).unwrap();
            run.finish();
            journal.record(&run).unwrap();
        }
        for name in ["a/b", "a_b", "a b", "a%2Fb"] {
            let runs = journal.runs(name).unwrap();
            assert_eq!(runs.len(), 1);
            assert_eq!(runs[0].experiment(), name);
        }
    }

    #[test]
    fn failed_runs_are_recorded() {
        let dir = tempfile::TempDir::new().unwrap();
        let journal = Journal::new(dir.path());
        let mut run = journal.start("exp").unwrap();
        run.fail("boom");
        journal.record(&run).unwrap();
        let runs = journal.runs("exp").unwrap();
        assert_eq!(runs[0].status(), Status::Failed);
        assert_eq!(runs[0], run);
    }
}
