use super::*;
use mls_core::*;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Artifacts as JSON files in one flat directory.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
    fn write(path: &Path, artifact: &Artifact) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, artifact)?;
        writer.flush()?;
        Ok(())
    }
    fn is_artifact(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == ARTIFACT_EXTENSION)
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(ARTIFACT_PREFIX))
    }
}

impl Store for Directory {
    /// Written to a temporary sibling first and renamed into place,
    /// so readers never observe a half-written artifact. The sibling is
    /// removed again if either step fails.
    fn save(&self, artifact: &Artifact) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(artifact.file_name());
        let temp = path.with_extension("tmp");
        let written = Self::write(&temp, artifact)
            .and_then(|()| std::fs::rename(&temp, &path).map_err(anyhow::Error::from));
        if let Err(e) = written {
            match std::fs::remove_file(&temp) {
                Err(r) if r.kind() != ErrorKind::NotFound => {
                    log::warn!("{:<24}{}", "temp file left behind", temp.display());
                }
                _ => {}
            }
            return Err(e);
        }
        log::info!("{:<24}{}", "model saved", path.display());
        Ok(path)
    }
    fn load(&self, path: &Path) -> anyhow::Result<Option<Artifact>> {
        match std::fs::File::open(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{:<24}{}", "model file not found", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
            Ok(file) => {
                let artifact = serde_json::from_reader(BufReader::new(file))?;
                log::info!("{:<24}{}", "model loaded", path.display());
                Ok(Some(artifact))
            }
        }
    }
    fn latest(&self) -> anyhow::Result<Option<PathBuf>> {
        let entries = match std::fs::read_dir(&self.root) {
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
            Ok(entries) => entries,
        };
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if Self::is_artifact(&path) {
                paths.push(path);
            }
        }
        Ok(paths.into_iter().max())
    }
}
