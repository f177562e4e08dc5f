//! Terminal display of artifacts and banners.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use puma_engine::DisplayProvider;
use puma_foundation::{Error, ErrorKind, Result};
use tracing::debug;

/// Prints `<resources>/<artifact>.txt` files to standard output.
#[derive(Clone, Debug)]
pub struct TerminalDisplay {
    resources: PathBuf,
}

impl TerminalDisplay {
    /// Creates a display that looks for artifacts under `resources`.
    pub fn new(resources: impl Into<PathBuf>) -> Self {
        Self {
            resources: resources.into(),
        }
    }

    /// Returns the artifact directory.
    #[must_use]
    pub fn resources(&self) -> &Path {
        &self.resources
    }

    /// Reads an artifact without printing it.
    ///
    /// # Errors
    ///
    /// `ArtifactNotFound` if the file is missing, `Io` if it cannot be read.
    pub fn artifact(&self, artifact: &str) -> Result<String> {
        let path = self.resources.join(format!("{artifact}.txt"));
        debug!(path = %path.display(), "reading artifact");
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            IoErrorKind::NotFound => Error::new(ErrorKind::ArtifactNotFound {
                artifact: artifact.to_string(),
            }),
            _ => Error::new(ErrorKind::Io(format!("{}: {e}", path.display()))),
        })
    }
}

impl DisplayProvider for TerminalDisplay {
    fn show(&self, artifact: &str) -> Result<()> {
        let text = self.artifact(artifact)?;
        println!("{}", text.trim_end());
        Ok(())
    }

    fn print(&self, text: &str) {
        println!("{}", text.trim_end());
    }
}
