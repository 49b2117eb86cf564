//! Batch processing
//!
//! Inputs are processed one after the other; a failing item is logged and
//! skipped, only a missing top-level input stops the run.

use indicatif::{ProgressBar, ProgressIterator};
use std::{
    error::Error,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("input not found: {0:?}")]
    MissingInput(PathBuf),
    #[error("input {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("invalid input pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to list inputs")]
    Glob(#[from] glob::GlobError),
}
type Result<T> = std::result::Result<T, BatchError>;

/// Fails if `path` doesn't exist
pub fn ensure_input<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        Ok(())
    } else {
        Err(BatchError::MissingInput(path.to_path_buf()))
    }
}

/// Files of `dir` with one of the `extensions`, sorted by name
pub fn inputs<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_input(dir)?;
    if !dir.is_dir() {
        return Err(BatchError::NotADirectory(dir.to_path_buf()));
    }
    let mut paths = vec![];
    for extension in extensions {
        let pattern = dir.join(format!("*.{}", extension));
        for entry in glob::glob(&pattern.to_string_lossy())? {
            paths.push(entry?);
        }
    }
    paths.sort();
    paths.dedup();
    log::info!("Found {} input files in {:?}", paths.len(), dir);
    Ok(paths)
}

/// File name of `path` for log messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Items of a batch that went through and those that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub processed: Vec<String>,
    /// skipped item and reason
    pub skipped: Vec<(String, String)>,
}
impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
    /// Runs `process` on every item, errors are logged and the item skipped
    pub fn run<T, N, F, E>(items: &[T], name: N, mut process: F) -> Self
    where
        N: Fn(&T) -> String,
        F: FnMut(&T) -> std::result::Result<(), E>,
        E: Error,
    {
        let mut report = Self::default();
        let pb = ProgressBar::new(items.len() as u64);
        for item in items.iter().progress_with(pb) {
            let name = name(item);
            match process(item) {
                Ok(()) => {
                    log::info!("{}: done", name);
                    report.processed.push(name);
                }
                Err(e) => {
                    let reason = error_chain(&e);
                    log::warn!("{} skipped: {}", name, reason);
                    report.skipped.push((name, reason));
                }
            }
        }
        report.log();
        report
    }
    /// Appends the outcome of another batch
    pub fn merge(mut self, other: Self) -> Self {
        self.processed.extend(other.processed);
        self.skipped.extend(other.skipped);
        self
    }
    pub fn log(&self) {
        log::info!(
            "{} processed, {} skipped",
            self.processed.len(),
            self.skipped.len()
        );
    }
}

/// Error message followed by its sources
fn error_chain(e: &dyn Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io};

    #[test]
    fn missing_directory_is_fatal() {
        assert!(matches!(
            inputs("no/such/dir", &["csv"]),
            Err(BatchError::MissingInput(_))
        ));
    }

    #[test]
    fn sorted_inputs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.xlsx", "a.xls", "c.csv", "d.xlsx"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let names: Vec<_> = inputs(dir.path(), &["xlsx", "xls"])
            .unwrap()
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a.xls", "b.xlsx", "d.xlsx"]);
    }

    #[test]
    fn failures_are_skipped() {
        let report = BatchReport::run(&[1, 2, 3], |i| i.to_string(), |&i| {
            if i == 2 {
                Err(io::Error::new(io::ErrorKind::InvalidData, "bad file"))
            } else {
                Ok(())
            }
        });
        assert_eq!(report.processed, vec!["1", "3"]);
        assert_eq!(report.skipped, vec![("2".to_string(), "bad file".to_string())]);
        assert!(!report.is_complete());
    }
}
