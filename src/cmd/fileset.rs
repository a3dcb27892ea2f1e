//! Input resolution for the convert command.
//!
//! A single argument may name one dump file or a glob pattern covering
//! several. Batch runs track per-file outcomes so one broken dump does not
//! hide the files that converted cleanly.

use std::path::{Path, PathBuf};

/// True if the argument contains glob metacharacters.
pub fn is_pattern(arg: &str) -> bool {
    arg.contains('*') || arg.contains('?') || arg.contains('[')
}

/// Resolve an input argument into the list of dump files to convert.
///
/// A literal path must exist; a pattern must match at least one file.
/// Matches are sorted so batch output order is stable.
pub fn resolve_inputs(arg: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let arg_str = arg.to_string_lossy();

    if !is_pattern(&arg_str) {
        if !arg.exists() {
            anyhow::bail!("input file does not exist: {}", arg.display());
        }
        return Ok(vec![arg.to_path_buf()]);
    }

    let entries = glob::glob(&arg_str)
        .map_err(|e| anyhow::anyhow!("invalid glob pattern '{}': {}", arg_str, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| anyhow::anyhow!("error reading path for pattern '{}': {}", arg_str, e))?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        anyhow::bail!("no files match pattern: {}", arg_str);
    }

    files.sort();
    Ok(files)
}

/// Outcome accounting for a glob batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchOutcome {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, path: PathBuf, error: String) {
        self.failed.push((path, error));
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
