//! Compound file selection in a Doxygen XML directory.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::CliError;

/// Doxygen's top-level index, loaded separately for cross-references.
pub(crate) const INDEX_FILENAME: &str = "index.xml";

/// Compound XML files in `xml_dir` whose names match any of `patterns`.
///
/// Only the top level is scanned, which is where Doxygen writes them. The
/// result is sorted by file name so output order is stable.
pub(crate) fn scan(xml_dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, CliError> {
    let patterns = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| CliError::Validation(format!("invalid pattern {p:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    for entry in std::fs::read_dir(xml_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name == INDEX_FILENAME {
            continue;
        }
        if patterns.iter().any(|p| p.matches(name)) {
            files.push(entry.path());
        }
    }
    files.sort();

    tracing::debug!(dir = %xml_dir.display(), count = files.len(), "Scanned XML directory");
    Ok(files)
}
