use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::ScanError;

/// Files picked up by a directory scan.
#[derive(Debug, Default, Clone)]
pub struct ScanOutcome {
    /// Episode id -> original filename, last match wins on a repeated id.
    pub matched: IndexMap<String, String>,
    /// Filenames that matched the pattern without yielding exactly one group.
    pub skipped: Vec<String>,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Scans `directory` (non-recursively) for files whose name matches `pattern`
/// from the first character on.
///
/// The single capture group becomes the episode id. A pattern with a different
/// group count, or whose group did not take part in the match, skips the file
/// with a diagnostic instead of failing the scan.
pub fn scan(directory: &Path, pattern: &Regex) -> Result<ScanOutcome, ScanError> {
    if !directory.is_dir() {
        return Err(ScanError::NotADirectory(directory.to_path_buf()));
    }

    let entries = fs::read_dir(directory).map_err(|source| ScanError::ReadDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", directory.display());
                continue;
            }
        };
        if !entry.path().is_file() {
            continue;
        }
        // a lossy name would not resolve back to the file
        match entry.file_name().into_string() {
            Ok(filename) => files.push(filename),
            Err(raw) => warn!("Skipping {}: file name is not valid UTF-8", raw.to_string_lossy()),
        }
    }
    files.sort();

    let group_count = pattern.captures_len() - 1;
    let mut outcome = ScanOutcome::default();

    for filename in files {
        let Some(captures) = pattern.captures(&filename) else {
            continue;
        };
        // prefix match only
        if captures.get(0).map_or(true, |m| m.start() != 0) {
            continue;
        }

        let episode_id = match captures.get(1) {
            Some(group) if group_count == 1 => group.as_str().to_string(),
            _ => {
                warn!("File: {filename} didn't match correctly ({group_count} capture groups)");
                outcome.skipped.push(filename);
                continue;
            }
        };

        info!("Matched episode [{filename}] number: [{episode_id}]");
        if let Some(previous) = outcome.matched.insert(episode_id.clone(), filename) {
            debug!("Episode [{episode_id}] already matched by {previous}, replacing");
        }
    }

    Ok(outcome)
}

/// Compiles `pattern` and scans `directory` with it.
pub fn scan_with_pattern(directory: &Path, pattern: &str) -> Result<ScanOutcome, ScanError> {
    let regex = Regex::new(pattern)?;
    scan(directory, &regex)
}
