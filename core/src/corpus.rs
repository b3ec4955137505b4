use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files directly inside `dir` whose name ends with `suffix`, sorted by file name.
pub fn discover_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();
    for entry in walker {
        let entry = entry.with_context(|| format!("listing corpus dir {dir:?}"))?;
        // path().is_file() follows symlinks, file_type() does not
        if !entry.path().is_file() { continue; }
        if entry.file_name().to_string_lossy().ends_with(suffix) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Read a corpus file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_corpus_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading corpus file {path:?}"))?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(file = %path.display(), "corpus file is not valid UTF-8, replacing bad bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
