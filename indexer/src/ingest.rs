use crate::report::Reporter;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Texts and titles in matching order, ready for `InvertedIndex::build`.
#[derive(Debug)]
pub struct Documents {
    pub texts: Vec<String>,
    pub titles: Vec<String>,
}

/// Read every regular file directly inside `dir`, in parallel.
///
/// Titles are file names and the result is ordered by them. A file that
/// cannot be read as UTF-8 text is logged and kept with empty text.
pub fn read_dir_documents(dir: &Path, reporter: &dyn Reporter) -> Result<Documents> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot list directory {}", dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    reporter.report(&format!("Reading {} files from {}", files.len(), dir.display()));

    let docs: Vec<(String, String)> = files
        .par_iter()
        .map(|path| {
            let title = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "cannot read file, indexing it as empty");
                    String::new()
                }
            };
            (text, title)
        })
        .collect();

    let (texts, titles) = docs.into_iter().unzip();
    Ok(Documents { texts, titles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::Collect;
    use tempfile::tempdir;

    #[test]
    fn reads_files_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "second").unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.txt"), "ignored").unwrap();

        let out = Collect::default();
        let docs = read_dir_documents(dir.path(), &out).unwrap();
        assert_eq!(docs.titles, vec!["a.txt", "b.txt"]);
        assert_eq!(docs.texts, vec!["first", "second"]);
        assert_eq!(out.lines().len(), 1);
    }

    #[test]
    fn unreadable_file_becomes_empty_text() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bin.dat"), b"\xff\xfe\x00").unwrap();
        fs::write(dir.path().join("ok.txt"), "fine").unwrap();

        let docs = read_dir_documents(dir.path(), &Collect::default()).unwrap();
        assert_eq!(docs.titles, vec!["bin.dat", "ok.txt"]);
        assert_eq!(docs.texts, vec!["", "fine"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_dir_documents(&dir.path().join("nope"), &Collect::default()).is_err());
    }
}
