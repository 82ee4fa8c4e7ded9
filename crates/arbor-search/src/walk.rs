//! Directory crawl for document files.
//!
//! Walks in raw mode: ignore files, hidden-file rules, and parent ignore
//! files are all disabled so every document under the root is found. File
//! names are matched against a glob pattern.

use std::path::{Path, PathBuf};

use globset::Glob;
use ignore::WalkBuilder;

use crate::error::SearchError;

/// File-name pattern of JSON documents.
pub const DEFAULT_DOCUMENT_GLOB: &str = "*.json";

/// Every file below `root` whose file name matches `pattern`, sorted.
///
/// An empty result is a normal outcome.
///
/// # Errors
///
/// - [`SearchError::NotADirectory`] if `root` is not a directory.
/// - [`SearchError::Glob`] for an invalid pattern.
/// - [`SearchError::Walk`] if part of the tree cannot be read.
pub fn build_index(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, SearchError> {
    if !root.is_dir() {
        return Err(SearchError::NotADirectory(root.to_path_buf()));
    }
    let matcher = Glob::new(pattern)?.compile_matcher();

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if matcher.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "directory crawled");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn create_fixture(dir: &Path) {
        for d in ["data", "data/nested", ".hidden", "ignored"] {
            fs::create_dir_all(dir.join(d)).unwrap();
        }
        let files = [
            ("top.json", "{}"),
            ("data/a.json", "{}"),
            ("data/nested/b.json", "{}"),
            ("data/notes.txt", "text"),
            (".hidden/c.json", "{}"),
            ("ignored/d.json", "{}"),
            (".gitignore", "ignored/\n"),
            ("data/e.json.bak", "{}"),
        ];
        for (path, content) in files {
            fs::write(dir.join(path), content).unwrap();
        }
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn finds_every_document_including_hidden_and_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let files = build_index(tmp.path(), DEFAULT_DOCUMENT_GLOB).unwrap();
        assert_eq!(
            relative(tmp.path(), &files),
            vec![
                ".hidden/c.json",
                "data/a.json",
                "data/nested/b.json",
                "ignored/d.json",
                "top.json",
            ]
        );
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(build_index(tmp.path(), DEFAULT_DOCUMENT_GLOB).unwrap().is_empty());
    }

    #[test]
    fn custom_pattern() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());
        let files = build_index(tmp.path(), "*.txt").unwrap();
        assert_eq!(relative(tmp.path(), &files), vec!["data/notes.txt"]);
    }

    #[test]
    fn missing_root_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            build_index(&tmp.path().join("nope"), DEFAULT_DOCUMENT_GLOB),
            Err(SearchError::NotADirectory(_))
        ));
    }

    #[test]
    fn bad_pattern_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            build_index(tmp.path(), "[a"),
            Err(SearchError::Glob(_))
        ));
    }
}
