//! Persisted directory indexes.
//!
//! Layout inside the index directory:
//!
//! - `main_index.json`: `{"cur_index": n, "directories": {path: id, ...}}`
//! - `index{id}.json`: `{"files": [path, ...]}` for each indexed directory
//!
//! An index is stale when its file is older than the indexed directory, or
//! when any file it lists no longer exists.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use arbor_core::{decode, write_document};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::walk::build_index;

const MAIN_INDEX_FILE: &str = "main_index.json";

/// Directory path to index id, plus the last id handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainIndex {
    pub cur_index: u64,
    #[serde(default)]
    pub directories: BTreeMap<String, u64>,
}

/// Files recorded for one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFile {
    pub files: Vec<PathBuf>,
}

/// Result of checking one indexed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum CheckStatus {
    /// The stored index still matches the directory.
    Fresh,
    /// The index was stale and has been rebuilt.
    Refreshed,
    /// The directory no longer exists; the index is left alone.
    Missing,
    /// The check failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryCheck {
    pub directory: PathBuf,
    #[serde(flatten)]
    pub status: CheckStatus,
}

/// Index storage rooted at one directory.
#[derive(Debug)]
pub struct IndexStore {
    dir: PathBuf,
    pattern: String,
    main: MainIndex,
}

impl IndexStore {
    /// Open (or create) index storage in `dir`, crawling for files whose
    /// names match `pattern`.
    ///
    /// A missing main index starts empty. An unreadable one is logged and
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if `dir` cannot be created.
    pub fn open(dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Result<Self, SearchError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let main_path = dir.join(MAIN_INDEX_FILE);
        let main = if main_path.is_file() {
            match decode(&main_path).map(serde_json::from_value::<MainIndex>) {
                Ok(Ok(main)) => main,
                Ok(Err(error)) => {
                    tracing::error!(%error, "main index is malformed, starting blank");
                    MainIndex::default()
                }
                Err(error) => {
                    tracing::error!(%error, "cannot read main index, starting blank");
                    MainIndex::default()
                }
            }
        } else {
            MainIndex::default()
        };
        Ok(Self {
            dir,
            pattern: pattern.into(),
            main,
        })
    }

    #[must_use]
    pub const fn main_index(&self) -> &MainIndex {
        &self.main
    }

    /// Indexed directories and their ids.
    pub fn directories(&self) -> impl Iterator<Item = (&str, u64)> {
        self.main
            .directories
            .iter()
            .map(|(path, id)| (path.as_str(), *id))
    }

    #[must_use]
    pub fn index_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("index{id}.json"))
    }

    fn id_of(&self, directory: &Path) -> Option<u64> {
        self.main.directories.get(&directory_key(directory)).copied()
    }

    fn save_main(&self) -> Result<(), SearchError> {
        let value = serde_json::to_value(&self.main)?;
        write_document(&self.dir.join(MAIN_INDEX_FILE), &value)?;
        Ok(())
    }

    /// Crawl `directory` and store its file list, reusing its id when it was
    /// indexed before.
    ///
    /// A crawl that finds nothing stores nothing for a new directory; an
    /// already indexed one gets an empty file list.
    ///
    /// # Errors
    ///
    /// Crawl failures from [`build_index`] and write failures.
    pub fn index_directory(&mut self, directory: &Path) -> Result<Vec<PathBuf>, SearchError> {
        let files = build_index(directory, &self.pattern)?;
        if files.is_empty() && self.id_of(directory).is_none() {
            tracing::info!(directory = %directory.display(), "no documents found, index is empty");
            return Ok(files);
        }

        let id = if let Some(id) = self.id_of(directory) {
            id
        } else {
            self.main.cur_index += 1;
            let id = self.main.cur_index;
            self.main.directories.insert(directory_key(directory), id);
            self.save_main()?;
            id
        };

        let index = IndexFile {
            files: files.clone(),
        };
        write_document(&self.index_path(id), &serde_json::to_value(&index)?)?;
        tracing::info!(
            directory = %directory.display(),
            id,
            count = files.len(),
            "indexing finished"
        );
        Ok(files)
    }

    /// Stored file list of `directory`.
    ///
    /// # Errors
    ///
    /// [`SearchError::NotIndexed`] if the directory has no index.
    pub fn load_index(&self, directory: &Path) -> Result<IndexFile, SearchError> {
        let id = self
            .id_of(directory)
            .ok_or_else(|| SearchError::NotIndexed(directory.to_path_buf()))?;
        let value = decode(&self.index_path(id))?;
        Ok(serde_json::from_value(value)?)
    }

    /// True when the stored index of `directory` no longer reflects it.
    ///
    /// # Errors
    ///
    /// [`SearchError::NotIndexed`] for unknown directories, I/O errors when
    /// timestamps cannot be read.
    pub fn is_stale(&self, directory: &Path) -> Result<bool, SearchError> {
        let id = self
            .id_of(directory)
            .ok_or_else(|| SearchError::NotIndexed(directory.to_path_buf()))?;
        let index_path = self.index_path(id);

        let indexed_at = fs::metadata(&index_path)?.modified()?;
        let changed_at = fs::metadata(directory)?.modified()?;
        if indexed_at < changed_at {
            tracing::warn!(directory = %directory.display(), "directory changed since indexing");
            return Ok(true);
        }

        let index: IndexFile = serde_json::from_value(decode(&index_path)?)?;
        if let Some(missing) = index.files.iter().find(|file| !file.is_file()) {
            tracing::warn!(file = %missing.display(), "indexed file is missing");
            return Ok(true);
        }
        Ok(false)
    }

    /// Re-index `directory` when its index is stale. Returns whether it was
    /// rebuilt.
    ///
    /// # Errors
    ///
    /// Same as [`IndexStore::is_stale`] and [`IndexStore::index_directory`].
    pub fn check(&mut self, directory: &Path) -> Result<bool, SearchError> {
        if self.is_stale(directory)? {
            self.index_directory(directory)?;
            return Ok(true);
        }
        tracing::info!(directory = %directory.display(), "index is up to date");
        Ok(false)
    }

    /// Check every indexed directory. Failures are reported per directory and
    /// never stop the sweep.
    pub fn watchdog(&mut self) -> Vec<DirectoryCheck> {
        let directories: Vec<PathBuf> = self
            .main
            .directories
            .keys()
            .map(PathBuf::from)
            .collect();

        directories
            .into_iter()
            .map(|directory| {
                let status = if directory.is_dir() {
                    match self.check(&directory) {
                        Ok(true) => CheckStatus::Refreshed,
                        Ok(false) => CheckStatus::Fresh,
                        Err(error) => {
                            tracing::error!(directory = %directory.display(), %error, "index check failed");
                            CheckStatus::Failed(error.to_string())
                        }
                    }
                } else {
                    tracing::warn!(directory = %directory.display(), "indexed directory is gone");
                    CheckStatus::Missing
                };
                DirectoryCheck { directory, status }
            })
            .collect()
    }
}

/// Key under which a directory is stored: its canonical path when it can be
/// resolved, the path as given otherwise.
fn directory_key(directory: &Path) -> String {
    fs::canonicalize(directory)
        .unwrap_or_else(|_| directory.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    use crate::walk::DEFAULT_DOCUMENT_GLOB;

    struct Fixture {
        _tmp: TempDir,
        docs: PathBuf,
        store: IndexStore,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        fs::create_dir_all(docs.join("sub")).unwrap();
        fs::write(docs.join("a.json"), r#"{"name": "a"}"#).unwrap();
        fs::write(docs.join("sub/b.json"), r#"{"name": "b"}"#).unwrap();
        let store = IndexStore::open(tmp.path().join("indexes"), DEFAULT_DOCUMENT_GLOB).unwrap();
        Fixture {
            _tmp: tmp,
            docs,
            store,
        }
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn index_assigns_ids_and_persists() {
        let mut f = fixture();
        let files = f.store.index_directory(&f.docs).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(f.store.main_index().cur_index, 1);
        assert_eq!(f.store.load_index(&f.docs).unwrap().files, files);

        // re-indexing keeps the id
        f.store.index_directory(&f.docs).unwrap();
        assert_eq!(f.store.main_index().cur_index, 1);

        let reopened = IndexStore::open(f.store.dir.clone(), DEFAULT_DOCUMENT_GLOB).unwrap();
        assert_eq!(reopened.main_index(), f.store.main_index());
        assert_eq!(reopened.directories().count(), 1);
    }

    #[test]
    fn empty_crawl_stores_nothing() {
        let mut f = fixture();
        let empty = f.docs.join("empty");
        fs::create_dir(&empty).unwrap();
        assert!(f.store.index_directory(&empty).unwrap().is_empty());
        assert_eq!(f.store.main_index(), &MainIndex::default());
        assert!(matches!(
            f.store.load_index(&empty),
            Err(SearchError::NotIndexed(_))
        ));
    }

    #[test]
    fn fresh_index_is_not_stale() {
        let mut f = fixture();
        f.store.index_directory(&f.docs).unwrap();
        assert!(!f.store.is_stale(&f.docs).unwrap());
        assert!(!f.store.check(&f.docs).unwrap());
    }

    #[test]
    fn older_index_file_is_stale() {
        let mut f = fixture();
        f.store.index_directory(&f.docs).unwrap();
        let id = f.store.id_of(&f.docs).unwrap();
        set_mtime(
            &f.store.index_path(id),
            SystemTime::now() - Duration::from_secs(3600),
        );
        assert!(f.store.is_stale(&f.docs).unwrap());
    }

    #[test]
    fn deleted_file_is_stale_despite_timestamps() {
        let mut f = fixture();
        f.store.index_directory(&f.docs).unwrap();
        fs::remove_file(f.docs.join("sub/b.json")).unwrap();
        let id = f.store.id_of(&f.docs).unwrap();
        set_mtime(
            &f.store.index_path(id),
            SystemTime::now() + Duration::from_secs(3600),
        );
        assert!(f.store.is_stale(&f.docs).unwrap());

        assert!(f.store.check(&f.docs).unwrap());
        assert_eq!(f.store.load_index(&f.docs).unwrap().files.len(), 1);
    }

    #[test]
    fn emptied_directory_settles_after_one_refresh() {
        let mut f = fixture();
        f.store.index_directory(&f.docs).unwrap();
        fs::remove_file(f.docs.join("a.json")).unwrap();
        fs::remove_file(f.docs.join("sub/b.json")).unwrap();

        assert!(f.store.check(&f.docs).unwrap());
        assert!(f.store.load_index(&f.docs).unwrap().files.is_empty());
        assert!(!f.store.is_stale(&f.docs).unwrap());
        assert!(!f.store.check(&f.docs).unwrap());
        assert_eq!(f.store.main_index().cur_index, 1);
    }

    #[test]
    fn unknown_directory_is_not_indexed() {
        let f = fixture();
        assert!(matches!(
            f.store.is_stale(&f.docs),
            Err(SearchError::NotIndexed(_))
        ));
    }

    #[test]
    fn watchdog_reports_each_directory() {
        let mut f = fixture();
        let other = f.docs.join("sub");
        f.store.index_directory(&f.docs).unwrap();
        f.store.index_directory(&other).unwrap();
        assert_eq!(f.store.main_index().cur_index, 2);

        let other_key = PathBuf::from(directory_key(&other));
        let docs_key = PathBuf::from(directory_key(&f.docs));
        fs::remove_file(other.join("b.json")).unwrap();
        fs::remove_dir(&other).unwrap();

        let report = f.store.watchdog();
        assert_eq!(report.len(), 2);
        let status_of = |key: &Path| {
            report
                .iter()
                .find(|check| check.directory == key)
                .map(|check| check.status.clone())
        };
        assert_eq!(status_of(&other_key), Some(CheckStatus::Missing));
        assert_eq!(status_of(&docs_key), Some(CheckStatus::Refreshed));
    }
}
