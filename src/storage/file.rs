//! Filesystem-backed config store
//!
//! Every document lives in its own file under the storage root. There is no
//! index or cache: listing walks the tree, reads and writes go straight to disk.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

/// File name suffix identifying config documents
pub const CONFIG_SUFFIX: &str = ".alloy";

/// Permission bits for newly created documents
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Storage failure with the path it concerns
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to walk storage directory '{}': {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("directory walk task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Config documents stored as `<root>/<id>.alloy`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// On-disk location of a config. The ID is used verbatim, so an empty ID
    /// resolves to `<root>/.alloy`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}{CONFIG_SUFFIX}"))
    }

    /// Collect the IDs of every `.alloy` file below the root, nested
    /// directories included, in directory-walk order.
    ///
    /// The first traversal error aborts the listing; nothing partial is returned.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || collect_ids(&root)).await?
    }

    /// Stat-based existence check. Every stat failure counts as absent,
    /// including permission errors.
    pub async fn exists(&self, id: &str) -> bool {
        fs::metadata(self.path_for(id)).await.is_ok()
    }

    pub async fn read(&self, id: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(id);
        fs::read(&path)
            .await
            .map_err(|source| StoreError::Read { path, source })
    }

    /// Replace the document wholesale. Not atomic: a concurrent reader may
    /// observe a partially written file.
    pub async fn write(&self, id: &str, content: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(id);
        match write_file(&path, content).await {
            Ok(()) => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}

fn collect_ids(root: &Path) -> Result<Vec<String>, StoreError> {
    let mut ids = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|source| StoreError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some(id) = name.strip_suffix(CONFIG_SUFFIX) {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

async fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(content).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path())
    }

    #[tokio::test]
    async fn test_write_then_read_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let content = b"logging {\n  level = \"debug\"\n}\n\x00\xff";
        store.write("agent", content).await.unwrap();

        assert!(store.exists("agent").await);
        assert_eq!(store.read("agent").await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_write_replaces_longer_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.write("agent", b"a much longer first version").await.unwrap();
        store.write("agent", b"short").await.unwrap();

        assert_eq!(store.read("agent").await.unwrap(), b"short");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_new_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write("agent", b"x").await.unwrap();

        let mode = std::fs::metadata(store.path_for("agent"))
            .unwrap()
            .permissions()
            .mode();
        // umask can only clear bits
        assert_eq!(mode & 0o7022, 0);
        assert_eq!(mode & 0o111, 0);
    }

    #[test]
    fn test_path_for() {
        let store = FileStore::new("/configs");
        assert_eq!(store.path_for("foo"), PathBuf::from("/configs/foo.alloy"));
        assert_eq!(store.path_for(""), PathBuf::from("/configs/.alloy"));
    }

    #[tokio::test]
    async fn test_missing_config_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.exists("missing").await);
        assert!(matches!(
            store.read("missing").await,
            Err(StoreError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_filters_suffix_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.alloy"), "a").unwrap();
        std::fs::write(dir.path().join("b.alloy"), "b").unwrap();
        std::fs::write(dir.path().join("c.txt"), "c").unwrap();
        std::fs::create_dir_all(dir.path().join("team/prod")).unwrap();
        std::fs::write(dir.path().join("team/prod/d.alloy"), "d").unwrap();
        // directories are skipped even when their name matches
        std::fs::create_dir(dir.path().join("e.alloy")).unwrap();

        let mut ids = store_in(&dir).list().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "d"]);
    }

    #[tokio::test]
    async fn test_list_keeps_duplicate_names_from_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("staging")).unwrap();
        std::fs::write(dir.path().join("agent.alloy"), "").unwrap();
        std::fs::write(dir.path().join("staging/agent.alloy"), "").unwrap();

        let ids = store_in(&dir).list().await.unwrap();
        assert_eq!(ids, vec!["agent", "agent"]);
    }

    #[tokio::test]
    async fn test_list_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("does-not-exist"));

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Walk { .. }));
        assert!(err.to_string().contains("does-not-exist"));
    }
}
