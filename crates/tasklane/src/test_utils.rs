use crate::api::TaskApi;
use crate::store::{FileStore, FsBackend, DEFAULT_STORAGE_KEY};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // Keeps the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::at(root.clone(), DEFAULT_STORAGE_KEY);
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// A second store over the same directory, as another process would see it.
    pub fn reopen(&self) -> FileStore {
        FileStore::at(self.root.clone(), DEFAULT_STORAGE_KEY)
    }

    pub fn api(&self) -> TaskApi<FsBackend> {
        TaskApi::open(self.reopen())
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(format!("{}.json", DEFAULT_STORAGE_KEY))
    }
}
