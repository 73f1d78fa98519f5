use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use fintrack_core::{
    storage::{KeyValueStore, StoreKey},
    CoreError,
};
use tracing::debug;

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed key-value store: one `<key>.json` file per collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn key_path(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.{}", key.as_str(), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, CoreError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                debug!(%key, path = %path.display(), bytes = raw.len(), "loaded collection");
                Ok(Some(raw))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CoreError::Storage(format!(
                "failed to read {}: {}",
                path.display(),
                err
            ))),
        }
    }

    fn set(&self, key: StoreKey, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        write_atomic(&path, value)?;
        debug!(%key, path = %path.display(), bytes = value.len(), "saved collection");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages `data` next to `path` and renames it into place.
fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
