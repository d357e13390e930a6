use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::LocalStorage;

const ITEM_FILE_EXTENSION: &str = "json";

/// Keeps every key in its own file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileLocalStorage {
    dir: PathBuf,
}

impl FileLocalStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir)
            .context(format!("an error occurred on creating a storage dir {:?}", dir))?;

        Ok(Self { dir })
    }

    fn path_of(&self, key: &str) -> Result<PathBuf> {
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !is_valid_key {
            bail!("invalid storage key: {:?}", key);
        }

        Ok(self.dir.join(format!("{}.{}", key, ITEM_FILE_EXTENSION)))
    }
}

impl LocalStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_of(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("an error occurred on reading {:?}", path)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_of(key)?;
        let tmp_path = path.with_extension("tmp");

        // the rename keeps readers from ever seeing a half-written value
        fs::write(&tmp_path, value)
            .context(format!("an error occurred on writing {:?}", tmp_path))?;
        fs::rename(&tmp_path, &path)
            .context(format!("an error occurred on replacing {:?}", path))?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_of(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context(format!("an error occurred on removing {:?}", path)),
        }
    }
}
