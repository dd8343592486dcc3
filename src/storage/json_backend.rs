use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;

use crate::errors::SpendError;

use super::{KeyValueStore, Result};

const ENTRY_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_DIR_NAME: &str = ".spend_core";
const HOME_ENV: &str = "SPEND_CORE_HOME";

/// File-per-entry store: each key maps to `<base>/<key>.json`.
///
/// Writes serialize the full document to a staging file and rename it over
/// the target, so readers see either the old or the new entry, never a torn
/// one.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base: PathBuf,
}

impl JsonFileStore {
    pub fn new(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        ensure_dir(&base)?;
        Ok(Self { base })
    }

    /// Opens the store in the default data directory, `~/.spend_core` unless
    /// `SPEND_CORE_HOME` overrides it.
    pub fn new_default() -> Result<Self> {
        Self::new(default_data_dir())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base
            .join(format!("{}.{}", canonical_key(key), ENTRY_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .map_err(|err| SpendError::StorageRead(format!("{}: {err}", path.display())))?;
        Ok(Some(contents))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        ensure_dir(&self.base)?;
        let path = self.entry_path(key);
        let tmp = tmp_path(&path);
        write_all(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Application data directory, `~/.spend_core` by default.
pub fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "entry".into()
    } else {
        sanitized
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
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

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path()).expect("file store");
        (store, temp)
    }

    #[test]
    fn get_on_missing_entry_returns_none() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("transactions").expect("get succeeds"), None);
    }

    #[test]
    fn put_then_get_round_trips() {
        let (store, _guard) = store_with_temp_dir();
        store.put("monthly_budget", "5000.0").expect("put succeeds");
        assert_eq!(
            store.get("monthly_budget").expect("get succeeds").as_deref(),
            Some("5000.0")
        );
    }

    #[test]
    fn put_overwrites_and_leaves_no_staging_file() {
        let (store, guard) = store_with_temp_dir();
        store.put("transactions", "[]").expect("first put");
        store.put("transactions", "[1]").expect("second put");
        assert_eq!(
            store.get("transactions").expect("get succeeds").as_deref(),
            Some("[1]")
        );
        let leftovers: Vec<_> = fs::read_dir(guard.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .path()
                    .to_string_lossy()
                    .ends_with(&format!(".{TMP_SUFFIX}"))
            })
            .collect();
        assert!(leftovers.is_empty(), "staging files must not survive a put");
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let (store, guard) = store_with_temp_dir();
        store.put("Monthly Budget", "1").expect("put succeeds");
        assert!(guard.path().join("monthly_budget.json").exists());
        assert_eq!(
            store.get("Monthly Budget").expect("get succeeds").as_deref(),
            Some("1")
        );
    }
}
