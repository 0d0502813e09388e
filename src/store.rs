use color_eyre::eyre::{
    Result,
    WrapErr,
};
use std::{
    collections::BTreeMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

/// Flat string key/value file. Every write re-reads the file and rewrites it
/// in full, so several handles on one path do not clobber each other's keys.
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<BTreeMap<String, String>> {
        read_values(&self.path)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_owned(), value.to_owned());
        write_values(&self.path, &values)
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut values = self.load()?;
        let removed = values.remove(key).is_some();
        if removed {
            write_values(&self.path, &values)?;
        }
        Ok(removed)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.get(key)?.map(|v| v == "true"))
    }

    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let data = fs::read(path)
        .wrap_err_with(|| format!("Failed to read store at {}", path.display()))?;
    if data.is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_slice(&data)
        .wrap_err_with(|| format!("Failed to parse store JSON at {}", path.display()))
}

fn write_values(path: &Path, values: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create store directory {}", parent.display())
            })?;
        }
    }
    let json = serde_json::to_vec_pretty(values).wrap_err("Failed to serialize store")?;
    fs::write(path, json)
        .wrap_err_with(|| format!("Failed to write store at {}", path.display()))?;
    Ok(())
}
