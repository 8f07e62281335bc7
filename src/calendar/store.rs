use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const BIRTHDAYS_KEY: &str = "organizer.birthdays";
pub const TRIPS_KEY: &str = "organizer.trips";
pub const EVENTS_KEY: &str = "organizer.events";

/// Key/value persistence for record collections.
///
/// `load` never fails: anything that cannot be read back yields `default`.
pub trait Storage {
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T;
    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()>;
}

/// One pretty-printed JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .wrap_err_with(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(eyre!("Invalid storage key '{}'", key));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for JsonStore {
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = match self.path_for(key) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("{err}");
                return default;
            }
        };
        if !path.exists() {
            return default;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Could not read {}: {err}; using empty data", path.display());
                return default;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Corrupt data in {}: {err}; using empty data", path.display());
                default
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }
}
