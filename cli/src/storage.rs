use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shutbox_core::PlayStats;

/// Fixed identifier a stored value lives under.
pub trait StorageKey {
    const KEY: &'static str;

    /// File name derived from the key, in the working directory.
    fn default_path() -> PathBuf {
        PathBuf::from(format!("{}.json", Self::KEY.replace(':', "-")))
    }
}

impl StorageKey for PlayStats {
    const KEY: &'static str = "shutbox:stats";
}

/// JSON file holding one stored value.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_key<T: StorageKey>() -> Self {
        Self::new(T::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))
    }

    /// Stored value, or the default when nothing usable is on disk.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self) -> T {
        match self.load() {
            Ok(value) => value,
            Err(err) => {
                let missing = err
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == ErrorKind::NotFound);
                if missing {
                    log::debug!("No stored data at {}, starting fresh", self.path.display());
                } else {
                    log::warn!("Could not load {}, starting fresh: {:#}", self.path.display(), err);
                }
                T::default()
            }
        }
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, text).with_context(|| format!("writing {}", self.path.display()))
    }
}
