// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for GridWatch (one JSON file per slot).

use directories::ProjectDirs;
use gridwatch_prefs::config::{ConfigError, ConfigStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Store slots as `<slot>.json` files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/gridwatch`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("io", "gridwatch", "GridWatch")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory holding the slot files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, slot: &str) -> Result<PathBuf, ConfigError> {
        if slot.is_empty() || slot.contains(['/', '\\']) || slot.starts_with('.') {
            return Err(ConfigError::Other(format!("invalid slot name: {slot:?}")));
        }
        Ok(self.base.join(format!("{slot}.json")))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, slot: &str) -> Result<Vec<u8>, ConfigError> {
        let path = self.path_for(slot)?;
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, slot: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(slot)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }
}
