// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory slot store fake for testing without filesystem I/O.

use gridwatch_prefs::config::{ConfigError, ConfigStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share state, so a test can hand one clone to a `Preferences`
/// context and inspect slots through another. Loads and saves can be made
/// to fail on demand, and attempts are counted.
///
/// # Example
///
/// ```
/// use gridwatch_dry_tests::InMemoryConfigStore;
/// use gridwatch_prefs::{DisplaySettingsPatch, Preferences};
///
/// let store = InMemoryConfigStore::new();
/// let mut prefs = Preferences::open(store.clone());
/// prefs.display.update(DisplaySettingsPatch::dark_mode(true));
///
/// assert_eq!(
///     store.slot_text("displaySettings").as_deref(),
///     Some(r#"{"darkMode":true,"compactView":false,"showAlerts":true}"#)
/// );
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<InMemoryConfigStoreInner>>,
}

#[derive(Default)]
struct InMemoryConfigStoreInner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with slot texts.
    pub fn with_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let data = slots
            .into_iter()
            .map(|(slot, text)| (slot.into(), text.as_ref().as_bytes().to_vec()))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(InMemoryConfigStoreInner {
                data,
                ..Default::default()
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryConfigStoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Overwrite a slot with raw text, bypassing counters and fault flags.
    pub fn put_slot_text(&self, slot: &str, text: &str) {
        self.lock().data.insert(slot.to_owned(), text.as_bytes().to_vec());
    }

    /// Raw text currently held by `slot`, if any.
    pub fn slot_text(&self, slot: &str) -> Option<String> {
        self.lock()
            .data
            .get(slot)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Configure the store to fail on load operations.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Configure the store to fail on save operations.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts, including failed ones.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts, including failed ones.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// All slots currently present.
    pub fn slots(&self) -> Vec<String> {
        self.lock().data.keys().cloned().collect()
    }

    /// Check if a slot exists.
    pub fn contains_slot(&self, slot: &str) -> bool {
        self.lock().data.contains_key(slot)
    }

    /// Clear data, counters, and fault flags.
    pub fn reset(&self) {
        *self.lock() = InMemoryConfigStoreInner::default();
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, slot: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;

        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }

        inner.data.get(slot).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, slot: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;

        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated quota exceeded".into()));
        }

        inner.data.insert(slot.to_owned(), data.to_vec());
        Ok(())
    }
}
