// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generic preference store: one configuration object bound to one durable slot.
//!
//! The in-memory value is the source of truth for the session. Storage is a
//! best-effort mirror: every applied change is written through immediately,
//! and any storage failure is logged and swallowed here so callers never see it.

use crate::config::{ConfigService, ConfigStore};
use crate::merge;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A configuration object that can live in a `PreferenceStore`.
pub trait Preference: Serialize + DeserializeOwned + Default + Clone {
    /// Durable slot holding the JSON encoding of this object.
    const SLOT: &'static str;
    /// Top-level fields holding open maps, restored whole rather than merged
    /// into the defaults. Unknown keys everywhere else are dropped on restore.
    const OPEN_MAPS: &'static [&'static str] = &[];

    /// Partial update accepted by `PreferenceStore::update`.
    type Patch;

    /// Merge `patch` into `self`. Returns `false` when the patch names nothing
    /// this object knows about, in which case `self` must be left untouched.
    fn apply(&mut self, patch: Self::Patch) -> bool;
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<P> = Box<dyn FnMut(&P)>;

/// Owns one configuration object and mirrors it to its slot.
pub struct PreferenceStore<P, S> {
    value: P,
    config: ConfigService<S>,
    observers: Vec<(SubscriptionId, Observer<P>)>,
    next_subscription: u64,
}

impl<P, S> PreferenceStore<P, S>
where
    P: Preference,
    S: ConfigStore,
{
    /// Create a store over `store` and restore the persisted value.
    pub fn open(store: S) -> Self {
        let mut this = Self {
            value: P::default(),
            config: ConfigService::new(store),
            observers: Vec::new(),
            next_subscription: 0,
        };
        this.restore();
        this
    }

    /// Slot this store persists to.
    pub fn slot(&self) -> &'static str {
        P::SLOT
    }

    /// Current value.
    pub fn get(&self) -> &P {
        &self.value
    }

    /// Owned copy of the current value.
    pub fn snapshot(&self) -> P {
        self.value.clone()
    }

    /// Current value as JSON, exactly as it would be persisted.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.value)
    }

    /// Merge `patch` into the current value, persist, and notify observers.
    ///
    /// Returns `false` (and does nothing else) when the patch names no known key.
    /// No range validation happens here.
    pub fn update(&mut self, patch: P::Patch) -> bool {
        if !self.value.apply(patch) {
            debug!(slot = P::SLOT, "update named no known key; ignored");
            return false;
        }
        self.commit();
        true
    }

    /// Replace the whole value, persist, and notify observers.
    pub fn replace(&mut self, value: P) {
        self.value = value;
        self.commit();
    }

    /// Go back to the compiled-in defaults, persist, and notify observers.
    pub fn reset(&mut self) {
        self.replace(P::default());
    }

    /// Reload from the slot, merging over the defaults. Missing or malformed
    /// data silently yields the defaults. Observers are notified; nothing is
    /// written back.
    pub fn restore(&mut self) {
        self.value = self.load_or_default();
        self.notify();
    }

    /// Register `observer`; it runs after every applied change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&P) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn load_or_default(&self) -> P {
        let stored = match self.config.load_value(P::SLOT) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!(slot = P::SLOT, "nothing stored; using defaults");
                return P::default();
            }
            Err(err) => {
                warn!(slot = P::SLOT, %err, "stored preferences unreadable; using defaults");
                return P::default();
            }
        };
        match merge::restore_over(&P::default(), stored, P::OPEN_MAPS) {
            Ok(value) => value,
            Err(err) => {
                warn!(slot = P::SLOT, %err, "stored preferences do not fit schema; using defaults");
                P::default()
            }
        }
    }

    fn commit(&mut self) {
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        if let Err(err) = self.config.save(P::SLOT, &self.value) {
            warn!(slot = P::SLOT, %err, "failed to persist preferences; keeping in-memory value");
        }
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.value);
        }
    }
}
