// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording observer for `PreferenceStore::subscribe`.

use std::cell::RefCell;
use std::rc::Rc;

/// Collects a clone of every value a store notifies about.
///
/// ```
/// use gridwatch_dry_tests::{InMemoryConfigStore, Recorder};
/// use gridwatch_prefs::{DisplaySettings, PreferenceStore};
///
/// let mut store: PreferenceStore<DisplaySettings, _> =
///     PreferenceStore::open(InMemoryConfigStore::new());
/// let recorder = Recorder::new();
/// store.subscribe(recorder.observer());
/// store.toggle_dark_mode();
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct Recorder<T> {
    seen: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T> Recorder<T>
where
    T: Clone + 'static,
{
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback to pass to `subscribe`. Any number may be handed out; they
    /// all record into the same log.
    pub fn observer(&self) -> impl FnMut(&T) + 'static {
        let seen = Rc::clone(&self.seen);
        move |value: &T| seen.borrow_mut().push(value.clone())
    }

    /// Every value recorded so far, oldest first.
    pub fn seen(&self) -> Vec<T> {
        self.seen.borrow().clone()
    }

    /// Number of notifications recorded.
    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Most recent value, if any.
    pub fn last(&self) -> Option<T> {
        self.seen.borrow().last().cloned()
    }
}
