// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Which company's equipment the dashboard is showing.

use crate::config::ConfigStore;
use crate::slot;
use crate::store::{Preference, PreferenceStore};
use serde::{Deserialize, Serialize};

/// Selected company id; `None` until the user picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanySelection(Option<String>);

impl CompanySelection {
    /// Selection for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    /// Selected id, if any.
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Preference for CompanySelection {
    const SLOT: &'static str = slot::CURRENT_COMPANY_ID;
    type Patch = Option<String>;

    fn apply(&mut self, patch: Option<String>) -> bool {
        self.0 = patch;
        true
    }
}

impl<S: ConfigStore> PreferenceStore<CompanySelection, S> {
    /// Switch to company `id`.
    pub fn select(&mut self, id: impl Into<String>) {
        self.update(Some(id.into()));
    }

    /// Forget the selection.
    pub fn clear(&mut self) {
        self.update(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_as_bare_string_or_null() {
        assert_eq!(serde_json::to_string(&CompanySelection::new("acme")).unwrap(), r#""acme""#);
        assert_eq!(serde_json::to_string(&CompanySelection::default()).unwrap(), "null");
    }

    #[test]
    fn apply_sets_and_clears() {
        let mut selection = CompanySelection::default();
        assert!(selection.apply(Some("plant-7".into())));
        assert_eq!(selection.id(), Some("plant-7"));
        assert!(selection.apply(None));
        assert_eq!(selection.id(), None);
    }
}
