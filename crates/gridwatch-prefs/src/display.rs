// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dashboard display toggles.

use crate::config::ConfigStore;
use crate::slot;
use crate::store::{Preference, PreferenceStore};
use serde::{Deserialize, Serialize};

/// Display toggles shown on the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Use the dark theme.
    pub dark_mode: bool,
    /// Denser tables and cards.
    pub compact_view: bool,
    /// Show the alert banner and badges.
    pub show_alerts: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            compact_view: false,
            show_alerts: true,
        }
    }
}

/// Shallow patch for `DisplaySettings`; `None` leaves a toggle as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettingsPatch {
    /// New `dark_mode`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    /// New `compact_view`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_view: Option<bool>,
    /// New `show_alerts`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alerts: Option<bool>,
}

impl DisplaySettingsPatch {
    /// Patch that only sets `dark_mode`.
    pub fn dark_mode(on: bool) -> Self {
        Self {
            dark_mode: Some(on),
            ..Self::default()
        }
    }

    /// Patch that only sets `compact_view`.
    pub fn compact_view(on: bool) -> Self {
        Self {
            compact_view: Some(on),
            ..Self::default()
        }
    }

    /// Patch that only sets `show_alerts`.
    pub fn show_alerts(on: bool) -> Self {
        Self {
            show_alerts: Some(on),
            ..Self::default()
        }
    }

    /// True when the patch sets nothing.
    pub fn is_empty(&self) -> bool {
        self.dark_mode.is_none() && self.compact_view.is_none() && self.show_alerts.is_none()
    }
}

impl Preference for DisplaySettings {
    const SLOT: &'static str = slot::DISPLAY_SETTINGS;
    type Patch = DisplaySettingsPatch;

    fn apply(&mut self, patch: DisplaySettingsPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(on) = patch.dark_mode {
            self.dark_mode = on;
        }
        if let Some(on) = patch.compact_view {
            self.compact_view = on;
        }
        if let Some(on) = patch.show_alerts {
            self.show_alerts = on;
        }
        true
    }
}

impl<S: ConfigStore> PreferenceStore<DisplaySettings, S> {
    /// Flip `dark_mode`.
    pub fn toggle_dark_mode(&mut self) {
        let on = !self.get().dark_mode;
        self.update(DisplaySettingsPatch::dark_mode(on));
    }

    /// Flip `compact_view`.
    pub fn toggle_compact_view(&mut self) {
        let on = !self.get().compact_view;
        self.update(DisplaySettingsPatch::compact_view(on));
    }

    /// Flip `show_alerts`.
    pub fn toggle_show_alerts(&mut self) {
        let on = !self.get().show_alerts;
        self.update(DisplaySettingsPatch::show_alerts(on));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_run() {
        let json = serde_json::to_value(DisplaySettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"darkMode": false, "compactView": false, "showAlerts": true})
        );
    }

    #[test]
    fn patch_only_touches_named_toggles() {
        let mut settings = DisplaySettings::default();
        assert!(settings.apply(DisplaySettingsPatch::dark_mode(true)));
        assert_eq!(
            settings,
            DisplaySettings {
                dark_mode: true,
                compact_view: false,
                show_alerts: true,
            }
        );
    }

    #[test]
    fn empty_patch_is_ignored() {
        let mut settings = DisplaySettings::default();
        assert!(!settings.apply(DisplaySettingsPatch::default()));
        assert_eq!(settings, DisplaySettings::default());
    }

    #[test]
    fn patch_decodes_from_partial_json() {
        let patch: DisplaySettingsPatch =
            serde_json::from_str(r#"{"compactView": true}"#).unwrap();
        assert_eq!(patch, DisplaySettingsPatch::compact_view(true));
    }
}
