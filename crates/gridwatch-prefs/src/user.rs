// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Free-form user settings: a nested map of primitive values.
//!
//! The key set is fixed by the defaults. Updates path-merge into it: nested
//! maps merge key by key, leaves are replaced only by a value of the same
//! kind, and keys the defaults don't define are ignored.

use crate::slot;
use crate::store::Preference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested settings map.
pub type SettingsMap = BTreeMap<String, SettingValue>;

/// One settings value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag.
    Bool(bool),
    /// Any number.
    Number(f64),
    /// Text.
    Text(String),
    /// Nested map.
    Map(SettingsMap),
}

impl SettingValue {
    fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Bool(_), Self::Bool(_))
                | (Self::Number(_), Self::Number(_))
                | (Self::Text(_), Self::Text(_))
                | (Self::Map(_), Self::Map(_))
        )
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<SettingsMap> for SettingValue {
    fn from(value: SettingsMap) -> Self {
        Self::Map(value)
    }
}

/// Build a single-leaf patch from a dotted path, e.g. `notifications.sms`.
pub fn path_patch(path: &str, value: impl Into<SettingValue>) -> SettingsMap {
    let mut segments = path.rsplit('.').map(str::trim);
    let leaf = segments.next().unwrap_or_default();
    let mut patch = SettingsMap::from([(leaf.to_owned(), value.into())]);
    for segment in segments {
        patch = SettingsMap::from([(segment.to_owned(), SettingValue::Map(patch))]);
    }
    patch
}

/// User settings object stored in `userSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserSettings(SettingsMap);

impl UserSettings {
    /// Top-level map.
    pub fn as_map(&self) -> &SettingsMap {
        &self.0
    }

    /// Look up a dotted path such as `notifications.email`.
    pub fn get_path(&self, path: &str) -> Option<&SettingValue> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?.trim())?;
        for segment in segments {
            match current {
                SettingValue::Map(map) => current = map.get(segment.trim())?,
                _ => return None,
            }
        }
        Some(current)
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        let notifications = SettingsMap::from([
            ("email".to_owned(), SettingValue::Bool(true)),
            ("sms".to_owned(), SettingValue::Bool(false)),
            ("push".to_owned(), SettingValue::Bool(true)),
        ]);
        Self(SettingsMap::from([
            ("notifications".to_owned(), SettingValue::Map(notifications)),
            ("language".to_owned(), SettingValue::from("en")),
            ("timezone".to_owned(), SettingValue::from("UTC")),
            ("refreshInterval".to_owned(), SettingValue::Number(30.0)),
        ]))
    }
}

fn merge_into(target: &mut SettingsMap, patch: SettingsMap) -> bool {
    let mut applied = false;
    for (key, value) in patch {
        let Some(current) = target.get_mut(&key) else {
            continue;
        };
        match (current, value) {
            (SettingValue::Map(current), SettingValue::Map(patch)) => {
                applied |= merge_into(current, patch);
            }
            (current, value) if current.same_kind(&value) => {
                *current = value;
                applied = true;
            }
            _ => {}
        }
    }
    applied
}

impl Preference for UserSettings {
    const SLOT: &'static str = slot::USER_SETTINGS;
    type Patch = SettingsMap;

    fn apply(&mut self, patch: SettingsMap) -> bool {
        merge_into(&mut self.0, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_patch_keeps_siblings() {
        let mut settings = UserSettings::default();
        assert!(settings.apply(path_patch("notifications.sms", true)));
        assert_eq!(settings.get_path("notifications.sms"), Some(&SettingValue::Bool(true)));
        assert_eq!(settings.get_path("notifications.email"), Some(&SettingValue::Bool(true)));
        assert_eq!(settings.get_path("notifications.push"), Some(&SettingValue::Bool(true)));
        assert_eq!(settings.get_path("language"), Some(&SettingValue::from("en")));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut settings = UserSettings::default();
        assert!(!settings.apply(path_patch("theme", "solarized")));
        assert!(!settings.apply(path_patch("notifications.pager", true)));
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn kind_changes_are_ignored() {
        let mut settings = UserSettings::default();
        assert!(!settings.apply(path_patch("refreshInterval", "fast")));
        assert!(!settings.apply(path_patch("notifications", false)));
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn mixed_patch_applies_known_part() {
        let mut settings = UserSettings::default();
        let mut patch = path_patch("timezone", "America/Chicago");
        patch.insert("bogus".into(), SettingValue::Bool(true));
        assert!(settings.apply(patch));
        assert_eq!(settings.get_path("timezone"), Some(&SettingValue::from("America/Chicago")));
        assert!(settings.get_path("bogus").is_none());
    }

    #[test]
    fn path_patch_builds_nested_maps() {
        let patch = path_patch("a.b.c", 1.0);
        let expected = SettingsMap::from([(
            "a".to_owned(),
            SettingValue::Map(SettingsMap::from([(
                "b".to_owned(),
                SettingValue::Map(SettingsMap::from([("c".to_owned(), SettingValue::Number(1.0))])),
            )])),
        )]);
        assert_eq!(patch, expected);
    }

    #[test]
    fn get_path_stops_at_leaves() {
        let settings = UserSettings::default();
        assert!(settings.get_path("language.code").is_none());
        assert!(settings.get_path("missing").is_none());
    }

    #[test]
    fn encodes_as_plain_object() {
        let json = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(json["notifications"]["email"], serde_json::json!(true));
        assert_eq!(json["refreshInterval"], serde_json::json!(30.0));
    }
}
