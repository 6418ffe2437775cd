// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings page tabs and the `?tab=` query parameter that preselects one.

use crate::error::ParseError;
use crate::slot;
use crate::store::Preference;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tabs on the settings page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingsTab {
    /// Profile and locale.
    #[default]
    General,
    /// Display toggles.
    Display,
    /// Alert delivery.
    Notifications,
    /// Energy rate tables.
    EnergyRates,
    /// User management.
    Users,
}

impl SettingsTab {
    /// All tabs in page order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Display,
        Self::Notifications,
        Self::EnergyRates,
        Self::Users,
    ];

    /// Name used in the stored JSON and in query strings.
    pub fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Display => "display",
            Self::Notifications => "notifications",
            Self::EnergyRates => "energy-rates",
            Self::Users => "users",
        }
    }

    /// Read the `tab` parameter from a query string (`?tab=display&x=1`).
    /// A full URL is accepted too. Returns `None` when the parameter is
    /// absent or names no tab.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.split_once('?').map_or(query, |(_, rest)| rest);
        let query = query.split_once('#').map_or(query, |(head, _)| head);
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "tab")
            .and_then(|(_, value)| value.parse().ok())
    }
}

impl fmt::Display for SettingsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingsTab {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|tab| tab.key().replace('-', "") == norm)
            .ok_or_else(|| ParseError::SettingsTab(s.to_owned()))
    }
}

impl Preference for SettingsTab {
    const SLOT: &'static str = slot::SETTINGS_ACTIVE_TAB;
    type Patch = SettingsTab;

    fn apply(&mut self, patch: SettingsTab) -> bool {
        *self = patch;
        true
    }
}
