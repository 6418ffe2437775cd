// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The preference context: every store the dashboard uses, owned in one place.
//!
//! Build it once at start-up from a storage handle and pass it (or borrows of
//! its stores) to whatever needs preferences. There is no global instance.

use crate::company::CompanySelection;
use crate::config::ConfigStore;
use crate::display::DisplaySettings;
use crate::energy::EnergyRates;
use crate::slot;
use crate::store::PreferenceStore;
use crate::tab::SettingsTab;
use crate::user::UserSettings;
use serde_json::Value;

/// All preference stores, sharing one storage backend.
pub struct Preferences<S> {
    /// `displaySettings`
    pub display: PreferenceStore<DisplaySettings, S>,
    /// `userSettings`
    pub user: PreferenceStore<UserSettings, S>,
    /// `energyRates`
    pub energy: PreferenceStore<EnergyRates, S>,
    /// `currentCompanyId`
    pub company: PreferenceStore<CompanySelection, S>,
    /// `settingsActiveTab`
    pub tab: PreferenceStore<SettingsTab, S>,
}

impl<S> Preferences<S>
where
    S: ConfigStore + Clone,
{
    /// Open every store over `store`, restoring persisted values.
    pub fn open(store: S) -> Self {
        Self {
            display: PreferenceStore::open(store.clone()),
            user: PreferenceStore::open(store.clone()),
            energy: PreferenceStore::open(store.clone()),
            company: PreferenceStore::open(store.clone()),
            tab: PreferenceStore::open(store),
        }
    }

    /// Tab to show when the settings page opens. A valid `tab` query
    /// parameter wins and becomes the stored tab; otherwise the stored tab.
    pub fn initial_tab(&mut self, query: Option<&str>) -> SettingsTab {
        match query.and_then(SettingsTab::from_query) {
            Some(tab) => {
                self.tab.update(tab);
                tab
            }
            None => *self.tab.get(),
        }
    }

    /// Reset the store bound to `slot`. Returns `false` for an unknown slot.
    pub fn reset_slot(&mut self, slot: &str) -> bool {
        match slot {
            slot::DISPLAY_SETTINGS => self.display.reset(),
            slot::USER_SETTINGS => self.user.reset(),
            slot::ENERGY_RATES => self.energy.reset(),
            slot::CURRENT_COMPANY_ID => self.company.reset(),
            slot::SETTINGS_ACTIVE_TAB => self.tab.reset(),
            _ => return false,
        }
        true
    }

    /// Reset every store to its defaults.
    pub fn reset_all(&mut self) {
        for slot in slot::ALL {
            self.reset_slot(slot);
        }
    }

    /// Current value of the store bound to `slot`, as JSON.
    pub fn slot_json(&self, slot: &str) -> Option<Result<Value, serde_json::Error>> {
        let json = match slot {
            slot::DISPLAY_SETTINGS => self.display.to_json(),
            slot::USER_SETTINGS => self.user.to_json(),
            slot::ENERGY_RATES => self.energy.to_json(),
            slot::CURRENT_COMPANY_ID => self.company.to_json(),
            slot::SETTINGS_ACTIVE_TAB => self.tab.to_json(),
            _ => return None,
        };
        Some(json)
    }
}
