// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Durable slot names. These must stay byte-for-byte stable so existing stored
//! preferences keep loading.

/// Display toggles (`DisplaySettings`).
pub const DISPLAY_SETTINGS: &str = "displaySettings";
/// Free-form user settings (`UserSettings`).
pub const USER_SETTINGS: &str = "userSettings";
/// Energy rate table (`EnergyRates`).
pub const ENERGY_RATES: &str = "energyRates";
/// Currently selected company (`CompanySelection`).
pub const CURRENT_COMPANY_ID: &str = "currentCompanyId";
/// Last opened settings tab (`SettingsTab`).
pub const SETTINGS_ACTIVE_TAB: &str = "settingsActiveTab";

/// Every slot owned by a `Preferences` context, in a stable order.
pub const ALL: [&str; 5] = [
    DISPLAY_SETTINGS,
    USER_SETTINGS,
    ENERGY_RATES,
    CURRENT_COMPANY_ID,
    SETTINGS_ACTIVE_TAB,
];
