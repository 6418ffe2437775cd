// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preference stores for the GridWatch equipment dashboard.
//! Each store owns one configuration object and mirrors it to a durable slot;
//! storage adapters live in separate crates behind the `ConfigStore` port.

pub mod company;
pub mod config;
pub mod context;
pub mod display;
pub mod energy;
pub mod error;
pub mod merge;
pub mod slot;
pub mod store;
pub mod tab;
pub mod user;

pub use company::CompanySelection;
pub use config::{ConfigError, ConfigService, ConfigStore};
pub use context::Preferences;
pub use display::{DisplaySettings, DisplaySettingsPatch};
pub use energy::{EnergyRateUpdate, EnergyRates, Season, SeasonalRates, TouPeriod, TouRates};
pub use error::ParseError;
pub use store::{Preference, PreferenceStore, SubscriptionId};
pub use tab::SettingsTab;
pub use user::{path_patch, SettingValue, SettingsMap, UserSettings};
