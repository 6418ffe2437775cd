// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Energy rate configuration (USD/kWh) used for equipment cost estimates.
//!
//! Rates come in three groups: a flat rate per equipment type, a time-of-use
//! (TOU) table, and seasonal overrides. Updates are keyed to a single rate so
//! sibling entries are never clobbered. Rates are not range-checked.

use crate::config::ConfigStore;
use crate::error::ParseError;
use crate::slot;
use crate::store::{Preference, PreferenceStore};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Time-of-use pricing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouPeriod {
    /// Weekday afternoon peak.
    OnPeak,
    /// Shoulder hours.
    MidPeak,
    /// Overnight/midday trough.
    SuperOffPeak,
    /// Remaining hours.
    OffPeak,
}

impl TouPeriod {
    /// All periods in table order.
    pub const ALL: [Self; 4] = [Self::OnPeak, Self::MidPeak, Self::SuperOffPeak, Self::OffPeak];

    /// Key used in the stored JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::OnPeak => "onPeak",
            Self::MidPeak => "midPeak",
            Self::SuperOffPeak => "superOffPeak",
            Self::OffPeak => "offPeak",
        }
    }
}

impl fmt::Display for TouPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TouPeriod {
    type Err = ParseError;

    /// Accepts `onPeak`, `on-peak`, `on_peak` and so on, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "onpeak" => Ok(Self::OnPeak),
            "midpeak" => Ok(Self::MidPeak),
            "superoffpeak" => Ok(Self::SuperOffPeak),
            "offpeak" => Ok(Self::OffPeak),
            _ => Err(ParseError::TouPeriod(s.to_owned())),
        }
    }
}

/// Season for seasonal overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Season {
    /// June through September.
    Summer,
    /// October through May.
    Winter,
}

impl Season {
    /// Key used in the stored JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Season {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "summer" => Ok(Self::Summer),
            "winter" => Ok(Self::Winter),
            _ => Err(ParseError::Season(s.to_owned())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Time-of-use rate table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouRates {
    /// On-peak rate.
    pub on_peak: f64,
    /// Mid-peak rate.
    pub mid_peak: f64,
    /// Super off-peak rate.
    pub super_off_peak: f64,
    /// Off-peak rate.
    pub off_peak: f64,
}

impl TouRates {
    /// Rate for `period`.
    pub fn get(&self, period: TouPeriod) -> f64 {
        match period {
            TouPeriod::OnPeak => self.on_peak,
            TouPeriod::MidPeak => self.mid_peak,
            TouPeriod::SuperOffPeak => self.super_off_peak,
            TouPeriod::OffPeak => self.off_peak,
        }
    }

    fn get_mut(&mut self, period: TouPeriod) -> &mut f64 {
        match period {
            TouPeriod::OnPeak => &mut self.on_peak,
            TouPeriod::MidPeak => &mut self.mid_peak,
            TouPeriod::SuperOffPeak => &mut self.super_off_peak,
            TouPeriod::OffPeak => &mut self.off_peak,
        }
    }
}

/// Summer overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummerRates {
    /// Summer on-peak rate.
    pub on_peak: f64,
    /// Summer mid-peak rate.
    pub mid_peak: f64,
}

/// Winter overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinterRates {
    /// Winter mid-peak rate.
    pub mid_peak: f64,
    /// Winter super off-peak rate.
    pub super_off_peak: f64,
}

/// Seasonal overrides. Only some season/period pairs exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalRates {
    /// Summer table.
    pub summer: SummerRates,
    /// Winter table.
    pub winter: WinterRates,
}

impl SeasonalRates {
    /// Rate for `season`/`period`, or `None` if that pair has no entry.
    pub fn get(&self, season: Season, period: TouPeriod) -> Option<f64> {
        match (season, period) {
            (Season::Summer, TouPeriod::OnPeak) => Some(self.summer.on_peak),
            (Season::Summer, TouPeriod::MidPeak) => Some(self.summer.mid_peak),
            (Season::Winter, TouPeriod::MidPeak) => Some(self.winter.mid_peak),
            (Season::Winter, TouPeriod::SuperOffPeak) => Some(self.winter.super_off_peak),
            _ => None,
        }
    }

    fn get_mut(&mut self, season: Season, period: TouPeriod) -> Option<&mut f64> {
        match (season, period) {
            (Season::Summer, TouPeriod::OnPeak) => Some(&mut self.summer.on_peak),
            (Season::Summer, TouPeriod::MidPeak) => Some(&mut self.summer.mid_peak),
            (Season::Winter, TouPeriod::MidPeak) => Some(&mut self.winter.mid_peak),
            (Season::Winter, TouPeriod::SuperOffPeak) => Some(&mut self.winter.super_off_peak),
            _ => None,
        }
    }
}

/// Full energy rate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRates {
    /// Flat rate per equipment type. Open map: new types may be added.
    #[serde(deserialize_with = "numeric_entries")]
    pub equipment_rates: BTreeMap<String, f64>,
    /// Time-of-use table.
    pub tou_rates: TouRates,
    /// Seasonal overrides.
    pub seasonal_rates: SeasonalRates,
}

impl Default for EnergyRates {
    fn default() -> Self {
        let equipment_rates = [
            ("Compressor", 0.15),
            ("Chiller", 0.14),
            ("HVAC", 0.12),
            ("Pump", 0.11),
            ("Lighting", 0.10),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_owned(), rate))
        .collect();
        Self {
            equipment_rates,
            tou_rates: TouRates {
                on_peak: 0.28,
                mid_peak: 0.18,
                super_off_peak: 0.08,
                off_peak: 0.12,
            },
            seasonal_rates: SeasonalRates {
                summer: SummerRates {
                    on_peak: 0.32,
                    mid_peak: 0.20,
                },
                winter: WinterRates {
                    mid_peak: 0.16,
                    super_off_peak: 0.07,
                },
            },
        }
    }
}

// Non-numeric entries in a stored map are dropped instead of failing the
// whole document.
fn numeric_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, rate)| rate.as_f64().map(|rate| (name, rate)))
        .collect())
}

/// One update to the energy rate configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyRateUpdate {
    /// Replace everything.
    Replace(EnergyRates),
    /// Set (or add) one equipment type's rate.
    Equipment {
        /// Equipment type, e.g. `Compressor`.
        name: String,
        /// New rate.
        rate: f64,
    },
    /// Set one TOU rate.
    TimeOfUse {
        /// Period to set.
        period: TouPeriod,
        /// New rate.
        rate: f64,
    },
    /// Set one seasonal override. Pairs without an entry are ignored.
    Seasonal {
        /// Season to set.
        season: Season,
        /// Period within the season.
        period: TouPeriod,
        /// New rate.
        rate: f64,
    },
}

impl Preference for EnergyRates {
    const SLOT: &'static str = slot::ENERGY_RATES;
    const OPEN_MAPS: &'static [&'static str] = &["equipmentRates"];
    type Patch = EnergyRateUpdate;

    fn apply(&mut self, patch: EnergyRateUpdate) -> bool {
        match patch {
            EnergyRateUpdate::Replace(rates) => *self = rates,
            EnergyRateUpdate::Equipment { name, rate } => {
                self.equipment_rates.insert(name, rate);
            }
            EnergyRateUpdate::TimeOfUse { period, rate } => *self.tou_rates.get_mut(period) = rate,
            EnergyRateUpdate::Seasonal {
                season,
                period,
                rate,
            } => match self.seasonal_rates.get_mut(season, period) {
                Some(slot) => *slot = rate,
                None => return false,
            },
        }
        true
    }
}

impl<S: ConfigStore> PreferenceStore<EnergyRates, S> {
    /// Replace the whole rate configuration.
    pub fn set_rates(&mut self, rates: EnergyRates) {
        self.update(EnergyRateUpdate::Replace(rates));
    }

    /// Set (or add) the rate for one equipment type.
    pub fn update_equipment_rate(&mut self, name: impl Into<String>, rate: f64) {
        self.update(EnergyRateUpdate::Equipment {
            name: name.into(),
            rate,
        });
    }

    /// Set one TOU rate.
    pub fn update_tou_rate(&mut self, period: TouPeriod, rate: f64) {
        self.update(EnergyRateUpdate::TimeOfUse { period, rate });
    }

    /// Set one seasonal override. Returns `false` if the pair has no entry.
    pub fn update_seasonal_rate(&mut self, season: Season, period: TouPeriod, rate: f64) -> bool {
        self.update(EnergyRateUpdate::Seasonal {
            season,
            period,
            rate,
        })
    }

    /// Rate for one equipment type, if configured.
    pub fn equipment_rate(&self, name: &str) -> Option<f64> {
        self.get().equipment_rates.get(name).copied()
    }

    /// Rate for one TOU period.
    pub fn tou_rate(&self, period: TouPeriod) -> f64 {
        self.get().tou_rates.get(period)
    }

    /// Seasonal override, if that pair exists.
    pub fn seasonal_rate(&self, season: Season, period: TouPeriod) -> Option<f64> {
        self.get().seasonal_rates.get(season, period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equipment_update_leaves_other_groups_alone() {
        let mut rates = EnergyRates::default();
        assert!(rates.apply(EnergyRateUpdate::Equipment {
            name: "Compressor".into(),
            rate: 0.20,
        }));
        let defaults = EnergyRates::default();
        assert_eq!(rates.equipment_rates["Compressor"], 0.20);
        assert_eq!(rates.equipment_rates["Chiller"], defaults.equipment_rates["Chiller"]);
        assert_eq!(rates.tou_rates, defaults.tou_rates);
        assert_eq!(rates.seasonal_rates, defaults.seasonal_rates);
    }

    #[test]
    fn tou_update_sets_single_period() {
        let mut rates = EnergyRates::default();
        rates.apply(EnergyRateUpdate::TimeOfUse {
            period: TouPeriod::SuperOffPeak,
            rate: 0.05,
        });
        assert_eq!(rates.tou_rates.super_off_peak, 0.05);
        assert_eq!(rates.tou_rates.on_peak, 0.28);
        assert_eq!(rates.tou_rates.mid_peak, 0.18);
        assert_eq!(rates.tou_rates.off_peak, 0.12);
    }

    #[test]
    fn seasonal_update_rejects_missing_pairs() {
        let mut rates = EnergyRates::default();
        assert!(!rates.apply(EnergyRateUpdate::Seasonal {
            season: Season::Summer,
            period: TouPeriod::SuperOffPeak,
            rate: 1.0,
        }));
        assert_eq!(rates, EnergyRates::default());

        assert!(rates.apply(EnergyRateUpdate::Seasonal {
            season: Season::Winter,
            period: TouPeriod::MidPeak,
            rate: 0.21,
        }));
        assert_eq!(rates.seasonal_rates.winter.mid_peak, 0.21);
        assert_eq!(rates.seasonal_rates.winter.super_off_peak, 0.07);
    }

    #[test]
    fn negative_rates_are_not_validated() {
        let mut rates = EnergyRates::default();
        assert!(rates.apply(EnergyRateUpdate::TimeOfUse {
            period: TouPeriod::OnPeak,
            rate: -1.0,
        }));
        assert_eq!(rates.tou_rates.on_peak, -1.0);
    }

    #[test]
    fn encodes_with_camel_case_keys() {
        let json = serde_json::to_value(EnergyRates::default()).unwrap();
        assert_eq!(json["touRates"]["superOffPeak"], json!(0.08));
        assert_eq!(json["seasonalRates"]["winter"]["superOffPeak"], json!(0.07));
        assert_eq!(json["equipmentRates"]["Compressor"], json!(0.15));
    }

    #[test]
    fn non_numeric_equipment_entries_are_dropped() {
        let mut json = serde_json::to_value(EnergyRates::default()).unwrap();
        json["equipmentRates"]["Broken"] = json!("cheap");
        json["equipmentRates"]["Boiler"] = json!(0.09);
        let rates: EnergyRates = serde_json::from_value(json).unwrap();
        assert!(!rates.equipment_rates.contains_key("Broken"));
        assert_eq!(rates.equipment_rates["Boiler"], 0.09);
    }

    #[test]
    fn period_and_season_parse_loosely() {
        assert_eq!("onPeak".parse::<TouPeriod>(), Ok(TouPeriod::OnPeak));
        assert_eq!("super-off-peak".parse::<TouPeriod>(), Ok(TouPeriod::SuperOffPeak));
        assert_eq!("OFF_PEAK".parse::<TouPeriod>(), Ok(TouPeriod::OffPeak));
        assert_eq!("Winter".parse::<Season>(), Ok(Season::Winter));
        assert_eq!(
            "peak".parse::<TouPeriod>(),
            Err(ParseError::TouPeriod("peak".into()))
        );
        assert_eq!("spring".parse::<Season>(), Err(ParseError::Season("spring".into())));
    }

    #[test]
    fn seasonal_lookup_matches_table() {
        let seasonal = EnergyRates::default().seasonal_rates;
        assert_eq!(seasonal.get(Season::Summer, TouPeriod::OnPeak), Some(0.32));
        assert_eq!(seasonal.get(Season::Winter, TouPeriod::SuperOffPeak), Some(0.07));
        assert_eq!(seasonal.get(Season::Winter, TouPeriod::OnPeak), None);
        assert_eq!(seasonal.get(Season::Summer, TouPeriod::OffPeak), None);
    }
}
