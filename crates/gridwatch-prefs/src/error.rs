// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parse errors for the enum-valued keys used by rate and tab updates.

use thiserror::Error;

/// Failure to parse a key name supplied as text (CLI args, query strings).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not one of `onPeak`, `midPeak`, `superOffPeak`, `offPeak`.
    #[error("unknown time-of-use period: {0}")]
    TouPeriod(String),
    /// Not `summer` or `winter`.
    #[error("unknown season: {0}")]
    Season(String),
    /// Not a known settings tab.
    #[error("unknown settings tab: {0}")]
    SettingsTab(String),
}
