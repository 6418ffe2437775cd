// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GridWatch preferences CLI
//!
//! Inspect and edit the dashboard's stored preferences from a terminal.
//! Every command opens the slot files, restores each store, applies at most
//! one change, and prints the resulting JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridwatch_config_fs::FsConfigStore;
use gridwatch_prefs::{
    path_patch, slot, DisplaySettingsPatch, EnergyRates, Preferences, Season, SettingValue,
    TouPeriod,
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and edit GridWatch dashboard preferences")]
struct Args {
    /// Directory holding the slot files (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one slot (or all of them) as JSON
    Show {
        /// Slot name, e.g. `displaySettings`
        slot: Option<String>,
    },
    /// Set display toggles
    Display {
        /// Dark theme on/off
        #[arg(long)]
        dark_mode: Option<bool>,
        /// Compact tables on/off
        #[arg(long)]
        compact_view: Option<bool>,
        /// Alert banner on/off
        #[arg(long)]
        show_alerts: Option<bool>,
    },
    /// Edit energy rates
    Rate {
        #[command(subcommand)]
        cmd: RateCommand,
    },
    /// Read or edit user settings by dotted path
    User {
        #[command(subcommand)]
        cmd: UserCommand,
    },
    /// Select or clear the current company
    Company {
        #[command(subcommand)]
        cmd: CompanyCommand,
    },
    /// Print the settings tab to open
    Tab {
        /// Query string or URL carrying a `tab` parameter
        #[arg(long)]
        query: Option<String>,
    },
    /// Reset one slot (or every slot) to defaults
    Reset {
        /// Slot name; omit to reset everything
        slot: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RateCommand {
    /// Set the flat rate for one equipment type
    Equipment {
        name: String,
        #[arg(allow_negative_numbers = true, value_parser = finite_rate)]
        rate: f64,
    },
    /// Set one time-of-use rate
    Tou {
        period: TouPeriod,
        #[arg(allow_negative_numbers = true, value_parser = finite_rate)]
        rate: f64,
    },
    /// Set one seasonal override
    Seasonal {
        season: Season,
        period: TouPeriod,
        #[arg(allow_negative_numbers = true, value_parser = finite_rate)]
        rate: f64,
    },
    /// Replace the whole rate table from a JSON file
    Replace { file: PathBuf },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Print one setting
    Get { path: String },
    /// Set one setting; the value is parsed as JSON, falling back to text
    Set { path: String, value: String },
}

#[derive(Subcommand, Debug)]
enum CompanyCommand {
    /// Switch to a company
    Select { id: String },
    /// Forget the selection
    Clear,
}

#[allow(clippy::print_stdout)]
fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = match &args.config_dir {
        Some(dir) => FsConfigStore::at(dir)
            .with_context(|| format!("opening config dir {}", dir.display()))?,
        None => FsConfigStore::new().context("resolving platform config dir")?,
    };
    debug!(base = %store.base().display(), "opened slot store");
    let mut prefs = Preferences::open(store);

    let out = run(&mut prefs, args.cmd)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run(prefs: &mut Preferences<FsConfigStore>, cmd: Command) -> Result<Value> {
    match cmd {
        Command::Show { slot: Some(name) } => slot_json(prefs, &name),
        Command::Show { slot: None } => all_slots(prefs),
        Command::Display {
            dark_mode,
            compact_view,
            show_alerts,
        } => {
            let patch = DisplaySettingsPatch {
                dark_mode,
                compact_view,
                show_alerts,
            };
            if !prefs.display.update(patch) {
                bail!("nothing to change; pass --dark-mode, --compact-view or --show-alerts");
            }
            Ok(prefs.display.to_json()?)
        }
        Command::Rate { cmd } => {
            match cmd {
                RateCommand::Equipment { name, rate } => {
                    prefs.energy.update_equipment_rate(name, rate);
                }
                RateCommand::Tou { period, rate } => prefs.energy.update_tou_rate(period, rate),
                RateCommand::Seasonal {
                    season,
                    period,
                    rate,
                } => {
                    if !prefs.energy.update_seasonal_rate(season, period, rate) {
                        bail!("there is no {season} {period} rate");
                    }
                }
                RateCommand::Replace { file } => {
                    let text = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading {}", file.display()))?;
                    let rates: EnergyRates = serde_json::from_str(&text)
                        .with_context(|| format!("parsing energy rates from {}", file.display()))?;
                    prefs.energy.set_rates(rates);
                }
            }
            Ok(prefs.energy.to_json()?)
        }
        Command::User { cmd } => match cmd {
            UserCommand::Get { path } => match prefs.user.get().get_path(&path) {
                Some(value) => Ok(serde_json::to_value(value)?),
                None => bail!("no user setting at {path}"),
            },
            UserCommand::Set { path, value } => {
                let value = serde_json::from_str::<SettingValue>(&value)
                    .unwrap_or(SettingValue::Text(value));
                if !prefs.user.update(path_patch(&path, value)) {
                    bail!("{path} is not a known user setting of that type");
                }
                Ok(prefs.user.to_json()?)
            }
        },
        Command::Company { cmd } => {
            match cmd {
                CompanyCommand::Select { id } => prefs.company.select(id),
                CompanyCommand::Clear => prefs.company.clear(),
            }
            Ok(prefs.company.to_json()?)
        }
        Command::Tab { query } => Ok(Value::String(
            prefs.initial_tab(query.as_deref()).key().to_owned(),
        )),
        Command::Reset { slot: Some(name) } => {
            if !prefs.reset_slot(&name) {
                bail!(unknown_slot(&name));
            }
            slot_json(prefs, &name)
        }
        Command::Reset { slot: None } => {
            prefs.reset_all();
            all_slots(prefs)
        }
    }
}

// JSON has no encoding for NaN or infinities; serde_json would store `null`.
fn finite_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|err| format!("{err}"))?;
    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(format!("rate must be a finite number, got {s}"))
    }
}

fn slot_json(prefs: &Preferences<FsConfigStore>, name: &str) -> Result<Value> {
    match prefs.slot_json(name) {
        Some(json) => Ok(json?),
        None => bail!(unknown_slot(name)),
    }
}

fn all_slots(prefs: &Preferences<FsConfigStore>) -> Result<Value> {
    let mut out = Map::new();
    for name in slot::ALL {
        out.insert(name.to_owned(), slot_json(prefs, name)?);
    }
    Ok(Value::Object(out))
}

fn unknown_slot(name: &str) -> String {
    format!("unknown slot {name:?}; expected one of {}", slot::ALL.join(", "))
}
