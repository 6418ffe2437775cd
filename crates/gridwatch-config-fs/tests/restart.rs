// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use gridwatch_config_fs::FsConfigStore;
use gridwatch_prefs::{
    DisplaySettings, DisplaySettingsPatch, EnergyRates, Preferences, SettingsTab,
};
use std::fs;

#[test]
fn preferences_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut prefs = Preferences::open(FsConfigStore::at(dir.path()).unwrap());
        prefs.display.update(DisplaySettingsPatch::dark_mode(true));
        prefs.energy.update_equipment_rate("Compressor", 0.20);
        prefs.tab.update(SettingsTab::EnergyRates);
    }

    let prefs = Preferences::open(FsConfigStore::at(dir.path()).unwrap());
    assert!(prefs.display.get().dark_mode);
    assert_eq!(prefs.energy.equipment_rate("Compressor"), Some(0.20));
    assert_eq!(*prefs.tab.get(), SettingsTab::EnergyRates);
}

#[test]
fn slot_file_holds_plain_json_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut prefs = Preferences::open(FsConfigStore::at(dir.path()).unwrap());
    prefs.display.toggle_show_alerts();

    let text = fs::read_to_string(dir.path().join("displaySettings.json")).unwrap();
    assert_eq!(text, r#"{"darkMode":false,"compactView":false,"showAlerts":false}"#);
}

#[test]
fn garbage_file_is_ignored_on_open() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("energyRates.json"), b"\x00\xffnot json").unwrap();
    fs::write(dir.path().join("displaySettings.json"), b"").unwrap();

    let prefs = Preferences::open(FsConfigStore::at(dir.path()).unwrap());
    assert_eq!(*prefs.energy.get(), EnergyRates::default());
    assert_eq!(*prefs.display.get(), DisplaySettings::default());
}

#[test]
fn unwritable_directory_keeps_session_state() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("prefs");
    let mut prefs = Preferences::open(FsConfigStore::at(&base).unwrap());

    // Replace the directory with a file so every write fails.
    fs::remove_dir_all(&base).unwrap();
    fs::write(&base, b"").unwrap();

    prefs.display.update(DisplaySettingsPatch::compact_view(true));
    assert!(prefs.display.get().compact_view);
}
