use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ini::Ini;

use crate::UPCOMING_WINDOW_DAYS;

pub const CONFIG_FILE: &str = "config.ini";

// User settings, read from an optional INI file:
// ```
// [storage]
// dir = /home/me/contacts
//
// [birthdays]
// window = 7
// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Where the address book is stored. None means the XDG data dir.
    pub data_dir: Option<PathBuf>,
    // How many days ahead `birthdays` looks.
    pub birthday_window: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            birthday_window: UPCOMING_WINDOW_DAYS,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        log::debug!("Loading config from {path:?}");
        let ini = Ini::load_from_file(path).with_context(|| format!("Reading {path:?}"))?;
        Self::from_ini(&ini).with_context(|| format!("Invalid config {path:?}"))
    }

    pub fn from_ini(ini: &Ini) -> Result<Config> {
        let mut config = Config::default();
        for (section, props) in ini.iter() {
            for (k, v) in props.iter() {
                match (section, k) {
                    (Some("storage"), "dir") => config.data_dir = Some(v.into()),
                    (Some("birthdays"), "window") => {
                        config.birthday_window = v
                            .trim()
                            .parse()
                            .with_context(|| format!("Parsing birthday window '{v}'"))?
                    }
                    _ => log::warn!("Ignoring unknown config key {section:?}.{k}"),
                }
            }
        }
        Ok(config)
    }
}
