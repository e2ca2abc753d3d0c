use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use bld_core::{CornerSlot, Criteria, EdgeSlot, batch::DEFAULT_TIME_BUDGET};
use color_eyre::eyre::{Result, WrapErr};
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 25;

/// Settings read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub edge_buffer: EdgeSlot,
    pub corner_buffer: CornerSlot,
    pub time_budget_secs: u64,
    /// Moves per generated random scramble.
    pub scramble_length: usize,
    pub criteria: Criteria,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            edge_buffer: EdgeSlot::default(),
            corner_buffer: CornerSlot::default(),
            time_budget_secs: DEFAULT_TIME_BUDGET.as_secs(),
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            criteria: Criteria::default(),
        }
    }
}

impl Config {
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_budget_secs)
    }

    /// Reads the configuration from `explicit` if given. Otherwise the user
    /// config directory is tried, and the defaults are used when nothing is
    /// there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_owned(),
            None => match default_path().filter(|path| path.is_file()) {
                Some(path) => path,
                None => {
                    debug!("No configuration file found, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        info!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let config = Config::parse(&text)
            .wrap_err_with(|| format!("Invalid configuration in {}", path.display()))?;
        debug!("{config:?}");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

fn default_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("bld-scrambler");
    path.push("config.toml");
    Some(path)
}
