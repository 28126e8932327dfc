use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! from_environment {
    ($config:expr, $($key:expr, $name:tt),*$(,)?) => {{
        $(
            {
                if let Ok(value) = env::var($key) {
                    match value.parse() {
                        Ok(value) => $config.$name = value,
                        Err(_) => log::warn!("Ignoring invalid value for {}: {:?}", $key, value),
                    }
                }
            }
        )*
    }};
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The directory holding the stored bracket and standings.
    pub data_dir: PathBuf,
    pub loglevel: LevelFilter,
}

impl Config {
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let buf = fs::read(path)?;

        Ok(toml::from_slice(&buf)?)
    }

    /// Reads the config file at `path`. A missing file yields the default config.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        match Self::from_file(path) {
            Err(ConfigError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            res => res,
        }
    }

    /// Overrides all fields set in the environment.
    pub fn with_environment(mut self) -> Self {
        from_environment!(self, "TB_DATA_DIR", data_dir, "TB_LOGLEVEL", loglevel);

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            loglevel: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
