use crate::model::config::{Config, ConfigTable};
use crate::model::error::Error;
use crate::model::error::system::SystemError;
use crate::platform::constants::MAX_FILE_OPERATIONS;
use std::fs;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};

pub struct AppConfig {
    config: Config,
    path: PathBuf,
    defaulted: bool,
}

impl AppConfig {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let (config, defaulted) = Self::load_config_file(&path)?;
        Self::validate(&config)?;
        Ok(Self {
            config,
            path,
            defaulted,
        })
    }

    pub fn from_config(config: Config) -> Result<Self, Error> {
        Self::validate(&config)?;
        Ok(Self {
            config,
            path: PathBuf::new(),
            defaulted: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when no configuration file existed and defaults are in use.
    pub fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    fn load_config_file(path: &Path) -> Result<(Config, bool), Error> {
        let toml_string = match fs::read_to_string(path) {
            Ok(toml_string) => toml_string,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok((Config::default(), true)),
            Err(err) => return Err(SystemError::read_config_failed(path, err).into()),
        };
        let config = toml::from_str::<ConfigTable>(&toml_string)
            .map_err(|err| SystemError::invalid_config(path, err))?
            .config;
        Ok((config, false))
    }

    fn validate(config: &Config) -> Result<(), SystemError> {
        if !(1..=60).contains(&config.tick_interval) {
            return Err(SystemError::invalid_config_value("tick_interval"));
        }
        if !(1..=MAX_FILE_OPERATIONS).contains(&config.max_file_operations) {
            return Err(SystemError::invalid_config_value("max_file_operations"));
        }
        Ok(())
    }
}

impl Deref for AppConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
