use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct ConfigTable {
    #[serde(rename = "Config")]
    pub config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CopyPolicy {
    // Copy every visited file, classification only drives the counters
    #[default]
    OverwriteOnVisit,
    // Copy only files classified as new or modified
    SkipUnchanged,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub state_directory: PathBuf,   // tasks.json, history.json, log.json
    pub log_directory: PathBuf,     // rolling log files
    pub log_level: String,          // EnvFilter directive
    pub tick_interval: u64,         // second
    pub max_file_operations: usize, // number
    pub copy_policy: CopyPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_directory: PathBuf::from("."),
            log_directory: PathBuf::from("./logs"),
            log_level: String::from("info"),
            tick_interval: 1,
            max_file_operations: 64,
            copy_policy: CopyPolicy::default(),
        }
    }
}
