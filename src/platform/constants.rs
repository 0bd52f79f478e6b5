pub const CONFIG_PATH: &str = "./config.toml";
pub const TASKS_FILE: &str = "tasks.json";
pub const HISTORY_FILE: &str = "history.json";
pub const LOG_FILE: &str = "log.json";
pub const STATE_LOCK_FILE: &str = "treesync.lock";
pub const LOG_FILE_PREFIX: &str = "treesync.log";
pub const MAX_FILE_OPERATIONS: usize = 4096;
