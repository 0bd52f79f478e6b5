use crate::model::schedule::{Frequency, ScheduleDay, ScheduleTime};
use crate::platform::constants::CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Incremental, scheduled file-tree backup.
#[derive(Parser, Debug)]
#[command(name = "treesync", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run scheduled tasks until interrupted.
    Run,

    /// Back up a source directory into a destination directory once.
    Backup { source: PathBuf, destination: PathBuf },

    /// Show what a backup would copy.
    Preview { source: PathBuf, destination: PathBuf },

    /// Manage saved tasks.
    #[command(subcommand)]
    Task(TaskCommand),

    /// List completed runs, or show the one recorded at `--date`.
    History {
        #[arg(long)]
        date: Option<String>,
    },

    /// List runs that reported errors, or show the one recorded at `--date`.
    Log {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Create or update a task.
    Save {
        name: String,
        source: PathBuf,
        destination: PathBuf,
        /// Once, Daily or Weekly.
        #[arg(long, default_value = "Once")]
        frequency: Frequency,
        /// Time of day as HH:MM.
        #[arg(long)]
        time: ScheduleTime,
        /// Day of week, required for weekly tasks.
        #[arg(long)]
        day: Option<ScheduleDay>,
    },

    Delete { name: String },

    List,

    /// Run a saved task now.
    Run { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_weekly_task() {
        let cli = Cli::try_parse_from([
            "treesync",
            "task",
            "save",
            "photos",
            "/home/user/photos",
            "/mnt/backup",
            "--frequency",
            "weekly",
            "--time",
            "21:30",
            "--day",
            "Sunday",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from(CONFIG_PATH));
        let Command::Task(TaskCommand::Save {
            name,
            frequency,
            time,
            day,
            ..
        }) = cli.command
        else {
            panic!("expected task save");
        };
        assert_eq!(name, "photos");
        assert_eq!(frequency, Frequency::Weekly);
        assert_eq!(time, ScheduleTime::from_hm(21, 30).unwrap());
        assert_eq!(day, Some(ScheduleDay::Sunday));
    }

    #[test]
    fn rejects_malformed_time() {
        let result = Cli::try_parse_from([
            "treesync", "task", "save", "docs", "/a", "/b", "--time", "9 o'clock",
        ]);
        assert!(result.is_err());
    }
}
