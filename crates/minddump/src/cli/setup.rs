use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Parser, Debug)]
#[command(
    name = "minddump",
    bin_name = "minddump",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Dump thoughts and schedule task reminders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides MINDDUMP_DATA and the config file)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show entries grouped by date
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Print the stored entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a thought
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Thought text (read from stdin when omitted and piped)
        text: Vec<String>,
    },

    /// Save a task and schedule its reminder
    #[command(alias = "t", display_order = 3)]
    Task {
        /// Task text (read from stdin when omitted and piped)
        text: Vec<String>,

        /// Reminder date, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Reminder time, HH:MM (default: now)
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
    },

    /// Delete entries by id
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Entry ids as shown by `list`
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Delete every entry
    #[command(display_order = 5)]
    Clear,

    /// Print and drop reminders that have fallen due
    #[command(display_order = 6)]
    Due,

    /// Show reminders waiting to fall due
    #[command(display_order = 7)]
    Reminders,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|e| format!("expected HH:MM: {}", e))
}
