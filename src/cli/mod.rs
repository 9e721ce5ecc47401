//! Command-line interface for mirai.
//!
//! Argument parsing lives here; `commands` runs a parsed command against the
//! diary service and `render` turns the results into text for stdout.

pub mod commands;
pub mod render;

use crate::calendar::MonthCursor;
use crate::date_codec::DiaryDate;
use crate::diary::DiaryId;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use commands::execute;

/// A diary client that shows your future self
#[derive(Parser, Debug)]
#[command(name = "mirai", about = crate::constants::APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Format of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List diaries, newest first
    List(ListArgs),

    /// Show one diary with its generated image
    Show(ShowArgs),

    /// Write a new diary (format: YYYY-MM-DD or YYYYMMDD)
    Write(EntryArgs),

    /// Replace the diary written on a date
    Edit(EntryArgs),

    /// Delete a diary
    Delete {
        #[arg(long)]
        id: DiaryId,
    },

    /// Print the month calendar with days that have entries marked
    Calendar {
        /// Month to show (format: YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<MonthCursor>,

        /// Day to select
        #[arg(short, long)]
        select: Option<DiaryDate>,
    },

    /// Browse generated images from oldest to newest
    Gallery {
        /// Position on the slider, 0 is the oldest entry
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Upload a profile photo used to generate future-self images
    Upload {
        #[arg(short, long)]
        file: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Oldest first
    #[arg(long)]
    pub asc: bool,

    /// Only diaries written on this date
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub date: Option<DiaryDate>,

    /// Start of an inclusive date range
    #[arg(long, requires = "to")]
    pub from: Option<DiaryDate>,

    /// End of an inclusive date range
    #[arg(long, requires = "from")]
    pub to: Option<DiaryDate>,

    /// Case-insensitive text to look for in titles and bodies
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["date", "id"])))]
pub struct ShowArgs {
    #[arg(short, long)]
    pub date: Option<DiaryDate>,

    #[arg(long)]
    pub id: Option<DiaryId>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("content").required(true).args(["body", "file"])))]
pub struct EntryArgs {
    #[arg(short, long)]
    pub date: DiaryDate,

    /// Diary text
    #[arg(short, long)]
    pub body: Option<String>,

    /// Read the diary text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}
