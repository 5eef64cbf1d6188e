use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "weekgrid",
    version,
    about = "An hourly week planner that keeps every day's tasks on disk.",
    after_help = "Examples:\n  weekgrid show\n  weekgrid set 2025-06-16 9:00 Gym\n  weekgrid repeat 2025-06-16 9:00\n  weekgrid delete-repeats 2025-06-16 9:00\n  weekgrid clear --week 2025-06-16 --yes"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Print the week grid (default: the week containing today)
    Show(ShowArgs),
    /// Write a cell's text for a (date, hour) slot
    Set(SetArgs),
    /// Copy a cell's text to the same hour on all seven days of its week
    Repeat(CellArgs),
    /// Remove previously repeated entries for the hour across the week
    DeleteRepeats(CellArgs),
    /// Delete all stored tasks for a week
    Clear(ClearArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Any date inside the week to display (YYYY-MM-DD)
    #[arg(long = "week", value_name = "DATE")]
    pub week: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Calendar date of the cell (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: NaiveDate,

    /// Hour slot, e.g. 9:00 (the grid runs 4:00 through 21:00)
    #[arg(value_name = "HOUR")]
    pub hour: String,

    /// New cell text; omit to blank the cell
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CellArgs {
    /// Calendar date of the cell (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: NaiveDate,

    /// Hour slot, e.g. 9:00
    #[arg(value_name = "HOUR")]
    pub hour: String,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    /// Any date inside the week to clear (YYYY-MM-DD, default: today)
    #[arg(long = "week", value_name = "DATE")]
    pub week: Option<NaiveDate>,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
